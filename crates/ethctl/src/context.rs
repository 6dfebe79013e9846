use alloy_primitives::Address;
use ethctl_common::{
    ens::ENS_ADDRESS,
    errors::EnsError,
    shell::Shell,
};
use ethctl_config::Config;

/// Everything a command needs from the invocation.
#[derive(Clone, Debug, Default)]
pub struct Context {
    pub config: Config,
    pub shell: Shell,
}

impl Context {
    pub fn new(config: Config, shell: Shell) -> Self {
        Self { config, shell }
    }

    /// Fails in offline mode.
    pub fn ensure_online(&self) -> Result<(), EnsError> {
        if self.config.offline { Err(EnsError::Offline) } else { Ok(()) }
    }

    /// The ENS registry, the canonical one unless configured otherwise.
    pub fn registry(&self) -> Address {
        self.config.ens_registry.unwrap_or(ENS_ADDRESS)
    }
}
