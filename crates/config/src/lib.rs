//! # ethctl-config
//!
//! Layered configuration for `ethctl`.
//!
//! Values are merged, lowest precedence first, from the built-in defaults, the global
//! `~/.ethctl/ethctl.toml`, a local `ethctl.toml`, `ETHCTL_*` environment variables and finally
//! whatever the command line provides.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::Address;
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

pub use figment;

mod error;
pub use error::{ExtractConfigError, FAILED_TO_EXTRACT_CONFIG_MSG};

/// ethctl configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The selected profile. **(default: _default_ `default`)**
    ///
    /// **Note:** This field is never serialized nor deserialized. When a `Config` is merged into a
    /// `Figment` as a `Provider`, this profile is selected on the `Figment`. When a `Config` is
    /// extracted, this field is set to the extracting Figment's selected `Profile`.
    #[serde(skip)]
    pub profile: Profile,

    /// The JSON-RPC endpoint of the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eth_rpc_url: Option<String>,

    /// The chain id used for signing. Queried from the node when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    /// Refuse to run any command that requires network access.
    pub offline: bool,

    /// Keystore file, or directory searched for the signer's keystore.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore: Option<PathBuf>,

    /// Address of the ENS registry, the canonical deployment when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ens_registry: Option<Address>,

    /// Timeout for a single RPC request, in seconds.
    pub rpc_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: Self::DEFAULT_PROFILE,
            eth_rpc_url: None,
            chain_id: None,
            offline: false,
            keystore: None,
            ens_registry: None,
            rpc_timeout: Self::DEFAULT_RPC_TIMEOUT,
        }
    }
}

impl Config {
    /// The default profile: "default"
    pub const DEFAULT_PROFILE: Profile = Profile::const_new("default");

    /// File name of config toml file
    pub const FILE_NAME: &'static str = "ethctl.toml";

    /// The name of the directory ethctl reserves for itself under the user's home directory: `~`
    pub const ETHCTL_DIR_NAME: &'static str = ".ethctl";

    /// Default endpoint used when nothing else is configured.
    pub const DEFAULT_RPC_URL: &'static str = "http://localhost:8545";

    /// Default per-request timeout in seconds.
    pub const DEFAULT_RPC_TIMEOUT: u64 = 45;

    /// Returns the current `Config`
    ///
    /// See [`figment`](Self::figment) for more details.
    pub fn load() -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment())
    }

    /// Attempts to extract a `Config` from `provider`, returning the result.
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        let figment = Figment::from(provider);
        trace!("load config with provider: {:?}", figment.metadata().collect::<Vec<_>>());
        let mut config = figment.extract::<Self>().map_err(ExtractConfigError::new)?;
        config.profile = figment.profile().clone();
        Ok(config)
    }

    /// Returns the default figment
    ///
    /// The default figment reads from the following sources, in ascending priority order:
    ///
    ///   1. [`Config::default()`] (see [defaults](#defaults))
    ///   2. `~/.ethctl/ethctl.toml`
    ///   3. `ethctl.toml` in the current directory
    ///   4. `ETHCTL_` prefixed environment variables
    ///
    /// The profile selected is the value set in the `ETHCTL_PROFILE` environment variable. If it
    /// is not set, it defaults to `default`.
    pub fn figment() -> Figment {
        Self::default().to_figment()
    }

    /// Returns the populated [Figment] with `self` as the base layer.
    pub fn to_figment(self) -> Figment {
        let mut figment = Figment::from(self).select(Self::selected_profile());

        if let Some(global_toml) = Self::ethctl_dir_toml().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_toml).nested());
        }

        // env goes into the selected profile, so command line providers merged later still win
        let env = Env::prefixed("ETHCTL_").ignore(&["PROFILE"]).profile(Self::selected_profile());
        figment.merge(Toml::file(Self::FILE_NAME).nested()).merge(env)
    }

    /// Returns the selected profile
    ///
    /// If the `ETHCTL_PROFILE` env variable is not set, this returns the `DEFAULT_PROFILE`
    pub fn selected_profile() -> Profile {
        Profile::from_env_or("ETHCTL_PROFILE", Self::DEFAULT_PROFILE)
    }

    /// Returns the configured rpc url or `"http://localhost:8545"`.
    pub fn get_rpc_url_or_localhost_http(&self) -> &str {
        self.eth_rpc_url.as_deref().unwrap_or(Self::DEFAULT_RPC_URL)
    }

    /// Returns the per-request timeout.
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout)
    }

    /// Returns the configured keystore, falling back to `~/.ethctl/keystores`.
    pub fn keystore_path(&self) -> Option<PathBuf> {
        self.keystore.clone().or_else(Self::ethctl_keystores_dir)
    }

    /// Returns the path to ethctl's global TOML file: `~/.ethctl/ethctl.toml`.
    pub fn ethctl_dir_toml() -> Option<PathBuf> {
        Self::ethctl_dir().map(|p| p.join(Self::FILE_NAME))
    }

    /// Returns the path to ethctl's config dir: `~/.ethctl/`.
    pub fn ethctl_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(Self::ETHCTL_DIR_NAME))
    }

    /// Returns the path to ethctl's keystores dir: `~/.ethctl/keystores`.
    pub fn ethctl_keystores_dir() -> Option<PathBuf> {
        Some(Self::ethctl_dir()?.join("keystores"))
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("ethctl config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }

    fn profile(&self) -> Option<Profile> {
        Some(self.profile.clone())
    }
}
