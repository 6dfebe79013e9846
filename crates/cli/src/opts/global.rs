use clap::Parser;
use ethctl_common::shell::{Shell, Verbosity};
use ethctl_config::{
    Config,
    figment::{
        self, Metadata, Profile,
        value::{Dict, Map},
    },
};
use eyre::Result;

/// Global arguments for the CLI.
#[derive(Clone, Debug, Default, Parser)]
pub struct GlobalArgs {
    /// Print debug logs of every step to stderr.
    #[arg(help_heading = "Display options", global = true, short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Do not print anything. The exit code reports the result.
    #[arg(help_heading = "Display options", global = true, short, long, alias = "silent")]
    pub quiet: bool,

    /// Fail every command that needs the network.
    #[arg(help_heading = "Network options", global = true, long, env = "ETHCTL_OFFLINE")]
    pub offline: bool,
}

impl GlobalArgs {
    /// The verbosity requested on the command line.
    pub fn verbosity(&self) -> Verbosity {
        match (self.verbose, self.quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }

    /// The shell commands print through.
    pub fn shell(&self) -> Shell {
        Shell::new(self.verbosity())
    }

    /// Initialize the global logger.
    pub fn init(&self) {
        crate::utils::subscriber(self.verbosity());
    }

    /// Creates the runtime driving a single command.
    pub fn tokio_runtime(&self) -> Result<tokio::runtime::Runtime> {
        Ok(tokio::runtime::Builder::new_current_thread().enable_all().build()?)
    }

    pub fn dict(&self) -> Dict {
        let mut dict = Dict::new();
        if self.offline {
            dict.insert("offline".into(), true.into());
        }
        dict
    }
}

impl figment::Provider for GlobalArgs {
    fn metadata(&self) -> Metadata {
        Metadata::named("GlobalArgs")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Ok(Map::from([(Config::selected_profile(), self.dict())]))
    }
}
