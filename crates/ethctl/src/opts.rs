use crate::cmd::ens::EnsSubcommand;
use clap::{Parser, Subcommand};
use ethctl_cli::{
    opts::{GlobalArgs, RpcOpts},
    utils::LoadConfig,
};
use ethctl_config::{Config, figment::Figment};

/// Manage ENS domains from the command line.
#[derive(Debug, Parser)]
#[command(name = "ethctl", version, next_display_order = None)]
pub struct Ethctl {
    /// Include the global arguments.
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub rpc: RpcOpts,

    #[command(subcommand)]
    pub cmd: EthctlSubcommand,
}

impl LoadConfig for Ethctl {
    fn figment(&self) -> Figment {
        Config::figment().merge(&self.global).merge(&self.rpc)
    }
}

#[derive(Debug, Subcommand)]
pub enum EthctlSubcommand {
    /// Ethereum Name Service commands.
    #[command(subcommand)]
    Ens(EnsSubcommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ethctl_config::figment;

    #[test]
    fn verify_cli() {
        Ethctl::command().debug_assert();
    }

    #[test]
    fn domain_is_required() {
        let err = Ethctl::try_parse_from(["ethctl", "ens", "resolver", "clear"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn private_key_conflicts_with_passphrase() {
        let res = Ethctl::try_parse_from([
            "ethctl",
            "ens",
            "owner",
            "set",
            "--domain",
            "enstest.eth",
            "--owner",
            "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
            "--private-key",
            "0x01",
            "--passphrase",
            "secret",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("HOME", jail.directory().display().to_string());
            let args = Ethctl::parse_from([
                "ethctl",
                "ens",
                "multiaddr",
                "set",
                "--domain",
                "enstest.eth",
                "--multiaddr",
                "/ip4/1.2.3.4",
                "--gas-price",
                "2gwei",
                "--offline",
                "-q",
                "-r",
                "localhost:8545",
            ]);
            assert!(args.global.quiet);
            let config = args.load_config().unwrap();
            assert!(config.offline);
            assert_eq!(config.eth_rpc_url.as_deref(), Some("localhost:8545"));
            Ok(())
        });
    }
}
