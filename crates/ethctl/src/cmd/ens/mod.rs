//! `ethctl ens` subcommands.

use crate::{Context, client::RpcEnsClient};
use alloy_primitives::B256;
use clap::{Parser, Subcommand};
use ethctl_cli::opts::TransactionOpts;
use ethctl_common::ens::{namehash, normalize_domain};
use ethctl_wallets::WalletOpts;
use eyre::Result;

pub(crate) mod multiaddr;
pub(crate) mod namehash;
pub(crate) mod owner;
pub(crate) mod resolver;

pub use self::{
    multiaddr::MultiaddrSubcommand, namehash::NamehashArgs, owner::OwnerSubcommand,
    resolver::ResolverSubcommand,
};

/// Manage ENS domains.
#[derive(Debug, Subcommand)]
pub enum EnsSubcommand {
    /// Print the name hash of a domain.
    #[command(visible_alias = "nh")]
    Namehash(NamehashArgs),

    /// Query or transfer the ownership of a domain.
    #[command(subcommand)]
    Owner(OwnerSubcommand),

    /// Query, set or clear the resolver of a domain.
    #[command(subcommand)]
    Resolver(ResolverSubcommand),

    /// Query, set or clear the multiaddr record of a domain.
    #[command(subcommand)]
    Multiaddr(MultiaddrSubcommand),
}

impl EnsSubcommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Namehash(cmd) => cmd.run(ctx),
            Self::Owner(cmd) => cmd.run(ctx).await,
            Self::Resolver(cmd) => cmd.run(ctx).await,
            Self::Multiaddr(cmd) => cmd.run(ctx).await,
        }
    }
}

/// The domain a command acts on.
#[derive(Clone, Debug, Parser)]
pub struct DomainArgs {
    /// The domain, e.g. `enstest.eth`.
    #[arg(long, value_name = "NAME")]
    pub domain: String,
}

/// Options of every command that sends a transaction.
#[derive(Clone, Debug, Default, Parser)]
pub struct SendArgs {
    #[command(flatten)]
    pub wallet: WalletOpts,

    #[command(flatten)]
    pub tx: TransactionOpts,
}

/// Connects to the configured node. Called once the arguments passed their checks.
pub(crate) fn connect(ctx: &Context, wallet: WalletOpts) -> Result<RpcEnsClient> {
    if ctx.config.eth_rpc_url.is_none() {
        ctx.shell.warn(format_args!(
            "no RPC URL configured, using {}",
            ctx.config.get_rpc_url_or_localhost_http()
        ))?;
    }
    RpcEnsClient::new(&ctx.config, ctx.registry(), wallet)
}

/// Checks the preconditions of a read and returns the domain and its node.
pub(crate) fn read_target(ctx: &Context, domain: &str) -> Result<(String, B256)> {
    ctx.ensure_online()?;
    let domain = normalize_domain(Some(domain))?;
    let node = namehash(&domain);
    Ok((domain, node))
}
