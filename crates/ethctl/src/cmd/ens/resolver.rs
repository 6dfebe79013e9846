use super::{DomainArgs, SendArgs, connect, read_target};
use crate::{
    Context,
    tx::{self, TxIntent, lookup_resolver},
};
use alloy_primitives::{Address, B256};
use clap::Subcommand;
use ethctl_common::{
    ens::{EnsClient, EnsWrite, TxOverrides},
    errors::EnsError,
};
use ethctl_wallets::WalletOpts;
use eyre::Result;

/// `ethctl ens resolver` subcommands.
#[derive(Debug, Subcommand)]
pub enum ResolverSubcommand {
    /// Print the resolver of a domain.
    Get {
        #[command(flatten)]
        domain: DomainArgs,
    },

    /// Point a domain at a resolver contract.
    Set {
        #[command(flatten)]
        domain: DomainArgs,

        /// The resolver contract.
        #[arg(long, value_name = "ADDRESS")]
        resolver: Address,

        #[command(flatten)]
        send: SendArgs,
    },

    /// Remove the resolver of a domain.
    Clear {
        #[command(flatten)]
        domain: DomainArgs,

        #[command(flatten)]
        send: SendArgs,
    },
}

impl ResolverSubcommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Get { domain } => {
                let (domain, node) = read_target(ctx, &domain.domain)?;
                let client = connect(ctx, WalletOpts::default())?;
                get(ctx, &client, &domain, node).await
            }
            Self::Set { domain, resolver, send } => {
                let intent = set(domain.domain, resolver, send.tx.overrides()?);
                let prepared = tx::prepare(ctx, intent)?;
                let client = connect(ctx, send.wallet)?;
                tx::submit(ctx, &client, prepared).await?;
                Ok(())
            }
            Self::Clear { domain, send } => {
                let intent = clear(domain.domain, send.tx.overrides()?);
                let prepared = tx::prepare(ctx, intent)?;
                let client = connect(ctx, send.wallet)?;
                tx::submit(ctx, &client, prepared).await?;
                Ok(())
            }
        }
    }
}

pub(crate) async fn get<C>(ctx: &Context, client: &C, domain: &str, node: B256) -> Result<()>
where
    C: EnsClient + ?Sized,
{
    let resolver = lookup_resolver(client, domain, node).await?;
    ctx.shell.println(resolver)?;
    Ok(())
}

pub(crate) fn set(domain: String, resolver: Address, overrides: TxOverrides) -> TxIntent<Address> {
    TxIntent {
        group: "ens/resolver",
        command: "set",
        domain: Some(domain),
        needs_resolver: false,
        overrides,
        validate: Box::new(move || -> Result<Address, EnsError> {
            if resolver.is_zero() {
                return Err(EnsError::ZeroAddress("--resolver"));
            }
            Ok(resolver)
        }),
        build: |resolver, target| Ok(EnsWrite::SetResolver { node: target.node, resolver }),
    }
}

/// Only ever writes the zero address.
pub(crate) fn clear(domain: String, overrides: TxOverrides) -> TxIntent<()> {
    TxIntent {
        group: "ens/resolver",
        command: "clear",
        domain: Some(domain),
        needs_resolver: false,
        overrides,
        validate: Box::new(|| -> Result<(), EnsError> { Ok(()) }),
        build: |(), target| {
            Ok(EnsWrite::SetResolver { node: target.node, resolver: Address::ZERO })
        },
    }
}
