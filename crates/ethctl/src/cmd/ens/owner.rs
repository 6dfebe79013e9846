use super::{DomainArgs, SendArgs, connect, read_target};
use crate::{
    Context,
    tx::{self, TxIntent, lookup_owner},
};
use alloy_primitives::{Address, B256};
use clap::Subcommand;
use ethctl_common::{
    ens::{EnsClient, EnsWrite, TxOverrides},
    errors::EnsError,
};
use ethctl_wallets::WalletOpts;
use eyre::Result;

/// `ethctl ens owner` subcommands.
#[derive(Debug, Subcommand)]
pub enum OwnerSubcommand {
    /// Print the owner of a domain.
    Get {
        #[command(flatten)]
        domain: DomainArgs,
    },

    /// Transfer a domain to a new owner.
    Set {
        #[command(flatten)]
        domain: DomainArgs,

        /// The new owner.
        #[arg(long, value_name = "ADDRESS")]
        owner: Address,

        #[command(flatten)]
        send: SendArgs,
    },
}

impl OwnerSubcommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Get { domain } => {
                let (domain, node) = read_target(ctx, &domain.domain)?;
                let client = connect(ctx, WalletOpts::default())?;
                get(ctx, &client, &domain, node).await
            }
            Self::Set { domain, owner, send } => {
                let intent = set(domain.domain, owner, send.tx.overrides()?);
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
    let owner = lookup_owner(client, domain, node).await?;
    ctx.shell.println(owner)?;
    Ok(())
}

pub(crate) fn set(domain: String, owner: Address, overrides: TxOverrides) -> TxIntent<Address> {
    TxIntent {
        group: "ens/owner",
        command: "set",
        domain: Some(domain),
        needs_resolver: false,
        overrides,
        validate: Box::new(move || -> Result<Address, EnsError> {
            if owner.is_zero() {
                return Err(EnsError::ZeroAddress("--owner"));
            }
            Ok(owner)
        }),
        build: |owner, target| Ok(EnsWrite::SetOwner { node: target.node, owner }),
    }
}
