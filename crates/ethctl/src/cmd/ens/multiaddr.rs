use super::{DomainArgs, SendArgs, connect, read_target};
use crate::{
    Context,
    tx::{self, TxIntent, lookup_resolver},
};
use alloy_primitives::{B256, Bytes};
use clap::Subcommand;
use ethctl_common::{
    ens::{EnsClient, EnsWrite, TxOverrides, decode_multiaddr, parse_multiaddr},
    errors::EnsError,
};
use ethctl_wallets::WalletOpts;
use eyre::{Result, WrapErr};

/// `ethctl ens multiaddr` subcommands.
#[derive(Debug, Subcommand)]
pub enum MultiaddrSubcommand {
    /// Print the multiaddr record of a domain.
    Get {
        #[command(flatten)]
        domain: DomainArgs,
    },

    /// Set the multiaddr record of a domain on its resolver.
    Set {
        #[command(flatten)]
        domain: DomainArgs,

        /// The multiaddr, e.g. `/ip4/10.0.0.1/tcp/30303`.
        #[arg(long, value_name = "MULTIADDR")]
        multiaddr: String,

        #[command(flatten)]
        send: SendArgs,
    },

    /// Remove the multiaddr record of a domain.
    Clear {
        #[command(flatten)]
        domain: DomainArgs,

        #[command(flatten)]
        send: SendArgs,
    },
}

impl MultiaddrSubcommand {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Get { domain } => {
                let (domain, node) = read_target(ctx, &domain.domain)?;
                let client = connect(ctx, WalletOpts::default())?;
                get(ctx, &client, &domain, node).await
            }
            Self::Set { domain, multiaddr, send } => {
                let intent = set(domain.domain, multiaddr, send.tx.overrides()?);
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
    let record = client.multiaddr(resolver, node).await.wrap_err("cannot obtain multiaddr")?;
    if record.is_empty() {
        return Err(EnsError::NoMultiaddr(domain.to_string()).into());
    }
    let multiaddr = decode_multiaddr(&record)
        .wrap_err_with(|| format!("invalid multiaddr record {record} for {domain}"))?;
    ctx.shell.println(multiaddr)?;
    Ok(())
}

pub(crate) fn set(domain: String, multiaddr: String, overrides: TxOverrides) -> TxIntent<Bytes> {
    TxIntent {
        group: "ens/multiaddr",
        command: "set",
        domain: Some(domain),
        needs_resolver: true,
        overrides,
        validate: Box::new(move || -> Result<Bytes, EnsError> {
            Ok(parse_multiaddr(&multiaddr)?.to_vec().into())
        }),
        build: |multiaddr, target| {
            let resolver = target.resolver()?;
            Ok(EnsWrite::SetMultiaddr { resolver, node: target.node, multiaddr })
        },
    }
}

pub(crate) fn clear(domain: String, overrides: TxOverrides) -> TxIntent<()> {
    TxIntent {
        group: "ens/multiaddr",
        command: "clear",
        domain: Some(domain),
        needs_resolver: true,
        overrides,
        validate: Box::new(|| -> Result<(), EnsError> { Ok(()) }),
        build: |(), target| {
            Ok(EnsWrite::SetMultiaddr {
                resolver: target.resolver()?,
                node: target.node,
                multiaddr: Bytes::new(),
            })
        },
    }
}
