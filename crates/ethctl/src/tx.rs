//! The pipeline shared by every write command.
//!
//! 1. preconditions: online, a domain, well-formed arguments; no network call before these pass
//! 2. the domain's owner, which must be set
//! 3. the domain's resolver, for writes addressed to it
//! 4. transaction options for the owner, unlocking its key
//! 5. exactly one contract write, whose hash is logged and printed

use crate::Context;
use alloy_primitives::{Address, B256, Bytes};
use ethctl_common::{
    ens::{
        EnsClient, EnsWrite, SentTransaction, TxOverrides, decode_multiaddr, namehash,
        normalize_domain,
    },
    errors::EnsError,
};
use eyre::{Result, WrapErr};

/// A resolved domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub domain: String,
    pub node: B256,
    pub owner: Address,
    /// Only looked up for writes addressed to the resolver.
    pub resolver: Option<Address>,
}

impl Target {
    /// The domain's resolver.
    pub fn resolver(&self) -> Result<Address, EnsError> {
        self.resolver.ok_or_else(|| EnsError::NoResolver(self.domain.clone()))
    }
}

/// One write command.
pub struct TxIntent<T> {
    /// Log group, e.g. `ens/resolver`.
    pub group: &'static str,
    /// Subcommand name, e.g. `set`.
    pub command: &'static str,
    pub domain: Option<String>,
    pub needs_resolver: bool,
    pub overrides: TxOverrides,
    /// Checks the arguments of the write. Runs before any network call.
    pub validate: Box<dyn FnOnce() -> Result<T, EnsError> + Send>,
    /// Builds the write from the validated arguments.
    pub build: fn(T, &Target) -> Result<EnsWrite, EnsError>,
}

/// A write whose arguments passed every check that needs no network.
pub struct Prepared<T> {
    group: &'static str,
    command: &'static str,
    domain: String,
    needs_resolver: bool,
    overrides: TxOverrides,
    value: T,
    build: fn(T, &Target) -> Result<EnsWrite, EnsError>,
}

/// Checks the preconditions of `intent` in order: online, a domain, valid arguments.
pub fn prepare<T>(ctx: &Context, intent: TxIntent<T>) -> Result<Prepared<T>> {
    let TxIntent { group, command, domain, needs_resolver, overrides, validate, build } = intent;

    ctx.ensure_online()?;
    let domain = normalize_domain(domain.as_deref())?;
    let value = validate()?;
    Ok(Prepared { group, command, domain, needs_resolver, overrides, value, build })
}

/// Resolves the domain of `prepared` and sends its write, printing the hash unless quiet.
pub async fn submit<T, C>(
    ctx: &Context,
    client: &C,
    prepared: Prepared<T>,
) -> Result<SentTransaction>
where
    C: EnsClient + ?Sized,
{
    let Prepared { group, command, domain, needs_resolver, overrides, value, build } = prepared;

    let node = namehash(&domain);
    let owner = lookup_owner(client, &domain, node).await?;
    let resolver =
        if needs_resolver { Some(lookup_resolver(client, &domain, node).await?) } else { None };
    let target = Target { domain, node, owner, resolver };
    trace!(?target, group, command, "resolved domain");

    let write = build(value, &target)?;
    let opts = client
        .tx_opts(owner, &overrides)
        .await
        .wrap_err("failed to generate transaction options")?;
    let sent = client.submit(opts, write.clone()).await.wrap_err("failed to send transaction")?;

    log_sent(group, command, &target.domain, &write, &sent);
    ctx.shell.println(format!("{:#x}", sent.hash))?;
    Ok(sent)
}

/// [`prepare`]s and [`submit`]s `intent` against `client`.
pub async fn execute<T, C>(
    ctx: &Context,
    client: &C,
    intent: TxIntent<T>,
) -> Result<SentTransaction>
where
    C: EnsClient + ?Sized,
{
    let prepared = prepare(ctx, intent)?;
    submit(ctx, client, prepared).await
}

/// The registered owner of `domain`.
pub async fn lookup_owner<C: EnsClient + ?Sized>(
    client: &C,
    domain: &str,
    node: B256,
) -> Result<Address> {
    let owner = client.owner(node).await.wrap_err("cannot obtain owner")?;
    if owner.is_zero() {
        return Err(EnsError::OwnerNotSet(domain.to_string()).into());
    }
    Ok(owner)
}

/// The resolver of `domain`.
pub async fn lookup_resolver<C: EnsClient + ?Sized>(
    client: &C,
    domain: &str,
    node: B256,
) -> Result<Address> {
    let resolver = client.resolver(node).await.wrap_err("cannot obtain resolver")?;
    if resolver.is_zero() {
        return Err(EnsError::NoResolver(domain.to_string()))
            .wrap_err("cannot obtain resolver");
    }
    Ok(resolver)
}

macro_rules! sent {
    ($group:expr, $command:expr, $domain:expr, $sent:expr, $($fields:tt)*) => {
        info!(
            target: "ethctl::ens",
            group = $group,
            command = $command,
            domain = %$domain,
            $($fields)*
            networkid = $sent.chain_id,
            gas = $sent.gas_limit,
            gasprice = $sent.gas_price,
            transactionid = %$sent.hash,
            "transaction sent"
        )
    };
}

fn log_sent(group: &str, command: &str, domain: &str, write: &EnsWrite, sent: &SentTransaction) {
    match write {
        EnsWrite::SetOwner { owner, .. } => {
            sent!(group, command, domain, sent, owner = %owner,)
        }
        EnsWrite::SetResolver { resolver, .. } => {
            sent!(group, command, domain, sent, resolver = %resolver,)
        }
        EnsWrite::SetMultiaddr { resolver, multiaddr, .. } => {
            sent!(
                group,
                command,
                domain,
                sent,
                resolver = %resolver,
                multiaddr = %display_multiaddr(multiaddr),
            )
        }
    }
}

fn display_multiaddr(bytes: &Bytes) -> String {
    decode_multiaddr(bytes).map(|ma| ma.to_string()).unwrap_or_else(|_| bytes.to_string())
}
