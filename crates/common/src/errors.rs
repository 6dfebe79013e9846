//! Commonly used errors

use std::error::Error;

/// Precondition failures of the ENS commands.
#[derive(Debug, thiserror::Error)]
pub enum EnsError {
    #[error("offline mode is not supported by this command")]
    Offline,
    #[error("--domain is required")]
    MissingDomain,
    #[error("owner of {0} is not set")]
    OwnerNotSet(String),
    #[error("no resolver for {0}")]
    NoResolver(String),
    #[error("no multiaddr for {0}")]
    NoMultiaddr(String),
    #[error("invalid multiaddr {value}")]
    InvalidMultiaddr {
        value: String,
        #[source]
        source: multiaddr::Error,
    },
    #[error("{flag} must not be the zero address{hint}", flag = .0, hint = clear_hint(.0))]
    ZeroAddress(&'static str),
}

fn clear_hint(what: &str) -> &'static str {
    if what == "--resolver" { "; use `ens resolver clear` to remove it" } else { "" }
}

/// Displays a chain of errors in a single line.
pub fn display_chain(error: &(dyn Error + 'static)) -> String {
    dedup_chain(error).join("; ")
}

/// Deduplicates a chain of errors.
///
/// Wrapped errors often repeat their source in their own message (`msg1: msg2` caused by `msg2`);
/// causes already contained in the previous message are dropped.
pub fn dedup_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = all_sources(error);
    causes.dedup_by(|b, a| a.contains(b.as_str()));
    causes
}

fn all_sources(err: &(dyn Error + 'static)) -> Vec<String> {
    let mut causes = Vec::new();
    let mut current = Some(err);
    while let Some(err) = current {
        causes.push(err.to_string().trim().to_string());
        current = err.source();
    }
    causes
}
