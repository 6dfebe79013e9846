use alloy_primitives::Address;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `$` anchor missing?"
    )]
    ExistsAsEnvVar(String),
}

/// Failures to unlock the signer of a domain owner.
#[derive(Debug, thiserror::Error)]
pub enum WalletSignerError {
    #[error("no signer configured: pass --passphrase, --passphrase-file or --private-key")]
    NoSigner,
    #[error("keystore `{0}` does not exist")]
    MissingKeystore(PathBuf),
    #[error("no keystore for {address} in `{dir}`")]
    KeystoreNotFound { address: Address, dir: PathBuf },
    #[error("signer {signer} does not control {owner}")]
    NotOwner { signer: Address, owner: Address },
}
