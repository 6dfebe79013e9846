use crate::{
    error::WalletSignerError,
    utils::{create_keystore_signer, create_private_key_signer, read_passphrase, resolve_keystore},
};
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use clap::Parser;
use eyre::Result;
use std::{io::IsTerminal, path::PathBuf};

/// The wallet options can either be:
/// 1. Private Key (cleartext in CLI)
/// 2. Keystore (a file, or a directory holding the owner's keystore) unlocked with a passphrase
#[derive(Clone, Debug, Default, Parser)]
#[command(next_help_heading = "Wallet options")]
pub struct WalletOpts {
    /// Use the provided private key.
    #[arg(long, value_name = "RAW_PRIVATE_KEY", conflicts_with_all = ["passphrase", "passphrase_file"])]
    pub private_key: Option<String>,

    /// Use the keystore file, or search the given directory for the owner's keystore.
    ///
    /// Defaults to the configured keystore, then `~/.ethctl/keystores`.
    #[arg(long = "keystore", value_name = "PATH", env = "ETH_KEYSTORE")]
    pub keystore_path: Option<PathBuf>,

    /// The passphrase that unlocks the keystore.
    #[arg(long, value_name = "PASSPHRASE")]
    pub passphrase: Option<String>,

    /// File holding the passphrase that unlocks the keystore.
    #[arg(long, value_name = "PASSPHRASE_FILE", conflicts_with = "passphrase")]
    pub passphrase_file: Option<PathBuf>,
}

impl WalletOpts {
    /// Returns a signer able to sign for `owner`.
    ///
    /// A raw private key wins over the keystore. Otherwise the keystore is located, either the one
    /// passed on the command line or `default_keystore`, and unlocked, prompting for the passphrase
    /// when none was given and stdin is a terminal.
    pub fn signer_for(
        &self,
        owner: Address,
        default_keystore: Option<PathBuf>,
    ) -> Result<PrivateKeySigner> {
        let signer = if let Some(private_key) = &self.private_key {
            create_private_key_signer(private_key)?
        } else {
            let keystore_dir = self
                .keystore_path
                .clone()
                .or(default_keystore)
                .ok_or(WalletSignerError::NoSigner)?;
            let keystore = resolve_keystore(&keystore_dir, owner)?;
            let passphrase = read_passphrase(
                self.passphrase.as_deref(),
                self.passphrase_file.as_deref(),
                std::io::stdin().is_terminal(),
            )?
            .ok_or(WalletSignerError::NoSigner)?;
            create_keystore_signer(&keystore, &passphrase)?
        };

        if signer.address() != owner {
            return Err(WalletSignerError::NotOwner { signer: signer.address(), owner }.into());
        }
        debug!(signer = %signer.address(), "unlocked signer");
        Ok(signer)
    }
}
