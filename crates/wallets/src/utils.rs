use crate::error::{PrivateKeyError, WalletSignerError};
use alloy_primitives::{Address, B256, hex::FromHex};
use alloy_signer_local::PrivateKeySigner;
use eyre::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

fn ensure_pk_not_env(pk: &str) -> Result<()> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()).into());
    }
    Ok(())
}

/// Validates and sanitizes user inputs, returning the configured [PrivateKeySigner].
pub fn create_private_key_signer(private_key_str: &str) -> Result<PrivateKeySigner> {
    let Ok(private_key) = B256::from_hex(private_key_str) else {
        ensure_pk_not_env(private_key_str)?;
        eyre::bail!("Failed to decode private key")
    };
    match PrivateKeySigner::from_bytes(&private_key) {
        Ok(pk) => Ok(pk),
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            eyre::bail!("Failed to create wallet from private key: {err}")
        }
    }
}

/// Returns the keystore to unlock for `address`.
///
/// A file is returned as is. A directory is searched with [find_keystore_by_address].
pub fn resolve_keystore(path: &Path, address: Address) -> Result<PathBuf, WalletSignerError> {
    if !path.exists() {
        return Err(WalletSignerError::MissingKeystore(path.to_path_buf()));
    }
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    find_keystore_by_address(path, address)
        .ok_or_else(|| WalletSignerError::KeystoreNotFound { address, dir: path.to_path_buf() })
}

/// Finds the keystore belonging to `address` in `keystore_dir`.
///
/// A file matches when its name ends with the address (geth's `UTC--<time>--<address>` layout) or
/// when its JSON `address` field equals the address.
pub fn find_keystore_by_address(keystore_dir: &Path, address: Address) -> Option<PathBuf> {
    let needle = format!("{address:x}");
    let mut entries = fs::read_dir(keystore_dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect::<Vec<_>>();
    entries.sort();

    if let Some(path) = entries.iter().find(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.rsplit("--").next())
            .is_some_and(|suffix| suffix.trim_start_matches("0x").eq_ignore_ascii_case(&needle))
    }) {
        return Some(path.clone());
    }

    entries.into_iter().find(|path| keystore_address(path) == Some(address))
}

/// Reads the `address` field of a keystore file, if present.
pub fn keystore_address(path: &Path) -> Option<Address> {
    let contents = fs::read_to_string(path).ok()?;
    let json: serde_json::Value = serde_json::from_str(&contents).ok()?;
    json.get("address")?.as_str()?.parse().ok()
}

/// Reads the keystore passphrase from the flag, the passphrase file, or an interactive prompt.
///
/// Returns `None` when no passphrase source is available.
pub fn read_passphrase(
    maybe_passphrase: Option<&str>,
    maybe_passphrase_file: Option<&Path>,
    interactive: bool,
) -> Result<Option<String>> {
    if let Some(passphrase) = maybe_passphrase {
        return Ok(Some(passphrase.to_string()));
    }

    if let Some(passphrase_file) = maybe_passphrase_file {
        if !passphrase_file.is_file() {
            eyre::bail!("Keystore passphrase file `{passphrase_file:?}` does not exist")
        }
        let passphrase = fs::read_to_string(passphrase_file).wrap_err_with(|| {
            format!("Failed to read keystore passphrase file at {passphrase_file:?}")
        })?;
        return Ok(Some(passphrase.trim_end().to_string()));
    }

    if interactive {
        return Ok(Some(rpassword::prompt_password("Enter keystore passphrase: ")?));
    }

    Ok(None)
}

/// Decrypts the keystore at `path` with `passphrase`.
pub fn create_keystore_signer(path: &Path, passphrase: &str) -> Result<PrivateKeySigner> {
    if path.is_dir() {
        eyre::bail!(
            "Keystore path `{path:?}` is a directory. Please specify the keystore file directly."
        )
    }
    trace!(?path, "decrypting keystore");
    PrivateKeySigner::decrypt_keystore(path, passphrase)
        .wrap_err_with(|| format!("Failed to decrypt keystore {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const DEV_ADDRESS: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const OPERATOR_ADDRESS: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

    fn keystore_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/keystore")
    }

    #[test]
    fn parse_private_key_signer() {
        let signer = create_private_key_signer(DEV_KEY).unwrap();
        assert_eq!(signer.address(), DEV_ADDRESS);
        // skip 0x
        let signer = create_private_key_signer(&DEV_KEY[2..]).unwrap();
        assert_eq!(signer.address(), DEV_ADDRESS);
    }

    #[test]
    fn private_key_named_like_env_var() {
        let err = create_private_key_signer("PATH").unwrap_err();
        assert!(err.to_string().contains("env var PATH exists"), "{err}");
    }

    #[test]
    fn finds_keystore_by_file_name() {
        let path = find_keystore_by_address(&keystore_dir(), DEV_ADDRESS).unwrap();
        assert!(path.file_name().unwrap().to_str().unwrap().starts_with("UTC--"));
    }

    #[test]
    fn finds_keystore_by_address_field() {
        let path = find_keystore_by_address(&keystore_dir(), OPERATOR_ADDRESS).unwrap();
        assert_eq!(path.file_name().unwrap(), "operator.json");
    }

    #[test]
    fn missing_keystore_for_address() {
        let stranger = address!("0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC");
        assert!(find_keystore_by_address(&keystore_dir(), stranger).is_none());
        let err = resolve_keystore(&keystore_dir(), stranger).unwrap_err();
        assert!(
            matches!(err, WalletSignerError::KeystoreNotFound { address, .. } if address == stranger)
        );
    }

    #[test]
    fn resolve_keystore_accepts_file() {
        let file = keystore_dir().join("operator.json");
        assert_eq!(resolve_keystore(&file, DEV_ADDRESS).unwrap(), file);

        let err = resolve_keystore(&keystore_dir().join("nope"), DEV_ADDRESS).unwrap_err();
        assert!(matches!(err, WalletSignerError::MissingKeystore(_)));
    }

    #[test]
    fn decrypts_keystore() {
        let path = find_keystore_by_address(&keystore_dir(), DEV_ADDRESS).unwrap();
        let signer = create_keystore_signer(&path, "ethctl-test").unwrap();
        assert_eq!(signer.address(), DEV_ADDRESS);
    }

    #[test]
    fn wrong_passphrase_fails() {
        let path = keystore_dir().join("operator.json");
        let err = create_keystore_signer(&path, "ethctl-test").unwrap_err();
        assert!(err.to_string().contains("Failed to decrypt keystore"), "{err}");
    }

    #[test]
    fn reads_passphrase_file() {
        let file = Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata/password-f39fd");
        let passphrase = read_passphrase(None, Some(&file), false).unwrap();
        assert_eq!(passphrase.as_deref(), Some("ethctl-test"));

        let passphrase = read_passphrase(Some("flag"), Some(&file), false).unwrap();
        assert_eq!(passphrase.as_deref(), Some("flag"));

        assert_eq!(read_passphrase(None, None, false).unwrap(), None);
    }

    #[test]
    fn missing_passphrase_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_passphrase(None, Some(&dir.path().join("missing")), false).unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");
    }
}
