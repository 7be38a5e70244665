use sha2::{Digest, Sha256};
use thiserror::Error;

pub const KEY_SIZE: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("encryption passphrase is empty")]
    EmptyPassphrase,
}

/// Derive the 256-bit field key from the operator passphrase.
///
/// SHA-256 over the UTF-8 bytes; the same passphrase always yields the same key,
/// which is what lets existing rows decrypt after a restart.
pub fn derive_key(passphrase: &str) -> Result<[u8; KEY_SIZE], KeyError> {
    if passphrase.is_empty() {
        return Err(KeyError::EmptyPassphrase);
    }

    let digest = Sha256::digest(passphrase.as_bytes());
    let mut key = [0u8; KEY_SIZE];
    key.copy_from_slice(&digest);
    Ok(key)
}
