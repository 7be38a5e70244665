use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, KeyInit, OsRng, Payload, rand_core::RngCore},
};
use anyhow::{Result, anyhow};
use base64::{Engine as _, engine::general_purpose::URL_SAFE as BASE64};
use thiserror::Error;
use tracing::warn;

use crate::keys::{KEY_SIZE, KeyError, derive_key};

/// Placeholder written into exports for fields that fail to decrypt.
pub const DECRYPTION_ERROR_SENTINEL: &str = "<DECRYPTION-ERROR>";

const TOKEN_VERSION: u8 = 0x80;
const HEADER_SIZE: usize = 1 + 8;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;
const MIN_TOKEN_SIZE: usize = HEADER_SIZE + NONCE_SIZE + TAG_SIZE;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecryptError {
    #[error("token is not valid base64 or is truncated")]
    Malformed,
    #[error("unsupported token version {0:#04x}")]
    UnsupportedVersion(u8),
    #[error("GCM authentication failed (wrong key, corrupted or tampered token)")]
    AuthFailed,
    #[error("decrypted bytes are not UTF-8")]
    InvalidUtf8,
}

/// Process-wide field cipher. Built once at startup and shared by reference.
///
/// Token layout before base64 (URL-safe alphabet, padded):
///   version(1) | issued_at unix secs, big-endian(8) | nonce(12) | ciphertext | tag(16)
///
/// The version and timestamp are bound as associated data, so they cannot be
/// altered without failing authentication.
pub struct Cipher {
    aead: Aes256Gcm,
}

impl Cipher {
    pub fn new(key: &[u8; KEY_SIZE]) -> Self {
        Self {
            aead: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        }
    }

    pub fn from_passphrase(passphrase: &str) -> Result<Self, KeyError> {
        let key = derive_key(passphrase)?;
        Ok(Self::new(&key))
    }

    /// Encrypt a short UTF-8 string into a printable token.
    /// Every call draws a fresh nonce, so equal inputs give different tokens.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let mut header = [0u8; HEADER_SIZE];
        header[0] = TOKEN_VERSION;
        header[1..].copy_from_slice(&(chrono::Utc::now().timestamp() as u64).to_be_bytes());

        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = self
            .aead
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &header,
                },
            )
            .map_err(|e| anyhow!("Encryption failed: {}", e))?;

        let mut token = Vec::with_capacity(HEADER_SIZE + NONCE_SIZE + sealed.len());
        token.extend_from_slice(&header);
        token.extend_from_slice(&nonce_bytes);
        token.extend_from_slice(&sealed);

        Ok(BASE64.encode(token))
    }

    /// Verify and decrypt a token produced by [`Cipher::encrypt`].
    pub fn decrypt(&self, token: &str) -> Result<String, DecryptError> {
        let raw = BASE64
            .decode(token.trim())
            .map_err(|_| DecryptError::Malformed)?;
        if raw.len() < MIN_TOKEN_SIZE {
            return Err(DecryptError::Malformed);
        }
        if raw[0] != TOKEN_VERSION {
            return Err(DecryptError::UnsupportedVersion(raw[0]));
        }

        let (header, rest) = raw.split_at(HEADER_SIZE);
        let (nonce_bytes, sealed) = rest.split_at(NONCE_SIZE);

        let plaintext = self
            .aead
            .decrypt(
                Nonce::from_slice(nonce_bytes),
                Payload {
                    msg: sealed,
                    aad: header,
                },
            )
            .map_err(|_| DecryptError::AuthFailed)?;

        String::from_utf8(plaintext).map_err(|_| DecryptError::InvalidUtf8)
    }

    /// Fail-soft decrypt for exports: a bad token becomes
    /// [`DECRYPTION_ERROR_SENTINEL`] instead of aborting the caller.
    pub fn decrypt_or_sentinel(&self, token: &str) -> String {
        match self.decrypt(token) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!("Field decryption failed: {}", e);
                DECRYPTION_ERROR_SENTINEL.to_string()
            }
        }
    }
}

impl std::fmt::Debug for Cipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cipher").finish_non_exhaustive()
    }
}
