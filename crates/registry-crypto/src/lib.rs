//! Registry Crypto Library
//!
//! Field-level encryption for submissions at rest. A single AES-256-GCM key is
//! derived from the operator passphrase at startup and shared by every request.
//! Ciphertexts are self-describing text tokens (version, issue time, nonce,
//! ciphertext and tag) so they can live in plain TEXT columns.

pub mod encrypt;
pub mod keys;

pub use encrypt::{Cipher, DECRYPTION_ERROR_SENTINEL, DecryptError};
pub use keys::{KEY_SIZE, KeyError, derive_key};
