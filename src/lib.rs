//! # Lambda Crypto
//!
//! Stateless cryptographic primitives and a hybrid envelope protocol:
//! AES-256-GCM, RSA key generation / encryption / signatures, SHA-2
//! digests, and an authenticated encrypt-and-sign pipeline built from them.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        LAMBDA CRYPTO MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  operations       hash, create_key, rsa_*, aes_*, encrypt,        │ │
//! │  │                   decrypt, get_key  (text/raw in, text/raw out)   │ │
//! │  └────────────┬──────────────────────────────────┬───────────────────┘ │
//! │               │                                  │                     │
//! │               │                  ┌───────────────▼───────────────┐     │
//! │               │                  │  envelope                     │     │
//! │               │                  │  seal / open                  │     │
//! │               │                  │  wrapped key + signed payload │     │
//! │               │                  └───────────────┬───────────────┘     │
//! │               │                                  │                     │
//! │  ┌────────────▼──────────────────────────────────▼───────────────────┐ │
//! │  │  crypto                                                           │ │
//! │  │  digest │ symmetric (AES-GCM) │ keys (RSA) │ rsa_cipher │ signing │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! │                                                                         │
//! │  config: typed options with defaults       error: one Error enum       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error type for the entire library
//! - [`crypto`] - Primitives (digests, AEAD, RSA keys, RSA cipher, signatures)
//! - [`envelope`] - Hybrid envelope protocol
//! - [`config`] - Options for each operation
//! - [`operations`] - The named operations a host calls
//!
//! ## Quick Start
//!
//! ```ignore
//! use lambda_crypto::operations::{self, EnvelopeKey, Payload};
//! use lambda_crypto::config::{DecryptOptions, EncryptOptions, KeyGenOptions};
//!
//! let alice = operations::create_key(&KeyGenOptions::default())?;
//! let bob = operations::create_key(&KeyGenOptions::default())?;
//!
//! let sealed = operations::encrypt(
//!     "Hello, Bob!",
//!     EnvelopeKey::Rsa(bob.public.as_payload()),
//!     Some(alice.private.as_payload()),
//!     &EncryptOptions::default(),
//! )?;
//!
//! let opened = operations::decrypt(
//!     sealed.envelope.as_payload(),
//!     EnvelopeKey::Rsa(bob.private.as_payload()),
//!     &DecryptOptions::default(),
//! )?;
//! assert_eq!(opened.fingerprint.as_deref(), Some(alice.fingerprint.as_str()));
//! ```
//!
//! ## Logging
//!
//! Operations emit `tracing` events (sizes, algorithms, fingerprints).
//! Key material, plaintext and signatures are never logged. The library
//! installs no subscriber.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod operations;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{DigestAlgorithm, DigestFormat, RsaKeyPair, SymmetricKey};
pub use envelope::{open, seal, Envelope, OpenedEnvelope, OpeningKey, Recipient, SealedEnvelope, Signer};
pub use error::{Error, ErrorKind, Result};

/// Returns the version of Lambda Crypto
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
