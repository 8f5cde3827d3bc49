//! # Cryptography Module
//!
//! The primitives the envelope protocol and the operation surface are built
//! from.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC PRIMITIVES                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  digest         │   │  symmetric      │   │  keys           │       │
//! │  │                 │   │                 │   │                 │       │
//! │  │ • SHA-256/384/  │   │ • AES-256-GCM   │   │ • RSA keygen    │       │
//! │  │   512           │   │ • 96-bit nonce  │   │ • PKCS#8 / SPKI │       │
//! │  │ • text / raw /  │   │ • 128-bit tag   │   │ • Seeded mode   │       │
//! │  │   fingerprint   │   │                 │   │ • Fingerprints  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  rsa_cipher     │   │  signing        │                             │
//! │  │                 │   │                 │                             │
//! │  │ • OAEP-SHA256   │   │ • PKCS#1 v1.5   │                             │
//! │  │ • One block     │   │ • Over SHA-2    │                             │
//! │  │ • Key wrapping  │   │   digests       │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices & Rationale
//!
//! | Algorithm | Purpose | Notes |
//! |-----------|---------|-------|
//! | AES-256-GCM | Payload encryption | AEAD, hardware accelerated |
//! | RSA-OAEP-SHA256 | Key wrapping | Randomized, CCA-secure padding |
//! | RSASSA-PKCS1-v1_5 | Signatures | Deterministic, widely interoperable |
//! | SHA-2 | Digests, fingerprints | SHA-256 default |
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: Symmetric keys and private key DER are zeroized when dropped
//! 2. **Secure Random**: `rand::rngs::OsRng` for nonces, keys and unseeded key pairs
//! 3. **No Nonce Reuse**: A fresh random nonce for every encryption
//! 4. **Fail Closed**: Tag and signature failures return errors, never data

pub mod digest;
pub mod keys;
pub mod rsa_cipher;
pub mod signing;
pub mod symmetric;

pub use digest::{digest, to_fingerprint, DigestAlgorithm, DigestFormat, DigestOutput, FINGERPRINT_SEPARATOR};
pub use keys::{
    fingerprint, fingerprint_bytes, generate, public_key_from_private, RsaKeyPair,
    DEFAULT_STRENGTH, FINGERPRINT_SIZE, MAX_STRENGTH, MIN_STRENGTH,
};
pub use signing::{sign, verify};
pub use symmetric::{Nonce, SymmetricKey, KEY_SIZE, MAC_SIZE, NONCE_SIZE, TAG_SIZE};

/// Shared key pairs for tests; RSA generation is too slow to repeat per test.
#[cfg(test)]
pub(crate) mod testing {
    use std::sync::OnceLock;

    use super::keys::RsaKeyPair;

    /// Modulus size of the shared test keys
    pub const TEST_STRENGTH: usize = 1024;

    pub fn alice() -> &'static RsaKeyPair {
        static KEY: OnceLock<RsaKeyPair> = OnceLock::new();
        KEY.get_or_init(|| RsaKeyPair::generate(TEST_STRENGTH, Some(b"alice")).unwrap())
    }

    pub fn bob() -> &'static RsaKeyPair {
        static KEY: OnceLock<RsaKeyPair> = OnceLock::new();
        KEY.get_or_init(|| RsaKeyPair::generate(TEST_STRENGTH, Some(b"bob")).unwrap())
    }
}
