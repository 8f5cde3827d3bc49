//! # Key Management
//!
//! RSA key pair generation, DER encoding and fingerprinting.
//!
//! ## Key Encodings
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          RSA KEY PAIR                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Private key                                                    │   │
//! │  │  • PKCS#8 PrivateKeyInfo, DER                                   │   │
//! │  │  • Held in zeroizing storage, never logged                      │   │
//! │  │  • PKCS#1 RSAPrivateKey also accepted when decoding             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Public key                                                     │   │
//! │  │  • X.509 SubjectPublicKeyInfo, DER                              │   │
//! │  │  • PKCS#1 RSAPublicKey also accepted when decoding              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Fingerprint                                                    │   │
//! │  │  • SHA-256(public key DER), rendered as "xxxx-xxxx-...-xxxx"    │   │
//! │  │  • Identifies a key pair without exposing key material          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Seeded Generation
//!
//! ```text
//! seed (any length)
//!       │
//!       └──► HKDF-SHA256(info = "lambda-crypto-rsa-keygen-v1") → 32 bytes
//!                  │
//!                  └──► ChaCha20Rng ──► RSA prime search → key pair
//! ```
//!
//! The same `(strength, seed)` always yields the same key pair. Without a
//! seed, keys come from `OsRng`.

use hkdf::Hkdf;
use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::digest::to_fingerprint;
use crate::error::{Error, Result};

/// Default RSA modulus size in bits
pub const DEFAULT_STRENGTH: usize = 2048;

/// Smallest supported modulus size in bits
pub const MIN_STRENGTH: usize = 1024;

/// Largest supported modulus size in bits
///
/// Matches the largest public key `rsa` will decode, so every key pair
/// this module generates is usable by the cipher and signature modules.
pub const MAX_STRENGTH: usize = 4096;

/// Size of a raw key fingerprint (SHA-256) in bytes
pub const FINGERPRINT_SIZE: usize = 32;

/// Domain separation string for expanding caller seeds
const SEED_DOMAIN: &[u8] = b"lambda-crypto-rsa-keygen-v1";

/// A DER-encoded RSA key pair with its fingerprint
///
/// The private half is zeroized when this struct is dropped.
#[derive(Clone)]
pub struct RsaKeyPair {
    private: Zeroizing<Vec<u8>>,
    public: Vec<u8>,
    fingerprint: String,
}

impl RsaKeyPair {
    /// Generate a key pair
    ///
    /// See [`generate`].
    pub fn generate(strength: usize, seed: Option<&[u8]>) -> Result<Self> {
        validate_strength(strength)?;

        let private_key = match seed {
            Some(seed) => {
                let mut rng = seeded_rng(seed)?;
                RsaPrivateKey::new(&mut rng, strength)
            }
            None => RsaPrivateKey::new(&mut OsRng, strength),
        }
        .map_err(|e| Error::KeyGenerationFailed(e.to_string()))?;

        let private = encode_private_key(&private_key)?;
        let public = encode_public_key(&private_key.to_public_key())?;
        let fingerprint = fingerprint(&public);

        tracing::debug!(
            "Generated {}-bit RSA key pair {} ({})",
            strength,
            fingerprint,
            if seed.is_some() { "seeded" } else { "random" }
        );

        Ok(Self {
            private,
            public,
            fingerprint,
        })
    }

    /// Private key, PKCS#8 DER
    ///
    /// Only use this for secure storage. Never log these bytes.
    pub fn private_der(&self) -> &[u8] {
        &self.private
    }

    /// Public key, SubjectPublicKeyInfo DER
    pub fn public_der(&self) -> &[u8] {
        &self.public
    }

    /// Fingerprint of the public key
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl std::fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Generate an RSA key pair
///
/// ## Parameters
///
/// - `strength`: modulus size in bits, a multiple of 8 in
///   [`MIN_STRENGTH`]..=[`MAX_STRENGTH`]
/// - `seed`: when present, generation is deterministic in `(strength, seed)`
///
/// ## Errors
///
/// `InvalidStrength` for unsupported sizes.
pub fn generate(strength: usize, seed: Option<&[u8]>) -> Result<RsaKeyPair> {
    RsaKeyPair::generate(strength, seed)
}

/// Fingerprint of a DER-encoded public key
pub fn fingerprint(public_der: &[u8]) -> String {
    to_fingerprint(&fingerprint_bytes(public_der))
}

/// Raw SHA-256 fingerprint of a DER-encoded public key
pub fn fingerprint_bytes(public_der: &[u8]) -> [u8; FINGERPRINT_SIZE] {
    let mut out = [0u8; FINGERPRINT_SIZE];
    out.copy_from_slice(&Sha256::digest(public_der));
    out
}

/// Derive the public key DER for a private key DER
pub fn public_key_from_private(private_der: &[u8]) -> Result<Vec<u8>> {
    let private_key = decode_private_key(private_der)?;
    encode_public_key(&private_key.to_public_key())
}

/// Parse a private key (PKCS#8, falling back to PKCS#1)
pub(crate) fn decode_private_key(der: &[u8]) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der)
        .or_else(|_| RsaPrivateKey::from_pkcs1_der(der))
        .map_err(|e| Error::InvalidKeyEncoding(format!("Not an RSA private key: {}", e)))
}

/// Parse a public key (SubjectPublicKeyInfo, falling back to PKCS#1)
pub(crate) fn decode_public_key(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der)
        .or_else(|_| RsaPublicKey::from_pkcs1_der(der))
        .map_err(|e| Error::InvalidKeyEncoding(format!("Not an RSA public key: {}", e)))
}

fn encode_private_key(key: &RsaPrivateKey) -> Result<Zeroizing<Vec<u8>>> {
    key.to_pkcs8_der()
        .map(|doc| Zeroizing::new(doc.as_bytes().to_vec()))
        .map_err(|e| Error::KeyGenerationFailed(format!("PKCS#8 encoding failed: {}", e)))
}

fn encode_public_key(key: &RsaPublicKey) -> Result<Vec<u8>> {
    key.to_public_key_der()
        .map(|doc| doc.as_bytes().to_vec())
        .map_err(|e| Error::KeyGenerationFailed(format!("SPKI encoding failed: {}", e)))
}

fn validate_strength(strength: usize) -> Result<()> {
    if !(MIN_STRENGTH..=MAX_STRENGTH).contains(&strength) || strength % 8 != 0 {
        return Err(Error::InvalidStrength(strength));
    }
    Ok(())
}

fn seeded_rng(seed: &[u8]) -> Result<ChaCha20Rng> {
    let hkdf = Hkdf::<Sha256>::new(None, seed);
    let mut rng_seed = Zeroizing::new([0u8; 32]);
    hkdf.expand(SEED_DOMAIN, &mut rng_seed[..])
        .map_err(|_| Error::KeyGenerationFailed("Failed to expand seed".into()))?;
    Ok(ChaCha20Rng::from_seed(*rng_seed))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::testing;
    use rsa::traits::PublicKeyParts;

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let kp1 = generate(2048, Some(b"deterministic identity")).unwrap();
        let kp2 = generate(2048, Some(b"deterministic identity")).unwrap();

        assert_eq!(kp1.private_der(), kp2.private_der());
        assert_eq!(kp1.public_der(), kp2.public_der());
        assert_eq!(kp1.fingerprint(), kp2.fingerprint());
    }

    #[test]
    fn test_different_seeds_different_keys() {
        let kp1 = generate(1024, Some(b"seed one")).unwrap();
        let kp2 = generate(1024, Some(b"seed two")).unwrap();

        assert_ne!(kp1.public_der(), kp2.public_der());
        assert_ne!(kp1.fingerprint(), kp2.fingerprint());
    }

    #[test]
    fn test_unseeded_generation_differs() {
        let kp1 = generate(1024, None).unwrap();
        let kp2 = generate(1024, None).unwrap();

        assert_ne!(kp1.private_der(), kp2.private_der());
        assert_ne!(kp1.public_der(), kp2.public_der());
    }

    #[test]
    fn test_key_pair_shares_modulus() {
        let kp = testing::alice();

        let private_key = decode_private_key(kp.private_der()).unwrap();
        let public_key = decode_public_key(kp.public_der()).unwrap();

        assert_eq!(private_key.n(), public_key.n());
        assert_eq!(private_key.e(), public_key.e());
        assert_eq!(public_key.size() * 8, testing::TEST_STRENGTH);
    }

    #[test]
    fn test_fingerprint_format() {
        let kp = testing::alice();
        let fp = kp.fingerprint();

        assert_eq!(fp.split('-').count(), 16);
        assert!(fp.split('-').all(|group| group.len() == 4));
        assert!(fp.chars().all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(fp.replace('-', ""), hex::encode(fingerprint_bytes(kp.public_der())));
        assert_eq!(fp, fingerprint(kp.public_der()));
    }

    #[test]
    fn test_public_key_from_private() {
        let kp = testing::alice();
        let derived = public_key_from_private(kp.private_der()).unwrap();
        assert_eq!(derived, kp.public_der());
    }

    #[test]
    fn test_max_strength_matches_decoder_limit() {
        assert_eq!(MAX_STRENGTH, RsaPublicKey::MAX_SIZE);
        assert!(validate_strength(MAX_STRENGTH).is_ok());
        assert!(validate_strength(MIN_STRENGTH).is_ok());
    }

    #[test]
    fn test_invalid_strength() {
        for strength in [0, 512, 1000, 1023, 4100, 4104, 4160, 8192, 16384] {
            assert!(matches!(
                generate(strength, None),
                Err(Error::InvalidStrength(s)) if s == strength
            ));
        }
    }

    #[test]
    fn test_garbage_keys_rejected() {
        assert!(matches!(
            decode_private_key(b"definitely not DER"),
            Err(Error::InvalidKeyEncoding(_))
        ));
        assert!(matches!(
            decode_public_key(&[0x30, 0x03, 0x02, 0x01]),
            Err(Error::InvalidKeyEncoding(_))
        ));
        assert!(matches!(
            public_key_from_private(&[]),
            Err(Error::InvalidKeyEncoding(_))
        ));
    }

    #[test]
    fn test_public_key_is_not_a_private_key() {
        let kp = testing::alice();
        assert!(decode_private_key(kp.public_der()).is_err());
    }

    #[test]
    fn test_pkcs1_keys_accepted() {
        use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};

        let kp = testing::alice();
        let private_key = decode_private_key(kp.private_der()).unwrap();

        let pkcs1_private = private_key.to_pkcs1_der().unwrap();
        let pkcs1_public = private_key.to_public_key().to_pkcs1_der().unwrap();

        let reparsed = decode_private_key(pkcs1_private.as_bytes()).unwrap();
        assert_eq!(reparsed.n(), private_key.n());

        let reparsed = decode_public_key(pkcs1_public.as_bytes()).unwrap();
        assert_eq!(reparsed.n(), private_key.n());
    }

    #[test]
    fn test_debug_hides_private_key() {
        let kp = testing::alice();
        let shown = format!("{:?}", kp);
        assert!(shown.contains(kp.fingerprint()));
        assert!(!shown.contains("private"));
    }
}
