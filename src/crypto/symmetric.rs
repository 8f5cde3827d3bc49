//! # Symmetric Cipher
//!
//! AES-256-GCM over a byte buffer, with the nonce carried in the packet.
//!
//! ## Packet Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          AEAD PACKET                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────┬─────────────────────────────┬──────────────────┐     │
//! │  │ nonce        │ ciphertext                  │ tag              │     │
//! │  │ 12 bytes     │ len(plaintext) bytes        │ 16 bytes         │     │
//! │  └──────────────┴─────────────────────────────┴──────────────────┘     │
//! │                                                                         │
//! │  • nonce: random per encryption (OsRng), never derived from content    │
//! │  • tag: appended by AES-GCM, 128 bits                                  │
//! │  • no associated data                                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | Only holders of the key can read the payload |
//! | Integrity | Any modification of nonce, ciphertext or tag is detected |
//! | Fail closed | A bad tag yields an error and no plaintext bytes |

use std::fmt;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce as AesNonce,
};
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::ZeroizeOnDrop;

use crate::error::{Error, Result};

/// Size of the AES-GCM nonce in bytes (96 bits)
pub const NONCE_SIZE: usize = 12;

/// Size of the AES-GCM authentication tag in bits
pub const MAC_SIZE: usize = 128;

/// Size of the AES-GCM authentication tag in bytes
pub const TAG_SIZE: usize = MAC_SIZE / 8;

/// Size of the encryption key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// A nonce (number used once) for AES-GCM encryption
///
/// **Never reuse a nonce with the same key.** Random 96-bit nonces are safe
/// for up to 2^32 messages per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Nonce(pub [u8; NONCE_SIZE]);

impl Nonce {
    /// Generate a cryptographically random nonce
    pub fn random() -> Self {
        let mut bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from existing bytes
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

/// An AES-256-GCM key
///
/// Zeroized when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice, which must be exactly [`KEY_SIZE`] bytes
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != KEY_SIZE {
            return Err(Error::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: slice.len(),
            });
        }
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(slice);
        Ok(Self(bytes))
    }

    /// Derive a key from a password
    ///
    /// The key is SHA-256 of the UTF-8 password. This is not a password
    /// hash; callers with low-entropy passwords should stretch them first.
    pub fn from_password(password: &str) -> Self {
        let digest = Sha256::digest(password.as_bytes());
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    /// Get the raw key bytes
    ///
    /// Only use this to wrap the key for a recipient. Never log these bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// Encrypt `plaintext` with AES-256-GCM
///
/// ## Returns
///
/// `nonce || ciphertext || tag`
///
/// ## Example
///
/// ```ignore
/// let key = SymmetricKey::generate();
/// let packet = encrypt(b"Hello, Bob!", &key)?;
/// ```
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
    let nonce = Nonce::random();
    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

    let ciphertext = cipher
        .encrypt(AesNonce::from_slice(&nonce.0), plaintext)
        .map_err(|e| Error::EncryptionFailed(format!("Encryption failed: {}", e)))?;

    let mut packet = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    packet.extend_from_slice(&nonce.0);
    packet.extend_from_slice(&ciphertext);
    Ok(packet)
}

/// Decrypt a packet produced by [`encrypt`]
///
/// ## Errors
///
/// - `MalformedInput` if the packet is shorter than [`NONCE_SIZE`]
/// - `AuthenticationFailure` if the tag does not verify (tampered data,
///   wrong key, or a packet too short to hold a tag)
pub fn decrypt(packet: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
    if packet.len() < NONCE_SIZE {
        return Err(Error::MalformedInput(format!(
            "Packet is {} bytes, shorter than the {}-byte nonce",
            packet.len(),
            NONCE_SIZE
        )));
    }
    let (nonce, body) = packet.split_at(NONCE_SIZE);

    let cipher = Aes256Gcm::new_from_slice(&key.0)
        .map_err(|e| Error::EncryptionFailed(format!("Invalid key: {}", e)))?;

    cipher
        .decrypt(AesNonce::from_slice(nonce), body)
        .map_err(|_| Error::AuthenticationFailure)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_basic() {
        let key = SymmetricKey::from_bytes([42u8; 32]);
        let plaintext = b"Hello, World!";

        let packet = encrypt(plaintext, &key).unwrap();
        let decrypted = decrypt(&packet, &key).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_encrypt_decrypt_empty() {
        let key = SymmetricKey::from_bytes([42u8; 32]);

        let packet = encrypt(b"", &key).unwrap();
        assert_eq!(packet.len(), NONCE_SIZE + TAG_SIZE);

        let decrypted = decrypt(&packet, &key).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_packet_layout() {
        let key = SymmetricKey::generate();
        let plaintext = [7u8; 100];

        let packet = encrypt(&plaintext, &key).unwrap();
        assert_eq!(packet.len(), NONCE_SIZE + plaintext.len() + TAG_SIZE);
    }

    #[test]
    fn test_tampered_bits_fail() {
        let key = SymmetricKey::from_bytes([42u8; 32]);
        let packet = encrypt(b"attack at dawn", &key).unwrap();

        // Every byte of nonce, ciphertext and tag is covered
        for i in 0..packet.len() {
            for bit in [0x01u8, 0x80] {
                let mut tampered = packet.clone();
                tampered[i] ^= bit;
                assert!(matches!(
                    decrypt(&tampered, &key),
                    Err(Error::AuthenticationFailure)
                ));
            }
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = SymmetricKey::from_bytes([42u8; 32]);
        let key2 = SymmetricKey::from_bytes([99u8; 32]);

        let packet = encrypt(b"secret", &key1).unwrap();
        assert!(matches!(
            decrypt(&packet, &key2),
            Err(Error::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_short_packet_is_malformed() {
        let key = SymmetricKey::generate();

        assert!(matches!(decrypt(&[], &key), Err(Error::MalformedInput(_))));
        assert!(matches!(
            decrypt(&[0u8; NONCE_SIZE - 1], &key),
            Err(Error::MalformedInput(_))
        ));
    }

    #[test]
    fn test_packet_without_room_for_tag_fails_authentication() {
        let key = SymmetricKey::generate();

        assert!(matches!(
            decrypt(&[0u8; NONCE_SIZE], &key),
            Err(Error::AuthenticationFailure)
        ));
        assert!(matches!(
            decrypt(&[0u8; NONCE_SIZE + TAG_SIZE - 1], &key),
            Err(Error::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_different_nonces_produce_different_ciphertext() {
        let key = SymmetricKey::from_bytes([42u8; 32]);

        let p1 = encrypt(b"Hello, World!", &key).unwrap();
        let p2 = encrypt(b"Hello, World!", &key).unwrap();

        assert_ne!(p1[..NONCE_SIZE], p2[..NONCE_SIZE]);
        assert_ne!(p1, p2);
    }

    #[test]
    fn test_key_from_slice() {
        assert!(SymmetricKey::from_slice(&[1u8; KEY_SIZE]).is_ok());
        assert!(matches!(
            SymmetricKey::from_slice(&[1u8; 16]),
            Err(Error::InvalidKeyLength { expected: 32, actual: 16 })
        ));
    }

    #[test]
    fn test_key_from_password() {
        let k1 = SymmetricKey::from_password("correct horse");
        let k2 = SymmetricKey::from_password("correct horse");
        let k3 = SymmetricKey::from_password("battery staple");

        assert_eq!(k1.as_bytes(), k2.as_bytes());
        assert_ne!(k1.as_bytes(), k3.as_bytes());

        let packet = encrypt(b"data", &k1).unwrap();
        assert_eq!(decrypt(&packet, &k2).unwrap(), b"data");
    }

    #[test]
    fn test_key_debug_is_redacted() {
        let key = SymmetricKey::from_bytes([0xAB; 32]);
        let shown = format!("{:?}", key);
        assert!(!shown.contains("171"));
        assert!(shown.contains("REDACTED"));
    }
}
