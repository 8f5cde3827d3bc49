//! # Asymmetric Block Cipher
//!
//! Single-block RSA encryption of small payloads, such as a symmetric key.
//!
//! Uses RSA-OAEP with SHA-256 (and MGF1-SHA-256). A `k`-byte modulus holds
//! at most `k - 66` bytes of message; nothing is chunked.
//!
//! | Modulus | Block capacity |
//! |---------|----------------|
//! | 1024 bits | 62 bytes |
//! | 2048 bits | 190 bytes |
//! | 4096 bits | 446 bytes |

use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::Oaep;
use sha2::Sha256;

use super::keys::{decode_private_key, decode_public_key};
use crate::error::{Error, Result};

/// OAEP label hash output size in bytes
const OAEP_HASH_SIZE: usize = 32;

/// Largest message that fits in one block of a `modulus_bytes`-byte key
pub fn max_message_size(modulus_bytes: usize) -> usize {
    modulus_bytes.saturating_sub(2 * OAEP_HASH_SIZE + 2)
}

/// Encrypt `message` with a DER-encoded public key
///
/// ## Errors
///
/// - `InvalidKeyEncoding` if the key is not a DER RSA public key
/// - `MessageTooLarge` if the message exceeds one block
pub fn encrypt(message: &[u8], public_key_der: &[u8]) -> Result<Vec<u8>> {
    let public_key = decode_public_key(public_key_der)?;

    let max = max_message_size(public_key.size());
    if message.len() > max {
        return Err(Error::MessageTooLarge {
            len: message.len(),
            max,
        });
    }

    public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha256>(), message)
        .map_err(|e| Error::EncryptionFailed(format!("RSA encryption failed: {}", e)))
}

/// Decrypt a block produced by [`encrypt`] with a DER-encoded private key
///
/// ## Errors
///
/// - `InvalidKeyEncoding` if the key is not a DER RSA private key
/// - `DecryptionFailed` if the block was not encrypted for this key or was
///   altered
pub fn decrypt(ciphertext: &[u8], private_key_der: &[u8]) -> Result<Vec<u8>> {
    let private_key = decode_private_key(private_key_der)?;

    private_key
        .decrypt(Oaep::new::<Sha256>(), ciphertext)
        .map_err(|_| Error::DecryptionFailed("RSA block did not decrypt under this key".into()))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::testing;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let kp = testing::alice();
        let message = b"Hello, World!";

        let ciphertext = encrypt(message, kp.public_der()).unwrap();
        assert_eq!(ciphertext.len(), testing::TEST_STRENGTH / 8);

        let decrypted = decrypt(&ciphertext, kp.private_der()).unwrap();
        assert_eq!(decrypted, message);
    }

    #[test]
    fn test_wraps_symmetric_key() {
        let kp = testing::alice();
        let key = [0x42u8; 32];

        let wrapped = encrypt(&key, kp.public_der()).unwrap();
        let unwrapped = decrypt(&wrapped, kp.private_der()).unwrap();

        assert_eq!(unwrapped, key);
    }

    #[test]
    fn test_encryption_is_randomized() {
        let kp = testing::alice();

        let c1 = encrypt(b"same", kp.public_der()).unwrap();
        let c2 = encrypt(b"same", kp.public_der()).unwrap();

        assert_ne!(c1, c2);
    }

    #[test]
    fn test_block_capacity() {
        assert_eq!(max_message_size(128), 62);
        assert_eq!(max_message_size(256), 190);
        assert_eq!(max_message_size(10), 0);

        let kp = testing::alice();
        let max = max_message_size(testing::TEST_STRENGTH / 8);

        let fits = vec![1u8; max];
        let ciphertext = encrypt(&fits, kp.public_der()).unwrap();
        assert_eq!(decrypt(&ciphertext, kp.private_der()).unwrap(), fits);

        let too_big = vec![1u8; max + 1];
        assert!(matches!(
            encrypt(&too_big, kp.public_der()),
            Err(Error::MessageTooLarge { len, max: m }) if len == max + 1 && m == max
        ));
    }

    #[test]
    fn test_wrong_key_fails() {
        let ciphertext = encrypt(b"for alice", testing::alice().public_der()).unwrap();

        assert!(matches!(
            decrypt(&ciphertext, testing::bob().private_der()),
            Err(Error::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let kp = testing::alice();
        let mut ciphertext = encrypt(b"payload", kp.public_der()).unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x01;

        assert!(matches!(
            decrypt(&ciphertext, kp.private_der()),
            Err(Error::DecryptionFailed(_))
        ));
    }

    #[test]
    fn test_invalid_key_encoding() {
        let kp = testing::alice();

        assert!(matches!(
            encrypt(b"x", b"not a key"),
            Err(Error::InvalidKeyEncoding(_))
        ));
        assert!(matches!(
            decrypt(&[0u8; 128], b"not a key"),
            Err(Error::InvalidKeyEncoding(_))
        ));
        // Keys swapped
        assert!(matches!(
            decrypt(&[0u8; 128], kp.public_der()),
            Err(Error::InvalidKeyEncoding(_))
        ));
    }
}
