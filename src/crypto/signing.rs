//! # Digital Signatures Module
//!
//! RSASSA-PKCS1-v1_5 signatures over a SHA-2 message digest.
//!
//! ## Signature Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SIGN / VERIFY                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SIGNING (private key holder)                                          │
//! │                                                                         │
//! │    message ──► digest(algorithm) ──► PKCS#1 v1.5 sign ──► signature    │
//! │                                         ▲                              │
//! │                                 private key (DER)                      │
//! │                                                                         │
//! │  VERIFICATION (anyone with the public key)                             │
//! │                                                                         │
//! │    message ──► digest(algorithm) ──► PKCS#1 v1.5 verify ──► Ok / Err   │
//! │                                         ▲          ▲                   │
//! │                                 public key    signature                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signatures are deterministic and exactly as long as the key modulus.
//! The digest algorithm is not recorded in the signature; signer and
//! verifier must agree on it.

use rsa::Pkcs1v15Sign;
use sha2::{Sha256, Sha384, Sha512};

use super::digest::DigestAlgorithm;
use super::keys::{decode_private_key, decode_public_key};
use crate::error::{Error, Result};

fn scheme(algorithm: DigestAlgorithm) -> Pkcs1v15Sign {
    match algorithm {
        DigestAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        DigestAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        DigestAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

/// Sign `message` with a DER-encoded private key
///
/// ## Example
///
/// ```ignore
/// let keys = generate(2048, None)?;
/// let signature = sign(DigestAlgorithm::Sha256, b"Hello", keys.private_der())?;
/// ```
pub fn sign(algorithm: DigestAlgorithm, message: &[u8], private_key_der: &[u8]) -> Result<Vec<u8>> {
    let private_key = decode_private_key(private_key_der)?;
    let hashed = algorithm.hash(message);

    private_key
        .sign(scheme(algorithm), &hashed)
        .map_err(|e| Error::SigningFailed(e.to_string()))
}

/// Verify a signature of `message` against a DER-encoded public key
///
/// ## Returns
///
/// `Ok(())` if valid, `Err(SignatureInvalid)` if the key, message or
/// signature don't match.
pub fn verify(
    algorithm: DigestAlgorithm,
    message: &[u8],
    signature: &[u8],
    public_key_der: &[u8],
) -> Result<()> {
    let public_key = decode_public_key(public_key_der)?;
    let hashed = algorithm.hash(message);

    public_key
        .verify(scheme(algorithm), &hashed, signature)
        .map_err(|_| Error::SignatureInvalid)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::testing;

    const ALL: [DigestAlgorithm; 3] = [
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    #[test]
    fn test_sign_verify() {
        let kp = testing::alice();
        let message = b"Hello, World!";

        for algorithm in ALL {
            let signature = sign(algorithm, message, kp.private_der()).unwrap();
            assert_eq!(signature.len(), testing::TEST_STRENGTH / 8);
            assert!(verify(algorithm, message, &signature, kp.public_der()).is_ok());
        }
    }

    #[test]
    fn test_verify_wrong_message_fails() {
        let kp = testing::alice();
        let signature = sign(DigestAlgorithm::Sha256, b"Hello, World!", kp.private_der()).unwrap();

        let result = verify(DigestAlgorithm::Sha256, b"Wrong message!", &signature, kp.public_der());
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_verify_wrong_key_fails() {
        let signature = sign(DigestAlgorithm::Sha256, b"msg", testing::alice().private_der()).unwrap();

        let result = verify(DigestAlgorithm::Sha256, b"msg", &signature, testing::bob().public_der());
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_verify_corrupted_signature_fails() {
        let kp = testing::alice();
        let mut signature = sign(DigestAlgorithm::Sha384, b"msg", kp.private_der()).unwrap();
        signature[10] ^= 0x04;

        let result = verify(DigestAlgorithm::Sha384, b"msg", &signature, kp.public_der());
        assert!(matches!(result, Err(Error::SignatureInvalid)));

        let result = verify(DigestAlgorithm::Sha384, b"msg", &[], kp.public_der());
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_verify_algorithm_mismatch_fails() {
        let kp = testing::alice();
        let signature = sign(DigestAlgorithm::Sha256, b"msg", kp.private_der()).unwrap();

        let result = verify(DigestAlgorithm::Sha512, b"msg", &signature, kp.public_der());
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_signatures_are_deterministic() {
        let kp = testing::alice();

        let s1 = sign(DigestAlgorithm::Sha512, b"same", kp.private_der()).unwrap();
        let s2 = sign(DigestAlgorithm::Sha512, b"same", kp.private_der()).unwrap();

        assert_eq!(s1, s2);
    }

    #[test]
    fn test_invalid_key_encoding() {
        let kp = testing::alice();

        assert!(matches!(
            sign(DigestAlgorithm::Sha256, b"msg", b"garbage"),
            Err(Error::InvalidKeyEncoding(_))
        ));
        assert!(matches!(
            verify(DigestAlgorithm::Sha256, b"msg", &[0u8; 128], b"garbage"),
            Err(Error::InvalidKeyEncoding(_))
        ));
        // Signing needs the private half
        assert!(matches!(
            sign(DigestAlgorithm::Sha256, b"msg", kp.public_der()),
            Err(Error::InvalidKeyEncoding(_))
        ));
    }
}
