//! # Operation Surface
//!
//! One function per named operation. Each takes its payload, any key
//! material, and a typed options struct from [`crate::config`], and hands
//! back raw bytes or text as the options ask.
//!
//! ## Input and Output Conventions
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PAYLOAD / KEY CONVENTIONS                          │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Payload::Text   plaintext inputs    UTF-8 bytes of the string         │
//! │                  ciphertext inputs   base64 (standard, padded)         │
//! │                  keys                base64 of the DER bytes           │
//! │                                                                         │
//! │  Payload::Bytes  always taken as-is                                    │
//! │                                                                         │
//! │  raw = false     binary results    → Encoded::Text (base64)            │
//! │                  decrypted content → Encoded::Text (UTF-8)             │
//! │  raw = true      everything        → Encoded::Raw                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Operation | Payload | Result |
//! |-----------|---------|--------|
//! | [`hash`] | plaintext | [`DigestOutput`] |
//! | [`create_key`] | - | [`KeyPairOutput`] |
//! | [`rsa_encrypt`] / [`rsa_decrypt`] | plaintext / ciphertext | [`Encoded`] |
//! | [`rsa_sign`] / [`rsa_verify`] | plaintext | [`Encoded`] / `()` |
//! | [`aes_encrypt`] / [`aes_decrypt`] | plaintext / ciphertext | [`Encoded`] |
//! | [`encrypt`] / [`decrypt`] | plaintext / envelope | [`SealedOutput`] / [`OpenedOutput`] |
//! | [`get_key`] | envelope | recipient fingerprint |

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::{Zeroize, Zeroizing};

use crate::config::{
    AesOptions, DecryptOptions, EncryptOptions, HashOptions, KeyGenOptions, RsaOptions,
    SignOptions,
};
use crate::crypto::{self, rsa_cipher, symmetric, DigestAlgorithm, DigestOutput, SymmetricKey};
use crate::envelope::{self, Envelope, OpeningKey, Recipient, Signer};
use crate::error::Result;

// ============================================================================
// INPUTS
// ============================================================================

/// A payload or key handed to an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload<'a> {
    /// Text; UTF-8 for plaintext, base64 for binary inputs
    Text(&'a str),
    /// Raw bytes
    Bytes(&'a [u8]),
}

impl<'a> Payload<'a> {
    /// Bytes of a plaintext input
    fn plain(&self) -> &'a [u8] {
        match *self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Bytes(bytes) => bytes,
        }
    }

    /// Bytes of a binary input, decoding base64 text
    fn binary(&self) -> Result<Zeroizing<Vec<u8>>> {
        match *self {
            Payload::Text(text) => Ok(Zeroizing::new(STANDARD.decode(text.trim())?)),
            Payload::Bytes(bytes) => Ok(Zeroizing::new(bytes.to_vec())),
        }
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Text(text)
    }
}

impl<'a> From<&'a String> for Payload<'a> {
    fn from(text: &'a String) -> Self {
        Payload::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Payload::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Payload<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Payload::Bytes(bytes)
    }
}

/// Symmetric key material for the AES operations
#[derive(Debug, Clone, Copy)]
pub enum Secret<'a> {
    /// Password; the key is SHA-256 of its UTF-8 bytes
    Password(&'a str),
    /// The 32 key bytes, raw or base64
    Key(Payload<'a>),
}

impl Secret<'_> {
    fn to_key(self) -> Result<SymmetricKey> {
        match self {
            Secret::Password(password) => Ok(SymmetricKey::from_password(password)),
            Secret::Key(key) => SymmetricKey::from_slice(&key.binary()?),
        }
    }
}

/// Key for the envelope operations
#[derive(Debug, Clone, Copy)]
pub enum EnvelopeKey<'a> {
    /// RSA key DER, raw or base64: public to encrypt, private to decrypt
    Rsa(Payload<'a>),
    /// Shared symmetric secret
    Secret(Secret<'a>),
}

// ============================================================================
// OUTPUTS
// ============================================================================

/// A result rendered as bytes or text
#[derive(Debug, Clone, PartialEq, Eq, Zeroize)]
pub enum Encoded {
    /// Bytes, when `raw = true`
    Raw(Vec<u8>),
    /// Base64 for binary data, UTF-8 for decrypted content
    Text(String),
}

impl Encoded {
    /// Binary data: base64 text unless `raw`
    fn binary(bytes: Vec<u8>, raw: bool) -> Self {
        if raw {
            Encoded::Raw(bytes)
        } else {
            Encoded::Text(STANDARD.encode(&bytes))
        }
    }

    /// Decrypted content: UTF-8 text unless `raw`
    fn content(bytes: Vec<u8>, raw: bool) -> Result<Self> {
        if raw {
            Ok(Encoded::Raw(bytes))
        } else {
            Ok(Encoded::Text(String::from_utf8(bytes)?))
        }
    }

    /// The text, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Encoded::Text(text) => Some(text),
            Encoded::Raw(_) => None,
        }
    }

    /// The underlying bytes (UTF-8 bytes for text)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encoded::Raw(bytes) => bytes,
            Encoded::Text(text) => text.as_bytes(),
        }
    }

    /// Borrow as a [`Payload`], ready to pass to the inverse operation
    pub fn as_payload(&self) -> Payload<'_> {
        match self {
            Encoded::Raw(bytes) => Payload::Bytes(bytes),
            Encoded::Text(text) => Payload::Text(text),
        }
    }
}

/// Result of [`create_key`]
#[derive(Clone)]
pub struct KeyPairOutput {
    /// Private key, PKCS#8 DER or its base64
    pub private: Zeroizing<Encoded>,
    /// Public key, SPKI DER or its base64
    pub public: Encoded,
    /// Public key fingerprint
    pub fingerprint: String,
}

impl std::fmt::Debug for KeyPairOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairOutput")
            .field("public", &self.public)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Result of [`encrypt`]
#[derive(Debug, Clone)]
pub struct SealedOutput {
    /// Serialized envelope
    pub envelope: Encoded,
    /// Sender signature of the content
    pub signature: Option<Encoded>,
    /// Sender fingerprint
    pub fingerprint: Option<String>,
}

/// Result of [`decrypt`]
///
/// The signature is reported, not verified; pass it to [`rsa_verify`] with
/// the public key you trust for `fingerprint`.
#[derive(Debug, Clone)]
pub struct OpenedOutput {
    /// Decrypted content
    pub content: Encoded,
    /// Signature carried in the envelope
    pub signature: Option<Encoded>,
    /// Fingerprint of the claimed signer
    pub fingerprint: Option<String>,
    /// Digest algorithm of the signature
    pub algorithm: Option<DigestAlgorithm>,
}

// ============================================================================
// OPERATIONS
// ============================================================================

/// Digest a payload
pub fn hash<'a>(payload: impl Into<Payload<'a>>, options: &HashOptions) -> DigestOutput {
    let data = payload.into().plain();
    tracing::trace!("hash: {} bytes, {} as {}", data.len(), options.algorithm, options.format);
    crypto::digest(data, options.algorithm, options.format)
}

/// Generate an RSA key pair
pub fn create_key(options: &KeyGenOptions) -> Result<KeyPairOutput> {
    let seed = options.seed.as_deref().map(str::as_bytes);
    let pair = crypto::generate(options.strength, seed)?;

    Ok(KeyPairOutput {
        private: Zeroizing::new(Encoded::binary(pair.private_der().to_vec(), options.raw)),
        public: Encoded::binary(pair.public_der().to_vec(), options.raw),
        fingerprint: pair.fingerprint().to_string(),
    })
}

/// Encrypt a small payload to an RSA public key
pub fn rsa_encrypt<'a, 'k>(
    payload: impl Into<Payload<'a>>,
    public_key: impl Into<Payload<'k>>,
    options: &RsaOptions,
) -> Result<Encoded> {
    let message = payload.into().plain();
    let public_key = public_key.into().binary()?;

    tracing::debug!("rsa_encrypt: {} bytes for {}", message.len(), crypto::fingerprint(&public_key));
    let ciphertext = rsa_cipher::encrypt(message, &public_key)?;
    Ok(Encoded::binary(ciphertext, options.raw))
}

/// Decrypt an [`rsa_encrypt`] result with the matching private key
pub fn rsa_decrypt<'a, 'k>(
    payload: impl Into<Payload<'a>>,
    private_key: impl Into<Payload<'k>>,
    options: &RsaOptions,
) -> Result<Encoded> {
    let ciphertext = payload.into().binary()?;
    let private_key = private_key.into().binary()?;

    let message = rsa_cipher::decrypt(&ciphertext, &private_key)?;
    tracing::debug!("rsa_decrypt: recovered {} bytes", message.len());
    Encoded::content(message, options.raw)
}

/// Sign a payload with an RSA private key
pub fn rsa_sign<'a, 'k>(
    payload: impl Into<Payload<'a>>,
    private_key: impl Into<Payload<'k>>,
    options: &SignOptions,
) -> Result<Encoded> {
    let message = payload.into().plain();
    let private_key = private_key.into().binary()?;

    let signature = crypto::sign(options.algorithm, message, &private_key)?;
    tracing::debug!("rsa_sign: {} bytes with {}", message.len(), options.algorithm);
    Ok(Encoded::binary(signature, options.raw))
}

/// Verify a signature of a payload against an RSA public key
///
/// `Ok(())` only when the signature is valid; `SignatureInvalid` otherwise.
pub fn rsa_verify<'a, 's, 'k>(
    payload: impl Into<Payload<'a>>,
    signature: impl Into<Payload<'s>>,
    public_key: impl Into<Payload<'k>>,
    options: &SignOptions,
) -> Result<()> {
    let message = payload.into().plain();
    let signature = signature.into().binary()?;
    let public_key = public_key.into().binary()?;

    let result = crypto::verify(options.algorithm, message, &signature, &public_key);
    if result.is_err() {
        tracing::debug!(
            "rsa_verify: rejected {} signature from {}",
            options.algorithm,
            crypto::fingerprint(&public_key)
        );
    }
    result
}

/// AES-256-GCM encrypt a payload with a password or key
pub fn aes_encrypt<'a>(
    payload: impl Into<Payload<'a>>,
    secret: Secret<'_>,
    options: &AesOptions,
) -> Result<Encoded> {
    let plaintext = payload.into().plain();
    let key = secret.to_key()?;

    let packet = symmetric::encrypt(plaintext, &key)?;
    tracing::debug!("aes_encrypt: {} bytes", plaintext.len());
    Ok(Encoded::binary(packet, options.raw))
}

/// Decrypt an [`aes_encrypt`] result
pub fn aes_decrypt<'a>(
    payload: impl Into<Payload<'a>>,
    secret: Secret<'_>,
    options: &AesOptions,
) -> Result<Encoded> {
    let packet = payload.into().binary()?;
    let key = secret.to_key()?;

    let plaintext = symmetric::decrypt(&packet, &key)?;
    tracing::debug!("aes_decrypt: recovered {} bytes", plaintext.len());
    Encoded::content(plaintext, options.raw)
}

/// Seal a payload into an envelope, signed when `signing_key` is given
pub fn encrypt<'a, 'k>(
    payload: impl Into<Payload<'a>>,
    recipient: EnvelopeKey<'_>,
    signing_key: Option<Payload<'k>>,
    options: &EncryptOptions,
) -> Result<SealedOutput> {
    let content = payload.into().plain();
    let signing_key = signing_key.map(|key| key.binary()).transpose()?;
    let signer = signing_key.as_ref().map(|private_key| Signer {
        private_key: private_key.as_slice(),
        algorithm: options.algorithm,
    });

    let sealed = match recipient {
        EnvelopeKey::Rsa(public_key) => {
            let public_key = public_key.binary()?;
            envelope::seal(content, Recipient::PublicKey(&public_key), signer)?
        }
        EnvelopeKey::Secret(secret) => {
            let key = secret.to_key()?;
            envelope::seal(content, Recipient::SharedKey(&key), signer)?
        }
    };

    Ok(SealedOutput {
        envelope: Encoded::binary(sealed.envelope.to_bytes(), options.raw),
        signature: sealed.signature.map(|s| Encoded::binary(s, options.raw)),
        fingerprint: sealed.fingerprint,
    })
}

/// Open an envelope produced by [`encrypt`]
pub fn decrypt<'a>(
    payload: impl Into<Payload<'a>>,
    key: EnvelopeKey<'_>,
    options: &DecryptOptions,
) -> Result<OpenedOutput> {
    let bytes = payload.into().binary()?;
    let envelope = Envelope::from_bytes(&bytes)?;

    let opened = match key {
        EnvelopeKey::Rsa(private_key) => {
            let private_key = private_key.binary()?;
            envelope::open(&envelope, OpeningKey::PrivateKey(&private_key))?
        }
        EnvelopeKey::Secret(secret) => {
            let key = secret.to_key()?;
            envelope::open(&envelope, OpeningKey::SharedKey(&key))?
        }
    };

    Ok(OpenedOutput {
        content: Encoded::content(opened.content, options.raw)?,
        signature: opened.signature.map(|s| Encoded::binary(s, options.raw)),
        fingerprint: opened.fingerprint,
        algorithm: opened.algorithm,
    })
}

/// Fingerprint of the public key an envelope was sealed for
///
/// `None` for envelopes sealed with a shared secret.
pub fn get_key<'a>(payload: impl Into<Payload<'a>>) -> Result<Option<String>> {
    let bytes = payload.into().binary()?;
    envelope::recipient_fingerprint(&bytes)
}

// ============================================================================
// TESTS
// ============================================================================
