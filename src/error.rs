//! # Error Handling
//!
//! This module provides the error type shared by every primitive and
//! operation in the crate.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Usage Errors (caller passed something we don't support)          │
//! │  │   ├── UnsupportedAlgorithm  - Unknown digest algorithm name        │
//! │  │   ├── UnsupportedFormat     - Unknown digest output format         │
//! │  │   ├── InvalidStrength       - Unsupported RSA modulus size         │
//! │  │   ├── InvalidKeyLength      - Symmetric key of the wrong size      │
//! │  │   ├── InvalidOptions        - Options JSON could not be parsed     │
//! │  │   └── MessageTooLarge       - Payload exceeds one RSA block        │
//! │  │                                                                      │
//! │  ├── Data Errors (tamper, wrong key, corrupt input)                   │
//! │  │   ├── MalformedInput        - AEAD packet too short                │
//! │  │   ├── MalformedEnvelope     - Envelope truncated or unknown        │
//! │  │   ├── AuthenticationFailure - AES-GCM tag mismatch                 │
//! │  │   ├── DecryptionFailed      - RSA block did not decrypt            │
//! │  │   ├── SignatureInvalid      - Signature verification failed        │
//! │  │   ├── InvalidKeyEncoding    - Key bytes are not valid DER          │
//! │  │   └── InvalidEncoding       - Bad base64 / UTF-8                   │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      ├── KeyGenerationFailed   - RSA prime generation failed          │
//! │      ├── EncryptionFailed      - Primitive refused to encrypt         │
//! │      └── SigningFailed         - Primitive refused to sign            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are transient. A failed decrypt or verify never carries
//! partial plaintext; the error is the only thing returned.

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller asked for something unsupported (programming error)
    Usage,
    /// The data or key material is wrong, corrupt or tampered with
    Data,
    /// A primitive failed for reasons outside the caller's control
    Internal,
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Usage Errors (100-199)
    // ========================================================================

    /// Digest algorithm name not recognized
    #[error("'{0}' is an unknown hashing algorithm")]
    UnsupportedAlgorithm(String),

    /// Digest output format not recognized
    #[error("'{0}' is an unknown digest format")]
    UnsupportedFormat(String),

    /// RSA modulus size not supported
    #[error("Invalid key strength: {0} bits")]
    InvalidStrength(usize),

    /// Symmetric key has the wrong size
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required key length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Options could not be parsed
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Message does not fit in a single RSA block
    #[error("Message too large: {len} bytes, at most {max} fit in one block")]
    MessageTooLarge {
        /// Size of the supplied message
        len: usize,
        /// Block capacity of the key
        max: usize,
    },

    // ========================================================================
    // Data Errors (200-299)
    // ========================================================================

    /// Input is structurally invalid
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Envelope is truncated, has an unknown version, or doesn't match the key
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// AEAD tag did not verify (tampered data or wrong key)
    #[error("Authentication failed: ciphertext was tampered with or the key is wrong")]
    AuthenticationFailure,

    /// RSA ciphertext did not decrypt under the given key
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureInvalid,

    /// Key bytes are not a valid DER-encoded RSA key
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Text input was not valid base64, or output was not valid UTF-8
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================

    /// RSA key generation failed
    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Usage
    /// - 200-299: Data
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            // Usage (100-199)
            Error::UnsupportedAlgorithm(_) => 100,
            Error::UnsupportedFormat(_) => 101,
            Error::InvalidStrength(_) => 102,
            Error::InvalidKeyLength { .. } => 103,
            Error::InvalidOptions(_) => 104,
            Error::MessageTooLarge { .. } => 105,

            // Data (200-299)
            Error::MalformedInput(_) => 200,
            Error::MalformedEnvelope(_) => 201,
            Error::AuthenticationFailure => 202,
            Error::DecryptionFailed(_) => 203,
            Error::SignatureInvalid => 204,
            Error::InvalidKeyEncoding(_) => 205,
            Error::InvalidEncoding(_) => 206,

            // Internal (900-999)
            Error::KeyGenerationFailed(_) => 900,
            Error::EncryptionFailed(_) => 901,
            Error::SigningFailed(_) => 902,
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self.code() {
            100..=199 => ErrorKind::Usage,
            200..=299 => ErrorKind::Data,
            _ => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Always `false`: retrying a failed decrypt or verify with the same
    /// inputs gives the same answer.
    pub fn is_recoverable(&self) -> bool {
        false
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::InvalidEncoding(format!("Invalid base64: {}", err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::InvalidEncoding(format!("Invalid UTF-8: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidOptions(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================
