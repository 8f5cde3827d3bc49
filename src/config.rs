//! # Operation Options
//!
//! Typed, defaulted options for every operation in [`crate::operations`].
//!
//! Every struct implements `Default` and deserializes from JSON with
//! missing fields falling back to their defaults:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          OPTION DEFAULTS                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  algorithm   "SHA256"      SHA256 | SHA384 | SHA512                    │
//! │  format      "text"        text | raw | fingerprint                    │
//! │  raw         false         binary results as base64 text,              │
//! │                            decrypted content as UTF-8 text             │
//! │  strength    2048          RSA modulus bits                            │
//! │  seed        none          deterministic key generation                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```ignore
//! let options = HashOptions::from_json(r#"{"algorithm": "SHA512"}"#)?;
//! assert_eq!(options.format, DigestFormat::Text);
//! ```
//!
//! Unknown fields are rejected with `InvalidOptions`, so a misspelled option
//! never silently falls back to a default. Unknown algorithm and format
//! names fail with `UnsupportedAlgorithm` / `UnsupportedFormat`, as they do
//! through [`std::str::FromStr`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::{DigestAlgorithm, DigestFormat, DEFAULT_STRENGTH};
use crate::error::Result;

macro_rules! impl_from_json {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                /// Parse from a JSON object; absent fields take their defaults
                pub fn from_json(json: &str) -> Result<Self> {
                    let value: Value = serde_json::from_str(json)?;
                    check_names(&value)?;
                    Ok(serde_json::from_value(value)?)
                }
            }
        )*
    };
}

/// Parse `algorithm` and `format` names with their `FromStr` impls so an
/// unknown name keeps its typed error
fn check_names(value: &Value) -> Result<()> {
    if let Some(name) = value.get("algorithm").and_then(Value::as_str) {
        name.parse::<DigestAlgorithm>()?;
    }
    if let Some(name) = value.get("format").and_then(Value::as_str) {
        name.parse::<DigestFormat>()?;
    }
    Ok(())
}

/// Options for [`crate::operations::hash`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashOptions {
    /// Digest algorithm
    pub algorithm: DigestAlgorithm,
    /// Output rendering
    pub format: DigestFormat,
}

/// Options for [`crate::operations::create_key`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeyGenOptions {
    /// Modulus size in bits
    pub strength: usize,
    /// Seed for deterministic generation
    pub seed: Option<String>,
    /// Return DER bytes instead of base64 text
    pub raw: bool,
}

impl Default for KeyGenOptions {
    fn default() -> Self {
        Self {
            strength: DEFAULT_STRENGTH,
            seed: None,
            raw: false,
        }
    }
}

/// Options for `rsa_encrypt` / `rsa_decrypt`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RsaOptions {
    /// Return bytes instead of text
    pub raw: bool,
}

/// Options for `rsa_sign` / `rsa_verify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SignOptions {
    /// Digest algorithm the signature is computed over
    pub algorithm: DigestAlgorithm,
    /// Return the signature as bytes instead of base64
    pub raw: bool,
}

/// Options for `aes_encrypt` / `aes_decrypt`
///
/// The password or key itself is passed alongside, never stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AesOptions {
    /// Return bytes instead of text
    pub raw: bool,
}

/// Options for [`crate::operations::encrypt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncryptOptions {
    /// Digest algorithm for the sender signature
    pub algorithm: DigestAlgorithm,
    /// Return the envelope and signature as bytes instead of base64
    pub raw: bool,
}

/// Options for [`crate::operations::decrypt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecryptOptions {
    /// Return content and signature as bytes instead of text
    pub raw: bool,
}

impl_from_json!(
    HashOptions,
    KeyGenOptions,
    RsaOptions,
    SignOptions,
    AesOptions,
    EncryptOptions,
    DecryptOptions,
);

// ============================================================================
// TESTS
// ============================================================================
