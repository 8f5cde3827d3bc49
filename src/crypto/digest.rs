//! # Digest Engine
//!
//! SHA-2 message digests with three renderings.
//!
//! ## Output Formats
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       DIGEST OUTPUT FORMATS                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  digest("abc", SHA256, ...)                                            │
//! │                                                                         │
//! │  text         ba7816bf8f01cfea414140de5dae2223b00361a3...             │
//! │               lowercase hex, no separators                             │
//! │                                                                         │
//! │  fingerprint  ba78-16bf-8f01-cfea-4141-40de-5dae-2223-...             │
//! │               lowercase hex, '-' after every 2 bytes, none trailing    │
//! │                                                                         │
//! │  raw          [0xba, 0x78, 0x16, 0xbf, ...]                            │
//! │               the digest bytes untouched                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::error::{Error, Result};

/// Separator placed between byte pairs in fingerprint output
pub const FINGERPRINT_SEPARATOR: char = '-';

/// Supported SHA-2 algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 (32-byte digest)
    #[default]
    #[serde(rename = "SHA256")]
    Sha256,
    /// SHA-384 (48-byte digest)
    #[serde(rename = "SHA384")]
    Sha384,
    /// SHA-512 (64-byte digest)
    #[serde(rename = "SHA512")]
    Sha512,
}

impl DigestAlgorithm {
    /// Canonical name, as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha384 => "SHA384",
            DigestAlgorithm::Sha512 => "SHA512",
        }
    }

    /// Digest size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }

    /// Hash `data` with this algorithm
    pub fn hash(&self, data: &[u8]) -> Vec<u8> {
        match self {
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// One-byte identifier used in the envelope signing header
    pub(crate) fn wire_id(&self) -> u8 {
        match self {
            DigestAlgorithm::Sha256 => 1,
            DigestAlgorithm::Sha384 => 2,
            DigestAlgorithm::Sha512 => 3,
        }
    }

    pub(crate) fn from_wire_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(DigestAlgorithm::Sha256),
            2 => Some(DigestAlgorithm::Sha384),
            3 => Some(DigestAlgorithm::Sha512),
            _ => None,
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "SHA256" => Ok(DigestAlgorithm::Sha256),
            "SHA384" => Ok(DigestAlgorithm::Sha384),
            "SHA512" => Ok(DigestAlgorithm::Sha512),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// How a digest is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFormat {
    /// Lowercase contiguous hex
    #[default]
    Text,
    /// Digest bytes as-is
    Raw,
    /// Lowercase hex grouped by byte pairs
    Fingerprint,
}

impl DigestFormat {
    /// Canonical name, as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            DigestFormat::Text => "text",
            DigestFormat::Raw => "raw",
            DigestFormat::Fingerprint => "fingerprint",
        }
    }
}

impl FromStr for DigestFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(DigestFormat::Text),
            "raw" => Ok(DigestFormat::Raw),
            "fingerprint" => Ok(DigestFormat::Fingerprint),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for DigestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A rendered digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestOutput {
    /// `text` or `fingerprint` rendering
    Text(String),
    /// `raw` rendering
    Raw(Vec<u8>),
}

impl DigestOutput {
    /// The textual rendering, if this is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DigestOutput::Text(s) => Some(s),
            DigestOutput::Raw(_) => None,
        }
    }

    /// The raw digest bytes, if this is the raw rendering
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            DigestOutput::Text(_) => None,
            DigestOutput::Raw(b) => Some(b),
        }
    }
}

/// Compute the digest of `data` and render it in `format`
pub fn digest(data: &[u8], algorithm: DigestAlgorithm, format: DigestFormat) -> DigestOutput {
    let bytes = algorithm.hash(data);
    match format {
        DigestFormat::Text => DigestOutput::Text(hex::encode(&bytes)),
        DigestFormat::Raw => DigestOutput::Raw(bytes),
        DigestFormat::Fingerprint => DigestOutput::Text(to_fingerprint(&bytes)),
    }
}

/// Render bytes as lowercase hex with a separator after every byte pair
pub fn to_fingerprint(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 5 / 2);
    for (i, pair) in bytes.chunks(2).enumerate() {
        if i > 0 {
            out.push(FINGERPRINT_SEPARATOR);
        }
        out.push_str(&hex::encode(pair));
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================
