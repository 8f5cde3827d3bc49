//! # Hybrid Envelope Protocol
//!
//! Composes the primitives into one authenticated encrypt/decrypt pipeline:
//! a fresh AES key per message, wrapped with RSA for the recipient, with an
//! optional RSA signature of the content travelling inside the ciphertext.
//!
//! ## Sealing
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          seal()                                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. sign(content) with sender private key      (optional)              │
//! │  2. payload = algorithm || signer_fp || sig_len || signature || content│
//! │  3. fresh AES-256 key           (or the caller's shared key)           │
//! │  4. packet = AES-GCM(key, payload) = nonce || ciphertext || tag        │
//! │  5. wrapped = RSA-OAEP(recipient public key, AES key)                  │
//! │  6. envelope = version || mode || recipient_fp || wrapped || packet    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ENVELOPE FORMAT                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  version       1 byte    = 1                                           │
//! │  mode          1 byte    0 = shared key, 1 = public key                │
//! │  ┌── public key mode only ──────────────────────────────────────────┐  │
//! │  │ recipient_fp  32 bytes  SHA-256 of recipient public key DER      │  │
//! │  │ wrapped_len   4 bytes   big-endian u32                           │  │
//! │  │ wrapped_key   wrapped_len bytes                                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │  nonce         12 bytes                                                │
//! │  ciphertext    remainder, 16-byte tag last                             │
//! │                                                                         │
//! │  Inside the ciphertext:                                                │
//! │  algorithm     1 byte    0 = unsigned, 1/2/3 = SHA256/384/512          │
//! │  ┌── signed only ───────────────────────────────────────────────────┐  │
//! │  │ signer_fp     32 bytes  SHA-256 of signer public key DER         │  │
//! │  │ sig_len       4 bytes   big-endian u32                           │  │
//! │  │ signature     sig_len bytes                                      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │  content       remainder                                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Opening does not verify the signature. It surfaces the signature and the
//! signer fingerprint so the caller can look up a trusted public key and
//! call [`crate::crypto::verify`] themselves.

use zeroize::Zeroizing;

use crate::crypto::keys::{fingerprint_bytes, public_key_from_private, FINGERPRINT_SIZE, MAX_STRENGTH};
use crate::crypto::{rsa_cipher, sign, symmetric, to_fingerprint, DigestAlgorithm, Nonce, SymmetricKey};
use crate::crypto::{NONCE_SIZE, TAG_SIZE};
use crate::error::{Error, Result};

/// Current envelope format version
pub const ENVELOPE_VERSION: u8 = 1;

const MODE_SHARED_KEY: u8 = 0;
const MODE_PUBLIC_KEY: u8 = 1;
const UNSIGNED: u8 = 0;

/// Upper bound for wrapped keys and signatures (one block of the largest key)
const MAX_BLOCK_SIZE: usize = MAX_STRENGTH / 8;

/// Who an envelope is sealed for
#[derive(Debug, Clone, Copy)]
pub enum Recipient<'a> {
    /// Wrap a fresh AES key for this DER-encoded RSA public key
    PublicKey(&'a [u8]),
    /// Encrypt directly with a key both parties already hold
    SharedKey(&'a SymmetricKey),
}

/// Key used to open an envelope
#[derive(Debug, Clone, Copy)]
pub enum OpeningKey<'a> {
    /// DER-encoded RSA private key matching the recipient public key
    PrivateKey(&'a [u8]),
    /// The shared key the envelope was sealed with
    SharedKey(&'a SymmetricKey),
}

/// Sender identity used to sign the content
#[derive(Clone, Copy)]
pub struct Signer<'a> {
    /// DER-encoded RSA private key of the sender
    pub private_key: &'a [u8],
    /// Digest algorithm for the signature
    pub algorithm: DigestAlgorithm,
}

/// AES key wrapped for one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedKey {
    pub(crate) recipient_fingerprint: [u8; FINGERPRINT_SIZE],
    pub(crate) ciphertext: Vec<u8>,
}

impl WrappedKey {
    /// Raw SHA-256 fingerprint of the recipient public key
    pub fn recipient_fingerprint(&self) -> &[u8; FINGERPRINT_SIZE] {
        &self.recipient_fingerprint
    }

    /// RSA-OAEP ciphertext of the AES key
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

/// An encrypted, optionally signed message
///
/// Only [`seal`] and [`Envelope::from_bytes`] construct one; the fields are
/// read-only outside this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub(crate) wrapped_key: Option<WrappedKey>,
    pub(crate) nonce: Nonce,
    pub(crate) ciphertext: Vec<u8>,
}

impl Envelope {
    /// Wrapped AES key, absent for shared-key envelopes
    pub fn wrapped_key(&self) -> Option<&WrappedKey> {
        self.wrapped_key.as_ref()
    }

    /// AES-GCM nonce
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// AES-GCM ciphertext with the tag appended
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Serialize to the wire format
    pub fn to_bytes(&self) -> Vec<u8> {
        let wrapped_len = self
            .wrapped_key
            .as_ref()
            .map_or(0, |w| FINGERPRINT_SIZE + 4 + w.ciphertext.len());
        let mut out = Vec::with_capacity(2 + wrapped_len + NONCE_SIZE + self.ciphertext.len());

        out.push(ENVELOPE_VERSION);
        match &self.wrapped_key {
            Some(wrapped) => {
                out.push(MODE_PUBLIC_KEY);
                out.extend_from_slice(&wrapped.recipient_fingerprint);
                out.extend_from_slice(&(wrapped.ciphertext.len() as u32).to_be_bytes());
                out.extend_from_slice(&wrapped.ciphertext);
            }
            None => out.push(MODE_SHARED_KEY),
        }
        out.extend_from_slice(self.nonce.as_bytes());
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parse the wire format
    ///
    /// ## Errors
    ///
    /// `MalformedEnvelope` if the bytes are truncated or carry an unknown
    /// version or mode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);

        let version = reader.u8()?;
        if version != ENVELOPE_VERSION {
            return Err(Error::MalformedEnvelope(format!(
                "Unsupported envelope version {}",
                version
            )));
        }

        let wrapped_key = match reader.u8()? {
            MODE_SHARED_KEY => None,
            MODE_PUBLIC_KEY => {
                let mut recipient_fingerprint = [0u8; FINGERPRINT_SIZE];
                recipient_fingerprint.copy_from_slice(reader.take(FINGERPRINT_SIZE)?);
                let ciphertext = reader.length_prefixed()?.to_vec();
                Some(WrappedKey {
                    recipient_fingerprint,
                    ciphertext,
                })
            }
            other => {
                return Err(Error::MalformedEnvelope(format!(
                    "Unknown envelope mode {}",
                    other
                )))
            }
        };

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(reader.take(NONCE_SIZE)?);

        let ciphertext = reader.rest();
        if ciphertext.len() < TAG_SIZE {
            return Err(Error::MalformedEnvelope(
                "Ciphertext is shorter than the authentication tag".into(),
            ));
        }

        Ok(Self {
            wrapped_key,
            nonce: Nonce::from_bytes(nonce),
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Fingerprint of the public key this envelope was sealed for
    ///
    /// `None` for shared-key envelopes.
    pub fn recipient_fingerprint(&self) -> Option<String> {
        self.wrapped_key
            .as_ref()
            .map(|w| to_fingerprint(&w.recipient_fingerprint))
    }

    /// `nonce || ciphertext || tag`, as the symmetric cipher expects
    fn packet(&self) -> Vec<u8> {
        let mut packet = Vec::with_capacity(NONCE_SIZE + self.ciphertext.len());
        packet.extend_from_slice(self.nonce.as_bytes());
        packet.extend_from_slice(&self.ciphertext);
        packet
    }
}

/// Result of [`seal`]
#[derive(Debug, Clone)]
pub struct SealedEnvelope {
    /// The envelope to transport
    pub envelope: Envelope,
    /// Signature of the content, when a signer was given
    pub signature: Option<Vec<u8>>,
    /// Signer fingerprint, when a signer was given
    pub fingerprint: Option<String>,
}

/// Result of [`open`]
#[derive(Debug, Clone)]
pub struct OpenedEnvelope {
    /// Decrypted content
    pub content: Vec<u8>,
    /// Signature that travelled with the content, if it was signed
    pub signature: Option<Vec<u8>>,
    /// Fingerprint of the key that claims to have signed it
    pub fingerprint: Option<String>,
    /// Digest algorithm of the signature
    pub algorithm: Option<DigestAlgorithm>,
}

/// Encrypt (and optionally sign) `content` for `recipient`
///
/// ## Errors
///
/// - `InvalidKeyEncoding` if the recipient or signer key is not valid DER
/// - `MessageTooLarge` if the recipient key is too small to wrap an AES key
pub fn seal(content: &[u8], recipient: Recipient<'_>, signer: Option<Signer<'_>>) -> Result<SealedEnvelope> {
    let mut payload = Zeroizing::new(Vec::with_capacity(content.len() + 64));
    let mut signature = None;
    let mut signer_fingerprint = None;

    match signer {
        Some(signer) => {
            let sig = sign(signer.algorithm, content, signer.private_key)?;
            let signer_fp = fingerprint_bytes(&public_key_from_private(signer.private_key)?);

            payload.push(signer.algorithm.wire_id());
            payload.extend_from_slice(&signer_fp);
            payload.extend_from_slice(&(sig.len() as u32).to_be_bytes());
            payload.extend_from_slice(&sig);

            signer_fingerprint = Some(to_fingerprint(&signer_fp));
            signature = Some(sig);
        }
        None => payload.push(UNSIGNED),
    }
    payload.extend_from_slice(content);

    let (key, wrapped_key) = match recipient {
        Recipient::PublicKey(public_der) => {
            let key = SymmetricKey::generate();
            let wrapped = rsa_cipher::encrypt(key.as_bytes(), public_der)?;
            let wrapped_key = WrappedKey {
                recipient_fingerprint: fingerprint_bytes(public_der),
                ciphertext: wrapped,
            };
            (key, Some(wrapped_key))
        }
        Recipient::SharedKey(key) => (key.clone(), None),
    };

    let packet = symmetric::encrypt(&payload, &key)?;
    let mut nonce = [0u8; NONCE_SIZE];
    nonce.copy_from_slice(&packet[..NONCE_SIZE]);

    let envelope = Envelope {
        wrapped_key,
        nonce: Nonce::from_bytes(nonce),
        ciphertext: packet[NONCE_SIZE..].to_vec(),
    };

    tracing::debug!(
        "Sealed {} bytes for {} (signed by {})",
        content.len(),
        envelope.recipient_fingerprint().as_deref().unwrap_or("shared key"),
        signer_fingerprint.as_deref().unwrap_or("nobody")
    );

    Ok(SealedEnvelope {
        envelope,
        signature,
        fingerprint: signer_fingerprint,
    })
}

/// Decrypt an envelope and surface its signature metadata
///
/// The signature is **not** verified here.
///
/// ## Errors
///
/// - `MalformedEnvelope` if the key kind doesn't match the envelope mode,
///   or the decrypted payload header is truncated
/// - `AuthenticationFailure` if the private key is not the recipient's, or
///   the wrapped key or ciphertext was altered
pub fn open(envelope: &Envelope, key: OpeningKey<'_>) -> Result<OpenedEnvelope> {
    let key = match (&envelope.wrapped_key, key) {
        (Some(wrapped), OpeningKey::PrivateKey(private_der)) => {
            let ours = fingerprint_bytes(&public_key_from_private(private_der)?);
            if ours != wrapped.recipient_fingerprint {
                tracing::warn!(
                    "Envelope sealed for {}, not for {}",
                    to_fingerprint(&wrapped.recipient_fingerprint),
                    to_fingerprint(&ours)
                );
                return Err(Error::AuthenticationFailure);
            }

            let raw = rsa_cipher::decrypt(&wrapped.ciphertext, private_der).map_err(|e| match e {
                Error::DecryptionFailed(_) => Error::AuthenticationFailure,
                other => other,
            })?;
            let raw = Zeroizing::new(raw);
            SymmetricKey::from_slice(&raw).map_err(|_| Error::AuthenticationFailure)?
        }
        (None, OpeningKey::SharedKey(key)) => key.clone(),
        (Some(_), OpeningKey::SharedKey(_)) => {
            return Err(Error::MalformedEnvelope(
                "Envelope was sealed for a public key, not a shared key".into(),
            ))
        }
        (None, OpeningKey::PrivateKey(_)) => {
            return Err(Error::MalformedEnvelope(
                "Envelope was sealed with a shared key, not a public key".into(),
            ))
        }
    };

    let payload = Zeroizing::new(symmetric::decrypt(&envelope.packet(), &key)?);
    let mut reader = Reader::new(&payload);

    let (algorithm, fingerprint, signature) = match reader.u8()? {
        UNSIGNED => (None, None, None),
        id => {
            let algorithm = DigestAlgorithm::from_wire_id(id).ok_or_else(|| {
                Error::MalformedEnvelope(format!("Unknown signature algorithm {}", id))
            })?;
            let signer_fp = to_fingerprint(reader.take(FINGERPRINT_SIZE)?);
            let signature = reader.length_prefixed()?.to_vec();
            (Some(algorithm), Some(signer_fp), Some(signature))
        }
    };
    let content = reader.rest().to_vec();

    tracing::debug!(
        "Opened {} bytes (signed by {})",
        content.len(),
        fingerprint.as_deref().unwrap_or("nobody")
    );

    Ok(OpenedEnvelope {
        content,
        signature,
        fingerprint,
        algorithm,
    })
}

/// Read the recipient fingerprint from serialized envelope bytes
///
/// Needs no key; lets a holder of many private keys pick the right one.
/// Returns `None` for shared-key envelopes.
pub fn recipient_fingerprint(bytes: &[u8]) -> Result<Option<String>> {
    Ok(Envelope::from_bytes(bytes)?.recipient_fingerprint())
}

// ============================================================================
// BYTE READER
// ============================================================================

/// Bounds-checked cursor over envelope bytes
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                Error::MalformedEnvelope(format!(
                    "Truncated: needed {} bytes at offset {}, {} available",
                    n,
                    self.pos,
                    self.bytes.len().saturating_sub(self.pos)
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    /// A u32 length followed by that many bytes, capped at one RSA block
    fn length_prefixed(&mut self) -> Result<&'a [u8]> {
        let len = self.u32()? as usize;
        if len > MAX_BLOCK_SIZE {
            return Err(Error::MalformedEnvelope(format!(
                "Field too large: {} bytes (max {})",
                len, MAX_BLOCK_SIZE
            )));
        }
        self.take(len)
    }

    fn rest(&mut self) -> &'a [u8] {
        let rest = &self.bytes[self.pos..];
        self.pos = self.bytes.len();
        rest
    }
}

// ============================================================================
// TESTS
// ============================================================================
