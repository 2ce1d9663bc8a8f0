//! Decoding of the raw on-chain `LSP3Profile` value.
//!
//! The ERC725Y store returns opaque bytes. For a Universal Profile these are
//! normally an LSP2 VerifiableURI:
//!
//! ```text
//! 0x0000 | method (4 bytes) | data length (2 bytes) | data | url (utf-8)
//! ```
//!
//! Older profiles use the JSONURL layout (`method | 32-byte hash | url`), and
//! some tooling writes a plain URL string or even inline JSON. All of these
//! are decoded into [`ProfilePointer`], which then yields a
//! [`MetadataSource`] telling the resolver where the document lives.

use std::fmt;

use alloy_primitives::{Bytes, FixedBytes, keccak256};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::config::ResolverConfig;
use crate::ipfs;

/// Hash function identifier of a VerifiableURI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationMethod {
    /// `keccak256(utf8)`, id `0x6f357c6a`.
    Keccak256Utf8,
    /// `keccak256(bytes)`, id `0x8019f9b1`.
    Keccak256Bytes,
    /// Any other 4-byte id.
    Unknown(FixedBytes<4>),
}

impl VerificationMethod {
    /// Method id of `keccak256(utf8)`.
    pub const KECCAK256_UTF8_ID: [u8; 4] = [0x6f, 0x35, 0x7c, 0x6a];
    /// Method id of `keccak256(bytes)`.
    pub const KECCAK256_BYTES_ID: [u8; 4] = [0x80, 0x19, 0xf9, 0xb1];

    /// Maps a 4-byte method id to a method.
    #[must_use]
    pub fn from_id(id: [u8; 4]) -> Self {
        match id {
            Self::KECCAK256_UTF8_ID => Self::Keccak256Utf8,
            Self::KECCAK256_BYTES_ID => Self::Keccak256Bytes,
            other => Self::Unknown(FixedBytes(other)),
        }
    }

    /// Returns the 4-byte method id.
    #[must_use]
    pub const fn id(&self) -> [u8; 4] {
        match self {
            Self::Keccak256Utf8 => Self::KECCAK256_UTF8_ID,
            Self::Keccak256Bytes => Self::KECCAK256_BYTES_ID,
            Self::Unknown(id) => id.0,
        }
    }

    /// Returns `true` for methods this crate can check.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keccak256Utf8 => f.write_str("keccak256(utf8)"),
            Self::Keccak256Bytes => f.write_str("keccak256(bytes)"),
            Self::Unknown(id) => write!(f, "unknown({id})"),
        }
    }
}

/// Hash commitment carried by a verifiable pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Hash function.
    pub method: VerificationMethod,
    /// Expected digest.
    pub data: Bytes,
}

impl Verification {
    /// Checks `content` against the expected digest.
    ///
    /// Returns `None` when the method is unknown and nothing can be checked.
    #[must_use]
    pub fn check(&self, content: &[u8]) -> Option<bool> {
        match self.method {
            VerificationMethod::Keccak256Utf8 | VerificationMethod::Keccak256Bytes => {
                Some(keccak256(content).as_slice() == self.data.as_ref())
            }
            VerificationMethod::Unknown(_) => None,
        }
    }
}

/// Decoded `LSP3Profile` value.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfilePointer {
    /// Nothing stored (or an empty URL / empty object).
    Empty,
    /// LSP2 VerifiableURI.
    VerifiableUri {
        /// Hash commitment of the referenced document.
        verification: Verification,
        /// Location of the document.
        url: String,
    },
    /// Pre-LSP2 JSONURL.
    LegacyJsonUrl {
        /// Hash commitment of the referenced document.
        verification: Verification,
        /// Location of the document.
        url: String,
    },
    /// A bare URL string.
    Url(String),
    /// An already-decoded JSON document.
    Document(Value),
}

/// Where the profile document is read from.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataSource {
    /// Fetch over HTTP(S). The URL is already gateway-normalized.
    Remote {
        /// Fetch target.
        url: String,
        /// Hash commitment, if the pointer carried one.
        verification: Option<Verification>,
    },
    /// Raw document bytes embedded in a `data:` URL.
    Embedded {
        /// Document bytes.
        content: Vec<u8>,
        /// Hash commitment, if the pointer carried one.
        verification: Option<Verification>,
    },
    /// The pointer itself was the document.
    Inline(Value),
}

/// Errors while decoding the raw on-chain value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PointerDecodeError {
    /// The declared verification data length runs past the end of the value.
    #[error("verification data length {declared} exceeds remaining {available} bytes")]
    Truncated {
        /// Length claimed by the header.
        declared: usize,
        /// Bytes actually available after the header.
        available: usize,
    },
    /// The URL (or bare value) is not valid UTF-8.
    #[error("pointer value is not valid utf-8")]
    NotUtf8,
    /// A `data:` URL could not be decoded.
    #[error("malformed data url: {0}")]
    DataUrl(String),
}

const VERIFIABLE_URI_PREFIX: [u8; 2] = [0x00, 0x00];
const VERIFIABLE_URI_HEADER: usize = 8;
const LEGACY_HASH_LEN: usize = 32;

impl ProfilePointer {
    /// Decodes the raw bytes returned by ERC725Y `getData`.
    ///
    /// # Errors
    ///
    /// Returns [`PointerDecodeError`] if the value is structurally broken.
    pub fn decode(raw: &[u8]) -> Result<Self, PointerDecodeError> {
        if raw.is_empty() {
            return Ok(Self::Empty);
        }

        if raw.len() >= VERIFIABLE_URI_HEADER && raw[..2] == VERIFIABLE_URI_PREFIX {
            let method = VerificationMethod::from_id([raw[2], raw[3], raw[4], raw[5]]);
            let declared = usize::from(u16::from_be_bytes([raw[6], raw[7]]));
            let rest = &raw[VERIFIABLE_URI_HEADER..];
            if declared > rest.len() {
                return Err(PointerDecodeError::Truncated {
                    declared,
                    available: rest.len(),
                });
            }
            let (data, url) = rest.split_at(declared);
            let url = utf8(url)?;
            if url.is_empty() {
                return Ok(Self::Empty);
            }
            #[cfg(feature = "telemetry")]
            if !method.is_known() {
                tracing::debug!(method = %method, "Unknown verification method");
            }
            return Ok(Self::VerifiableUri {
                verification: Verification {
                    method,
                    data: Bytes::copy_from_slice(data),
                },
                url,
            });
        }

        if raw.len() > 4 + LEGACY_HASH_LEN {
            let method = VerificationMethod::from_id([raw[0], raw[1], raw[2], raw[3]]);
            if method.is_known() {
                let (hash, url) = raw[4..].split_at(LEGACY_HASH_LEN);
                return Ok(Self::LegacyJsonUrl {
                    verification: Verification {
                        method,
                        data: Bytes::copy_from_slice(hash),
                    },
                    url: utf8(url)?,
                });
            }
        }

        let text = utf8(raw)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::Empty);
        }
        if text.starts_with('{') {
            if let Ok(value) = serde_json::from_str::<Value>(text) {
                return Ok(match value {
                    Value::Object(ref map) if map.is_empty() => Self::Empty,
                    other => Self::Document(other),
                });
            }
        }
        Ok(Self::Url(text.to_owned()))
    }

    /// Returns `true` if nothing usable is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the hash commitment, if any.
    #[must_use]
    pub const fn verification(&self) -> Option<&Verification> {
        match self {
            Self::VerifiableUri { verification, .. } | Self::LegacyJsonUrl { verification, .. } => {
                Some(verification)
            }
            Self::Empty | Self::Url(_) | Self::Document(_) => None,
        }
    }

    /// Determines where the document should be read from.
    ///
    /// Returns `Ok(None)` for [`ProfilePointer::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`PointerDecodeError::DataUrl`] if a `data:` URL is malformed.
    pub fn source(&self, config: &ResolverConfig) -> Result<Option<MetadataSource>, PointerDecodeError> {
        let url = match self {
            Self::Empty => return Ok(None),
            Self::Document(value) => return Ok(Some(MetadataSource::Inline(value.clone()))),
            Self::Url(url) | Self::VerifiableUri { url, .. } | Self::LegacyJsonUrl { url, .. } => url,
        };
        let verification = self.verification().cloned();
        if url.starts_with("data:") {
            return Ok(Some(MetadataSource::Embedded {
                content: decode_data_url(url)?,
                verification,
            }));
        }
        Ok(Some(MetadataSource::Remote {
            url: ipfs::normalize(url, config),
            verification,
        }))
    }
}

fn utf8(bytes: &[u8]) -> Result<String, PointerDecodeError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| PointerDecodeError::NotUtf8)
}

/// Decodes the payload of a `data:[<mediatype>][;base64],<data>` URL.
///
/// Non-base64 payloads are taken verbatim; percent-encoding is not undone.
///
/// # Errors
///
/// Returns [`PointerDecodeError::DataUrl`] if the comma separator is missing
/// or the base64 payload is invalid.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, PointerDecodeError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| PointerDecodeError::DataUrl("missing data: scheme".to_owned()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| PointerDecodeError::DataUrl("missing ',' separator".to_owned()))?;
    if meta.ends_with(";base64") {
        STANDARD
            .decode(payload.trim())
            .map_err(|e| PointerDecodeError::DataUrl(e.to_string()))
    } else {
        Ok(payload.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifiable_uri(method: [u8; 4], hash: &[u8], url: &str) -> Vec<u8> {
        let mut raw = vec![0x00, 0x00];
        raw.extend_from_slice(&method);
        raw.extend_from_slice(&u16::try_from(hash.len()).unwrap().to_be_bytes());
        raw.extend_from_slice(hash);
        raw.extend_from_slice(url.as_bytes());
        raw
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(ProfilePointer::decode(&[]).unwrap(), ProfilePointer::Empty);
        assert_eq!(ProfilePointer::decode(b"  ").unwrap(), ProfilePointer::Empty);
        assert_eq!(ProfilePointer::decode(b"{}").unwrap(), ProfilePointer::Empty);
    }

    #[test]
    fn test_decode_verifiable_uri() {
        let hash = keccak256(b"{}");
        let raw = verifiable_uri(VerificationMethod::KECCAK256_UTF8_ID, hash.as_slice(), "ipfs://QmABC");
        let pointer = ProfilePointer::decode(&raw).unwrap();
        match &pointer {
            ProfilePointer::VerifiableUri { verification, url } => {
                assert_eq!(url, "ipfs://QmABC");
                assert_eq!(verification.method, VerificationMethod::Keccak256Utf8);
                assert_eq!(verification.data.as_ref(), hash.as_slice());
            }
            other => panic!("unexpected pointer {other:?}"),
        }
        let source = pointer.source(&ResolverConfig::default()).unwrap().unwrap();
        assert!(matches!(
            source,
            MetadataSource::Remote { ref url, verification: Some(_) }
                if url == "https://api.universalprofile.cloud/ipfs/QmABC"
        ));
    }

    #[test]
    fn test_decode_verifiable_uri_truncated() {
        let mut raw = verifiable_uri(VerificationMethod::KECCAK256_BYTES_ID, &[1; 32], "");
        raw[7] = 0x40;
        assert_eq!(
            ProfilePointer::decode(&raw).unwrap_err(),
            PointerDecodeError::Truncated { declared: 64, available: 32 }
        );
    }

    #[test]
    fn test_decode_verifiable_uri_without_url_is_empty() {
        let raw = verifiable_uri(VerificationMethod::KECCAK256_UTF8_ID, &[7; 32], "");
        assert!(ProfilePointer::decode(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_decode_legacy_json_url() {
        let mut raw = VerificationMethod::KECCAK256_UTF8_ID.to_vec();
        raw.extend_from_slice(&[9; 32]);
        raw.extend_from_slice(b"https://example.com/profile.json");
        let pointer = ProfilePointer::decode(&raw).unwrap();
        assert!(matches!(
            pointer,
            ProfilePointer::LegacyJsonUrl { ref url, .. } if url == "https://example.com/profile.json"
        ));
        let verification = pointer.verification().unwrap();
        assert_eq!(verification.method, VerificationMethod::Keccak256Utf8);
        assert_eq!(verification.data.as_ref(), &[9u8; 32][..]);
    }

    #[test]
    fn test_decode_plain_url_and_document() {
        let plain = ProfilePointer::decode(b"ipfs://QmPlain").unwrap();
        assert_eq!(plain, ProfilePointer::Url("ipfs://QmPlain".to_owned()));
        assert!(plain.verification().is_none());
        let source = plain.source(&ResolverConfig::default()).unwrap().unwrap();
        assert!(matches!(source, MetadataSource::Remote { verification: None, .. }));

        let pointer = ProfilePointer::decode(br#"{"LSP3Profile":{"name":"Bob"}}"#).unwrap();
        assert!(pointer.verification().is_none());
        let source = pointer.source(&ResolverConfig::default()).unwrap().unwrap();
        assert_eq!(
            source,
            MetadataSource::Inline(serde_json::json!({"LSP3Profile": {"name": "Bob"}}))
        );
    }

    #[test]
    fn test_decode_rejects_non_utf8() {
        assert_eq!(
            ProfilePointer::decode(&[0xff, 0xfe, 0x01]).unwrap_err(),
            PointerDecodeError::NotUtf8
        );
    }

    #[test]
    fn test_data_url_source() {
        let pointer = ProfilePointer::Url("data:application/json;base64,eyJuYW1lIjoiQ2FyIn0=".to_owned());
        let source = pointer.source(&ResolverConfig::default()).unwrap().unwrap();
        assert_eq!(
            source,
            MetadataSource::Embedded {
                content: br#"{"name":"Car"}"#.to_vec(),
                verification: None,
            }
        );
        assert_eq!(decode_data_url("data:application/json,{}").unwrap(), b"{}");
        assert!(decode_data_url("data:application/json;base64").is_err());
        assert!(decode_data_url("data:;base64,***").is_err());
    }

    #[test]
    fn test_verification_check() {
        let body = br#"{"LSP3Profile":{}}"#;
        let ok = Verification {
            method: VerificationMethod::Keccak256Utf8,
            data: Bytes::copy_from_slice(keccak256(body).as_slice()),
        };
        assert_eq!(ok.check(body), Some(true));
        assert_eq!(ok.check(b"tampered"), Some(false));
        let unknown = Verification {
            method: VerificationMethod::from_id([1, 2, 3, 4]),
            data: Bytes::new(),
        };
        assert_eq!(unknown.check(body), None);
    }
}
