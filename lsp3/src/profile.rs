//! LSP3 profile document model and resolution results.
//!
//! Profile documents in the wild are loosely shaped. The fields are pulled
//! out one at a time so that a malformed `profileImage` never costs the
//! display name, and vice versa.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::ResolverConfig;
use crate::ipfs;

/// Key under which LSP3 documents nest their profile fields.
pub const LSP3_PROFILE_FIELD: &str = "LSP3Profile";

/// One entry of a `profileImage` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageEntry {
    /// Image descriptor object (`{ "url": ..., "width": ..., "height": ... }`).
    Descriptor {
        /// Image location, if present and a string.
        url: Option<String>,
        /// Pixel width.
        width: Option<u64>,
        /// Pixel height.
        height: Option<u64>,
    },
    /// A bare URL string.
    Bare(String),
    /// Anything else.
    Unrecognized,
}

impl ImageEntry {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::Bare(s.clone()),
            Value::Object(map) => Self::Descriptor {
                url: string_field(map, "url"),
                width: map.get("width").and_then(Value::as_u64),
                height: map.get("height").and_then(Value::as_u64),
            },
            _ => Self::Unrecognized,
        }
    }

    /// Returns the image reference of this entry.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Descriptor { url, .. } => url.as_deref(),
            Self::Bare(url) => Some(url.as_str()),
            Self::Unrecognized => None,
        }
        .filter(|u| !u.is_empty())
    }
}

/// The shapes a `profileImage` field takes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileImage {
    /// Ordered list of image variants; the first one is used.
    List(Vec<ImageEntry>),
    /// A single URL string.
    Url(String),
    /// A single descriptor object.
    Object {
        /// Image location, if present and a string.
        url: Option<String>,
    },
}

impl ProfileImage {
    /// Classifies a raw `profileImage` value. Returns `None` for unrecognized shapes.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::List(items.iter().map(ImageEntry::from_value).collect())),
            Value::String(s) => Some(Self::Url(s.clone())),
            Value::Object(map) => Some(Self::Object {
                url: string_field(map, "url"),
            }),
            _ => None,
        }
    }

    /// Returns the raw (not yet normalized) avatar reference.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::List(entries) => entries.first().and_then(ImageEntry::url),
            Self::Url(url) => Some(url.as_str()).filter(|u| !u.is_empty()),
            Self::Object { url } => url.as_deref().filter(|u| !u.is_empty()),
        }
    }
}

/// Profile fields extracted from an LSP3 document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lsp3Profile {
    /// Display name.
    pub name: Option<String>,
    /// Profile image in whatever shape the document used.
    pub profile_image: Option<ProfileImage>,
}

impl Lsp3Profile {
    /// Extracts profile fields from a document.
    ///
    /// Fields nested under `LSP3Profile` take precedence; a document without
    /// that key is read at the top level.
    #[must_use]
    pub fn from_document(document: &Value) -> Self {
        let fields = match document.get(LSP3_PROFILE_FIELD) {
            Some(Value::Object(nested)) => Some(nested),
            Some(Value::Null) | None => document.as_object(),
            Some(_) => None,
        };
        let Some(fields) = fields else {
            return Self::default();
        };
        Self {
            name: string_field(fields, "name").filter(|n| !n.is_empty()),
            profile_image: fields.get("profileImage").and_then(ProfileImage::from_value),
        }
    }

    /// Returns the avatar URL, with `ipfs://` references rewritten to the gateway.
    #[must_use]
    pub fn avatar_url(&self, config: &ResolverConfig) -> Option<String> {
        self.profile_image
            .as_ref()
            .and_then(ProfileImage::reference)
            .map(|r| ipfs::normalize(r, config))
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStatus {
    /// A profile document was read.
    Ok,
    /// Wrong chain or malformed address; nothing was queried.
    Unsupported,
    /// The account stores no profile pointer.
    NotFound,
    /// Reading the on-chain store failed.
    ChainReadError,
    /// Fetching the document failed or returned a non-success status.
    FetchError,
    /// The pointer or document could not be decoded.
    ParseError,
    /// The document does not match the on-chain hash.
    HashMismatch,
}

impl ResolutionStatus {
    /// Returns `true` for [`ResolutionStatus::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "ok",
            Self::Unsupported => "unsupported",
            Self::NotFound => "not-found",
            Self::ChainReadError => "chain-read-error",
            Self::FetchError => "fetch-error",
            Self::ParseError => "parse-error",
            Self::HashMismatch => "hash-mismatch",
        };
        f.write_str(s)
    }
}

/// Result of resolving a Universal Profile.
///
/// Always produced once resolution is attempted. Missing fields are `None`;
/// [`ResolvedProfile::status`] says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProfile {
    /// The queried address, as given.
    pub address: String,
    /// Display name from the profile document.
    pub display_name: Option<String>,
    /// Fetchable avatar image URL.
    pub avatar_url: Option<String>,
    /// How resolution ended.
    pub status: ResolutionStatus,
}

impl ResolvedProfile {
    /// Creates a result with no name and no image.
    pub fn empty(address: impl Into<String>, status: ResolutionStatus) -> Self {
        Self {
            address: address.into(),
            display_name: None,
            avatar_url: None,
            status,
        }
    }

    /// Builds a successful result from extracted profile fields.
    pub fn from_profile(address: impl Into<String>, profile: &Lsp3Profile, config: &ResolverConfig) -> Self {
        Self {
            address: address.into(),
            display_name: profile.name.clone(),
            avatar_url: profile.avatar_url(config),
            status: ResolutionStatus::Ok,
        }
    }

    /// Returns `true` if neither a name nor an image is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.avatar_url.is_none()
    }
}
