use std::fmt;

use serde::{Deserialize, Serialize};

/// EIP-712 domain name of the hub, shared by every protocol version.
pub const HUB_DOMAIN_NAME: &str = "Lens Protocol Profiles";

/// What a publication does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationKind {
    Post,
    Comment,
    Mirror,
    Quote,
}

impl PublicationKind {
    /// Returns `true` if the publication references another publication.
    pub const fn has_pointer(&self) -> bool {
        !matches!(self, Self::Post)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Comment => "COMMENT",
            Self::Mirror => "MIRROR",
            Self::Quote => "QUOTE",
        }
    }
}

impl fmt::Display for PublicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hub protocol version the publication was signed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LensVersion {
    V1,
    V2,
}

impl LensVersion {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "V1",
            Self::V2 => "V2",
        }
    }

    /// EIP-712 domain version the hub signs with.
    pub const fn domain_version(&self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2 => "2",
        }
    }
}

impl fmt::Display for LensVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
