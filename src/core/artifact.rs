//! Artifact references - `name:version` strings resolved by the artifact store

use crate::core::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The version half of an artifact reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactVersion {
    /// The most recent version under the name
    Latest,
    /// The version a human promoted to production
    Prod,
    /// A literal tag, e.g. `reference` or `v3`
    Tag(String),
}

/// A reference to a named, versioned artifact
///
/// The driver only constructs these; resolving them to stored data is the
/// artifact store's job, so a dangling reference surfaces when the step
/// executor attempts resolution, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactRef {
    pub name: String,
    pub version: ArtifactVersion,
}

impl ArtifactRef {
    pub fn latest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: ArtifactVersion::Latest,
        }
    }

    pub fn prod(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: ArtifactVersion::Prod,
        }
    }

    pub fn tagged(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: ArtifactVersion::Tag(tag.into()),
        }
    }
}

impl fmt::Display for ArtifactVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactVersion::Latest => f.write_str("latest"),
            ArtifactVersion::Prod => f.write_str("prod"),
            ArtifactVersion::Tag(tag) => f.write_str(tag),
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.version)
    }
}

impl FromStr for ArtifactRef {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, version) = s
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::MalformedArtifact(s.to_string()))?;
        if name.is_empty() || version.is_empty() {
            return Err(ConfigError::MalformedArtifact(s.to_string()));
        }

        let version = match version {
            "latest" => ArtifactVersion::Latest,
            "prod" => ArtifactVersion::Prod,
            tag => ArtifactVersion::Tag(tag.to_string()),
        };
        Ok(ArtifactRef {
            name: name.to_string(),
            version,
        })
    }
}

impl TryFrom<String> for ArtifactRef {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ArtifactRef> for String {
    fn from(artifact: ArtifactRef) -> String {
        artifact.to_string()
    }
}
