//! Container image references

use crate::{MlstackError, MlstackResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A fully qualified `<registry-host>/<repository>:<tag>` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageUri {
    /// Registry host (e.g., "763104351884.dkr.ecr.us-east-1.amazonaws.com")
    pub host: String,
    /// Repository path within the registry
    pub repository: String,
    /// Image tag
    pub tag: String,
}

impl ImageUri {
    /// Build a reference from its parts, validating each one
    pub fn new(host: String, repository: String, tag: String) -> MlstackResult<Self> {
        let uri = Self {
            host,
            repository,
            tag,
        };
        uri.validate()?;
        Ok(uri)
    }

    fn validate(&self) -> MlstackResult<()> {
        let invalid = || MlstackError::InvalidImageUri(self.to_string());

        if self.host.is_empty() || self.host.contains('/') {
            return Err(invalid());
        }
        if self.repository.is_empty()
            || self.repository.starts_with('/')
            || self.repository.ends_with('/')
            || self.repository.contains(':')
        {
            return Err(invalid());
        }
        if self.tag.is_empty() || self.tag.contains(['/', ':']) {
            return Err(invalid());
        }
        let parts = [&self.host, &self.repository, &self.tag];
        if parts.iter().any(|p| p.chars().any(char::is_whitespace)) {
            return Err(invalid());
        }
        Ok(())
    }
}

impl FromStr for ImageUri {
    type Err = MlstackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MlstackError::InvalidImageUri(s.to_string());

        let (host, rest) = s.split_once('/').ok_or_else(invalid)?;
        let last_slash = rest.rfind('/').map_or(0, |i| i + 1);
        let colon = rest[last_slash..]
            .find(':')
            .map(|i| last_slash + i)
            .ok_or_else(invalid)?;

        Self::new(
            host.to_string(),
            rest[..colon].to_string(),
            rest[colon + 1..].to_string(),
        )
        .map_err(|_| invalid())
    }
}

impl std::fmt::Display for ImageUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}:{}", self.host, self.repository, self.tag)
    }
}

impl Serialize for ImageUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ImageUri {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
