//! Instance type parsing and accelerator family classification

use crate::{MlstackError, MlstackResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use tracing::debug;

/// Family letters of GPU-equipped instance types
pub const ACCELERATOR_FAMILIES: [char; 2] = ['g', 'p'];

/// Instance type used when none is configured
pub const DEFAULT_INSTANCE_TYPE: &str = "ml.g4dn.xlarge";

/// Determine whether an instance type belongs to a GPU family.
///
/// The family is the first character of the second dot-delimited segment,
/// so `ml.g4dn.xlarge` and `ml.P3.2xlarge` are accelerated while
/// `ml.inf1.xlarge` and `ml.c5.large` are not. Inputs with fewer than two
/// segments, or an empty second segment, are rejected.
pub fn is_accelerator_instance(instance_type: &str) -> MlstackResult<bool> {
    let parsed = InstanceType::parse(instance_type)?;
    let accelerated = parsed.is_accelerator();
    debug!(instance_type, accelerated, "Classified instance type");
    Ok(accelerated)
}

/// A validated instance type identifier such as `ml.g4dn.xlarge`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceType {
    raw: String,
    family: String,
    family_letter: char,
}

impl InstanceType {
    /// Parse an instance type, requiring a non-empty second segment
    pub fn parse(instance_type: &str) -> MlstackResult<Self> {
        let (family, family_letter) = instance_type
            .split('.')
            .nth(1)
            .and_then(|segment| segment.chars().next().map(|letter| (segment, letter)))
            .ok_or_else(|| MlstackError::MalformedInstanceType(instance_type.to_string()))?;

        Ok(Self {
            raw: instance_type.to_string(),
            family: family.to_string(),
            family_letter: family_letter.to_ascii_lowercase(),
        })
    }

    /// The second segment, e.g. `g4dn` for `ml.g4dn.xlarge`
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Lowercased first character of the family segment
    pub fn family_letter(&self) -> char {
        self.family_letter
    }

    pub fn is_accelerator(&self) -> bool {
        ACCELERATOR_FAMILIES.contains(&self.family_letter)
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Default for InstanceType {
    fn default() -> Self {
        Self {
            raw: DEFAULT_INSTANCE_TYPE.to_string(),
            family: "g4dn".to_string(),
            family_letter: 'g',
        }
    }
}

impl FromStr for InstanceType {
    type Err = MlstackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for InstanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for InstanceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for InstanceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpu_families_are_accelerated() {
        assert!(is_accelerator_instance("ml.g4dn.xlarge").unwrap());
        assert!(is_accelerator_instance("ml.p3.2xlarge").unwrap());
        assert!(is_accelerator_instance("ml.g5.12xlarge").unwrap());
    }

    #[test]
    fn test_other_families_are_standard() {
        assert!(!is_accelerator_instance("ml.inf1.xlarge").unwrap());
        assert!(!is_accelerator_instance("ml.c5.large").unwrap());
        assert!(!is_accelerator_instance("ml.m5.xlarge").unwrap());
    }

    #[test]
    fn test_family_letter_is_case_insensitive() {
        assert!(is_accelerator_instance("ml.G4dn.xlarge").unwrap());
        assert!(is_accelerator_instance("ML.P3.2XLARGE").unwrap());
        assert!(!is_accelerator_instance("ml.C5.large").unwrap());
    }

    #[test]
    fn test_two_segments_are_enough() {
        assert!(is_accelerator_instance("ml.p3").unwrap());
        assert!(!is_accelerator_instance("ml.t2").unwrap());
    }

    #[test]
    fn test_missing_dot_is_malformed() {
        let err = is_accelerator_instance("badformat").unwrap_err();
        assert!(matches!(err, MlstackError::MalformedInstanceType(ref s) if s == "badformat"));
    }

    #[test]
    fn test_empty_family_segment_is_malformed() {
        assert!(matches!(
            is_accelerator_instance("ml."),
            Err(MlstackError::MalformedInstanceType(_))
        ));
        assert!(matches!(
            is_accelerator_instance("ml..xlarge"),
            Err(MlstackError::MalformedInstanceType(_))
        ));
        assert!(matches!(
            is_accelerator_instance(""),
            Err(MlstackError::MalformedInstanceType(_))
        ));
    }

    #[test]
    fn test_instance_type_accessors() {
        let instance: InstanceType = "ml.g4dn.xlarge".parse().unwrap();
        assert_eq!(instance.family(), "g4dn");
        assert_eq!(instance.family_letter(), 'g');
        assert_eq!(instance.to_string(), "ml.g4dn.xlarge");

        let two_segments = InstanceType::parse("ML.P3").unwrap();
        assert_eq!(two_segments.family(), "P3");
        assert_eq!(two_segments.family_letter(), 'p');
    }

    #[test]
    fn test_default_matches_parsed() {
        assert_eq!(
            InstanceType::default(),
            InstanceType::parse(DEFAULT_INSTANCE_TYPE).unwrap()
        );
    }

    #[test]
    fn test_instance_type_serde() {
        let instance: InstanceType = serde_json::from_str("\"ml.p3.2xlarge\"").unwrap();
        assert!(instance.is_accelerator());
        assert_eq!(serde_json::to_string(&instance).unwrap(), "\"ml.p3.2xlarge\"");

        assert!(serde_json::from_str::<InstanceType>("\"nodots\"").is_err());
    }
}
