//! Read-only reference data: the event-type mapping dictionary and the
//! agent-version baseline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Human-readable descriptor for one event-type code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    /// Display name of the detection rule.
    #[serde(default)]
    pub name: String,

    /// Longer description of what the rule detects.
    #[serde(default)]
    pub description: String,
}

/// Static lookup from event-type code to rule descriptor.
///
/// An incident whose event type is absent here is a data-integrity
/// violation and is skipped, never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDictionary {
    /// Event-type code to descriptor.
    #[serde(default)]
    pub rules: HashMap<String, RuleDescriptor>,
}

impl MappingDictionary {
    /// Resolves an event-type code to its descriptor.
    pub fn lookup(&self, event_type: &str) -> Option<&RuleDescriptor> {
        self.rules.get(event_type)
    }
}

/// The "current" agent version(s) for an organization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionBaseline {
    /// Organization-specific current version, when one is pinned.
    #[serde(default)]
    pub org_version: Option<String>,

    /// Global current version, the fallback.
    #[serde(default)]
    pub global_version: Option<String>,
}

impl VersionBaseline {
    /// Returns the version endpoints are compared against: the
    /// organization-specific value when present, otherwise the global one.
    pub fn resolve(&self) -> Option<&str> {
        self.org_version
            .as_deref()
            .or(self.global_version.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_dictionary_lookup() {
        let mut dictionary = MappingDictionary::default();
        dictionary.rules.insert(
            "malware".to_string(),
            RuleDescriptor {
                name: "Malware".to_string(),
                description: "Malicious executable detected".to_string(),
            },
        );

        assert_eq!(dictionary.lookup("malware").unwrap().name, "Malware");
        assert!(dictionary.lookup("unknown-type").is_none());
    }

    #[test]
    fn test_version_baseline_prefers_org_version() {
        let baseline = VersionBaseline {
            org_version: Some("4.2.1".to_string()),
            global_version: Some("4.3.0".to_string()),
        };
        assert_eq!(baseline.resolve(), Some("4.2.1"));
    }

    #[test]
    fn test_version_baseline_falls_back_to_global() {
        let baseline = VersionBaseline {
            org_version: None,
            global_version: Some("4.3.0".to_string()),
        };
        assert_eq!(baseline.resolve(), Some("4.3.0"));
    }

    #[test]
    fn test_version_baseline_may_be_empty() {
        assert_eq!(VersionBaseline::default().resolve(), None);
    }
}
