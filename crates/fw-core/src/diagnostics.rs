//! Inspectable record of data-integrity gaps observed during digestion.
//!
//! Malformed or partially-inconsistent records degrade the summary locally
//! instead of aborting it. Every such degradation is captured here so
//! tests and operators can see exactly what was skipped and why, rather
//! than having to fish reasons out of a log stream.

use serde::{Deserialize, Serialize};

/// Why one contextualized incident was excluded from the attack counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SkipReason {
    /// The wrapper carried no embedded incident, or the incident had no
    /// event type.
    MissingEventType,

    /// The incident's event type has no entry in the mapping dictionary.
    UnmappedEventType {
        /// The unresolvable event-type code.
        event_type: String,
    },

    /// The incident references an endpoint absent from the endpoint index.
    UnindexedEndpoint {
        /// The unresolvable endpoint id (empty when the field was absent).
        endpoint_id: String,
    },
}

/// One excluded incident and the reason it was excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedIncident {
    /// Identifier of the contextualized incident that was skipped.
    pub incident_id: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// A non-fatal gap that degraded a single dimension of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DataGap {
    /// An endpoint's lifecycle status matched no known classification, so
    /// no state bucket was incremented for it.
    UnrecognizedStatus {
        endpoint_id: String,
        status: String,
    },

    /// An OS description did not match the `name (version)` format; only
    /// the OS dimension was dropped for the endpoint.
    UnparsedOs {
        endpoint_id: String,
        os: String,
    },

    /// `lastSeen` was absent or unparseable for an offline endpoint; it
    /// was counted as not recently seen.
    UnparsedLastSeen {
        endpoint_id: String,
        last_seen: Option<String>,
    },

    /// A group member id had no matching incident record and was dropped.
    MissingGroupMember {
        master_incident_id: String,
        incident_id: String,
    },
}

/// Outcome of digesting a single contextualized incident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestOutcome {
    /// The incident was counted into the attack accumulators.
    Processed,
    /// The incident was excluded.
    Skipped(SkipReason),
}

/// Everything skipped or degraded during one summary computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigestDiagnostics {
    /// Incidents excluded from the attack counters.
    #[serde(default)]
    pub skipped_incidents: Vec<SkippedIncident>,

    /// Dimension-level gaps that did not exclude a whole record.
    #[serde(default)]
    pub gaps: Vec<DataGap>,
}

impl DigestDiagnostics {
    /// Returns true when nothing was skipped or degraded.
    pub fn is_clean(&self) -> bool {
        self.skipped_incidents.is_empty() && self.gaps.is_empty()
    }

    /// Number of incidents excluded from the attack counters.
    pub fn skip_count(&self) -> usize {
        self.skipped_incidents.len()
    }

    pub(crate) fn record_skip(&mut self, incident_id: &str, reason: SkipReason) -> DigestOutcome {
        self.skipped_incidents.push(SkippedIncident {
            incident_id: incident_id.to_string(),
            reason: reason.clone(),
        });
        DigestOutcome::Skipped(reason)
    }

    pub(crate) fn record_gap(&mut self, gap: DataGap) {
        self.gaps.push(gap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_start_clean() {
        let diagnostics = DigestDiagnostics::default();
        assert!(diagnostics.is_clean());
        assert_eq!(diagnostics.skip_count(), 0);
    }

    #[test]
    fn test_record_skip_returns_matching_outcome() {
        let mut diagnostics = DigestDiagnostics::default();
        let outcome = diagnostics.record_skip(
            "inc-1",
            SkipReason::UnmappedEventType {
                event_type: "mystery".to_string(),
            },
        );

        assert_eq!(
            outcome,
            DigestOutcome::Skipped(SkipReason::UnmappedEventType {
                event_type: "mystery".to_string()
            })
        );
        assert_eq!(diagnostics.skip_count(), 1);
        assert_eq!(diagnostics.skipped_incidents[0].incident_id, "inc-1");
        assert!(!diagnostics.is_clean());
    }

    #[test]
    fn test_skip_reason_serializes_with_kind_tag() {
        let reason = SkipReason::UnindexedEndpoint {
            endpoint_id: "ep-404".to_string(),
        };
        let json = serde_json::to_string(&reason).unwrap();
        assert!(json.contains(r#""kind":"unindexedEndpoint""#));
        assert!(json.contains("ep-404"));
    }
}
