//! Security-posture summary engine.
//!
//! Drives the two-pass digestion pipeline: every endpoint is classified
//! first, building the endpoint index, and only then are incidents
//! resolved through their groups and digested against that index. The
//! incident pass can only be constructed from a finished index, so the
//! phases cannot interleave.

mod accumulator;
mod endpoint_pass;
mod finalize;
mod incident_pass;
mod os_parse;
pub mod types;

pub use accumulator::{EndpointIndex, IndexedEndpoint};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::diagnostics::{DataGap, DigestDiagnostics};
use crate::error::SummaryError;
use crate::models::{
    ContextualizedIncident, EndpointRecord, GroupedIncidents, MappingDictionary, VersionBaseline,
};
use endpoint_pass::EndpointPass;
use incident_pass::IncidentPass;
use types::PostureSummary;

/// A computed posture summary together with the digestion diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureReport {
    /// The security-posture summary.
    pub summary: PostureSummary,
    /// Everything that was skipped or degraded while computing it.
    pub diagnostics: DigestDiagnostics,
}

/// Computes fleet security-posture summaries.
///
/// Holds only the read-only reference data; every call to
/// [`summarize`](Self::summarize) builds fresh accumulators, so one
/// summarizer can serve concurrent per-account computations.
pub struct PostureSummarizer<'a> {
    dictionary: &'a MappingDictionary,
    baseline: &'a VersionBaseline,
}

impl<'a> PostureSummarizer<'a> {
    /// Creates a summarizer over the given reference data.
    pub fn new(dictionary: &'a MappingDictionary, baseline: &'a VersionBaseline) -> Self {
        Self {
            dictionary,
            baseline,
        }
    }

    /// Digests the endpoint fleet and grouped incidents into a posture
    /// report, evaluating check-in recency against the current time.
    #[instrument(skip_all, fields(endpoints = endpoints.len()))]
    pub fn summarize(
        &self,
        endpoints: &[EndpointRecord],
        grouped: &GroupedIncidents,
    ) -> Result<PostureReport, SummaryError> {
        self.summarize_at(Utc::now(), endpoints, grouped)
    }

    /// Like [`summarize`](Self::summarize) with an explicit reference
    /// time, for deterministic evaluation.
    pub fn summarize_at(
        &self,
        now: DateTime<Utc>,
        endpoints: &[EndpointRecord],
        grouped: &GroupedIncidents,
    ) -> Result<PostureReport, SummaryError> {
        let incidents = grouped
            .incidents
            .as_ref()
            .ok_or(SummaryError::MissingIncidents)?;
        let groups = grouped.groups.as_ref().ok_or(SummaryError::MissingGroups)?;

        let mut diagnostics = DigestDiagnostics::default();

        let mut endpoint_pass = EndpointPass::new(self.baseline, now);
        for endpoint in endpoints {
            endpoint_pass.digest(endpoint, &mut diagnostics);
        }
        let (endpoint_acc, index) = endpoint_pass.finish();

        // Group membership is resolved through a prebuilt id map; large
        // incident volumes make a linear scan per member too expensive.
        let by_id: HashMap<&str, &ContextualizedIncident> = incidents
            .iter()
            .map(|wrapper| (wrapper.id.as_str(), wrapper))
            .collect();

        let mut incident_pass = IncidentPass::new(self.dictionary, index);
        for group in groups {
            for member_id in &group.incidents {
                match by_id.get(member_id.as_str()) {
                    Some(wrapper) => {
                        incident_pass.digest(wrapper, &mut diagnostics);
                    }
                    None => {
                        debug!(
                            master_incident_id = %group.master_incident_id,
                            incident_id = %member_id,
                            "group member has no incident record, dropping"
                        );
                        diagnostics.record_gap(DataGap::MissingGroupMember {
                            master_incident_id: group.master_incident_id.clone(),
                            incident_id: member_id.clone(),
                        });
                    }
                }
            }
        }
        let incident_acc = incident_pass.finish();

        debug_assert_eq!(
            incident_acc.attacked_endpoints.total(),
            incident_acc.total_attacks
        );
        debug!(
            total_endpoints = endpoint_acc.total_endpoints,
            total_attacks = incident_acc.total_attacks,
            distinct_attack_types = incident_acc.attack_types.len(),
            skipped_incidents = diagnostics.skip_count(),
            "posture digestion complete"
        );

        Ok(PostureReport {
            summary: finalize::finalize(endpoint_acc, incident_acc),
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> (MappingDictionary, VersionBaseline) {
        (MappingDictionary::default(), VersionBaseline::default())
    }

    #[test]
    fn test_missing_incidents_collection_is_fatal() {
        let (dictionary, baseline) = reference();
        let summarizer = PostureSummarizer::new(&dictionary, &baseline);

        let grouped = GroupedIncidents {
            incidents: None,
            groups: Some(Vec::new()),
        };
        let err = summarizer.summarize(&[], &grouped).unwrap_err();
        assert_eq!(err, SummaryError::MissingIncidents);
    }

    #[test]
    fn test_missing_groups_collection_is_fatal() {
        let (dictionary, baseline) = reference();
        let summarizer = PostureSummarizer::new(&dictionary, &baseline);

        let grouped = GroupedIncidents {
            incidents: Some(Vec::new()),
            groups: None,
        };
        let err = summarizer.summarize(&[], &grouped).unwrap_err();
        assert_eq!(err, SummaryError::MissingGroups);
    }

    #[test]
    fn test_unmatched_group_member_is_dropped_with_gap() {
        let (dictionary, baseline) = reference();
        let summarizer = PostureSummarizer::new(&dictionary, &baseline);

        let grouped = GroupedIncidents {
            incidents: Some(Vec::new()),
            groups: Some(vec![crate::models::IncidentGroup {
                master_incident_id: "inc-1".to_string(),
                incidents: vec!["inc-ghost".to_string()],
            }]),
        };

        let report = summarizer.summarize(&[], &grouped).unwrap();
        assert_eq!(report.summary.total_attacks, 0);
        assert!(matches!(
            report.diagnostics.gaps[0],
            DataGap::MissingGroupMember { .. }
        ));
    }

    #[test]
    fn test_empty_inputs_produce_zeroed_summary() {
        let (dictionary, baseline) = reference();
        let summarizer = PostureSummarizer::new(&dictionary, &baseline);

        let grouped = GroupedIncidents {
            incidents: Some(Vec::new()),
            groups: Some(Vec::new()),
        };
        let report = summarizer.summarize(&[], &grouped).unwrap();

        assert_eq!(report.summary, PostureSummary::default());
        assert!(report.diagnostics.is_clean());
    }
}
