//! Second digestion pass: incident classification.
//!
//! Resolves each contextualized incident against the mapping dictionary
//! and the endpoint index built by the endpoint pass, then feeds the
//! attack-side accumulators. Constructing this pass requires a finished
//! [`EndpointIndex`], which is what keeps the two phases from ever
//! interleaving.

use tracing::warn;

use super::accumulator::{CountMap, EndpointIndex};
use super::types::ResponseBreakdown;
use crate::diagnostics::{DigestDiagnostics, DigestOutcome, SkipReason};
use crate::models::{
    ContextualizedIncident, MappingDictionary, QUARANTINE_STATE_QUARANTINED, RuleDescriptor,
};

/// Attack-side accumulators produced by [`IncidentPass::finish`].
#[derive(Debug)]
pub(crate) struct IncidentAccumulation {
    pub response: ResponseBreakdown,
    /// Event-type frequency, carrying the dictionary descriptor captured
    /// on first sight.
    pub attack_types: CountMap<String, RuleDescriptor>,
    /// Per-endpoint-id attack frequency.
    pub attacked_endpoints: CountMap<String, ()>,
    /// Per-user attack frequency.
    pub attacked_users: CountMap<String, ()>,
    pub total_attacks: u64,
    pub total_blocked_attacks: u64,
    /// The index handed over by the endpoint pass, with running attack
    /// counters bumped; the finalizer reads display names from it.
    pub index: EndpointIndex,
}

/// Digests contextualized incidents into the attack accumulators.
pub(crate) struct IncidentPass<'a> {
    dictionary: &'a MappingDictionary,
    acc: IncidentAccumulation,
}

impl<'a> IncidentPass<'a> {
    pub fn new(dictionary: &'a MappingDictionary, index: EndpointIndex) -> Self {
        Self {
            dictionary,
            acc: IncidentAccumulation {
                response: ResponseBreakdown::default(),
                attack_types: CountMap::new(),
                attacked_endpoints: CountMap::new(),
                attacked_users: CountMap::new(),
                total_attacks: 0,
                total_blocked_attacks: 0,
                index,
            },
        }
    }

    /// Digests one contextualized incident, reporting whether it was
    /// counted or why it was skipped.
    pub fn digest(
        &mut self,
        wrapper: &ContextualizedIncident,
        diagnostics: &mut DigestDiagnostics,
    ) -> DigestOutcome {
        let Some(incident) = &wrapper.incident else {
            warn!(incident_id = %wrapper.id, "contextualized incident has no embedded record");
            return diagnostics.record_skip(&wrapper.id, SkipReason::MissingEventType);
        };

        let Some(event_type) = incident.event_type.as_deref().filter(|et| !et.is_empty())
        else {
            warn!(incident_id = %wrapper.id, "incident has no event type");
            return diagnostics.record_skip(&wrapper.id, SkipReason::MissingEventType);
        };

        let Some(rule) = self.dictionary.lookup(event_type) else {
            warn!(
                incident_id = %wrapper.id,
                event_type,
                "event type has no mapping dictionary entry"
            );
            return diagnostics.record_skip(
                &wrapper.id,
                SkipReason::UnmappedEventType {
                    event_type: event_type.to_string(),
                },
            );
        };

        let endpoint_id = incident.endpoint_id.as_deref().unwrap_or_default();
        if !self.acc.index.contains(endpoint_id) {
            warn!(
                incident_id = %wrapper.id,
                endpoint_id,
                "incident references an endpoint absent from the index"
            );
            return diagnostics.record_skip(
                &wrapper.id,
                SkipReason::UnindexedEndpoint {
                    endpoint_id: endpoint_id.to_string(),
                },
            );
        }

        self.acc.total_attacks += 1;
        self.acc.index.record_attack(endpoint_id);
        self.acc
            .attack_types
            .bump_with(event_type.to_string(), || rule.clone());
        self.acc
            .attacked_endpoints
            .bump_with(endpoint_id.to_string(), || ());
        self.acc
            .attacked_users
            .bump_with(incident.user.clone(), || ());

        if incident.prevented {
            self.acc.total_blocked_attacks += 1;
        }

        // Mutually exclusive response outcome, quarantine wins over an
        // operator override.
        if incident.automated_quarantine_state.as_deref() == Some(QUARANTINE_STATE_QUARANTINED) {
            self.acc.response.quarantined += 1;
        } else if incident.overridden {
            self.acc.response.overridden += 1;
        } else {
            self.acc.response.no_response += 1;
        }

        DigestOutcome::Processed
    }

    pub fn finish(self) -> IncidentAccumulation {
        self.acc
    }
}
