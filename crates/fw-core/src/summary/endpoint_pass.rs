//! First digestion pass: endpoint inventory classification.
//!
//! Classifies each endpoint into the lifecycle, check-in, currency,
//! platform, and OS breakdowns and registers it in the endpoint index the
//! incident pass resolves against.

use chrono::{DateTime, Utc};
use tracing::warn;

use super::accumulator::{CountMap, EndpointIndex};
use super::os_parse::OsDescriptionParser;
use super::types::{CheckinBreakdown, CurrencyBreakdown, StateBreakdown};
use crate::diagnostics::{DataGap, DigestDiagnostics};
use crate::models::{
    EndpointRecord, VersionBaseline, PRESENCE_ONLINE, PRIMARY_STATUS_ERROR, STATUS_ACTIVE,
    STATUS_ARCHIVED, STATUS_UNINSTALLED,
};

/// Minutes within which an offline endpoint still counts as recently seen.
const RECENT_CHECKIN_MINUTES: i64 = 60;

/// Endpoint-side breakdowns produced by [`EndpointPass::finish`].
#[derive(Debug, Default)]
pub(crate) struct EndpointAccumulation {
    pub state: StateBreakdown,
    pub checkin: CheckinBreakdown,
    pub currency: CurrencyBreakdown,
    /// (manufacturer, product name) frequency.
    pub platforms: CountMap<(String, String), ()>,
    /// (OS name, OS version) frequency.
    pub operating_systems: CountMap<(String, String), ()>,
    /// Non-archived endpoints.
    pub total_endpoints: u64,
}

/// Digests endpoint records into breakdown accumulators and the index.
pub(crate) struct EndpointPass {
    baseline: Option<String>,
    now: DateTime<Utc>,
    os_parser: OsDescriptionParser,
    acc: EndpointAccumulation,
    index: EndpointIndex,
}

impl EndpointPass {
    pub fn new(baseline: &VersionBaseline, now: DateTime<Utc>) -> Self {
        Self {
            baseline: baseline.resolve().map(str::to_string),
            now,
            os_parser: OsDescriptionParser::new(),
            acc: EndpointAccumulation::default(),
            index: EndpointIndex::default(),
        }
    }

    /// Digests one endpoint into the breakdowns and registers it in the
    /// index exactly once.
    pub fn digest(&mut self, endpoint: &EndpointRecord, diagnostics: &mut DigestDiagnostics) {
        // Archived endpoints still get indexed, so incidents referencing
        // them later resolve instead of being skipped.
        self.index.register(&endpoint.id, &endpoint.name);

        if endpoint.status == STATUS_ARCHIVED || endpoint.primary_status == STATUS_ARCHIVED {
            self.acc.state.archived += 1;
            return;
        }
        self.acc.total_endpoints += 1;

        self.digest_checkin(endpoint, diagnostics);
        self.digest_platform(endpoint);
        self.digest_os(endpoint, diagnostics);
        self.digest_state(endpoint, diagnostics);
        self.digest_currency(endpoint);
    }

    /// Completes the pass, yielding the accumulated breakdowns and the
    /// fully-populated index the incident pass requires.
    pub fn finish(self) -> (EndpointAccumulation, EndpointIndex) {
        (self.acc, self.index)
    }

    fn digest_checkin(&mut self, endpoint: &EndpointRecord, diagnostics: &mut DigestDiagnostics) {
        if endpoint.presence == PRESENCE_ONLINE {
            self.acc.checkin.online += 1;
            return;
        }

        match endpoint.last_seen.as_deref().and_then(parse_last_seen) {
            Some(seen) => {
                let elapsed_minutes = (self.now - seen).num_minutes();
                if elapsed_minutes < RECENT_CHECKIN_MINUTES {
                    self.acc.checkin.recent += 1;
                } else {
                    self.acc.checkin.not_recently += 1;
                }
            }
            None => {
                warn!(
                    endpoint_id = %endpoint.id,
                    "lastSeen missing or unparseable, counting endpoint as not recently seen"
                );
                diagnostics.record_gap(DataGap::UnparsedLastSeen {
                    endpoint_id: endpoint.id.clone(),
                    last_seen: endpoint.last_seen.clone(),
                });
                self.acc.checkin.not_recently += 1;
            }
        }
    }

    fn digest_platform(&mut self, endpoint: &EndpointRecord) {
        let Some(info) = &endpoint.system_information else {
            return;
        };
        // Both halves of the platform key are required; absent fields skip
        // only this dimension.
        if let (Some(manufacturer), Some(product_name)) = (&info.manufacturer, &info.product_name)
        {
            self.acc
                .platforms
                .bump_with((manufacturer.clone(), product_name.clone()), || ());
        }
    }

    fn digest_os(&mut self, endpoint: &EndpointRecord, diagnostics: &mut DigestDiagnostics) {
        let Some(os) = endpoint
            .system_information
            .as_ref()
            .and_then(|info| info.os.as_deref())
        else {
            return;
        };

        match self.os_parser.parse(os) {
            Some((name, version)) => {
                self.acc.operating_systems.bump_with((name, version), || ());
            }
            None => {
                warn!(
                    endpoint_id = %endpoint.id,
                    os,
                    "OS description did not match the expected name (version) format"
                );
                diagnostics.record_gap(DataGap::UnparsedOs {
                    endpoint_id: endpoint.id.clone(),
                    os: os.to_string(),
                });
            }
        }
    }

    fn digest_state(&mut self, endpoint: &EndpointRecord, diagnostics: &mut DigestDiagnostics) {
        if endpoint.status == STATUS_ACTIVE {
            if endpoint.primary_status == PRIMARY_STATUS_ERROR {
                self.acc.state.error += 1;
            } else {
                self.acc.state.protected += 1;
            }
        } else if endpoint.status == STATUS_UNINSTALLED {
            self.acc.state.disabled += 1;
        } else {
            warn!(
                endpoint_id = %endpoint.id,
                status = %endpoint.status,
                "unrecognized endpoint lifecycle status"
            );
            diagnostics.record_gap(DataGap::UnrecognizedStatus {
                endpoint_id: endpoint.id.clone(),
                status: endpoint.status.clone(),
            });
        }
    }

    fn digest_currency(&mut self, endpoint: &EndpointRecord) {
        // Exact string comparison against the resolved baseline. A version
        // newer than the baseline still counts as out of date.
        if endpoint.agent_version.as_deref() == self.baseline.as_deref() {
            self.acc.currency.current += 1;
        } else {
            self.acc.currency.out_of_date += 1;
        }
    }
}

fn parse_last_seen(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}
