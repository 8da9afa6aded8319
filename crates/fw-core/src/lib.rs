//! # fw-core
//!
//! Core aggregation engine for Fleet Warden.
//!
//! This crate digests raw per-endpoint inventory records and grouped
//! incident records into a single structured security-posture summary:
//! lifecycle/check-in/currency/platform/OS breakdowns for the endpoint
//! fleet, response-outcome breakdowns for incidents, and ranked
//! attack-type, attacked-endpoint, and attacked-user lists.
//!
//! The engine is a synchronous, side-effect-free transformation. Each
//! invocation builds fresh accumulators, so concurrent summaries (for
//! example one per account) need no coordination.

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod summary;

pub use diagnostics::{DataGap, DigestDiagnostics, DigestOutcome, SkipReason, SkippedIncident};
pub use error::SummaryError;
pub use models::{
    ContextualizedIncident, EndpointRecord, GroupedIncidents, IncidentGroup, IncidentRecord,
    MappingDictionary, RuleDescriptor, SystemInformation, VersionBaseline,
};
pub use summary::types::{
    AttackTypeCount, AttackedEndpointCount, AttackedUserCount, CheckinBreakdown,
    CurrencyBreakdown, OsCount, PlatformCount, PostureSummary, ResponseBreakdown, StateBreakdown,
};
pub use summary::{PostureReport, PostureSummarizer};
