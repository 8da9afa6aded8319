//! Input data models consumed by the posture summary engine.
//!
//! All of these deserialize directly from the inventory and
//! incident-grouping services' JSON payloads (camelCase on the wire) and
//! are treated as immutable once read.

mod endpoint;
mod incident;
mod reference;

pub use endpoint::{
    EndpointRecord, SystemInformation, PRESENCE_ONLINE, PRIMARY_STATUS_ERROR, STATUS_ACTIVE,
    STATUS_ARCHIVED, STATUS_UNINSTALLED,
};
pub use incident::{
    ContextualizedIncident, GroupedIncidents, IncidentGroup, IncidentRecord,
    QUARANTINE_STATE_QUARANTINED,
};
pub use reference::{MappingDictionary, RuleDescriptor, VersionBaseline};
