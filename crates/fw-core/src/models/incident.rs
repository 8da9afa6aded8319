//! Incident and incident-group data models.

use serde::{Deserialize, Serialize};

/// Automated-response state of an incident whose threat was quarantined.
pub const QUARANTINE_STATE_QUARANTINED: &str = "QUARANTINED";

/// The grouped-incident payload delivered by the incident-grouping service.
///
/// Both collections are required by the contract; either arriving as
/// `null`/absent is an upstream interface break and fails the whole
/// summary computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedIncidents {
    /// Every contextualized incident known for the account.
    #[serde(default)]
    pub incidents: Option<Vec<ContextualizedIncident>>,

    /// Incident groups; membership lists decide which incidents are
    /// digested.
    #[serde(default)]
    pub groups: Option<Vec<IncidentGroup>>,
}

/// One incident wrapped with its group context.
///
/// The wrapper can arrive without an embedded incident record; the engine
/// treats that as a skippable data gap rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualizedIncident {
    /// Incident identifier, matched against group membership lists.
    pub id: String,

    /// The embedded incident record.
    #[serde(default)]
    pub incident: Option<IncidentRecord>,
}

/// One detected security event attributed to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Incident identifier.
    pub id: String,

    /// Event-type code, resolved through the mapping dictionary.
    #[serde(default)]
    pub event_type: Option<String>,

    /// Identifier of the endpoint this incident occurred on.
    #[serde(default)]
    pub endpoint_id: Option<String>,

    /// User attributed to the incident; may be empty or a placeholder.
    #[serde(default)]
    pub user: String,

    /// Whether the threat was blocked before execution.
    #[serde(default)]
    pub prevented: bool,

    /// Automated-response state, e.g. `QUARANTINED`.
    #[serde(default)]
    pub automated_quarantine_state: Option<String>,

    /// Whether an operator overrode the automated verdict.
    #[serde(default)]
    pub overridden: bool,
}

/// A cluster of related incidents under one master incident.
///
/// Only membership matters to the engine; the hierarchy is not consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentGroup {
    /// Identifier of the group's master incident.
    pub master_incident_id: String,

    /// Identifiers of the member incidents.
    #[serde(default)]
    pub incidents: Vec<String>,
}
