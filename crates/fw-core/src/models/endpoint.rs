//! Endpoint inventory data model.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an endpoint that is still under management.
pub const STATUS_ACTIVE: &str = "ACTIVE";
/// Lifecycle status of an endpoint whose agent was removed.
pub const STATUS_UNINSTALLED: &str = "UNINSTALLED";
/// Lifecycle status of an endpoint retired from the inventory.
pub const STATUS_ARCHIVED: &str = "ARCHIVED";
/// Primary status marking a degraded active endpoint.
pub const PRIMARY_STATUS_ERROR: &str = "ERROR";
/// Presence value for an endpoint currently connected.
pub const PRESENCE_ONLINE: &str = "ONLINE";

/// One managed endpoint as reported by the inventory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    /// Unique endpoint identifier.
    pub id: String,

    /// Human-readable device name, used to label ranked output.
    #[serde(default)]
    pub name: String,

    /// Lifecycle status (e.g. `ACTIVE`, `UNINSTALLED`, `ARCHIVED`).
    ///
    /// Kept as the raw string rather than an enum: unrecognized values
    /// must flow through the engine as data gaps, not deserialization
    /// failures.
    #[serde(default)]
    pub status: String,

    /// Secondary status; `ERROR` marks a degraded active endpoint and
    /// `ARCHIVED` here also retires the endpoint.
    #[serde(default)]
    pub primary_status: String,

    /// Connectivity presence (`ONLINE`/`OFFLINE`).
    #[serde(default)]
    pub presence: String,

    /// Last check-in timestamp, ISO-8601 text.
    #[serde(default)]
    pub last_seen: Option<String>,

    /// Installed protection-agent version.
    #[serde(default)]
    pub agent_version: Option<String>,

    /// Hardware and OS details, when the agent reported them.
    #[serde(default)]
    pub system_information: Option<SystemInformation>,
}

/// Hardware and operating-system details reported by the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInformation {
    /// Hardware manufacturer.
    #[serde(default)]
    pub manufacturer: Option<String>,

    /// Hardware product name.
    #[serde(default)]
    pub product_name: Option<String>,

    /// Operating-system display string, e.g. `"Windows (10.0.19041)"`.
    #[serde(default)]
    pub os: Option<String>,
}
