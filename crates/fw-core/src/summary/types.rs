//! Output shape of the posture summary.
//!
//! Everything here serializes camelCase for transport to the
//! presentation layer and is recomputed from scratch on every
//! invocation; the engine keeps no state across calls.

use serde::{Deserialize, Serialize};

// ============================================================================
// Breakdowns
// ============================================================================

/// Lifecycle partition of the endpoint fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBreakdown {
    /// Active endpoints with a healthy agent.
    pub protected: u64,
    /// Endpoints whose agent was uninstalled.
    pub disabled: u64,
    /// Active endpoints whose agent reports an error.
    pub error: u64,
    /// Retired endpoints, excluded from every other breakdown.
    pub archived: u64,
}

impl StateBreakdown {
    /// Endpoints in the non-archived lifecycle buckets.
    pub fn managed_total(&self) -> u64 {
        self.protected + self.disabled + self.error
    }

    /// All classified endpoints, archived included.
    pub fn total(&self) -> u64 {
        self.managed_total() + self.archived
    }
}

/// Check-in recency partition of the non-archived fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinBreakdown {
    /// Endpoints currently connected.
    pub online: u64,
    /// Offline endpoints seen within the last hour.
    pub recent: u64,
    /// Offline endpoints not seen within the last hour.
    pub not_recently: u64,
}

impl CheckinBreakdown {
    /// Sum across all check-in buckets.
    pub fn total(&self) -> u64 {
        self.online + self.recent + self.not_recently
    }
}

/// Agent-version currency partition of the non-archived fleet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyBreakdown {
    /// Endpoints whose agent version matches the baseline exactly.
    pub current: u64,
    /// Endpoints whose agent version differs from the baseline.
    pub out_of_date: u64,
}

impl CurrencyBreakdown {
    /// Sum across both currency buckets.
    pub fn total(&self) -> u64 {
        self.current + self.out_of_date
    }
}

/// Response-outcome partition of the digested incidents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBreakdown {
    /// Incidents whose threat was automatically quarantined.
    pub quarantined: u64,
    /// Incidents where an operator overrode the verdict.
    pub overridden: u64,
    /// Incidents with no response action taken.
    pub no_response: u64,
}

impl ResponseBreakdown {
    /// Sum across all response buckets.
    pub fn total(&self) -> u64 {
        self.quarantined + self.overridden + self.no_response
    }
}

// ============================================================================
// Ranked rows
// ============================================================================

/// One hardware platform and how many endpoints run on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCount {
    pub manufacturer: String,
    pub product_name: String,
    pub count: u64,
}

/// One operating-system name/version pair and how many endpoints run it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsCount {
    pub os_name: String,
    pub os_version: String,
    pub count: u64,
}

/// One attack type and how often it was seen, enriched from the mapping
/// dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackTypeCount {
    /// Event-type code.
    pub event_type: String,
    /// Rule display name from the dictionary.
    pub name: String,
    /// Rule description from the dictionary.
    pub description: String,
    /// Attacks of this type.
    pub attack_count: u64,
}

/// One endpoint and how many attacks were attributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackedEndpointCount {
    pub endpoint_id: String,
    /// Display name resolved through the endpoint index.
    pub endpoint_name: String,
    pub attack_count: u64,
}

/// One user and how many attacks were attributed to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackedUserCount {
    /// User identifier; may be empty or a placeholder string.
    pub user: String,
    pub attack_count: u64,
}

// ============================================================================
// Summary
// ============================================================================

/// The complete security-posture summary for one account.
///
/// Ranked lists are sorted descending by count; ties retain the order in
/// which keys were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostureSummary {
    /// Lifecycle breakdown of the fleet.
    pub state_breakdown: StateBreakdown,
    /// Check-in recency breakdown.
    pub checkin_breakdown: CheckinBreakdown,
    /// Agent-version currency breakdown.
    pub currency_breakdown: CurrencyBreakdown,
    /// Incident response-outcome breakdown.
    pub response_breakdown: ResponseBreakdown,

    /// Hardware platforms ranked by endpoint count.
    #[serde(default)]
    pub platform_breakdown: Vec<PlatformCount>,
    /// Operating systems ranked by endpoint count.
    #[serde(default)]
    pub os_breakdown: Vec<OsCount>,
    /// Attack types ranked by occurrence.
    #[serde(default)]
    pub attack_types: Vec<AttackTypeCount>,
    /// Attacked endpoints ranked by attack count.
    #[serde(default)]
    pub attacked_endpoints: Vec<AttackedEndpointCount>,
    /// Attacked users ranked by attack count.
    #[serde(default)]
    pub attacked_users: Vec<AttackedUserCount>,

    /// Non-archived endpoints in the fleet.
    pub total_endpoints: u64,
    /// Incidents counted into the attack accumulators.
    pub total_attacks: u64,
    /// Counted incidents whose threat was prevented.
    pub total_blocked_attacks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakdown_totals() {
        let state = StateBreakdown {
            protected: 5,
            disabled: 2,
            error: 1,
            archived: 3,
        };
        assert_eq!(state.managed_total(), 8);
        assert_eq!(state.total(), 11);

        let checkin = CheckinBreakdown {
            online: 4,
            recent: 2,
            not_recently: 2,
        };
        assert_eq!(checkin.total(), 8);

        let currency = CurrencyBreakdown {
            current: 6,
            out_of_date: 2,
        };
        assert_eq!(currency.total(), 8);

        let response = ResponseBreakdown {
            quarantined: 3,
            overridden: 1,
            no_response: 2,
        };
        assert_eq!(response.total(), 6);
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = PostureSummary {
            total_endpoints: 2,
            total_blocked_attacks: 1,
            os_breakdown: vec![OsCount {
                os_name: "Windows".to_string(),
                os_version: "10.0.19041".to_string(),
                count: 2,
            }],
            ..PostureSummary::default()
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""stateBreakdown""#));
        assert!(json.contains(r#""notRecently""#));
        assert!(json.contains(r#""outOfDate""#));
        assert!(json.contains(r#""noResponse""#));
        assert!(json.contains(r#""osName":"Windows""#));
        assert!(json.contains(r#""totalBlockedAttacks":1"#));

        let back: PostureSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
