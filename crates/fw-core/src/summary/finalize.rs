//! Flattens the internal frequency maps into the ranked output shape.
//!
//! Pure transformation; ordering is descending by count with ties in
//! encounter order, so repeated runs over identical input produce
//! identical output.

use super::endpoint_pass::EndpointAccumulation;
use super::incident_pass::IncidentAccumulation;
use super::types::{
    AttackTypeCount, AttackedEndpointCount, AttackedUserCount, OsCount, PlatformCount,
    PostureSummary,
};

pub(crate) fn finalize(
    endpoints: EndpointAccumulation,
    incidents: IncidentAccumulation,
) -> PostureSummary {
    let platform_breakdown = endpoints
        .platforms
        .into_ranked()
        .into_iter()
        .map(|((manufacturer, product_name), (), count)| PlatformCount {
            manufacturer,
            product_name,
            count,
        })
        .collect();

    let os_breakdown = endpoints
        .operating_systems
        .into_ranked()
        .into_iter()
        .map(|((os_name, os_version), (), count)| OsCount {
            os_name,
            os_version,
            count,
        })
        .collect();

    let attack_types = incidents
        .attack_types
        .into_ranked()
        .into_iter()
        .map(|(event_type, rule, attack_count)| AttackTypeCount {
            event_type,
            name: rule.name,
            description: rule.description,
            attack_count,
        })
        .collect();

    let index = incidents.index;
    let attacked_endpoints = incidents
        .attacked_endpoints
        .into_ranked()
        .into_iter()
        .map(|(endpoint_id, (), attack_count)| {
            // The incident pass only counts endpoints present in the index,
            // so the lookup always succeeds; an empty name is a benign
            // fallback rather than a panic path.
            let endpoint_name = index
                .get(&endpoint_id)
                .map(|entry| entry.name.clone())
                .unwrap_or_default();
            AttackedEndpointCount {
                endpoint_id,
                endpoint_name,
                attack_count,
            }
        })
        .collect();

    let attacked_users = incidents
        .attacked_users
        .into_ranked()
        .into_iter()
        .map(|(user, (), attack_count)| AttackedUserCount { user, attack_count })
        .collect();

    PostureSummary {
        state_breakdown: endpoints.state,
        checkin_breakdown: endpoints.checkin,
        currency_breakdown: endpoints.currency,
        response_breakdown: incidents.response,
        platform_breakdown,
        os_breakdown,
        attack_types,
        attacked_endpoints,
        attacked_users,
        total_endpoints: endpoints.total_endpoints,
        total_attacks: incidents.total_attacks,
        total_blocked_attacks: incidents.total_blocked_attacks,
    }
}
