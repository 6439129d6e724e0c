// Bind decision
//
// One element, one zone, one interface. The controller allows a single
// mapping per zone per element, so a new mapping is only created when the
// zone has none yet.

use zonebind_api::{ElementSecurityZone, NewElementSecurityZone};

/// What to do with one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindDecision {
    /// The zone has no mapping on this element: create one for the interface.
    Create,
    /// The zone's mapping already lists this interface.
    AlreadyBound,
    /// The zone's mapping exists without this interface. Left untouched.
    ZoneInUse {
        /// Interfaces currently bound by the mapping (may be empty).
        bound: Vec<String>,
    },
}

/// Decide how to bind `interface_id` to `zone_id` given the element's mappings.
///
/// Only the first mapping for the zone is considered.
pub fn decide(
    mappings: &[ElementSecurityZone],
    zone_id: &str,
    interface_id: &str,
) -> BindDecision {
    let Some(mapping) = mappings.iter().find(|m| m.zone_id == zone_id) else {
        return BindDecision::Create;
    };

    let bound = mapping.bound_interfaces();
    if bound.iter().any(|id| id == interface_id) {
        BindDecision::AlreadyBound
    } else {
        BindDecision::ZoneInUse {
            bound: bound.to_vec(),
        }
    }
}

/// POST body binding exactly one interface to the zone.
pub fn new_mapping(zone_id: &str, interface_id: &str) -> NewElementSecurityZone {
    NewElementSecurityZone {
        zone_id: zone_id.to_owned(),
        lannetwork_ids: Vec::new(),
        interface_ids: vec![interface_id.to_owned()],
        wanoverlay_ids: Vec::new(),
        waninterface_ids: Vec::new(),
    }
}
