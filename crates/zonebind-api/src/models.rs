// Controller response types
//
// Every list endpoint wraps its records in `{"count": N, "items": [...]}`.
// Fields use `#[serde(default)]` liberally and keep unknown keys in
// `extra`, so records can be posted back verbatim.

use serde::{Deserialize, Serialize};

// ── Envelopes ───────────────────────────────────────────────────────

/// Standard list envelope.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(rename = "_error", default)]
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of a successful `POST /login`.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub x_auth_token: Option<String>,
}

// ── Profile ─────────────────────────────────────────────────────────

/// The authenticated operator's profile from `GET /profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Site ────────────────────────────────────────────────────────────

/// Site record. `element_cluster_role` is `"SPOKE"` for branches and
/// `"HUB"` for data centers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub element_cluster_role: Option<String>,
    #[serde(default)]
    pub admin_state: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Element ─────────────────────────────────────────────────────────

/// A managed device. Unassigned elements report `site_id` `"1"` or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Interface ───────────────────────────────────────────────────────

/// A network port on an element (physical, subinterface, or tunnel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub interface_type: Option<String>,
    #[serde(default)]
    pub admin_up: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Security zones ──────────────────────────────────────────────────

/// A tenant-wide ZBFW security zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityZone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Binding of a zone to interfaces and networks on one element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSecurityZone {
    #[serde(default)]
    pub id: Option<String>,
    pub zone_id: String,
    #[serde(default)]
    pub interface_ids: Option<Vec<String>>,
    #[serde(default)]
    pub lannetwork_ids: Option<Vec<String>>,
    #[serde(default)]
    pub wanoverlay_ids: Option<Vec<String>>,
    #[serde(default)]
    pub waninterface_ids: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ElementSecurityZone {
    /// Interface ids bound by this mapping; null reads as empty.
    pub fn bound_interfaces(&self) -> &[String] {
        self.interface_ids.as_deref().unwrap_or_default()
    }
}

/// POST body creating a new element zone mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewElementSecurityZone {
    pub zone_id: String,
    pub lannetwork_ids: Vec<String>,
    pub interface_ids: Vec<String>,
    pub wanoverlay_ids: Vec<String>,
    pub waninterface_ids: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_interface_ids_read_as_empty() {
        let mapping: ElementSecurityZone = serde_json::from_value(json!({
            "id": "m1",
            "zone_id": "z1",
            "interface_ids": null,
            "lannetwork_ids": ["ln1"]
        }))
        .unwrap();
        assert!(mapping.bound_interfaces().is_empty());
        assert_eq!(mapping.lannetwork_ids.as_deref(), Some(&["ln1".to_owned()][..]));
    }

    #[test]
    fn unknown_fields_are_preserved() {
        let site: Site = serde_json::from_value(json!({
            "id": "s1",
            "name": "Branch 12",
            "element_cluster_role": "SPOKE",
            "_etag": 4,
            "address": { "city": "Austin" }
        }))
        .unwrap();
        assert_eq!(site.extra.get("_etag"), Some(&json!(4)));
        let back = serde_json::to_value(&site).unwrap();
        assert_eq!(back["address"]["city"], "Austin");
    }

    #[test]
    fn new_mapping_serializes_all_lists() {
        let body = NewElementSecurityZone {
            zone_id: "z1".into(),
            lannetwork_ids: vec![],
            interface_ids: vec!["i1".into()],
            wanoverlay_ids: vec![],
            waninterface_ids: vec![],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "zone_id": "z1",
                "lannetwork_ids": [],
                "interface_ids": ["i1"],
                "wanoverlay_ids": [],
                "waninterface_ids": []
            })
        );
    }
}
