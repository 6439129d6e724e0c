// Site, element, and interface selection

use zonebind_api::{Element, Interface, Site};

/// `element_cluster_role` value of branch sites.
pub const SPOKE_ROLE: &str = "SPOKE";

/// Branch (spoke) sites only; hubs and unset roles are skipped.
pub fn is_spoke(site: &Site) -> bool {
    site.element_cluster_role.as_deref() == Some(SPOKE_ROLE)
}

/// Elements assigned to `site`.
pub fn elements_at<'a>(
    site: &'a Site,
    elements: &'a [Element],
) -> impl Iterator<Item = &'a Element> {
    elements
        .iter()
        .filter(move |e| e.site_id.as_deref() == Some(site.id.as_str()))
}

/// Interfaces whose name starts with `prefix`.
///
/// Unnamed interfaces never match. A missing name is not stringified to
/// `"None"`, so a prefix like `No` does not pick them up.
pub fn interface_matches(interface: &Interface, prefix: &str) -> bool {
    interface
        .name
        .as_deref()
        .is_some_and(|name| name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(id: &str, role: Option<&str>) -> Site {
        Site {
            id: id.into(),
            name: Some(format!("site-{id}")),
            element_cluster_role: role.map(Into::into),
            admin_state: None,
            extra: serde_json::Map::new(),
        }
    }

    fn element(id: &str, site_id: Option<&str>) -> Element {
        Element {
            id: id.into(),
            name: None,
            site_id: site_id.map(Into::into),
            serial_number: None,
            model_name: None,
            extra: serde_json::Map::new(),
        }
    }

    fn interface(name: Option<&str>) -> Interface {
        Interface {
            id: "i1".into(),
            name: name.map(Into::into),
            interface_type: None,
            admin_up: None,
            description: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn only_spoke_role_counts() {
        assert!(is_spoke(&site("1", Some("SPOKE"))));
        assert!(!is_spoke(&site("2", Some("HUB"))));
        assert!(!is_spoke(&site("3", Some("spoke"))));
        assert!(!is_spoke(&site("4", None)));
    }

    #[test]
    fn elements_are_matched_by_site_id() {
        let elements = [
            element("e1", Some("s1")),
            element("e2", Some("s2")),
            element("e3", None),
            element("e4", Some("s1")),
        ];
        let s1 = site("s1", Some("SPOKE"));
        let ids: Vec<&str> = elements_at(&s1, &elements).map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["e1", "e4"]);
    }

    #[test]
    fn interface_prefix_is_case_sensitive() {
        assert!(interface_matches(&interface(Some("sl-zscaler-1")), "sl-zscaler"));
        assert!(!interface_matches(&interface(Some("SL-ZSCALER-1")), "sl-zscaler"));
        assert!(!interface_matches(&interface(Some("1")), "sl-zscaler"));
        assert!(!interface_matches(&interface(None), "sl-zscaler"));
        assert!(!interface_matches(&interface(None), "No"));
        assert!(!interface_matches(&interface(None), ""));
    }
}
