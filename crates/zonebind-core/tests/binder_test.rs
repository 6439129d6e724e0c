#![allow(clippy::unwrap_used)]
// End-to-end tests for `ZoneBinder` against a mocked controller.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use zonebind_api::CgxClient;
use zonebind_core::{BindOptions, BindOutcome, BindReport, ZoneBinder, ZoneMatch, resolve_zone};

// ── Helpers ─────────────────────────────────────────────────────────

fn tenant_path(version: &str, suffix: &str) -> String {
    format!("/{version}/api/tenants/42/{suffix}")
}

fn items(list: serde_json::Value) -> ResponseTemplate {
    let count = list.as_array().map_or(0, Vec::len);
    ResponseTemplate::new(200).set_body_json(json!({ "count": count, "items": list }))
}

fn zone() -> ZoneMatch {
    ZoneMatch {
        id: "z1".into(),
        name: "zscaler".into(),
        score: 100,
    }
}

/// Two spokes, one hub, and an unassigned element.
async fn controller() -> (MockServer, CgxClient) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tenant_id": "42" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v4.7", "sites")))
        .respond_with(items(json!([
            { "id": "s1", "name": "Branch-1", "element_cluster_role": "SPOKE" },
            { "id": "s2", "name": "DC-1", "element_cluster_role": "HUB" },
            { "id": "s3", "name": "Branch-3", "element_cluster_role": "SPOKE" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.3", "elements")))
        .respond_with(items(json!([
            { "id": "e1", "name": "ion-1", "site_id": "s1" },
            { "id": "e2", "name": "ion-dc", "site_id": "s2" },
            { "id": "e3", "name": "ion-3", "site_id": "s3" },
            { "id": "e4", "name": "spare", "site_id": "1" }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v4.15", "sites/s1/elements/e1/interfaces")))
        .respond_with(items(json!([
            { "id": "i1", "name": "sl-zscaler-1" },
            { "id": "i2", "name": "sl-zscaler-2" },
            { "id": "i3", "name": "1" },
            { "id": "i9", "name": null }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v4.15", "sites/s3/elements/e3/interfaces")))
        .respond_with(items(json!([{ "id": "i4", "name": "sl-zscaler-a" }])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.0", "sites/s3/elements/e3/securityzones")))
        .respond_with(items(json!([
            { "id": "m3", "zone_id": "z1", "interface_ids": ["other"] }
        ])))
        .mount(&server)
        .await;

    let client = CgxClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());
    client.use_token("tok".to_owned().into());
    client.fetch_profile().await.unwrap();
    (server, client)
}

/// Mappings on s1/e1: empty on the first read, bound to i1 afterwards.
async fn mount_e1_mappings(server: &MockServer) {
    let mappings = tenant_path("v2.0", "sites/s1/elements/e1/securityzones");

    Mock::given(method("GET"))
        .and(path(mappings.clone()))
        .respond_with(items(json!([])))
        .up_to_n_times(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(mappings))
        .respond_with(items(json!([
            { "id": "m1", "zone_id": "z1", "interface_ids": ["i1"] }
        ])))
        .mount(server)
        .await;
}

fn outcomes(report: &BindReport) -> Vec<(String, Option<String>, BindOutcome)> {
    report
        .records
        .iter()
        .map(|r| (r.element_id.clone(), r.interface_id.clone(), r.outcome.clone()))
        .collect()
}

fn options(dry_run: bool) -> BindOptions {
    BindOptions {
        interface_prefix: "sl-zscaler".into(),
        dry_run,
    }
}

// ── Pipeline tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_binds_first_matching_interface_per_element() {
    let (server, client) = controller().await;
    mount_e1_mappings(&server).await;

    Mock::given(method("POST"))
        .and(path(tenant_path("v2.0", "sites/s1/elements/e1/securityzones")))
        .and(body_json(json!({
            "zone_id": "z1",
            "lannetwork_ids": [],
            "interface_ids": ["i1"],
            "wanoverlay_ids": [],
            "waninterface_ids": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "m1", "zone_id": "z1", "interface_ids": ["i1"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let zone = zone();
    let report = ZoneBinder::new(&client, &zone, options(false))
        .run()
        .await
        .unwrap();

    assert_eq!(report.spoke_sites, 2);
    assert_eq!(report.elements_scanned, 2);
    assert_eq!(
        outcomes(&report),
        vec![
            ("e1".into(), Some("i1".into()), BindOutcome::Created),
            (
                "e1".into(),
                Some("i2".into()),
                BindOutcome::ZoneInUse {
                    bound_interface_ids: vec!["i1".into()]
                }
            ),
            (
                "e3".into(),
                Some("i4".into()),
                BindOutcome::ZoneInUse {
                    bound_interface_ids: vec!["other".into()]
                }
            ),
        ]
    );
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_created_status_without_body_counts_as_created() {
    let (server, client) = controller().await;
    mount_e1_mappings(&server).await;

    Mock::given(method("POST"))
        .and(path(tenant_path("v2.0", "sites/s1/elements/e1/securityzones")))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let zone = zone();
    let report = ZoneBinder::new(&client, &zone, options(false))
        .run()
        .await
        .unwrap();

    assert_eq!(report.records[0].outcome, BindOutcome::Created);
    assert_eq!(report.created(), 1);
    assert!(!report.has_failures());
}

#[tokio::test]
async fn test_already_bound_interface_is_ignored() {
    let (server, client) = controller().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.0", "sites/s1/elements/e1/securityzones")))
        .respond_with(items(json!([
            { "id": "m1", "zone_id": "z1", "interface_ids": ["i1", "i2"] }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let zone = zone();
    let report = ZoneBinder::new(&client, &zone, options(false))
        .run()
        .await
        .unwrap();

    let e1: Vec<BindOutcome> = report
        .records
        .iter()
        .filter(|r| r.element_id == "e1")
        .map(|r| r.outcome.clone())
        .collect();
    assert_eq!(e1, vec![BindOutcome::AlreadyBound, BindOutcome::AlreadyBound]);
}

#[tokio::test]
async fn test_dry_run_never_posts() {
    let (server, client) = controller().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.0", "sites/s1/elements/e1/securityzones")))
        .respond_with(items(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let zone = zone();
    let report = ZoneBinder::new(&client, &zone, options(true))
        .run()
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.records[0].outcome, BindOutcome::Planned);
    assert_eq!(
        report.records[1].outcome,
        BindOutcome::ZoneInUse {
            bound_interface_ids: vec!["i1".into()]
        }
    );
    assert_eq!(report.created(), 1);
}

#[tokio::test]
async fn test_failed_post_is_recorded_and_scan_continues() {
    let (server, client) = controller().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.0", "sites/s1/elements/e1/securityzones")))
        .respond_with(items(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(tenant_path("v2.0", "sites/s1/elements/e1/securityzones")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "_error": [{ "code": "BAD_INTERFACE", "message": "interface type not allowed" }]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let zone = zone();
    let report = ZoneBinder::new(&client, &zone, options(false))
        .run()
        .await
        .unwrap();

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.failed(), 2);
    match &report.records[0].outcome {
        BindOutcome::Failed { reason } => assert!(reason.contains("interface type not allowed")),
        other => panic!("expected Failed, got {other:?}"),
    }
    // the other spoke was still scanned
    assert_eq!(report.records[2].element_id, "e3");
}

#[tokio::test]
async fn test_interface_listing_failure_is_recorded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2.1/api/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tenant_id": "42" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(tenant_path("v4.7", "sites")))
        .respond_with(items(json!([
            { "id": "s1", "name": "Branch-1", "element_cluster_role": "SPOKE" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(tenant_path("v2.3", "elements")))
        .respond_with(items(json!([{ "id": "e1", "site_id": "s1" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(tenant_path("v4.15", "sites/s1/elements/e1/interfaces")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = CgxClient::with_client(reqwest::Client::new(), Url::parse(&server.uri()).unwrap());
    client.use_token("tok".to_owned().into());
    client.fetch_profile().await.unwrap();

    let zone = zone();
    let report = ZoneBinder::new(&client, &zone, options(false))
        .run()
        .await
        .unwrap();

    assert_eq!(report.records.len(), 1);
    assert!(report.records[0].interface_id.is_none());
    assert!(matches!(report.records[0].outcome, BindOutcome::Failed { .. }));
}

#[tokio::test]
async fn test_site_listing_failure_aborts() {
    let (server, client) = controller().await;
    server.reset().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let zone = zone();
    let err = ZoneBinder::new(&client, &zone, options(false))
        .run()
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
}

// ── Zone resolution ─────────────────────────────────────────────────

#[tokio::test]
async fn test_resolve_zone_against_controller() {
    let (server, client) = controller().await;

    Mock::given(method("GET"))
        .and(path(tenant_path("v2.0", "securityzones")))
        .respond_with(items(json!([
            { "id": "z0", "name": "guest" },
            { "id": "z1", "name": "ZScaler-Tunnels" }
        ])))
        .mount(&server)
        .await;

    let matched = resolve_zone(&client, "zscaler", 80).await.unwrap();
    assert_eq!(matched.id, "z1");
    assert!(matched.score > 80);
}
