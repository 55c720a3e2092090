use std::path::PathBuf;
use std::sync::Arc;

use invdash_api::app::services::AppServices;
use invdash_inventory::InventoryStore;
use reqwest::StatusCode;
use serde_json::json;

const SAMPLE: &str = include_str!("../../inventory/fixtures/sample_inventory.json");

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(services: AppServices) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = invdash_api::app::build_app(Arc::new(services));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn empty(data_path: impl Into<PathBuf>) -> Self {
        Self::spawn(AppServices::with_store(Arc::new(InventoryStore::new()), data_path)).await
    }

    async fn with_sample() -> Self {
        let store = Arc::new(InventoryStore::new());
        store.load_document(SAMPLE.as_bytes()).unwrap();
        Self::spawn(AppServices::with_store(store, "unused.json")).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn finance_document() -> serde_json::Value {
    json!({
        "summary": {
            "total_hosts_with_populated_entries": 2,
            "hosts_with_bigfix": 1,
            "combined_hosts_empty_dns": 0,
            "hosts_with_populated_entries_from_empty_dns": 0,
            "percentage_with_populated_entries": 100.0,
            "hosts_using_internet_routable_ips": 1
        },
        "business_units": {
            "Finance": {
                "hosts_with_populated_entries": 2,
                "hosts_with_internet_routable_dns": 1,
                "systems": [
                    { "hostname": "fin-web-01", "ip": "10.0.0.1", "dns_servers": ["8.8.8.8"],
                      "bigfix": true, "issues": ["Internet-routable DNS"] },
                    { "hostname": "fin-db-01", "ip": "10.0.0.2", "issues": [] }
                ]
            }
        }
    })
}

#[tokio::test]
async fn health_reports_load_state() {
    let srv = TestServer::empty("missing.json").await;
    let client = reqwest::Client::new();

    let body: serde_json::Value = client.get(srv.url("/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["loaded"], false);
    assert_eq!(body["generation"], 0);

    let srv = TestServer::with_sample().await;
    let body: serde_json::Value = client.get(srv.url("/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(body["loaded"], true);
    assert_eq!(body["generation"], 1);
    assert!(body["loaded_at"].is_string());
}

#[tokio::test]
async fn queries_are_unavailable_before_any_load() {
    let srv = TestServer::empty("missing.json").await;
    let client = reqwest::Client::new();

    for path in [
        "/api/summary",
        "/api/business-units",
        "/api/business-units/CTIO",
        "/api/systems",
        "/api/systems/issues",
    ] {
        let res = client.get(srv.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE, "{path}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "data_unavailable");
    }
}

#[tokio::test]
async fn summary_and_business_units_from_sample() {
    let srv = TestServer::with_sample().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/api/summary")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let summary: serde_json::Value = res.json().await.unwrap();
    assert_eq!(summary["total_hosts_with_populated_entries"], 6977);
    assert_eq!(summary["percentage_with_populated_entries"], 8.09);

    let res = client.get(srv.url("/api/business-units")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let units: Vec<serde_json::Value> = res.json().await.unwrap();
    let names: Vec<&str> = units.iter().map(|u| u["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "CTIO",
            "CornerStone",
            "SES Core",
            "Treasury & Capital Markets",
            "Universal Banking Enterprise",
            "Payments",
            "USMM Digital & Core Banking",
            "Lending",
            "CISO",
            "UNKNOWN",
            "CFO",
            "CTO",
        ]
    );

    let ctio = &units[0];
    assert_eq!(ctio["total_systems"], 3);
    assert_eq!(ctio["systems_with_issues"], 2);
    assert_eq!(ctio["hosts_with_populated_entries"], 809);
    assert_eq!(ctio["hosts_with_internet_routable_dns"], 223);
}

#[tokio::test]
async fn business_unit_lookup_decodes_names_and_reports_missing() {
    let srv = TestServer::with_sample().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/api/business-units/Treasury%20%26%20Capital%20Markets"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let unit: serde_json::Value = res.json().await.unwrap();
    assert_eq!(unit["hosts_with_populated_entries"], 1140);
    assert_eq!(unit["systems"].as_array().unwrap().len(), 2);
    assert_eq!(unit["systems"][0]["hostname"], "treasury-web-01");

    let res = client.get(srv.url("/api/business-units/ctio")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn system_listings_and_filters() {
    let srv = TestServer::with_sample().await;
    let client = reqwest::Client::new();

    let all: Vec<serde_json::Value> =
        client.get(srv.url("/api/systems")).send().await.unwrap().json().await.unwrap();
    assert_eq!(all.len(), 21);
    assert_eq!(all[0]["business_unit"], "CTIO");
    assert_eq!(all[0]["hostname"], "ctio-web-01");

    let issues: Vec<serde_json::Value> =
        client.get(srv.url("/api/systems/issues")).send().await.unwrap().json().await.unwrap();
    assert_eq!(issues.len(), 15);
    assert!(issues.iter().all(|s| !s["issues"].as_array().unwrap().is_empty()));

    let filtered: Vec<serde_json::Value> = client
        .get(srv.url("/api/systems?filter=with_issues"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(filtered, issues);

    let res = client.get(srv.url("/api/systems?filter=bogus")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_filter");
}

#[tokio::test]
async fn load_from_body_replaces_document() {
    let srv = TestServer::with_sample().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/load-data"))
        .json(&finance_document())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Data loaded successfully");
    assert_eq!(body["generation"], 2);
    assert_eq!(body["business_units"], 1);
    assert_eq!(body["systems"], 2);

    let units: Vec<serde_json::Value> =
        client.get(srv.url("/api/business-units")).send().await.unwrap().json().await.unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0]["name"], "Finance");
    assert_eq!(units[0]["total_systems"], 2);
    assert_eq!(units[0]["systems_with_issues"], 1);

    let issues: Vec<serde_json::Value> =
        client.get(srv.url("/api/systems/issues")).send().await.unwrap().json().await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["hostname"], "fin-web-01");
    assert_eq!(issues[0]["business_unit"], "Finance");
}

#[tokio::test]
async fn malformed_load_is_rejected_and_previous_document_kept() {
    let srv = TestServer::with_sample().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/load-data"))
        .json(&json!({ "summary": finance_document()["summary"].clone() }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "malformed_input");
    assert!(body["message"].as_str().unwrap().contains("business_units"));

    let res = client.get(srv.url("/api/business-units/CTIO")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let health: serde_json::Value =
        client.get(srv.url("/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["generation"], 1);
}

#[tokio::test]
async fn empty_load_request_reads_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parsed_inventory.json");
    let srv = TestServer::empty(&path).await;
    let client = reqwest::Client::new();

    // Missing file.
    let res = client.post(srv.url("/api/load-data")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "data_file_not_found");

    std::fs::write(&path, finance_document().to_string()).unwrap();

    let res = client.post(srv.url("/api/load-data")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["generation"], 1);

    let res = client.get(srv.url("/api/business-units/Finance")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn startup_load_uses_configured_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(&path, SAMPLE).unwrap();

    let services = AppServices::with_store(Arc::new(InventoryStore::new()), &path);
    services.load_on_startup().await;
    assert_eq!(services.store().generation(), 1);

    let srv = TestServer::spawn(services).await;
    let client = reqwest::Client::new();
    let res = client.get(srv.url("/api/summary")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn startup_load_tolerates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let services = AppServices::with_store(
        Arc::new(InventoryStore::new()),
        dir.path().join("absent.json"),
    );

    services.load_on_startup().await;
    assert!(!services.store().is_loaded());
}

fn document_with_systems(count: usize) -> serde_json::Value {
    let systems: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            json!({
                "hostname": format!("bulk-host-{i:06}.corp.example.net"),
                "ip": format!("10.{}.{}.{}", i / 65536, (i / 256) % 256, i % 256),
                "dns_servers": ["10.255.0.53", "10.255.1.53"],
                "bigfix": i % 2 == 0,
                "issues": []
            })
        })
        .collect();

    let mut doc = finance_document();
    doc["business_units"]["Finance"]["systems"] = serde_json::Value::Array(systems);
    doc
}

#[tokio::test]
async fn load_accepts_bodies_past_the_framework_default_limit() {
    let srv = TestServer::empty("missing.json").await;
    let client = reqwest::Client::new();

    let body = document_with_systems(30_000).to_string();
    assert!(body.len() > 2 * 1024 * 1024);

    let res = client
        .post(srv.url("/api/load-data"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["systems"], 30_000);
}

#[tokio::test]
async fn load_rejects_bodies_over_the_configured_limit() {
    let services = AppServices::with_store(Arc::new(InventoryStore::new()), "missing.json")
        .with_max_load_bytes(1024);
    let srv = TestServer::spawn(services).await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/api/load-data"))
        .json(&document_with_systems(50))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let health: serde_json::Value =
        client.get(srv.url("/health")).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["loaded"], false);
}

#[tokio::test]
async fn load_tolerates_mistyped_system_fields() {
    let srv = TestServer::with_sample().await;
    let client = reqwest::Client::new();

    let mut doc = finance_document();
    doc["business_units"]["Finance"]["systems"] = json!([
        { "hostname": "fin-web-01", "ip": "10.0.0.1", "bigfix": 1, "issues": "Empty DNS servers" },
        null
    ]);

    let res = client.post(srv.url("/api/load-data")).json(&doc).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let issues: Vec<serde_json::Value> =
        client.get(srv.url("/api/systems/issues")).send().await.unwrap().json().await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["issues"], json!(["Empty DNS servers"]));
    assert_eq!(issues[0]["bigfix"], false);
}
