//! API integration tests
//!
//! The router runs in-process over an in-memory store and a manual clock.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use plantrack::{
    api,
    clock::{ManualClock, MILLIS_PER_DAY},
    config::{AppConfig, StorageBackend},
    repository::Repository,
    services::{
        device::ConfiguredDevice,
        export::DirectoryExportSink,
        notifications::{Notification, NotificationSink},
        Collaborators, Services,
    },
    storage::MemoryStore,
    AppResult, AppState,
};

const START: i64 = 1_700_000_000_000;

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<Notification>>,
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn emit(&self, notification: &Notification) -> AppResult<()> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

struct TestApp {
    router: Router,
    clock: Arc<ManualClock>,
    sink: Arc<RecordingSink>,
}

fn test_app(export_dir: Option<std::path::PathBuf>) -> TestApp {
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::Memory;
    let clock = Arc::new(ManualClock::new(START));
    let sink = Arc::new(RecordingSink::default());

    let repository = Repository::new(Arc::new(MemoryStore::new()), clock.clone());
    let services = Services::new(
        repository,
        &config,
        Collaborators {
            clock: clock.clone(),
            device: Arc::new(ConfiguredDevice::new(&config.device)),
            notifications: sink.clone(),
            export_sink: Arc::new(DirectoryExportSink::new(export_dir)),
        },
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    TestApp {
        router: api::create_router(state),
        clock,
        sink,
    }
}

/// Send a request and return the status with the raw body
async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(format!("/api/v1{}", uri));
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, bytes.to_vec())
}

/// Send a request and parse the JSON response
async fn send_json(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn create_pump(app: &TestApp, tag: &str, status: &str) -> Value {
    let (code, body) = send_json(
        app,
        "POST",
        "/equipment",
        Some(json!({
            "tag": tag,
            "plant": "CD-1",
            "type": "PUMP",
            "status": status,
            "comments": ""
        })),
    )
    .await;
    assert_eq!(code, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app(None);

    let (status, body) = send_json(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send_json(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["storedRecords"], 0);
}

#[tokio::test]
async fn test_equipment_lifecycle() {
    let app = test_app(None);

    // Add
    let created = create_pump(&app, "P-101", "AVAILABLE").await;
    let id = created["id"].as_str().expect("No equipment ID").to_string();
    assert_eq!(created["tag"], "P-101");
    assert_eq!(created["deleted"], false);
    assert_eq!(created["createdAt"], START);

    let (_, summary) = send_json(&app, "GET", "/summary", None).await;
    assert_eq!(
        summary,
        json!([{
            "plant": "CD-1",
            "available": 1,
            "inOperation": 0,
            "notAvailable": 0,
            "inWorkshop": 0,
            "total": 1
        }])
    );

    // Status change
    app.clock.advance(60_000);
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/equipment/{}", id),
        Some(json!({ "status": "IN WORKSHOP" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "IN WORKSHOP");
    assert_eq!(updated["updatedAt"], START + 60_000);

    let (_, summary) = send_json(&app, "GET", "/summary", None).await;
    assert_eq!(summary[0]["available"], 0);
    assert_eq!(summary[0]["inWorkshop"], 1);
    assert_eq!(summary[0]["total"], 1);

    // Soft delete
    let (status, deleted) = send_json(
        &app,
        "DELETE",
        &format!("/equipment/{}", id),
        Some(json!({ "reason": "OTHER", "details": "test" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);
    assert_eq!(deleted["deletionReason"], "OTHER");
    assert_eq!(deleted["deletionDetails"], "test");

    let (_, summary) = send_json(&app, "GET", "/summary", None).await;
    assert_eq!(summary, json!([]));

    // Hidden by default, kept in storage
    let (_, listed) = send_json(&app, "GET", "/equipment", None).await;
    assert_eq!(listed, json!([]));
    let (_, listed) = send_json(&app, "GET", "/equipment?include_deleted=true", None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    // One audit entry per mutation
    let (status, history) = send_json(&app, "GET", &format!("/equipment/{}/history", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = history
        .as_array()
        .expect("History is not an array")
        .iter()
        .filter_map(|entry| entry["action"].as_str())
        .collect();
    assert_eq!(actions, vec!["CREATE", "STATUS_CHANGE", "DELETE"]);
    assert_eq!(history[0]["deviceInfo"]["deviceName"], "Unknown Device");
    assert_eq!(history[1]["changes"], json!({ "status": "IN WORKSHOP" }));

    // Notifications for add and status change only
    let titles: Vec<String> = app
        .sink
        .sent
        .lock()
        .unwrap()
        .iter()
        .map(|n| n.title.clone())
        .collect();
    assert_eq!(titles, vec!["Equipment added successfully", "Equipment status updated"]);
}

#[tokio::test]
async fn test_search_filters_active_records() {
    let app = test_app(None);
    create_pump(&app, "P-101", "AVAILABLE").await;
    create_pump(&app, "K-200", "IN OPERATION").await;

    let (status, listed) = send_json(&app, "GET", "/equipment?q=p-1", None).await;
    assert_eq!(status, StatusCode::OK);
    let tags: Vec<&str> = listed
        .as_array()
        .expect("List is not an array")
        .iter()
        .filter_map(|e| e["tag"].as_str())
        .collect();
    assert_eq!(tags, vec!["P-101"]);
}

#[tokio::test]
async fn test_create_rejects_blank_tag() {
    let app = test_app(None);

    let (status, body) = send_json(
        &app,
        "POST",
        "/equipment",
        Some(json!({ "tag": "", "plant": "CD-1", "type": "PUMP" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    let (_, listed) = send_json(&app, "GET", "/change-logs", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_delete_other_requires_details() {
    let app = test_app(None);
    let created = create_pump(&app, "P-101", "AVAILABLE").await;
    let id = created["id"].as_str().expect("No equipment ID");

    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/equipment/{}", id),
        Some(json!({ "reason": "OTHER", "details": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, record) = send_json(&app, "GET", &format!("/equipment/{}", id), None).await;
    assert_eq!(record["deleted"], false);
}

#[tokio::test]
async fn test_unknown_equipment_is_not_found() {
    let app = test_app(None);

    let (status, _) = send_json(&app, "GET", "/equipment/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/equipment/missing",
        Some(json!({ "status": "AVAILABLE" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_json(
        &app,
        "DELETE",
        "/equipment/missing",
        Some(json!({ "reason": "UPLOAD ERROR" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing was logged for the misses
    let (_, logs) = send_json(&app, "GET", "/change-logs", None).await;
    assert_eq!(logs, json!([]));
}

#[tokio::test]
async fn test_overdue_check() {
    let app = test_app(None);
    create_pump(&app, "P-101", "IN WORKSHOP").await;
    create_pump(&app, "P-102", "AVAILABLE").await;

    let (_, report) = send_json(&app, "POST", "/overdue/check", None).await;
    assert_eq!(report["overdueCount"], 0);
    assert_eq!(report["notified"], false);

    app.clock.advance(31 * MILLIS_PER_DAY);
    let (status, report) = send_json(&app, "POST", "/overdue/check", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["overdueCount"], 1);
    assert_eq!(report["notified"], true);

    let sent = app.sink.sent.lock().unwrap().clone();
    let alert = sent.last().expect("No alert sent");
    assert_eq!(alert.title, "Equipment Alert");
    assert_eq!(alert.data, Some(json!({ "overdueCount": 1 })));
}

#[tokio::test]
async fn test_csv_download() {
    let app = test_app(None);
    create_pump(&app, "P-101", "AVAILABLE").await;

    let request = Request::builder()
        .uri("/api/v1/export")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.router.clone().oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    assert_eq!(
        disposition.as_deref(),
        Some("attachment; filename=\"equipment_export_2023-11-14.csv\"")
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body");
    let text = String::from_utf8(bytes.to_vec()).expect("Export is not UTF-8");
    assert_eq!(
        text,
        "\nCD-1\nTAG,Type,Status,Comments,Created,Updated\n\
         \"P-101\",\"Pump\",\"Available\",\"\",\"11/14/2023\",\"11/14/2023\"\n\n"
    );

    let (_, bytes) = send(&app, "GET", "/export?lang=es", None).await;
    let text = String::from_utf8(bytes).expect("Export is not UTF-8");
    assert!(text.contains("\"Bomba\",\"Disponible\",\"\",\"14/11/2023\""));
}

#[tokio::test]
async fn test_share_without_channel_is_unavailable() {
    let app = test_app(None);
    create_pump(&app, "P-101", "AVAILABLE").await;

    let (status, body) = send_json(&app, "POST", "/export", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "ExportUnavailable");
}

#[tokio::test]
async fn test_share_writes_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let app = test_app(Some(dir.path().to_path_buf()));
    create_pump(&app, "P-101", "AVAILABLE").await;

    let (status, report) = send_json(&app, "POST", "/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["fileName"], "equipment_export_2023-11-14.csv");
    assert_eq!(report["rowCount"], 1);

    let written = std::fs::read_to_string(dir.path().join("equipment_export_2023-11-14.csv"))
        .expect("Export file missing");
    assert!(written.contains("\"P-101\""));
}

#[tokio::test]
async fn test_language_setting() {
    let app = test_app(None);

    let (_, body) = send_json(&app, "GET", "/settings/language", None).await;
    assert_eq!(body["language"], "en");

    let (status, body) = send_json(&app, "PUT", "/settings/language", Some(json!({ "language": "es" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "es");

    create_pump(&app, "P-101", "AVAILABLE").await;
    let sent = app.sink.sent.lock().unwrap().clone();
    assert_eq!(sent[0].title, "Equipo agregado exitosamente");
}

#[tokio::test]
async fn test_profile_round_trip() {
    let app = test_app(None);

    let (_, body) = send_json(&app, "GET", "/profile", None).await;
    assert_eq!(body, Value::Null);

    let (status, _) = send_json(
        &app,
        "PUT",
        "/profile",
        Some(json!({ "name": "Operator", "email": "operator@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send_json(&app, "GET", "/profile", None).await;
    assert_eq!(body["name"], "Operator");

    let (status, _) = send_json(&app, "DELETE", "/profile", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send_json(&app, "GET", "/profile", None).await;
    assert_eq!(body, Value::Null);
}
