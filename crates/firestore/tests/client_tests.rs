//! Integration tests for [`FirestoreClient`] against an in-process fake
//! of the token endpoint and the Firestore documents API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Form, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use penwatch_core::{Alert, AlertKind};
use penwatch_firestore::{Auth, FirestoreClient, ServiceAccountKey, StoreError, DEFAULT_DATABASE};

const FIXTURE: &str = include_str!("fixtures/service-account.json");
const ACCESS_TOKEN: &str = "test-access-token";

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

/// One persisted write: collection, `Authorization` header, request body.
type RecordedWrite = (String, String, Value);

#[derive(Clone, Default)]
struct FakeFirestore {
    token_requests: Arc<AtomicUsize>,
    writes: Arc<Mutex<Vec<RecordedWrite>>>,
    reject_tokens: bool,
    reject_writes: bool,
}

async fn token(
    State(fake): State<FakeFirestore>,
    Form(params): Form<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    fake.token_requests.fetch_add(1, Ordering::SeqCst);
    if fake.reject_tokens {
        return Err(StatusCode::UNAUTHORIZED);
    }
    let grant_ok = params.get("grant_type").map(String::as_str)
        == Some("urn:ietf:params:oauth:grant-type:jwt-bearer");
    if !grant_ok || !params.contains_key("assertion") {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({
        "access_token": ACCESS_TOKEN,
        "expires_in": 3599,
        "token_type": "Bearer"
    })))
}

async fn create_document(
    State(fake): State<FakeFirestore>,
    Path((project, database, collection)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if fake.reject_writes {
        return Err((StatusCode::FORBIDDEN, "PERMISSION_DENIED".to_string()));
    }
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut writes = fake.writes.lock().unwrap();
    writes.push((collection.clone(), authorization, body.clone()));
    let name = format!(
        "projects/{project}/databases/{database}/documents/{collection}/doc-{}",
        writes.len()
    );
    Ok(Json(json!({ "name": name, "fields": body["fields"] })))
}

/// Bind the fake on an ephemeral port and return its base URL.
async fn spawn_fake(fake: FakeFirestore) -> String {
    let app = Router::new()
        .route("/token", post(token))
        .route(
            "/v1/projects/{project}/databases/{database}/documents/{collection}",
            post(create_document),
        )
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });
    format!("http://{addr}")
}

fn service_account_client(base_url: &str) -> FirestoreClient {
    let mut key = ServiceAccountKey::from_json(FIXTURE).expect("fixture should parse");
    key.token_uri = format!("{base_url}/token");
    FirestoreClient::new(
        base_url,
        key.project_id.clone(),
        DEFAULT_DATABASE,
        Auth::ServiceAccount(key),
        Some(Duration::from_secs(5)),
    )
    .expect("client should build")
}

fn pen_absent_alert() -> Alert {
    Alert::new(AlertKind::PenAbsent, "Insulin pen missing!", Utc::now())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn writes_alert_with_exchanged_token() {
    let fake = FakeFirestore::default();
    let base_url = spawn_fake(fake.clone()).await;
    let client = service_account_client(&base_url);

    let id = client
        .add_alert(&pen_absent_alert())
        .await
        .expect("write should succeed");

    assert_eq!(id, "doc-1");
    let writes = fake.writes.lock().unwrap();
    assert_eq!(writes.len(), 1);
    let (collection, authorization, body) = &writes[0];
    assert_eq!(collection, "alerts");
    assert_eq!(authorization, &format!("Bearer {ACCESS_TOKEN}"));
    assert_eq!(body["fields"]["type"]["stringValue"], "pen_absent");
    assert_eq!(body["fields"]["message"]["stringValue"], "Insulin pen missing!");
    assert!(body["fields"]["timestamp"]["timestampValue"].is_string());
}

#[tokio::test]
async fn token_is_requested_once_per_client() {
    let fake = FakeFirestore::default();
    let base_url = spawn_fake(fake.clone()).await;
    let client = service_account_client(&base_url);

    client.add_alert(&pen_absent_alert()).await.unwrap();
    let temperature = Alert::new(AlertKind::Temperature, "Temperature Alert: 10.0°C", Utc::now());
    let second = client.add_alert(&temperature).await.unwrap();

    assert_eq!(second, "doc-2");
    assert_eq!(fake.token_requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn emulator_skips_token_exchange() {
    let fake = FakeFirestore::default();
    let base_url = spawn_fake(fake.clone()).await;
    let host = base_url.trim_start_matches("http://");
    let client = FirestoreClient::emulator(host, "demo-project", DEFAULT_DATABASE, None).unwrap();

    client.add_alert(&pen_absent_alert()).await.unwrap();

    assert_eq!(fake.token_requests.load(Ordering::SeqCst), 0);
    let writes = fake.writes.lock().unwrap();
    assert_eq!(writes[0].1, "Bearer owner");
}

#[tokio::test]
async fn rejected_write_surfaces_status_and_body() {
    let fake = FakeFirestore {
        reject_writes: true,
        ..Default::default()
    };
    let base_url = spawn_fake(fake).await;
    let client = service_account_client(&base_url);

    let result = client.add_alert(&pen_absent_alert()).await;

    assert_matches!(
        result,
        Err(StoreError::HttpStatus { status: 403, body }) if body == "PERMISSION_DENIED"
    );
}

#[tokio::test]
async fn failed_token_exchange_blocks_write() {
    let fake = FakeFirestore {
        reject_tokens: true,
        ..Default::default()
    };
    let base_url = spawn_fake(fake.clone()).await;
    let client = service_account_client(&base_url);

    let result = client.add_alert(&pen_absent_alert()).await;

    assert_matches!(result, Err(StoreError::Token(_)));
    assert!(fake.writes.lock().unwrap().is_empty());
}
