use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use storium_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};

/// Helper harness for spinning up an application backed by a throwaway
/// SQLite database.
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
    _db_dir: tempfile::TempDir,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("failed to create temp dir");
        let db_file = db_dir.path().join("storium_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_file.display()),
            "127.0.0.1".to_string(),
            13_001,
            "test".to_string(),
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");

        let db_arc = Arc::new(pool);
        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), event_sender.clone());
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", storium_api::api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
            _db_dir: db_dir,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("failed to build request"))
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("body should be JSON")
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

/// Seeds a location → depot → aisle chain and returns the three ids.
pub async fn seed_aisle(app: &TestApp) -> (i64, i64, i64) {
    let (status, location) = app
        .post(
            "/api/v1/locations",
            serde_json::json!({ "name": format!("Location-{}", unique_suffix()) }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "location: {location}");
    let location_id = location["data"]["id"].as_i64().unwrap();

    let (status, depot) = app
        .post(
            "/api/v1/depots",
            serde_json::json!({ "location_id": location_id, "name": "Depot A" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "depot: {depot}");
    let depot_id = depot["data"]["id"].as_i64().unwrap();

    let (status, aisle) = app
        .post(
            "/api/v1/aisles",
            serde_json::json!({ "depot_id": depot_id, "name": "Aisle 1" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "aisle: {aisle}");
    let aisle_id = aisle["data"]["id"].as_i64().unwrap();

    (location_id, depot_id, aisle_id)
}

/// Seeds a rack under the given aisle and returns its id.
pub async fn seed_rack(
    app: &TestApp,
    aisle_id: i64,
    face_type: &str,
    levels: i64,
    bays: i64,
    bins_per_bay: i64,
) -> i64 {
    let (status, rack) = app
        .post(
            "/api/v1/racks",
            serde_json::json!({
                "aisle_id": aisle_id,
                "face_type": face_type,
                "levels": levels,
                "bays": bays,
                "bins_per_bay": bins_per_bay,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "rack: {rack}");
    rack["data"]["id"].as_i64().unwrap()
}

/// Seeds a product and returns its id.
pub async fn seed_product(app: &TestApp) -> i64 {
    let (status, product) = app
        .post(
            "/api/v1/products",
            serde_json::json!({
                "sku": format!("SKU-{}", unique_suffix()),
                "name": "Hex bolt M8",
                "unit": "box",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "product: {product}");
    product["data"]["id"].as_i64().unwrap()
}

/// Finds the slot id at the given address within a layout response.
pub fn slot_id_at(layout: &Value, direction: &str, level: i64, bay: i64, bin: i64) -> i64 {
    layout["data"]["slots"]
        .as_array()
        .expect("slots should be an array")
        .iter()
        .find(|slot| {
            slot["direction"] == direction
                && slot["level_no"] == level
                && slot["bay_no"] == bay
                && slot["bin_no"] == bin
        })
        .unwrap_or_else(|| panic!("no slot at {direction}-L{level}-B{bay}-P{bin}"))["id"]
        .as_i64()
        .unwrap()
}

/// Returns the stock embedded at the given address, if any.
pub fn stock_at(layout: &Value, direction: &str, level: i64, bay: i64, bin: i64) -> Value {
    layout["data"]["slots"]
        .as_array()
        .expect("slots should be an array")
        .iter()
        .find(|slot| {
            slot["direction"] == direction
                && slot["level_no"] == level
                && slot["bay_no"] == bay
                && slot["bin_no"] == bin
        })
        .unwrap_or_else(|| panic!("no slot at {direction}-L{level}-B{bay}-P{bin}"))["stock"]
        .clone()
}

static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
}
