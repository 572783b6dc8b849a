mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{seed_aisle, TestApp};

#[tokio::test]
async fn location_crud_round_trip() {
    let app = TestApp::new().await;

    let (status, created) = app
        .post(
            "/api/v1/locations",
            json!({ "name": "North Warehouse", "address": "12 Dock Rd" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["success"], true);
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) = app.get(&format!("/api/v1/locations/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "North Warehouse");

    let (status, updated) = app
        .put(
            &format!("/api/v1/locations/{id}"),
            json!({ "note": "cold storage" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["note"], "cold storage");
    assert_eq!(updated["data"]["name"], "North Warehouse");

    let (status, _) = app.delete(&format!("/api/v1/locations/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/v1/locations/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn location_names_are_unique_and_non_blank() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/v1/locations", json!({ "name": "Central" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post("/api/v1/locations", json!({ "name": "Central" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post("/api/v1/locations", json!({ "name": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_endpoints_paginate_and_search() {
    let app = TestApp::new().await;

    for i in 1..=25 {
        let (status, _) = app
            .post("/api/v1/locations", json!({ "name": format!("Site {i:02}") }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page1) = app.get("/api/v1/locations?page=1&per_page=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page1["data"].as_array().unwrap().len(), 10);
    assert_eq!(page1["pagination"]["total"], 25);
    assert_eq!(page1["pagination"]["total_pages"], 3);
    assert_eq!(page1["pagination"]["page"], 1);

    let (_, page3) = app.get("/api/v1/locations?page=3&per_page=10").await;
    assert_eq!(page3["data"].as_array().unwrap().len(), 5);

    // Out-of-range pages return empty items with correct totals
    let (_, page9) = app.get("/api/v1/locations?page=9&per_page=10").await;
    assert_eq!(page9["data"].as_array().unwrap().len(), 0);
    assert_eq!(page9["pagination"]["total"], 25);

    let (_, filtered) = app.get("/api/v1/locations?search=Site%2007").await;
    assert_eq!(filtered["data"].as_array().unwrap().len(), 1);
    assert_eq!(filtered["data"][0]["name"], "Site 07");
}

#[tokio::test]
async fn per_page_is_clamped_to_the_maximum() {
    let app = TestApp::new().await;

    let (_, _) = app
        .post("/api/v1/locations", json!({ "name": "Solo" }))
        .await;

    let (status, page) = app.get("/api/v1/locations?per_page=10000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["pagination"]["per_page"], 100);
}

#[tokio::test]
async fn hierarchy_deletes_are_blocked_while_children_exist() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;

    let (status, _) = app.delete(&format!("/api/v1/locations/{location_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.delete(&format!("/api/v1/depots/{depot_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Bottom-up teardown succeeds
    let (status, _) = app.delete(&format!("/api/v1/aisles/{aisle_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&format!("/api/v1/depots/{depot_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.delete(&format!("/api/v1/locations/{location_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn depot_listing_filters_by_location() {
    let app = TestApp::new().await;
    let (location_a, _, _) = seed_aisle(&app).await;
    let (location_b, _, _) = seed_aisle(&app).await;

    let (_, all) = app.get("/api/v1/depots").await;
    assert_eq!(all["pagination"]["total"], 2);

    let (_, only_a) = app
        .get(&format!("/api/v1/depots?location_id={location_a}"))
        .await;
    assert_eq!(only_a["pagination"]["total"], 1);
    assert_eq!(only_a["data"][0]["location_id"], location_a);

    let (_, only_b) = app
        .get(&format!("/api/v1/depots?location_id={location_b}"))
        .await;
    assert_eq!(only_b["pagination"]["total"], 1);
}

#[tokio::test]
async fn product_skus_are_unique() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post(
            "/api/v1/products",
            json!({ "sku": "BOLT-M8", "name": "Hex bolt M8" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .post(
            "/api/v1/products",
            json!({ "sku": "BOLT-M8", "name": "Another bolt" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/api/v1/products",
            json!({ "sku": "NUT-M8", "name": "Hex nut M8", "sale_price": "-1.00" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sources_and_clients_support_search() {
    let app = TestApp::new().await;

    for name in ["Apex Metals", "Borealis Plastics", "Apex Tools"] {
        let (status, _) = app.post("/api/v1/sources", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, hits) = app.get("/api/v1/sources?search=Apex").await;
    assert_eq!(hits["pagination"]["total"], 2);

    let (status, _) = app
        .post(
            "/api/v1/clients",
            json!({ "name": "Acme", "email": "not-an-email" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn alert_feed_tracks_unread_counts() {
    let app = TestApp::new().await;

    let (_, count) = app.get("/api/v1/alerts/unread-count").await;
    assert_eq!(count["data"]["count"], 0);

    let (status, first) = app
        .post(
            "/api/v1/alerts",
            json!({ "kind": "warning", "message": "Slot R-L1-B1-P1 nearing expiry" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let first_id = first["data"]["id"].as_i64().unwrap();

    let (_, _) = app
        .post(
            "/api/v1/alerts",
            json!({ "kind": "critical", "message": "Rack R-D-L3-B2-P2 overloaded" }),
        )
        .await;

    let (_, count) = app.get("/api/v1/alerts/unread-count").await;
    assert_eq!(count["data"]["count"], 2);

    let (status, read) = app
        .post(&format!("/api/v1/alerts/{first_id}/read"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["data"]["is_read"], true);

    let (_, count) = app.get("/api/v1/alerts/unread-count").await;
    assert_eq!(count["data"]["count"], 1);

    let (_, unread) = app.get("/api/v1/alerts?unread=true").await;
    assert_eq!(unread["pagination"]["total"], 1);

    // Marking read twice is idempotent
    let (status, _) = app
        .post(&format!("/api/v1/alerts/{first_id}/read"), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, count) = app.get("/api/v1/alerts/unread-count").await;
    assert_eq!(count["data"]["count"], 1);
}

#[tokio::test]
async fn routine_crud_round_trip() {
    let app = TestApp::new().await;

    let (status, created) = app
        .post(
            "/api/v1/routines",
            json!({
                "name": "Expiry sweep",
                "schedule": "0 6 * * *",
                "description": "Flag stock close to expiry",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["is_active"], true);

    let (status, updated) = app
        .put(
            &format!("/api/v1/routines/{id}"),
            json!({ "is_active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["is_active"], false);

    let (_, listed) = app.get("/api/v1/routines?search=Expiry").await;
    assert_eq!(listed["pagination"]["total"], 1);

    let (status, _) = app.delete(&format!("/api/v1/routines/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn status_and_health_endpoints_respond() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["service"], "storium-api");

    let (status, body) = app.get("/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checks"]["database"], "healthy");
}
