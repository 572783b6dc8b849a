mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{seed_aisle, seed_product, seed_rack, slot_id_at, TestApp};

fn layout_path(location_id: i64, depot_id: i64, aisle_id: i64, rack_id: i64) -> String {
    format!(
        "/api/v1/locations/{}/depots/{}/aisles/{}/racks/{}/layout",
        location_id, depot_id, aisle_id, rack_id
    )
}

#[tokio::test]
async fn rack_creation_materializes_full_address_space() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
    let rack_id = seed_rack(&app, aisle_id, "double", 3, 2, 2).await;

    let (status, rack) = app.get(&format!("/api/v1/racks/{rack_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rack["data"]["rack_code"], "R-D-L3-B2-P2");

    let (status, layout) = app
        .get(&layout_path(location_id, depot_id, aisle_id, rack_id))
        .await;
    assert_eq!(status, StatusCode::OK);

    // 3 levels x 2 bays x 2 bins x 2 directions
    let slots = layout["data"]["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 24);

    assert_eq!(layout["data"]["layout"]["levels"], 3);
    assert_eq!(layout["data"]["layout"]["bays"], 2);
    assert_eq!(layout["data"]["layout"]["bins_per_bay"], 2);
    assert_eq!(layout["data"]["layout"]["directions"], json!(["R", "L"]));
}

#[tokio::test]
async fn layout_slots_follow_grid_traversal_order() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
    let rack_id = seed_rack(&app, aisle_id, "single", 2, 2, 2).await;

    let (status, layout) = app
        .get(&layout_path(location_id, depot_id, aisle_id, rack_id))
        .await;
    assert_eq!(status, StatusCode::OK);

    let slots = layout["data"]["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 8);

    // Top level first, then bays and bins ascending
    let order: Vec<(i64, i64, i64)> = slots
        .iter()
        .map(|s| {
            (
                s["level_no"].as_i64().unwrap(),
                s["bay_no"].as_i64().unwrap(),
                s["bin_no"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            (2, 1, 1),
            (2, 1, 2),
            (2, 2, 1),
            (2, 2, 2),
            (1, 1, 1),
            (1, 1, 2),
            (1, 2, 1),
            (1, 2, 2),
        ]
    );

    assert_eq!(slots[0]["coordinate"], "R-L2-B1-P1");
}

#[tokio::test]
async fn single_faced_rack_exposes_one_direction() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
    let rack_id = seed_rack(&app, aisle_id, "single", 3, 4, 2).await;

    let (status, rack) = app.get(&format!("/api/v1/racks/{rack_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rack["data"]["rack_code"], "R-S-L3-B4-P2");

    let (_, layout) = app
        .get(&layout_path(location_id, depot_id, aisle_id, rack_id))
        .await;
    assert_eq!(layout["data"]["layout"]["directions"], json!(["R"]));
    assert_eq!(layout["data"]["slots"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn layout_rejects_mismatched_hierarchy() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
    let rack_id = seed_rack(&app, aisle_id, "single", 1, 1, 1).await;

    // A second, unrelated chain
    let (other_location, other_depot, other_aisle) = seed_aisle(&app).await;

    let (status, _) = app
        .get(&layout_path(location_id, depot_id, other_aisle, rack_id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get(&layout_path(location_id, other_depot, aisle_id, rack_id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get(&layout_path(other_location, depot_id, aisle_id, rack_id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The untouched chain still resolves
    let (status, _) = app
        .get(&layout_path(location_id, depot_id, aisle_id, rack_id))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn rack_code_decode_round_trips() {
    let app = TestApp::new().await;

    let (status, decoded) = app.get("/api/v1/racks/codes/R-D-L3-B2-P2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decoded["data"]["face_type"], "double");
    assert_eq!(decoded["data"]["levels"], 3);
    assert_eq!(decoded["data"]["bays"], 2);
    assert_eq!(decoded["data"]["bins_per_bay"], 2);

    let (status, _) = app.get("/api/v1/racks/codes/R-X-L3-B2-P2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/api/v1/racks/codes/R-S-L0-B2-P2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rack_creation_rejects_non_positive_dimensions() {
    let app = TestApp::new().await;
    let (_, _, aisle_id) = seed_aisle(&app).await;

    let (status, _) = app
        .post(
            "/api/v1/racks",
            json!({
                "aisle_id": aisle_id,
                "face_type": "single",
                "levels": 0,
                "bays": 2,
                "bins_per_bay": 2,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reconfiguring_a_rack_regenerates_its_slots() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
    let rack_id = seed_rack(&app, aisle_id, "single", 2, 1, 1).await;

    let (status, rack) = app
        .put(
            &format!("/api/v1/racks/{rack_id}"),
            json!({ "face_type": "double", "levels": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rack["data"]["rack_code"], "R-D-L3-B1-P1");

    let (_, layout) = app
        .get(&layout_path(location_id, depot_id, aisle_id, rack_id))
        .await;
    assert_eq!(layout["data"]["slots"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn occupied_rack_cannot_be_reconfigured_or_deleted() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
    let rack_id = seed_rack(&app, aisle_id, "single", 2, 1, 1).await;
    let product_id = seed_product(&app).await;

    let (_, layout) = app
        .get(&layout_path(location_id, depot_id, aisle_id, rack_id))
        .await;
    let slot_id = slot_id_at(&layout, "R", 1, 1, 1);

    let (status, _) = app
        .post(
            "/api/v1/racks/stocks",
            json!({ "slot_id": slot_id, "product_id": product_id, "quantity": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .put(&format!("/api/v1/racks/{rack_id}"), json!({ "levels": 5 }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.delete(&format!("/api/v1/racks/{rack_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // A note-only update is still allowed
    let (status, _) = app
        .put(
            &format!("/api/v1/racks/{rack_id}"),
            json!({ "note": "west wall" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_rack_delete_removes_rack_and_slots() {
    let app = TestApp::new().await;
    let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
    let rack_id = seed_rack(&app, aisle_id, "single", 1, 1, 2).await;

    let (status, _) = app.delete(&format!("/api/v1/racks/{rack_id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/v1/racks/{rack_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .get(&layout_path(location_id, depot_id, aisle_id, rack_id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
