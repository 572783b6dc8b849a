mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{seed_aisle, seed_product, seed_rack, slot_id_at, stock_at, TestApp};

struct Rig {
    app: TestApp,
    location_id: i64,
    depot_id: i64,
    aisle_id: i64,
    rack_id: i64,
    product_id: i64,
}

impl Rig {
    /// One double-faced 3x2x2 rack with a product ready to place.
    async fn new() -> Self {
        let app = TestApp::new().await;
        let (location_id, depot_id, aisle_id) = seed_aisle(&app).await;
        let rack_id = seed_rack(&app, aisle_id, "double", 3, 2, 2).await;
        let product_id = seed_product(&app).await;

        Self {
            app,
            location_id,
            depot_id,
            aisle_id,
            rack_id,
            product_id,
        }
    }

    async fn layout(&self) -> Value {
        let (status, layout) = self
            .app
            .get(&format!(
                "/api/v1/locations/{}/depots/{}/aisles/{}/racks/{}/layout",
                self.location_id, self.depot_id, self.aisle_id, self.rack_id
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        layout
    }

    async fn slot_id(&self, direction: &str, level: i64, bay: i64, bin: i64) -> i64 {
        slot_id_at(&self.layout().await, direction, level, bay, bin)
    }

    async fn place(&self, slot_id: i64, quantity: i64) -> (StatusCode, Value) {
        self.app
            .post(
                "/api/v1/racks/stocks",
                json!({
                    "slot_id": slot_id,
                    "product_id": self.product_id,
                    "quantity": quantity,
                }),
            )
            .await
    }
}

#[tokio::test]
async fn stock_is_created_into_an_empty_slot() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 1, 1, 1).await;

    let (status, created) = rig.place(slot_id, 10).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["data"]["stock"]["quantity"], 10);
    assert_eq!(created["data"]["stock"]["strategy"], "FIFO");
    assert_eq!(created["data"]["stock"]["product_type"], "raw");
    assert_eq!(created["data"]["slot"]["coordinate"], "R-L1-B1-P1");

    let stock = stock_at(&rig.layout().await, "R", 1, 1, 1);
    assert_eq!(stock["quantity"], 10);
}

#[tokio::test]
async fn creating_into_an_occupied_slot_is_rejected() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 1, 1, 1).await;

    let (status, _) = rig.place(slot_id, 10).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = rig.place(slot_id, 4).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(
        error["message"].as_str().unwrap().contains("R-L1-B1-P1"),
        "{error}"
    );

    // The original occupant is untouched
    let stock = stock_at(&rig.layout().await, "R", 1, 1, 1);
    assert_eq!(stock["quantity"], 10);
}

#[tokio::test]
async fn moving_stock_frees_the_source_and_fills_the_target() {
    let rig = Rig::new().await;
    let source = rig.slot_id("R", 1, 1, 1).await;
    let target = rig.slot_id("R", 1, 1, 2).await;

    let (_, created) = rig.place(source, 10).await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (status, moved) = rig
        .app
        .patch(
            "/api/v1/racks/stocks/move",
            json!({ "stock_id": stock_id, "target_slot_id": target }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{moved}");
    assert_eq!(moved["data"]["slot"]["coordinate"], "R-L1-B1-P2");

    let layout = rig.layout().await;
    assert!(stock_at(&layout, "R", 1, 1, 1).is_null());
    assert_eq!(stock_at(&layout, "R", 1, 1, 2)["id"], stock_id);
}

#[tokio::test]
async fn moving_to_an_occupied_slot_changes_neither_slot() {
    let rig = Rig::new().await;
    let first_slot = rig.slot_id("R", 1, 1, 1).await;
    let second_slot = rig.slot_id("R", 1, 1, 2).await;

    let (_, first) = rig.place(first_slot, 10).await;
    let first_id = first["data"]["stock"]["id"].as_i64().unwrap();
    let (_, second) = rig.place(second_slot, 7).await;
    let second_id = second["data"]["stock"]["id"].as_i64().unwrap();

    let (status, error) = rig
        .app
        .patch(
            "/api/v1/racks/stocks/move",
            json!({ "stock_id": first_id, "target_slot_id": second_slot }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["message"].as_str().unwrap().contains("R-L1-B1-P2"));

    // Both stocks remain in their prior slots
    let layout = rig.layout().await;
    assert_eq!(stock_at(&layout, "R", 1, 1, 1)["id"], first_id);
    assert_eq!(stock_at(&layout, "R", 1, 1, 2)["id"], second_id);
}

#[tokio::test]
async fn move_rejects_cross_rack_targets_but_migrate_requires_them() {
    let rig = Rig::new().await;
    let source = rig.slot_id("R", 1, 1, 1).await;
    let same_rack_target = rig.slot_id("R", 2, 1, 1).await;

    let other_rack_id = seed_rack(&rig.app, rig.aisle_id, "single", 1, 1, 1).await;
    let (_, other_layout) = rig
        .app
        .get(&format!(
            "/api/v1/locations/{}/depots/{}/aisles/{}/racks/{}/layout",
            rig.location_id, rig.depot_id, rig.aisle_id, other_rack_id
        ))
        .await;
    let other_rack_slot = slot_id_at(&other_layout, "R", 1, 1, 1);

    let (_, created) = rig.place(source, 5).await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    // move across racks is an invalid operation
    let (status, _) = rig
        .app
        .patch(
            "/api/v1/racks/stocks/move",
            json!({ "stock_id": stock_id, "target_slot_id": other_rack_slot }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // migrate within the same rack is too
    let (status, _) = rig
        .app
        .patch(
            "/api/v1/racks/stocks/migrate",
            json!({ "stock_id": stock_id, "target_slot_id": same_rack_target }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // migrate across racks succeeds
    let (status, migrated) = rig
        .app
        .patch(
            "/api/v1/racks/stocks/migrate",
            json!({ "stock_id": stock_id, "target_slot_id": other_rack_slot }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{migrated}");

    let layout = rig.layout().await;
    assert!(stock_at(&layout, "R", 1, 1, 1).is_null());
}

#[tokio::test]
async fn update_changes_fields_but_never_the_slot() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("L", 3, 2, 2).await;

    let (_, created) = rig.place(slot_id, 10).await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (status, updated) = rig
        .app
        .put(
            &format!("/api/v1/racks/stocks/{stock_id}"),
            json!({
                "quantity": 25,
                "batch_no": "B-2025-117",
                "strategy": "LIFO",
                "is_consumable": true,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["data"]["stock"]["quantity"], 25);
    assert_eq!(updated["data"]["stock"]["batch_no"], "B-2025-117");
    assert_eq!(updated["data"]["stock"]["strategy"], "LIFO");
    assert_eq!(updated["data"]["slot"]["id"], slot_id);
}

#[tokio::test]
async fn consume_requires_the_consumable_flag() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 1, 1, 1).await;

    let (_, created) = rig.place(slot_id, 10).await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (status, error) = rig
        .app
        .post(
            &format!("/api/v1/racks/stocks/{stock_id}/consume"),
            json!({ "quantity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("not consumable"));
}

#[tokio::test]
async fn consume_beyond_quantity_is_rejected_without_mutation() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 1, 1, 1).await;

    let (_, created) = rig
        .app
        .post(
            "/api/v1/racks/stocks",
            json!({
                "slot_id": slot_id,
                "product_id": rig.product_id,
                "quantity": 5,
                "is_consumable": true,
            }),
        )
        .await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (status, _) = rig
        .app
        .post(
            &format!("/api/v1/racks/stocks/{stock_id}/consume"),
            json!({ "quantity": 6 }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let stock = stock_at(&rig.layout().await, "R", 1, 1, 1);
    assert_eq!(stock["quantity"], 5);
}

#[tokio::test]
async fn partial_then_full_consumption_frees_the_slot() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 1, 1, 1).await;

    let (_, created) = rig
        .app
        .post(
            "/api/v1/racks/stocks",
            json!({
                "slot_id": slot_id,
                "product_id": rig.product_id,
                "quantity": 5,
                "is_consumable": true,
            }),
        )
        .await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (status, partial) = rig
        .app
        .post(
            &format!("/api/v1/racks/stocks/{stock_id}/consume"),
            json!({ "quantity": 3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(partial["data"]["remaining_quantity"], 2);
    assert_eq!(partial["data"]["exhausted"], false);

    let (status, full) = rig
        .app
        .post(
            &format!("/api/v1/racks/stocks/{stock_id}/consume"),
            json!({ "quantity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["data"]["exhausted"], true);

    // Record gone, slot free
    let (status, _) = rig.app.get(&format!("/api/v1/racks/stocks/{stock_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(stock_at(&rig.layout().await, "R", 1, 1, 1).is_null());
}

#[tokio::test]
async fn outflow_to_a_client_draws_down_stock() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 1, 1, 1).await;

    let (status, client) = rig
        .app
        .post("/api/v1/clients", json!({ "name": "Acme Retail" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let client_id = client["data"]["id"].as_i64().unwrap();

    let (_, created) = rig.place(slot_id, 8).await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (status, outflow) = rig
        .app
        .post(
            &format!("/api/v1/racks/stocks/{stock_id}/outflow"),
            json!({ "quantity": 8, "client_id": client_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{outflow}");
    assert_eq!(outflow["data"]["exhausted"], true);
    assert!(stock_at(&rig.layout().await, "R", 1, 1, 1).is_null());

    // The outflow is attributed to the client in the history
    let (_, transactions) = rig
        .app
        .get("/api/v1/transactions?kind=manual_outflow")
        .await;
    let items = transactions["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["client_id"], client_id);
}

#[tokio::test]
async fn discard_frees_the_slot_and_logs_an_outflow() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 2, 2, 1).await;

    let (_, created) = rig.place(slot_id, 3).await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (status, _) = rig
        .app
        .delete(&format!("/api/v1/racks/stocks/{stock_id}"))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    assert!(stock_at(&rig.layout().await, "R", 2, 2, 1).is_null());

    let (_, transactions) = rig
        .app
        .get("/api/v1/transactions?kind=manual_outflow")
        .await;
    assert_eq!(transactions["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn stock_operations_log_movement_history() {
    let rig = Rig::new().await;
    let source = rig.slot_id("R", 1, 1, 1).await;
    let target = rig.slot_id("R", 1, 2, 1).await;

    let (_, created) = rig.place(source, 10).await;
    let stock_id = created["data"]["stock"]["id"].as_i64().unwrap();

    let (_, inflows) = rig.app.get("/api/v1/transactions?kind=inflow").await;
    let items = inflows["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["to_slot"], "R-L1-B1-P1");
    assert_eq!(items[0]["quantity"], 10);

    rig.app
        .patch(
            "/api/v1/racks/stocks/move",
            json!({ "stock_id": stock_id, "target_slot_id": target }),
        )
        .await;

    let (_, relocations) = rig.app.get("/api/v1/transactions?kind=relocation").await;
    let items = relocations["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["from_slot"], "R-L1-B1-P1");
    assert_eq!(items[0]["to_slot"], "R-L1-B2-P1");
}

#[tokio::test]
async fn placement_rejects_missing_slot_product_or_quantity() {
    let rig = Rig::new().await;
    let slot_id = rig.slot_id("R", 1, 1, 1).await;

    let (status, _) = rig
        .app
        .post(
            "/api/v1/racks/stocks",
            json!({ "slot_id": 999_999, "product_id": rig.product_id, "quantity": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = rig
        .app
        .post(
            "/api/v1/racks/stocks",
            json!({ "slot_id": slot_id, "product_id": 999_999, "quantity": 1 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = rig
        .app
        .post(
            "/api/v1/racks/stocks",
            json!({ "slot_id": slot_id, "product_id": rig.product_id, "quantity": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
