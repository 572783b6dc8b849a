use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    entities::stock::{StockProductType, StockStrategy},
    errors::ApiError,
    services::stocks::{CreateStockInput, UpdateStockInput},
    AppState,
};

pub fn stocks_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_stock))
        .route("/move", patch(move_stock))
        .route("/migrate", patch(migrate_stock))
        .route("/:id", get(get_stock))
        .route("/:id", put(update_stock))
        .route("/:id", delete(discard_stock))
        .route("/:id/consume", post(consume_stock))
        .route("/:id/outflow", post(outflow_stock))
}

fn ensure_decimal_non_negative(value: &Decimal, field: &str) -> Result<(), ApiError> {
    if *value < Decimal::ZERO {
        Err(ApiError::ValidationError(format!(
            "{field} cannot be negative"
        )))
    } else {
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStockRequest {
    pub slot_id: i32,
    pub product_id: i32,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub strategy: Option<StockStrategy>,
    pub product_type: Option<StockProductType>,
    #[serde(default)]
    pub is_consumable: bool,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub source_id: Option<i32>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStockRequest {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: Option<i32>,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub strategy: Option<StockStrategy>,
    pub product_type: Option<StockProductType>,
    pub is_consumable: Option<bool>,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MoveStockRequest {
    pub stock_id: i32,
    pub target_slot_id: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DrawdownRequest {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct OutflowRequest {
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    pub client_id: Option<i32>,
    pub note: Option<String>,
}

/// Place new stock into an empty slot
#[utoipa::path(
    post,
    path = "/api/v1/racks/stocks",
    request_body = CreateStockRequest,
    responses(
        (status = 201, description = "Stock placed", body = crate::services::stocks::StockDetails),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Slot or product not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Slot already occupied", body = crate::errors::ErrorResponse)
    ),
    tag = "Stocks"
)]
pub async fn create_stock(
    State(state): State<AppState>,
    Json(payload): Json<CreateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(value) = payload.sale_price.as_ref() {
        ensure_decimal_non_negative(value, "sale_price")?;
    }
    if let Some(value) = payload.cost_price.as_ref() {
        ensure_decimal_non_negative(value, "cost_price")?;
    }

    let details = state
        .services
        .stocks
        .create_stock(CreateStockInput {
            slot_id: payload.slot_id,
            product_id: payload.product_id,
            quantity: payload.quantity,
            batch_no: payload.batch_no,
            expiry_date: payload.expiry_date,
            strategy: payload.strategy.unwrap_or(StockStrategy::Fifo),
            product_type: payload.product_type.unwrap_or(StockProductType::Raw),
            is_consumable: payload.is_consumable,
            sale_price: payload.sale_price,
            cost_price: payload.cost_price,
            source_id: payload.source_id,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(details))
}

/// Get a stock placement with its slot
#[utoipa::path(
    get,
    path = "/api/v1/racks/stocks/:id",
    params(("id" = i32, Path, description = "Stock ID")),
    responses(
        (status = 200, description = "Stock placement", body = crate::services::stocks::StockDetails),
        (status = 404, description = "Stock not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Stocks"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let details = state
        .services
        .stocks
        .get_stock(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(details))
}

/// Update stock attributes in place; the slot is never changed here
async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(value) = payload.sale_price.as_ref() {
        ensure_decimal_non_negative(value, "sale_price")?;
    }
    if let Some(value) = payload.cost_price.as_ref() {
        ensure_decimal_non_negative(value, "cost_price")?;
    }

    let details = state
        .services
        .stocks
        .update_stock(
            id,
            UpdateStockInput {
                quantity: payload.quantity,
                batch_no: payload.batch_no,
                expiry_date: payload.expiry_date,
                strategy: payload.strategy,
                product_type: payload.product_type,
                is_consumable: payload.is_consumable,
                sale_price: payload.sale_price,
                cost_price: payload.cost_price,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(details))
}

/// Move stock to an empty slot in the same rack
#[utoipa::path(
    patch,
    path = "/api/v1/racks/stocks/move",
    request_body = MoveStockRequest,
    responses(
        (status = 200, description = "Stock moved", body = crate::services::stocks::StockDetails),
        (status = 404, description = "Stock or slot not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Target slot already occupied", body = crate::errors::ErrorResponse)
    ),
    tag = "Stocks"
)]
pub async fn move_stock(
    State(state): State<AppState>,
    Json(payload): Json<MoveStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let details = state
        .services
        .stocks
        .move_stock(payload.stock_id, payload.target_slot_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(details))
}

/// Move stock to an empty slot in a different rack
#[utoipa::path(
    patch,
    path = "/api/v1/racks/stocks/migrate",
    request_body = MoveStockRequest,
    responses(
        (status = 200, description = "Stock migrated", body = crate::services::stocks::StockDetails),
        (status = 404, description = "Stock or slot not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Target slot already occupied", body = crate::errors::ErrorResponse)
    ),
    tag = "Stocks"
)]
pub async fn migrate_stock(
    State(state): State<AppState>,
    Json(payload): Json<MoveStockRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let details = state
        .services
        .stocks
        .migrate_stock(payload.stock_id, payload.target_slot_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(details))
}

/// Consume a quantity from a consumable stock
#[utoipa::path(
    post,
    path = "/api/v1/racks/stocks/:id/consume",
    params(("id" = i32, Path, description = "Stock ID")),
    request_body = DrawdownRequest,
    responses(
        (status = 200, description = "Stock consumed", body = crate::services::stocks::DrawdownResult),
        (status = 400, description = "Stock is not consumable", body = crate::errors::ErrorResponse),
        (status = 422, description = "Requested quantity exceeds stock", body = crate::errors::ErrorResponse)
    ),
    tag = "Stocks"
)]
pub async fn consume_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<DrawdownRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let result = state
        .services
        .stocks
        .consume_stock(id, payload.quantity)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(result))
}

/// Send a quantity out to a client
async fn outflow_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<OutflowRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let result = state
        .services
        .stocks
        .outflow_stock(id, payload.quantity, payload.client_id, payload.note)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(result))
}

/// Discard a stock record, freeing its slot
async fn discard_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .stocks
        .discard_stock(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}
