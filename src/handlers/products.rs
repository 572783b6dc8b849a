use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use super::common::{
    created_response, map_service_error, no_content_response, paginated_response,
    success_response, validate_input, ListQuery,
};
use crate::{
    errors::ApiError,
    services::products::{CreateProductInput, UpdateProductInput},
    AppState,
};

pub fn products_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_product))
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .route("/:id", put(update_product))
        .route("/:id", delete(delete_product))
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

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "sku cannot be blank"))]
    pub sku: String,
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "sku cannot be blank"))]
    pub sku: Option<String>,
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
}

async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(value) = payload.sale_price.as_ref() {
        ensure_decimal_non_negative(value, "sale_price")?;
    }
    if let Some(value) = payload.cost_price.as_ref() {
        ensure_decimal_non_negative(value, "cost_price")?;
    }

    let product = state
        .services
        .products
        .create_product(CreateProductInput {
            sku: payload.sku.trim().to_string(),
            name: payload.name.trim().to_string(),
            unit: payload.unit,
            description: payload.description,
            sale_price: payload.sale_price,
            cost_price: payload.cost_price,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(product))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .services
        .products
        .get_product(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(product))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(value) = payload.sale_price.as_ref() {
        ensure_decimal_non_negative(value, "sale_price")?;
    }
    if let Some(value) = payload.cost_price.as_ref() {
        ensure_decimal_non_negative(value, "cost_price")?;
    }

    let product = state
        .services
        .products
        .update_product(
            id,
            UpdateProductInput {
                sku: payload.sku.map(|s| s.trim().to_string()),
                name: payload.name.map(|n| n.trim().to_string()),
                unit: payload.unit,
                description: payload.description,
                sale_price: payload.sale_price,
                cost_price: payload.cost_price,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(product))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_product(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .products
        .list_products(
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
