use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use super::common::{
    created_response, map_service_error, no_content_response, paginated_response,
    success_response, validate_input, ListQuery,
};
use crate::{
    errors::ApiError,
    services::locations::{CreateLocationInput, UpdateLocationInput},
    AppState,
};

pub fn locations_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_location))
        .route("/", get(list_locations))
        .route("/:id", get(get_location))
        .route("/:id", put(update_location))
        .route("/:id", delete(delete_location))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: String,
    pub address: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let location = state
        .services
        .locations
        .create_location(CreateLocationInput {
            name: payload.name.trim().to_string(),
            address: payload.address,
            note: payload.note,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(location))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let location = state
        .services
        .locations
        .get_location(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(location))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let location = state
        .services
        .locations
        .update_location(
            id,
            UpdateLocationInput {
                name: payload.name.map(|n| n.trim().to_string()),
                address: payload.address,
                note: payload.note,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(location))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .locations
        .delete_location(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .locations
        .list_locations(
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
