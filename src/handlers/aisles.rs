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
    services::aisles::{CreateAisleInput, UpdateAisleInput},
    AppState,
};

pub fn aisles_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_aisle))
        .route("/", get(list_aisles))
        .route("/:id", get(get_aisle))
        .route("/:id", put(update_aisle))
        .route("/:id", delete(delete_aisle))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAisleRequest {
    pub depot_id: i32,
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAisleRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AisleFilter {
    pub depot_id: Option<i32>,
}

async fn create_aisle(
    State(state): State<AppState>,
    Json(payload): Json<CreateAisleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let aisle = state
        .services
        .aisles
        .create_aisle(CreateAisleInput {
            depot_id: payload.depot_id,
            name: payload.name.trim().to_string(),
            note: payload.note,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(aisle))
}

async fn get_aisle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let aisle = state
        .services
        .aisles
        .get_aisle(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(aisle))
}

async fn update_aisle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAisleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let aisle = state
        .services
        .aisles
        .update_aisle(
            id,
            UpdateAisleInput {
                name: payload.name.map(|n| n.trim().to_string()),
                note: payload.note,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(aisle))
}

async fn delete_aisle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .aisles
        .delete_aisle(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_aisles(
    State(state): State<AppState>,
    Query(filter): Query<AisleFilter>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .aisles
        .list_aisles(
            filter.depot_id,
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
