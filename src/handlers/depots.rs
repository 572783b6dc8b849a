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
    services::depots::{CreateDepotInput, UpdateDepotInput},
    AppState,
};

pub fn depots_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_depot))
        .route("/", get(list_depots))
        .route("/:id", get(get_depot))
        .route("/:id", put(update_depot))
        .route("/:id", delete(delete_depot))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepotRequest {
    pub location_id: i32,
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDepotRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DepotFilter {
    pub location_id: Option<i32>,
}

async fn create_depot(
    State(state): State<AppState>,
    Json(payload): Json<CreateDepotRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let depot = state
        .services
        .depots
        .create_depot(CreateDepotInput {
            location_id: payload.location_id,
            name: payload.name.trim().to_string(),
            note: payload.note,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(depot))
}

async fn get_depot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let depot = state
        .services
        .depots
        .get_depot(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(depot))
}

async fn update_depot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateDepotRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let depot = state
        .services
        .depots
        .update_depot(
            id,
            UpdateDepotInput {
                name: payload.name.map(|n| n.trim().to_string()),
                note: payload.note,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(depot))
}

async fn delete_depot(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .depots
        .delete_depot(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_depots(
    State(state): State<AppState>,
    Query(filter): Query<DepotFilter>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .depots
        .list_depots(
            filter.location_id,
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
