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
    layout::{RackConfig, RackFace},
    services::racks::{CreateRackInput, UpdateRackInput},
    AppState,
};

pub fn racks_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rack))
        .route("/", get(list_racks))
        .route("/codes/:code", get(decode_rack_code))
        .route("/:id", get(get_rack))
        .route("/:id", put(update_rack))
        .route("/:id", delete(delete_rack))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRackRequest {
    pub aisle_id: i32,
    pub face_type: RackFace,
    #[validate(range(min = 1, message = "levels must be at least 1"))]
    pub levels: i32,
    #[validate(range(min = 1, message = "bays must be at least 1"))]
    pub bays: i32,
    #[validate(range(min = 1, message = "bins_per_bay must be at least 1"))]
    pub bins_per_bay: i32,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRackRequest {
    pub face_type: Option<RackFace>,
    #[validate(range(min = 1, message = "levels must be at least 1"))]
    pub levels: Option<i32>,
    #[validate(range(min = 1, message = "bays must be at least 1"))]
    pub bays: Option<i32>,
    #[validate(range(min = 1, message = "bins_per_bay must be at least 1"))]
    pub bins_per_bay: Option<i32>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RackFilter {
    pub aisle_id: Option<i32>,
}

async fn create_rack(
    State(state): State<AppState>,
    Json(payload): Json<CreateRackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let rack = state
        .services
        .racks
        .create_rack(CreateRackInput {
            aisle_id: payload.aisle_id,
            face_type: payload.face_type,
            levels: payload.levels,
            bays: payload.bays,
            bins_per_bay: payload.bins_per_bay,
            note: payload.note,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(rack))
}

async fn get_rack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let rack = state
        .services
        .racks
        .get_rack(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(rack))
}

async fn update_rack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRackRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let rack = state
        .services
        .racks
        .update_rack(
            id,
            UpdateRackInput {
                face_type: payload.face_type,
                levels: payload.levels,
                bays: payload.bays,
                bins_per_bay: payload.bins_per_bay,
                note: payload.note,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(rack))
}

async fn delete_rack(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .racks
        .delete_rack(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_racks(
    State(state): State<AppState>,
    Query(filter): Query<RackFilter>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .racks
        .list_racks(
            filter.aisle_id,
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}

/// Decodes a rack code label back into its dimensional configuration.
/// Used by the rack form to prefill dimensions from an existing code.
async fn decode_rack_code(Path(code): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let config = RackConfig::parse(&code)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid rack code: {}", code)))?;

    Ok(success_response(config))
}

/// Full layout of one rack: dimensional descriptor plus slots in grid
/// traversal order, each carrying its embedded stock placement.
#[utoipa::path(
    get,
    path = "/api/v1/locations/:location_id/depots/:depot_id/aisles/:aisle_id/racks/:rack_id/layout",
    params(
        ("location_id" = i32, Path, description = "Location ID"),
        ("depot_id" = i32, Path, description = "Depot ID"),
        ("aisle_id" = i32, Path, description = "Aisle ID"),
        ("rack_id" = i32, Path, description = "Rack ID")
    ),
    responses(
        (status = 200, description = "Rack layout", body = crate::services::racks::RackLayout),
        (status = 404, description = "Rack not found in this hierarchy", body = crate::errors::ErrorResponse)
    ),
    tag = "Racks"
)]
pub async fn get_rack_layout(
    State(state): State<AppState>,
    Path((location_id, depot_id, aisle_id, rack_id)): Path<(i32, i32, i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let layout = state
        .services
        .racks
        .layout_for_path(location_id, depot_id, aisle_id, rack_id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(layout))
}
