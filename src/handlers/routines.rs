use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use super::common::{
    created_response, map_service_error, no_content_response, paginated_response,
    success_response, validate_input, ListQuery,
};
use crate::{
    errors::ApiError,
    services::routines::{CreateRoutineInput, UpdateRoutineInput},
    AppState,
};

pub fn routines_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_routine))
        .route("/", get(list_routines))
        .route("/:id", get(get_routine))
        .route("/:id", put(update_routine))
        .route("/:id", delete(delete_routine))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRoutineRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "schedule cannot be blank"))]
    pub schedule: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoutineRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "schedule cannot be blank"))]
    pub schedule: Option<String>,
    pub is_active: Option<bool>,
    pub last_run_at: Option<DateTime<Utc>>,
}

async fn create_routine(
    State(state): State<AppState>,
    Json(payload): Json<CreateRoutineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let routine = state
        .services
        .routines
        .create_routine(CreateRoutineInput {
            name: payload.name.trim().to_string(),
            description: payload.description,
            schedule: payload.schedule,
            is_active: payload.is_active,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(routine))
}

async fn get_routine(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let routine = state
        .services
        .routines
        .get_routine(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(routine))
}

async fn update_routine(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateRoutineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let routine = state
        .services
        .routines
        .update_routine(
            id,
            UpdateRoutineInput {
                name: payload.name.map(|n| n.trim().to_string()),
                description: payload.description,
                schedule: payload.schedule,
                is_active: payload.is_active,
                last_run_at: payload.last_run_at,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(routine))
}

async fn delete_routine(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .routines
        .delete_routine(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_routines(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .routines
        .list_routines(
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
