use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use super::common::{
    created_response, map_service_error, no_content_response, paginated_response,
    success_response, validate_input, ListQuery,
};
use crate::{
    entities::alert::AlertKind, errors::ApiError, services::alerts::CreateAlertInput, AppState,
};

pub fn alerts_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_alert))
        .route("/", get(list_alerts))
        .route("/unread-count", get(unread_count))
        .route("/:id", get(get_alert))
        .route("/:id", delete(delete_alert))
        .route("/:id/read", post(mark_read))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlertRequest {
    pub kind: AlertKind,
    #[validate(length(min = 1, message = "message cannot be blank"))]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AlertFilter {
    #[serde(default)]
    pub unread: bool,
}

async fn create_alert(
    State(state): State<AppState>,
    Json(payload): Json<CreateAlertRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let alert = state
        .services
        .alerts
        .create_alert(CreateAlertInput {
            kind: payload.kind,
            message: payload.message,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(alert))
}

async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let alert = state
        .services
        .alerts
        .get_alert(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(alert))
}

async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let alert = state
        .services
        .alerts
        .mark_read(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(alert))
}

async fn delete_alert(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .alerts
        .delete_alert(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Unread alert count; polled by the frontend notification watcher.
async fn unread_count(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let count = state
        .services
        .alerts
        .unread_count()
        .await
        .map_err(map_service_error)?;

    Ok(success_response(json!({ "count": count })))
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(filter): Query<AlertFilter>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .alerts
        .list_alerts(
            filter.unread,
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
