//! Handlers for sources (suppliers) and clients (customers). Both resources
//! share one request shape.

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
    services::partners::{PartnerInput, PartnerUpdateInput},
    AppState,
};

pub fn sources_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_source))
        .route("/", get(list_sources))
        .route("/:id", get(get_source))
        .route("/:id", put(update_source))
        .route("/:id", delete(delete_source))
}

pub fn clients_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_client))
        .route("/", get(list_clients))
        .route("/:id", get(get_client))
        .route("/:id", put(update_client))
        .route("/:id", delete(delete_client))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartnerRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: String,
    pub contact: Option<String>,
    #[validate(email(message = "email must be valid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, message = "name cannot be blank"))]
    pub name: Option<String>,
    pub contact: Option<String>,
    #[validate(email(message = "email must be valid"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

impl CreatePartnerRequest {
    fn into_input(self) -> PartnerInput {
        PartnerInput {
            name: self.name.trim().to_string(),
            contact: self.contact,
            email: self.email,
            phone: self.phone,
            address: self.address,
            note: self.note,
        }
    }
}

impl UpdatePartnerRequest {
    fn into_input(self) -> PartnerUpdateInput {
        PartnerUpdateInput {
            name: self.name.map(|n| n.trim().to_string()),
            contact: self.contact,
            email: self.email,
            phone: self.phone,
            address: self.address,
            note: self.note,
        }
    }
}

async fn create_source(
    State(state): State<AppState>,
    Json(payload): Json<CreatePartnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let source = state
        .services
        .sources
        .create_source(payload.into_input())
        .await
        .map_err(map_service_error)?;

    Ok(created_response(source))
}

async fn get_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let source = state
        .services
        .sources
        .get_source(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(source))
}

async fn update_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePartnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let source = state
        .services
        .sources
        .update_source(id, payload.into_input())
        .await
        .map_err(map_service_error)?;

    Ok(success_response(source))
}

async fn delete_source(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .sources
        .delete_source(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_sources(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .sources
        .list_sources(
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}

async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreatePartnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let client = state
        .services
        .clients
        .create_client(payload.into_input())
        .await
        .map_err(map_service_error)?;

    Ok(created_response(client))
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let client = state
        .services
        .clients
        .get_client(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(client))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdatePartnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let client = state
        .services
        .clients
        .update_client(id, payload.into_input())
        .await
        .map_err(map_service_error)?;

    Ok(success_response(client))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .clients
        .delete_client(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .clients
        .list_clients(
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
