use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;
use validator::Validate;

use crate::config::AppConfig;
use crate::db::Page;
use crate::errors::{ApiError, ServiceError};
use crate::{ApiResponse, PaginatedResponse, PaginationMeta};

/// Standard success response wrapped in the API envelope
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

/// Standard created response wrapped in the API envelope
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::success(data))).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// List response carrying items plus pagination metadata
pub fn paginated_response<T: Serialize>(page: Page<T>) -> Response {
    let meta = PaginationMeta {
        page: page.page,
        per_page: page.per_page,
        total: page.total,
        total_pages: page.total_pages(),
    };
    (
        StatusCode::OK,
        Json(PaginatedResponse {
            success: true,
            data: page.items,
            pagination: meta,
        }),
    )
        .into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(format!("Validation failed: {}", e)))
}

/// Map service errors to API errors
pub fn map_service_error(err: ServiceError) -> ApiError {
    ApiError::ServiceError(err)
}

/// Query parameters shared by every list endpoint
#[derive(Debug, Deserialize, Serialize, IntoParams)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    pub per_page: Option<u64>,
    pub search: Option<String>,
}

fn default_page() -> u64 {
    1
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: None,
            search: None,
        }
    }
}

impl ListQuery {
    /// Resolves the page size against the configured default, capped at the
    /// configured maximum
    pub fn per_page_for(&self, config: &AppConfig) -> u64 {
        self.per_page
            .unwrap_or(config.api_page_size)
            .clamp(1, config.api_max_page_size)
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
