use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;

use super::common::{
    map_service_error, no_content_response, paginated_response, success_response, ListQuery,
};
use crate::{entities::stock_transaction::TransactionKind, errors::ApiError, AppState};

pub fn transactions_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions))
        .route("/:id", get(get_transaction))
        .route("/:id", delete(delete_transaction))
}

#[derive(Debug, Deserialize)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub product_id: Option<i32>,
}

async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let transaction = state
        .services
        .transactions
        .get_transaction(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(transaction))
}

async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .transactions
        .delete_transaction(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(filter): Query<TransactionFilter>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .services
        .transactions
        .list_transactions(
            filter.kind,
            filter.product_id,
            query.page,
            query.per_page_for(&state.config),
            query.search_term(),
        )
        .await
        .map_err(map_service_error)?;

    Ok(paginated_response(page))
}
