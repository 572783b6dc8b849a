use std::sync::Arc;

use sea_orm::{ColumnTrait, Condition, EntityTrait, ModelTrait};
use tracing::{info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::stock_transaction::{self, TransactionKind};
use crate::errors::ServiceError;

/// Read side of the movement history. Records are written by the stock
/// operations; this service only lists, fetches and corrects them.
#[derive(Clone)]
pub struct TransactionService {
    db: Arc<DbPool>,
}

impl TransactionService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_transaction(&self, id: i32) -> Result<stock_transaction::Model, ServiceError> {
        stock_transaction::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Transaction {} not found", id)))
    }

    /// Removes a history record. Only intended for correcting bad entries.
    #[instrument(skip(self))]
    pub async fn delete_transaction(&self, id: i32) -> Result<(), ServiceError> {
        let transaction = self.get_transaction(id).await?;
        transaction.delete(&*self.db).await?;
        info!(transaction_id = id, "Transaction record deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        kind: Option<TransactionKind>,
        product_id: Option<i32>,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<stock_transaction::Model>, ServiceError> {
        let mut query = QueryBuilder::<stock_transaction::Entity>::new()
            .order_by(stock_transaction::Column::OccurredAt, true)
            .paginate(page, per_page);

        if let Some(kind) = kind {
            query = query.filter(Condition::all().add(stock_transaction::Column::Kind.eq(kind)));
        }
        if let Some(product_id) = product_id {
            query = query
                .filter(Condition::all().add(stock_transaction::Column::ProductId.eq(product_id)));
        }

        if let Some(condition) = SearchBuilder::new()
            .add_like(stock_transaction::Column::Note, search.unwrap_or_default())
            .add_like(
                stock_transaction::Column::FromSlot,
                search.unwrap_or_default(),
            )
            .add_like(stock_transaction::Column::ToSlot, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }
}
