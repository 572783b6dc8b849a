use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use tracing::{error, info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::alert::{self, AlertKind};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Clone)]
pub struct CreateAlertInput {
    pub kind: AlertKind,
    pub message: String,
}

/// Service backing the notification feed. The frontend polls the unread
/// count, so reads must stay cheap.
#[derive(Clone)]
pub struct AlertService {
    db: Arc<DbPool>,
    event_sender: EventSender,
}

impl AlertService {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn create_alert(&self, input: CreateAlertInput) -> Result<alert::Model, ServiceError> {
        let model = alert::ActiveModel {
            kind: Set(input.kind),
            message: Set(input.message),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let alert = model.insert(&*self.db).await?;
        info!(alert_id = alert.id, "Alert raised");

        if let Err(e) = self.event_sender.send(Event::AlertRaised(alert.id)).await {
            error!("Failed to publish alert event: {}", e);
        }

        Ok(alert)
    }

    #[instrument(skip(self))]
    pub async fn get_alert(&self, id: i32) -> Result<alert::Model, ServiceError> {
        alert::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Alert {} not found", id)))
    }

    /// Marks an alert as read. Idempotent.
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: i32) -> Result<alert::Model, ServiceError> {
        let existing = self.get_alert(id).await?;
        if existing.is_read {
            return Ok(existing);
        }

        let mut model: alert::ActiveModel = existing.into();
        model.is_read = Set(true);
        Ok(model.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_alert(&self, id: i32) -> Result<(), ServiceError> {
        let alert = self.get_alert(id).await?;
        let model: alert::ActiveModel = alert.into();
        model.delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unread_count(&self) -> Result<u64, ServiceError> {
        Ok(alert::Entity::find()
            .filter(alert::Column::IsRead.eq(false))
            .count(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_alerts(
        &self,
        unread_only: bool,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<alert::Model>, ServiceError> {
        let mut query = QueryBuilder::<alert::Entity>::new()
            .order_by(alert::Column::CreatedAt, true)
            .paginate(page, per_page);

        if unread_only {
            query = query.filter(Condition::all().add(alert::Column::IsRead.eq(false)));
        }

        if let Some(condition) = SearchBuilder::new()
            .add_like(alert::Column::Message, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }
}
