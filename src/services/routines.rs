use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tracing::{info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::routine;
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct CreateRoutineInput {
    pub name: String,
    pub description: Option<String>,
    pub schedule: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoutineInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub schedule: Option<String>,
    pub is_active: Option<bool>,
    pub last_run_at: Option<DateTime<Utc>>,
}

/// Service for managing scheduled routines
#[derive(Clone)]
pub struct RoutineService {
    db: Arc<DbPool>,
}

impl RoutineService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_routine(
        &self,
        input: CreateRoutineInput,
    ) -> Result<routine::Model, ServiceError> {
        let now = Utc::now();
        let model = routine::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            schedule: Set(input.schedule),
            is_active: Set(input.is_active),
            last_run_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let routine = model.insert(&*self.db).await?;
        info!(routine_id = routine.id, "Routine created");
        Ok(routine)
    }

    #[instrument(skip(self))]
    pub async fn get_routine(&self, id: i32) -> Result<routine::Model, ServiceError> {
        routine::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Routine {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn update_routine(
        &self,
        id: i32,
        input: UpdateRoutineInput,
    ) -> Result<routine::Model, ServiceError> {
        let existing = self.get_routine(id).await?;

        let mut model: routine::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(schedule) = input.schedule {
            model.schedule = Set(schedule);
        }
        if let Some(is_active) = input.is_active {
            model.is_active = Set(is_active);
        }
        if let Some(last_run_at) = input.last_run_at {
            model.last_run_at = Set(Some(last_run_at));
        }
        model.updated_at = Set(Utc::now());

        let routine = model.update(&*self.db).await?;
        info!(routine_id = routine.id, "Routine updated");
        Ok(routine)
    }

    #[instrument(skip(self))]
    pub async fn delete_routine(&self, id: i32) -> Result<(), ServiceError> {
        let routine = self.get_routine(id).await?;
        let model: routine::ActiveModel = routine.into();
        model.delete(&*self.db).await?;
        info!(routine_id = id, "Routine deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_routines(
        &self,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<routine::Model>, ServiceError> {
        let mut query = QueryBuilder::<routine::Entity>::new()
            .order_by(routine::Column::Id, false)
            .paginate(page, per_page);

        if let Some(condition) = SearchBuilder::new()
            .add_like(routine::Column::Name, search.unwrap_or_default())
            .add_like(routine::Column::Description, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }
}
