use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use tracing::{info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::{aisle, depot, rack};
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct CreateAisleInput {
    pub depot_id: i32,
    pub name: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateAisleInput {
    pub name: Option<String>,
    pub note: Option<String>,
}

/// Service for managing aisles within a depot
#[derive(Clone)]
pub struct AisleService {
    db: Arc<DbPool>,
}

impl AisleService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_aisle(&self, input: CreateAisleInput) -> Result<aisle::Model, ServiceError> {
        depot::Entity::find_by_id(input.depot_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Depot {} not found", input.depot_id)))?;

        self.ensure_unique_name(input.depot_id, &input.name, None)
            .await?;

        let now = Utc::now();
        let model = aisle::ActiveModel {
            depot_id: Set(input.depot_id),
            name: Set(input.name),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let aisle = model.insert(&*self.db).await?;
        info!(aisle_id = aisle.id, "Aisle created");
        Ok(aisle)
    }

    #[instrument(skip(self))]
    pub async fn get_aisle(&self, id: i32) -> Result<aisle::Model, ServiceError> {
        aisle::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Aisle {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn update_aisle(
        &self,
        id: i32,
        input: UpdateAisleInput,
    ) -> Result<aisle::Model, ServiceError> {
        let existing = self.get_aisle(id).await?;

        if let Some(name) = &input.name {
            self.ensure_unique_name(existing.depot_id, name, Some(id))
                .await?;
        }

        let mut model: aisle::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(note) = input.note {
            model.note = Set(Some(note));
        }
        model.updated_at = Set(Utc::now());

        let aisle = model.update(&*self.db).await?;
        info!(aisle_id = aisle.id, "Aisle updated");
        Ok(aisle)
    }

    /// Deletes an aisle. Rejected while racks still reference it.
    #[instrument(skip(self))]
    pub async fn delete_aisle(&self, id: i32) -> Result<(), ServiceError> {
        let aisle = self.get_aisle(id).await?;

        let racks = rack::Entity::find()
            .filter(rack::Column::AisleId.eq(id))
            .count(&*self.db)
            .await?;
        if racks > 0 {
            return Err(ServiceError::Conflict(format!(
                "Aisle {} still has {} rack(s)",
                id, racks
            )));
        }

        let model: aisle::ActiveModel = aisle.into();
        model.delete(&*self.db).await?;
        info!(aisle_id = id, "Aisle deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_aisles(
        &self,
        depot_id: Option<i32>,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<aisle::Model>, ServiceError> {
        let mut query = QueryBuilder::<aisle::Entity>::new()
            .order_by(aisle::Column::Id, false)
            .paginate(page, per_page);

        if let Some(depot_id) = depot_id {
            query = query.filter(Condition::all().add(aisle::Column::DepotId.eq(depot_id)));
        }

        if let Some(condition) = SearchBuilder::new()
            .add_like(aisle::Column::Name, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }

    async fn ensure_unique_name(
        &self,
        depot_id: i32,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = aisle::Entity::find()
            .filter(aisle::Column::DepotId.eq(depot_id))
            .filter(aisle::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(aisle::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Aisle name {} already exists in this depot",
                name
            )));
        }

        Ok(())
    }
}
