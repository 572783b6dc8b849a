use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::{info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::{depot, location};
use crate::errors::ServiceError;

/// Input for creating a location
#[derive(Debug, Clone)]
pub struct CreateLocationInput {
    pub name: String,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Input for updating a location; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateLocationInput {
    pub name: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Service for managing warehouse locations
#[derive(Clone)]
pub struct LocationService {
    db: Arc<DbPool>,
}

impl LocationService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_location(
        &self,
        input: CreateLocationInput,
    ) -> Result<location::Model, ServiceError> {
        self.ensure_unique_name(&input.name, None).await?;

        let now = Utc::now();
        let model = location::ActiveModel {
            name: Set(input.name),
            address: Set(input.address),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let location = model.insert(&*self.db).await?;
        info!(location_id = location.id, "Location created");
        Ok(location)
    }

    #[instrument(skip(self))]
    pub async fn get_location(&self, id: i32) -> Result<location::Model, ServiceError> {
        location::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Location {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn update_location(
        &self,
        id: i32,
        input: UpdateLocationInput,
    ) -> Result<location::Model, ServiceError> {
        let existing = self.get_location(id).await?;

        if let Some(name) = &input.name {
            self.ensure_unique_name(name, Some(id)).await?;
        }

        let mut model: location::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(address) = input.address {
            model.address = Set(Some(address));
        }
        if let Some(note) = input.note {
            model.note = Set(Some(note));
        }
        model.updated_at = Set(Utc::now());

        let location = model.update(&*self.db).await?;
        info!(location_id = location.id, "Location updated");
        Ok(location)
    }

    /// Deletes a location. Rejected while depots still reference it.
    #[instrument(skip(self))]
    pub async fn delete_location(&self, id: i32) -> Result<(), ServiceError> {
        let location = self.get_location(id).await?;

        let depots = depot::Entity::find()
            .filter(depot::Column::LocationId.eq(id))
            .count(&*self.db)
            .await?;
        if depots > 0 {
            return Err(ServiceError::Conflict(format!(
                "Location {} still has {} depot(s)",
                id, depots
            )));
        }

        let model: location::ActiveModel = location.into();
        model.delete(&*self.db).await?;
        info!(location_id = id, "Location deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_locations(
        &self,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<location::Model>, ServiceError> {
        let mut query = QueryBuilder::<location::Entity>::new()
            .order_by(location::Column::Id, false)
            .paginate(page, per_page);

        if let Some(condition) = SearchBuilder::new()
            .add_like(location::Column::Name, search.unwrap_or_default())
            .add_like(location::Column::Address, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = location::Entity::find().filter(location::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(location::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Location name {} already exists",
                name
            )));
        }

        Ok(())
    }
}
