use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use tracing::{info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::{aisle, depot, location};
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct CreateDepotInput {
    pub location_id: i32,
    pub name: String,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateDepotInput {
    pub name: Option<String>,
    pub note: Option<String>,
}

/// Service for managing depots within a location
#[derive(Clone)]
pub struct DepotService {
    db: Arc<DbPool>,
}

impl DepotService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_depot(&self, input: CreateDepotInput) -> Result<depot::Model, ServiceError> {
        location::Entity::find_by_id(input.location_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Location {} not found", input.location_id))
            })?;

        self.ensure_unique_name(input.location_id, &input.name, None)
            .await?;

        let now = Utc::now();
        let model = depot::ActiveModel {
            location_id: Set(input.location_id),
            name: Set(input.name),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let depot = model.insert(&*self.db).await?;
        info!(depot_id = depot.id, "Depot created");
        Ok(depot)
    }

    #[instrument(skip(self))]
    pub async fn get_depot(&self, id: i32) -> Result<depot::Model, ServiceError> {
        depot::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Depot {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn update_depot(
        &self,
        id: i32,
        input: UpdateDepotInput,
    ) -> Result<depot::Model, ServiceError> {
        let existing = self.get_depot(id).await?;

        if let Some(name) = &input.name {
            self.ensure_unique_name(existing.location_id, name, Some(id))
                .await?;
        }

        let mut model: depot::ActiveModel = existing.into();
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(note) = input.note {
            model.note = Set(Some(note));
        }
        model.updated_at = Set(Utc::now());

        let depot = model.update(&*self.db).await?;
        info!(depot_id = depot.id, "Depot updated");
        Ok(depot)
    }

    /// Deletes a depot. Rejected while aisles still reference it.
    #[instrument(skip(self))]
    pub async fn delete_depot(&self, id: i32) -> Result<(), ServiceError> {
        let depot = self.get_depot(id).await?;

        let aisles = aisle::Entity::find()
            .filter(aisle::Column::DepotId.eq(id))
            .count(&*self.db)
            .await?;
        if aisles > 0 {
            return Err(ServiceError::Conflict(format!(
                "Depot {} still has {} aisle(s)",
                id, aisles
            )));
        }

        let model: depot::ActiveModel = depot.into();
        model.delete(&*self.db).await?;
        info!(depot_id = id, "Depot deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_depots(
        &self,
        location_id: Option<i32>,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<depot::Model>, ServiceError> {
        let mut query = QueryBuilder::<depot::Entity>::new()
            .order_by(depot::Column::Id, false)
            .paginate(page, per_page);

        if let Some(location_id) = location_id {
            query = query.filter(Condition::all().add(depot::Column::LocationId.eq(location_id)));
        }

        if let Some(condition) = SearchBuilder::new()
            .add_like(depot::Column::Name, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }

    async fn ensure_unique_name(
        &self,
        location_id: i32,
        name: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = depot::Entity::find()
            .filter(depot::Column::LocationId.eq(location_id))
            .filter(depot::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(depot::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Depot name {} already exists in this location",
                name
            )));
        }

        Ok(())
    }
}
