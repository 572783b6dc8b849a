use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::{info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::{product, stock};
use crate::errors::ServiceError;

#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub sku: String,
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub sku: Option<String>,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
}

/// Service for managing the product catalog
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DbPool>,
}

impl ProductService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<product::Model, ServiceError> {
        self.ensure_unique_sku(&input.sku, None).await?;

        let now = Utc::now();
        let model = product::ActiveModel {
            sku: Set(input.sku),
            name: Set(input.name),
            unit: Set(input.unit),
            description: Set(input.description),
            sale_price: Set(input.sale_price),
            cost_price: Set(input.cost_price),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let product = model.insert(&*self.db).await?;
        info!(product_id = product.id, sku = %product.sku, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> Result<product::Model, ServiceError> {
        product::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: i32,
        input: UpdateProductInput,
    ) -> Result<product::Model, ServiceError> {
        let existing = self.get_product(id).await?;

        if let Some(sku) = &input.sku {
            self.ensure_unique_sku(sku, Some(id)).await?;
        }

        let mut model: product::ActiveModel = existing.into();
        if let Some(sku) = input.sku {
            model.sku = Set(sku);
        }
        if let Some(name) = input.name {
            model.name = Set(name);
        }
        if let Some(unit) = input.unit {
            model.unit = Set(Some(unit));
        }
        if let Some(description) = input.description {
            model.description = Set(Some(description));
        }
        if let Some(sale_price) = input.sale_price {
            model.sale_price = Set(Some(sale_price));
        }
        if let Some(cost_price) = input.cost_price {
            model.cost_price = Set(Some(cost_price));
        }
        model.updated_at = Set(Utc::now());

        let product = model.update(&*self.db).await?;
        info!(product_id = product.id, "Product updated");
        Ok(product)
    }

    /// Deletes a product. Rejected while stock placements still reference it.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        let product = self.get_product(id).await?;

        let placements = stock::Entity::find()
            .filter(stock::Column::ProductId.eq(id))
            .count(&*self.db)
            .await?;
        if placements > 0 {
            return Err(ServiceError::Conflict(format!(
                "Product {} still has {} stock placement(s)",
                id, placements
            )));
        }

        let model: product::ActiveModel = product.into();
        model.delete(&*self.db).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<product::Model>, ServiceError> {
        let mut query = QueryBuilder::<product::Entity>::new()
            .order_by(product::Column::Id, false)
            .paginate(page, per_page);

        if let Some(condition) = SearchBuilder::new()
            .add_like(product::Column::Name, search.unwrap_or_default())
            .add_like(product::Column::Sku, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }

    async fn ensure_unique_sku(
        &self,
        sku: &str,
        exclude_id: Option<i32>,
    ) -> Result<(), ServiceError> {
        let mut query = product::Entity::find().filter(product::Column::Sku.eq(sku));
        if let Some(id) = exclude_id {
            query = query.filter(product::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "SKU {} already exists",
                sku
            )));
        }

        Ok(())
    }
}
