//! Sources (suppliers) and clients (customers) share one record shape; the
//! two services differ only in the entity they manage and the transaction
//! column that guards deletion.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::{info, instrument};

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::{client, source, stock_transaction};
use crate::errors::ServiceError;

/// Input for creating a source or a client
#[derive(Debug, Clone)]
pub struct PartnerInput {
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Input for updating a source or a client; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct PartnerUpdateInput {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub note: Option<String>,
}

/// Service for managing sources (suppliers)
#[derive(Clone)]
pub struct SourceService {
    db: Arc<DbPool>,
}

impl SourceService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_source(&self, input: PartnerInput) -> Result<source::Model, ServiceError> {
        let now = Utc::now();
        let model = source::ActiveModel {
            name: Set(input.name),
            contact: Set(input.contact),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let source = model.insert(&*self.db).await?;
        info!(source_id = source.id, "Source created");
        Ok(source)
    }

    #[instrument(skip(self))]
    pub async fn get_source(&self, id: i32) -> Result<source::Model, ServiceError> {
        source::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Source {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn update_source(
        &self,
        id: i32,
        input: PartnerUpdateInput,
    ) -> Result<source::Model, ServiceError> {
        let existing = self.get_source(id).await?;

        let mut model: source::ActiveModel = existing.into();
        apply_source_update(&mut model, input);
        model.updated_at = Set(Utc::now());

        let source = model.update(&*self.db).await?;
        info!(source_id = source.id, "Source updated");
        Ok(source)
    }

    /// Deletes a source. Rejected while transactions still reference it.
    #[instrument(skip(self))]
    pub async fn delete_source(&self, id: i32) -> Result<(), ServiceError> {
        let source = self.get_source(id).await?;

        let references = stock_transaction::Entity::find()
            .filter(stock_transaction::Column::SourceId.eq(id))
            .count(&*self.db)
            .await?;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Source {} is referenced by {} transaction(s)",
                id, references
            )));
        }

        let model: source::ActiveModel = source.into();
        model.delete(&*self.db).await?;
        info!(source_id = id, "Source deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_sources(
        &self,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<source::Model>, ServiceError> {
        let mut query = QueryBuilder::<source::Entity>::new()
            .order_by(source::Column::Id, false)
            .paginate(page, per_page);

        if let Some(condition) = SearchBuilder::new()
            .add_like(source::Column::Name, search.unwrap_or_default())
            .add_like(source::Column::Contact, search.unwrap_or_default())
            .add_like(source::Column::Email, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }
}

/// Service for managing clients (customers)
#[derive(Clone)]
pub struct ClientService {
    db: Arc<DbPool>,
}

impl ClientService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn create_client(&self, input: PartnerInput) -> Result<client::Model, ServiceError> {
        let now = Utc::now();
        let model = client::ActiveModel {
            name: Set(input.name),
            contact: Set(input.contact),
            email: Set(input.email),
            phone: Set(input.phone),
            address: Set(input.address),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let client = model.insert(&*self.db).await?;
        info!(client_id = client.id, "Client created");
        Ok(client)
    }

    #[instrument(skip(self))]
    pub async fn get_client(&self, id: i32) -> Result<client::Model, ServiceError> {
        client::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Client {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn update_client(
        &self,
        id: i32,
        input: PartnerUpdateInput,
    ) -> Result<client::Model, ServiceError> {
        let existing = self.get_client(id).await?;

        let mut model: client::ActiveModel = existing.into();
        apply_client_update(&mut model, input);
        model.updated_at = Set(Utc::now());

        let client = model.update(&*self.db).await?;
        info!(client_id = client.id, "Client updated");
        Ok(client)
    }

    /// Deletes a client. Rejected while transactions still reference it.
    #[instrument(skip(self))]
    pub async fn delete_client(&self, id: i32) -> Result<(), ServiceError> {
        let client = self.get_client(id).await?;

        let references = stock_transaction::Entity::find()
            .filter(stock_transaction::Column::ClientId.eq(id))
            .count(&*self.db)
            .await?;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Client {} is referenced by {} transaction(s)",
                id, references
            )));
        }

        let model: client::ActiveModel = client.into();
        model.delete(&*self.db).await?;
        info!(client_id = id, "Client deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_clients(
        &self,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<client::Model>, ServiceError> {
        let mut query = QueryBuilder::<client::Entity>::new()
            .order_by(client::Column::Id, false)
            .paginate(page, per_page);

        if let Some(condition) = SearchBuilder::new()
            .add_like(client::Column::Name, search.unwrap_or_default())
            .add_like(client::Column::Contact, search.unwrap_or_default())
            .add_like(client::Column::Email, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }
}

fn apply_source_update(model: &mut source::ActiveModel, input: PartnerUpdateInput) {
    if let Some(name) = input.name {
        model.name = Set(name);
    }
    if let Some(contact) = input.contact {
        model.contact = Set(Some(contact));
    }
    if let Some(email) = input.email {
        model.email = Set(Some(email));
    }
    if let Some(phone) = input.phone {
        model.phone = Set(Some(phone));
    }
    if let Some(address) = input.address {
        model.address = Set(Some(address));
    }
    if let Some(note) = input.note {
        model.note = Set(Some(note));
    }
}

fn apply_client_update(model: &mut client::ActiveModel, input: PartnerUpdateInput) {
    if let Some(name) = input.name {
        model.name = Set(name);
    }
    if let Some(contact) = input.contact {
        model.contact = Set(Some(contact));
    }
    if let Some(email) = input.email {
        model.email = Set(Some(email));
    }
    if let Some(phone) = input.phone {
        model.phone = Set(Some(phone));
    }
    if let Some(address) = input.address {
        model.address = Set(Some(address));
    }
    if let Some(note) = input.note {
        model.note = Set(Some(note));
    }
}
