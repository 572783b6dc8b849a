use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionError,
    TransactionTrait,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::db::DbPool;
use crate::entities::stock::{self, StockProductType, StockStrategy};
use crate::entities::stock_transaction::{self, TransactionKind};
use crate::entities::{client, product, slot};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

#[derive(Debug, Clone)]
pub struct CreateStockInput {
    pub slot_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub strategy: StockStrategy,
    pub product_type: StockProductType,
    pub is_consumable: bool,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub source_id: Option<i32>,
}

/// In-place field update; the slot is never changed by this operation.
#[derive(Debug, Clone, Default)]
pub struct UpdateStockInput {
    pub quantity: Option<i32>,
    pub batch_no: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub strategy: Option<StockStrategy>,
    pub product_type: Option<StockProductType>,
    pub is_consumable: Option<bool>,
    pub sale_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
}

/// A stock record together with the slot it occupies
#[derive(Debug, Serialize, ToSchema)]
pub struct StockDetails {
    pub stock: stock::Model,
    pub slot: slot::Model,
}

/// Outcome of a consume or outflow operation
#[derive(Debug, Serialize, ToSchema)]
pub struct DrawdownResult {
    pub stock_id: i32,
    pub quantity_drawn: i32,
    pub remaining_quantity: i32,
    /// True when the drawdown exhausted the record and freed its slot
    pub exhausted: bool,
}

struct MovementRecord {
    kind: TransactionKind,
    product_id: i32,
    stock_id: Option<i32>,
    quantity: i32,
    from_slot: Option<String>,
    to_slot: Option<String>,
    source_id: Option<i32>,
    client_id: Option<i32>,
    note: Option<String>,
}

/// Service enforcing the at-most-one-stock-per-slot invariant. Every
/// mutation runs inside a database transaction so the occupancy check and
/// the write are atomic; racing callers resolve to one success and one
/// conflict.
#[derive(Clone)]
pub struct StockService {
    db: Arc<DbPool>,
    event_sender: EventSender,
}

impl StockService {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Places new stock into an empty slot.
    #[instrument(skip(self))]
    pub async fn create_stock(
        &self,
        input: CreateStockInput,
    ) -> Result<StockDetails, ServiceError> {
        if input.quantity < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let moved = input.clone();
        let details = self
            .db
            .transaction::<_, StockDetails, ServiceError>(move |txn| {
                Box::pin(async move {
                    let slot = slot::Entity::find_by_id(moved.slot_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Slot {} not found", moved.slot_id))
                        })?;

                    let occupant = stock::Entity::find()
                        .filter(stock::Column::SlotId.eq(slot.id))
                        .one(txn)
                        .await?;
                    if occupant.is_some() {
                        return Err(ServiceError::Conflict(format!(
                            "Slot {} already holds a stock placement",
                            slot.coordinate
                        )));
                    }

                    product::Entity::find_by_id(moved.product_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!(
                                "Product {} not found",
                                moved.product_id
                            ))
                        })?;

                    let now = Utc::now();
                    let model = stock::ActiveModel {
                        product_id: Set(moved.product_id),
                        slot_id: Set(slot.id),
                        quantity: Set(moved.quantity),
                        batch_no: Set(moved.batch_no),
                        expiry_date: Set(moved.expiry_date),
                        strategy: Set(moved.strategy),
                        product_type: Set(moved.product_type),
                        is_consumable: Set(moved.is_consumable),
                        sale_price: Set(moved.sale_price),
                        cost_price: Set(moved.cost_price),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    let stock = model.insert(txn).await?;

                    Ok(StockDetails { stock, slot })
                })
            })
            .await
            .map_err(flatten_transaction_error)?;

        info!(
            stock_id = details.stock.id,
            slot = %details.slot.coordinate,
            "Stock placed"
        );

        self.record_movement(MovementRecord {
            kind: TransactionKind::Inflow,
            product_id: details.stock.product_id,
            stock_id: Some(details.stock.id),
            quantity: details.stock.quantity,
            from_slot: None,
            to_slot: Some(details.slot.coordinate.clone()),
            source_id: input.source_id,
            client_id: None,
            note: None,
        })
        .await;

        self.publish(Event::StockPlaced {
            stock_id: details.stock.id,
            product_id: details.stock.product_id,
            slot: details.slot.coordinate.clone(),
            quantity: details.stock.quantity,
        })
        .await;

        Ok(details)
    }

    #[instrument(skip(self))]
    pub async fn get_stock(&self, id: i32) -> Result<StockDetails, ServiceError> {
        let (stock, slot) = stock::Entity::find_by_id(id)
            .find_also_related(slot::Entity)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Stock {} not found", id)))?;

        let slot = slot.ok_or_else(|| {
            ServiceError::InternalError(format!("Stock {} has no slot record", id))
        })?;

        Ok(StockDetails { stock, slot })
    }

    /// Moves stock to an empty slot in the same rack.
    #[instrument(skip(self))]
    pub async fn move_stock(
        &self,
        stock_id: i32,
        target_slot_id: i32,
    ) -> Result<StockDetails, ServiceError> {
        self.relocate(stock_id, target_slot_id, false).await
    }

    /// Moves stock to an empty slot in a different rack.
    #[instrument(skip(self))]
    pub async fn migrate_stock(
        &self,
        stock_id: i32,
        target_slot_id: i32,
    ) -> Result<StockDetails, ServiceError> {
        self.relocate(stock_id, target_slot_id, true).await
    }

    /// Updates stock attributes in place.
    #[instrument(skip(self))]
    pub async fn update_stock(
        &self,
        id: i32,
        input: UpdateStockInput,
    ) -> Result<StockDetails, ServiceError> {
        if matches!(input.quantity, Some(q) if q < 1) {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let details = self.get_stock(id).await?;

        let mut model: stock::ActiveModel = details.stock.into();
        if let Some(quantity) = input.quantity {
            model.quantity = Set(quantity);
        }
        if let Some(batch_no) = input.batch_no {
            model.batch_no = Set(Some(batch_no));
        }
        if let Some(expiry_date) = input.expiry_date {
            model.expiry_date = Set(Some(expiry_date));
        }
        if let Some(strategy) = input.strategy {
            model.strategy = Set(strategy);
        }
        if let Some(product_type) = input.product_type {
            model.product_type = Set(product_type);
        }
        if let Some(is_consumable) = input.is_consumable {
            model.is_consumable = Set(is_consumable);
        }
        if let Some(sale_price) = input.sale_price {
            model.sale_price = Set(Some(sale_price));
        }
        if let Some(cost_price) = input.cost_price {
            model.cost_price = Set(Some(cost_price));
        }
        model.updated_at = Set(Utc::now());

        let stock = model.update(&*self.db).await?;
        info!(stock_id = stock.id, "Stock updated");
        self.publish(Event::StockUpdated(stock.id)).await;

        Ok(StockDetails {
            stock,
            slot: details.slot,
        })
    }

    /// Draws down a consumable stock. Partial consumption reduces the
    /// quantity; full consumption removes the record and frees the slot.
    #[instrument(skip(self))]
    pub async fn consume_stock(
        &self,
        id: i32,
        quantity: i32,
    ) -> Result<DrawdownResult, ServiceError> {
        let (result, details) = self
            .drawdown(id, quantity, |stock| {
                if !stock.is_consumable {
                    return Err(ServiceError::InvalidOperation(format!(
                        "Stock {} is not consumable",
                        stock.id
                    )));
                }
                Ok(())
            })
            .await?;

        self.record_movement(MovementRecord {
            kind: TransactionKind::Consumption,
            product_id: details.stock.product_id,
            stock_id: Some(details.stock.id),
            quantity,
            from_slot: Some(details.slot.coordinate.clone()),
            to_slot: None,
            source_id: None,
            client_id: None,
            note: None,
        })
        .await;

        self.publish(Event::StockConsumed {
            stock_id: details.stock.id,
            quantity,
            exhausted: result.exhausted,
        })
        .await;

        Ok(result)
    }

    /// Sends stock out to a client. The drawdown rules match consumption
    /// except that the consumable flag is not required.
    #[instrument(skip(self))]
    pub async fn outflow_stock(
        &self,
        id: i32,
        quantity: i32,
        client_id: Option<i32>,
        note: Option<String>,
    ) -> Result<DrawdownResult, ServiceError> {
        if let Some(client_id) = client_id {
            client::Entity::find_by_id(client_id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Client {} not found", client_id))
                })?;
        }

        let (result, details) = self.drawdown(id, quantity, |_| Ok(())).await?;

        self.record_movement(MovementRecord {
            kind: TransactionKind::ManualOutflow,
            product_id: details.stock.product_id,
            stock_id: Some(details.stock.id),
            quantity,
            from_slot: Some(details.slot.coordinate.clone()),
            to_slot: None,
            source_id: None,
            client_id,
            note,
        })
        .await;

        self.publish(Event::StockOutflow {
            stock_id: details.stock.id,
            client_id,
            quantity,
            exhausted: result.exhausted,
        })
        .await;

        Ok(result)
    }

    /// Removes a stock record outright, freeing its slot.
    #[instrument(skip(self))]
    pub async fn discard_stock(&self, id: i32) -> Result<(), ServiceError> {
        let details = self.get_stock(id).await?;

        stock::Entity::delete_by_id(id).exec(&*self.db).await?;
        info!(stock_id = id, slot = %details.slot.coordinate, "Stock discarded");

        self.record_movement(MovementRecord {
            kind: TransactionKind::ManualOutflow,
            product_id: details.stock.product_id,
            stock_id: Some(id),
            quantity: details.stock.quantity,
            from_slot: Some(details.slot.coordinate.clone()),
            to_slot: None,
            source_id: None,
            client_id: None,
            note: Some("Discarded".to_string()),
        })
        .await;

        self.publish(Event::StockDiscarded {
            stock_id: id,
            slot: details.slot.coordinate,
        })
        .await;

        Ok(())
    }

    /// Shared re-pointing logic for move and migrate. The occupancy check
    /// and the slot update happen in one transaction; a failed move leaves
    /// both slots untouched.
    async fn relocate(
        &self,
        stock_id: i32,
        target_slot_id: i32,
        cross_rack: bool,
    ) -> Result<StockDetails, ServiceError> {
        let (details, from_coordinate) = self
            .db
            .transaction::<_, (StockDetails, String), ServiceError>(move |txn| {
                Box::pin(async move {
                    let stock = stock::Entity::find_by_id(stock_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Stock {} not found", stock_id))
                        })?;

                    // Resolve the source before the move severs the link
                    let source_slot = slot::Entity::find_by_id(stock.slot_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::InternalError(format!(
                                "Stock {} has no slot record",
                                stock_id
                            ))
                        })?;

                    if target_slot_id == source_slot.id {
                        return Err(ServiceError::ValidationError(
                            "Stock already occupies the target slot".to_string(),
                        ));
                    }

                    let target_slot = slot::Entity::find_by_id(target_slot_id)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Slot {} not found", target_slot_id))
                        })?;

                    if cross_rack && target_slot.rack_id == source_slot.rack_id {
                        return Err(ServiceError::InvalidOperation(
                            "Migration target must be in a different rack".to_string(),
                        ));
                    }
                    if !cross_rack && target_slot.rack_id != source_slot.rack_id {
                        return Err(ServiceError::InvalidOperation(
                            "Move target must be in the same rack; use migrate for cross-rack moves"
                                .to_string(),
                        ));
                    }

                    let occupant = stock::Entity::find()
                        .filter(stock::Column::SlotId.eq(target_slot.id))
                        .one(txn)
                        .await?;
                    if occupant.is_some() {
                        return Err(ServiceError::Conflict(format!(
                            "Slot {} already holds a stock placement",
                            target_slot.coordinate
                        )));
                    }

                    let mut model: stock::ActiveModel = stock.into();
                    model.slot_id = Set(target_slot.id);
                    model.updated_at = Set(Utc::now());
                    let stock = model.update(txn).await?;

                    Ok((
                        StockDetails {
                            stock,
                            slot: target_slot,
                        },
                        source_slot.coordinate,
                    ))
                })
            })
            .await
            .map_err(flatten_transaction_error)?;

        info!(
            stock_id = details.stock.id,
            from = %from_coordinate,
            to = %details.slot.coordinate,
            "Stock relocated"
        );

        self.record_movement(MovementRecord {
            kind: TransactionKind::Relocation,
            product_id: details.stock.product_id,
            stock_id: Some(details.stock.id),
            quantity: details.stock.quantity,
            from_slot: Some(from_coordinate.clone()),
            to_slot: Some(details.slot.coordinate.clone()),
            source_id: None,
            client_id: None,
            note: None,
        })
        .await;

        self.publish(Event::StockMoved {
            stock_id: details.stock.id,
            from_slot: from_coordinate,
            to_slot: details.slot.coordinate.clone(),
        })
        .await;

        Ok(details)
    }

    /// Shared quantity reduction for consume and outflow. The guard runs
    /// before any write; violating it leaves the record unchanged.
    async fn drawdown(
        &self,
        id: i32,
        quantity: i32,
        guard: impl FnOnce(&stock::Model) -> Result<(), ServiceError> + Send + 'static,
    ) -> Result<(DrawdownResult, StockDetails), ServiceError> {
        if quantity < 1 {
            return Err(ServiceError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        self.db
            .transaction::<_, (DrawdownResult, StockDetails), ServiceError>(move |txn| {
                Box::pin(async move {
                    let (stock, slot) = stock::Entity::find_by_id(id)
                        .find_also_related(slot::Entity)
                        .one(txn)
                        .await?
                        .ok_or_else(|| {
                            ServiceError::NotFound(format!("Stock {} not found", id))
                        })?;
                    let slot = slot.ok_or_else(|| {
                        ServiceError::InternalError(format!("Stock {} has no slot record", id))
                    })?;

                    guard(&stock)?;

                    if quantity > stock.quantity {
                        return Err(ServiceError::InsufficientStock(format!(
                            "Requested {} but only {} available",
                            quantity, stock.quantity
                        )));
                    }

                    let remaining = stock.quantity - quantity;
                    let exhausted = remaining == 0;

                    let stock = if exhausted {
                        stock::Entity::delete_by_id(stock.id).exec(txn).await?;
                        stock
                    } else {
                        let mut model: stock::ActiveModel = stock.into();
                        model.quantity = Set(remaining);
                        model.updated_at = Set(Utc::now());
                        model.update(txn).await?
                    };

                    Ok((
                        DrawdownResult {
                            stock_id: stock.id,
                            quantity_drawn: quantity,
                            remaining_quantity: remaining,
                            exhausted,
                        },
                        StockDetails { stock, slot },
                    ))
                })
            })
            .await
            .map_err(flatten_transaction_error)
    }

    /// Best-effort transaction logging: the primary mutation has already
    /// succeeded, so a failure here is logged and never surfaced.
    async fn record_movement(&self, record: MovementRecord) {
        let model = stock_transaction::ActiveModel {
            kind: Set(record.kind),
            product_id: Set(record.product_id),
            stock_id: Set(record.stock_id),
            quantity: Set(record.quantity),
            from_slot: Set(record.from_slot),
            to_slot: Set(record.to_slot),
            source_id: Set(record.source_id),
            client_id: Set(record.client_id),
            note: Set(record.note),
            occurred_at: Set(Utc::now()),
            ..Default::default()
        };

        if let Err(e) = model.insert(&*self.db).await {
            warn!("Failed to record movement transaction: {}", e);
        }
    }

    async fn publish(&self, event: Event) {
        if let Err(e) = self.event_sender.send(event).await {
            error!("Failed to publish stock event: {}", e);
        }
    }
}

fn flatten_transaction_error(err: TransactionError<ServiceError>) -> ServiceError {
    match err {
        TransactionError::Connection(e) => ServiceError::DatabaseError(e),
        TransactionError::Transaction(e) => e,
    }
}
