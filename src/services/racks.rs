use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionError, TransactionTrait,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;

use crate::db::{DbPool, Page, QueryBuilder, SearchBuilder};
use crate::entities::{aisle, depot, rack, slot, stock};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::layout::{Direction, RackConfig, RackFace, SlotAddress, SlotCell, SlotIndex};

#[derive(Debug, Clone)]
pub struct CreateRackInput {
    pub aisle_id: i32,
    pub face_type: RackFace,
    pub levels: i32,
    pub bays: i32,
    pub bins_per_bay: i32,
    pub note: Option<String>,
}

/// Input for updating a rack. Dimension fields regenerate the slot set and
/// are rejected while any slot of the rack is occupied.
#[derive(Debug, Clone, Default)]
pub struct UpdateRackInput {
    pub face_type: Option<RackFace>,
    pub levels: Option<i32>,
    pub bays: Option<i32>,
    pub bins_per_bay: Option<i32>,
    pub note: Option<String>,
}

/// Dimensional descriptor returned by the layout endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct LayoutDescriptor {
    pub levels: i32,
    pub bays: i32,
    pub bins_per_bay: i32,
    pub directions: Vec<Direction>,
}

/// One slot of the layout with its embedded stock placement, if any
#[derive(Debug, Serialize, ToSchema)]
pub struct SlotView {
    pub id: i32,
    pub direction: Direction,
    pub level_no: i32,
    pub bay_no: i32,
    pub bin_no: i32,
    pub coordinate: String,
    pub stock: Option<stock::Model>,
}

/// Full layout of a rack: the rack record, its dimensional descriptor and
/// its slots in grid traversal order (levels descending, bays and bins
/// ascending, per direction).
#[derive(Debug, Serialize, ToSchema)]
pub struct RackLayout {
    pub rack: rack::Model,
    pub layout: LayoutDescriptor,
    pub slots: Vec<SlotView>,
}

struct SlotWithStock {
    slot: slot::Model,
    stock: Option<stock::Model>,
}

impl SlotCell for SlotWithStock {
    fn address(&self) -> SlotAddress {
        self.slot.address()
    }

    fn is_occupied(&self) -> bool {
        self.stock.is_some()
    }
}

/// Service for managing racks and their slot address space
#[derive(Clone)]
pub struct RackService {
    db: Arc<DbPool>,
    event_sender: EventSender,
}

impl RackService {
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Creates a rack and materializes every slot of its address space.
    #[instrument(skip(self))]
    pub async fn create_rack(&self, input: CreateRackInput) -> Result<rack::Model, ServiceError> {
        let config = RackConfig::new(input.face_type, input.levels, input.bays, input.bins_per_bay)
            .ok_or_else(|| {
                ServiceError::ValidationError(
                    "Rack dimensions must all be at least 1".to_string(),
                )
            })?;

        aisle::Entity::find_by_id(input.aisle_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Aisle {} not found", input.aisle_id)))?;

        let aisle_id = input.aisle_id;
        let note = input.note.clone();
        let rack = self
            .db
            .transaction::<_, rack::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let model = rack::ActiveModel {
                        aisle_id: Set(aisle_id),
                        rack_code: Set(config.code()),
                        face_type: Set(config.face_type),
                        levels: Set(config.levels),
                        bays: Set(config.bays),
                        bins_per_bay: Set(config.bins_per_bay),
                        note: Set(note),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    };
                    let rack = model.insert(txn).await?;

                    materialize_slots(txn, rack.id, &config).await?;

                    Ok(rack)
                })
            })
            .await
            .map_err(flatten_transaction_error)?;

        info!(rack_id = rack.id, rack_code = %rack.rack_code, "Rack created");
        self.publish(Event::RackCreated {
            rack_id: rack.id,
            rack_code: rack.rack_code.clone(),
            slot_count: config.slot_count(),
        })
        .await;

        Ok(rack)
    }

    #[instrument(skip(self))]
    pub async fn get_rack(&self, id: i32) -> Result<rack::Model, ServiceError> {
        rack::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Rack {} not found", id)))
    }

    /// Updates a rack. Changing any dimension regenerates the slot set,
    /// which is only allowed while no slot of the rack is occupied.
    #[instrument(skip(self))]
    pub async fn update_rack(
        &self,
        id: i32,
        input: UpdateRackInput,
    ) -> Result<rack::Model, ServiceError> {
        let existing = self.get_rack(id).await?;
        let old_config = existing.config();

        let new_config = RackConfig::new(
            input.face_type.unwrap_or(old_config.face_type),
            input.levels.unwrap_or(old_config.levels),
            input.bays.unwrap_or(old_config.bays),
            input.bins_per_bay.unwrap_or(old_config.bins_per_bay),
        )
        .ok_or_else(|| {
            ServiceError::ValidationError("Rack dimensions must all be at least 1".to_string())
        })?;

        let reconfigured = new_config != old_config;
        if reconfigured && self.occupied_slot_count(id).await? > 0 {
            return Err(ServiceError::Conflict(format!(
                "Rack {} has occupied slots; relocate stock before changing its dimensions",
                id
            )));
        }

        let note = input.note.clone();
        let rack = self
            .db
            .transaction::<_, rack::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let mut model: rack::ActiveModel = existing.into();
                    if reconfigured {
                        model.rack_code = Set(new_config.code());
                        model.face_type = Set(new_config.face_type);
                        model.levels = Set(new_config.levels);
                        model.bays = Set(new_config.bays);
                        model.bins_per_bay = Set(new_config.bins_per_bay);
                    }
                    if let Some(note) = note {
                        model.note = Set(Some(note));
                    }
                    model.updated_at = Set(Utc::now());
                    let rack = model.update(txn).await?;

                    if reconfigured {
                        slot::Entity::delete_many()
                            .filter(slot::Column::RackId.eq(rack.id))
                            .exec(txn)
                            .await?;
                        materialize_slots(txn, rack.id, &new_config).await?;
                    }

                    Ok(rack)
                })
            })
            .await
            .map_err(flatten_transaction_error)?;

        info!(rack_id = rack.id, reconfigured, "Rack updated");
        if reconfigured {
            self.publish(Event::RackReconfigured {
                rack_id: rack.id,
                rack_code: rack.rack_code.clone(),
                slot_count: new_config.slot_count(),
            })
            .await;
        }

        Ok(rack)
    }

    /// Deletes a rack and its slots. Rejected while any slot is occupied.
    #[instrument(skip(self))]
    pub async fn delete_rack(&self, id: i32) -> Result<(), ServiceError> {
        self.get_rack(id).await?;

        let occupied = self.occupied_slot_count(id).await?;
        if occupied > 0 {
            return Err(ServiceError::Conflict(format!(
                "Rack {} has {} occupied slot(s); relocate or discard stock first",
                id, occupied
            )));
        }

        self.db
            .transaction::<_, (), ServiceError>(move |txn| {
                Box::pin(async move {
                    slot::Entity::delete_many()
                        .filter(slot::Column::RackId.eq(id))
                        .exec(txn)
                        .await?;
                    rack::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .map_err(flatten_transaction_error)?;

        info!(rack_id = id, "Rack deleted");
        self.publish(Event::RackDeleted(id)).await;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_racks(
        &self,
        aisle_id: Option<i32>,
        page: u64,
        per_page: u64,
        search: Option<&str>,
    ) -> Result<Page<rack::Model>, ServiceError> {
        let mut query = QueryBuilder::<rack::Entity>::new()
            .order_by(rack::Column::Id, false)
            .paginate(page, per_page);

        if let Some(aisle_id) = aisle_id {
            query = query.filter(Condition::all().add(rack::Column::AisleId.eq(aisle_id)));
        }

        if let Some(condition) = SearchBuilder::new()
            .add_like(rack::Column::RackCode, search.unwrap_or_default())
            .build()
        {
            query = query.filter(condition);
        }

        Ok(query.execute(&*self.db).await?)
    }

    /// Fetches the layout after validating the location/depot/aisle/rack
    /// containment chain of the request path.
    #[instrument(skip(self))]
    pub async fn layout_for_path(
        &self,
        location_id: i32,
        depot_id: i32,
        aisle_id: i32,
        rack_id: i32,
    ) -> Result<RackLayout, ServiceError> {
        let rack = self.get_rack(rack_id).await?;
        if rack.aisle_id != aisle_id {
            return Err(ServiceError::NotFound(format!(
                "Rack {} not found in aisle {}",
                rack_id, aisle_id
            )));
        }

        let aisle = aisle::Entity::find_by_id(aisle_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Aisle {} not found", aisle_id)))?;
        if aisle.depot_id != depot_id {
            return Err(ServiceError::NotFound(format!(
                "Aisle {} not found in depot {}",
                aisle_id, depot_id
            )));
        }

        let depot = depot::Entity::find_by_id(depot_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Depot {} not found", depot_id)))?;
        if depot.location_id != location_id {
            return Err(ServiceError::NotFound(format!(
                "Depot {} not found in location {}",
                depot_id, location_id
            )));
        }

        self.layout(rack).await
    }

    /// Assembles the layout view: slots with embedded stock, emitted in
    /// grid traversal order.
    async fn layout(&self, rack: rack::Model) -> Result<RackLayout, ServiceError> {
        let config = rack.config();

        let records = slot::Entity::find()
            .filter(slot::Column::RackId.eq(rack.id))
            .find_also_related(stock::Entity)
            .order_by_asc(slot::Column::Id)
            .all(&*self.db)
            .await?;

        let expected = config.slot_count();
        if records.len() as u64 != expected {
            warn!(
                rack_id = rack.id,
                found = records.len(),
                expected,
                "Slot records do not cover the rack's address space"
            );
        }

        let index = SlotIndex::build(
            records
                .into_iter()
                .map(|(slot, stock)| SlotWithStock { slot, stock }),
        );

        let slots = config
            .addresses()
            .filter_map(|address| index.get(&address))
            .map(|cell| SlotView {
                id: cell.slot.id,
                direction: cell.slot.direction,
                level_no: cell.slot.level_no,
                bay_no: cell.slot.bay_no,
                bin_no: cell.slot.bin_no,
                coordinate: cell.slot.coordinate.clone(),
                stock: cell.stock.clone(),
            })
            .collect();

        Ok(RackLayout {
            rack,
            layout: LayoutDescriptor {
                levels: config.levels,
                bays: config.bays,
                bins_per_bay: config.bins_per_bay,
                directions: config.directions().to_vec(),
            },
            slots,
        })
    }

    async fn occupied_slot_count(&self, rack_id: i32) -> Result<u64, ServiceError> {
        Ok(stock::Entity::find()
            .inner_join(slot::Entity)
            .filter(slot::Column::RackId.eq(rack_id))
            .count(&*self.db)
            .await?)
    }

    async fn publish(&self, event: Event) {
        if let Err(e) = self.event_sender.send(event).await {
            error!("Failed to publish rack event: {}", e);
        }
    }
}

/// Inserts one slot row per address of the rack's configuration.
async fn materialize_slots(
    txn: &sea_orm::DatabaseTransaction,
    rack_id: i32,
    config: &RackConfig,
) -> Result<(), sea_orm::DbErr> {
    let models: Vec<slot::ActiveModel> = config
        .addresses()
        .map(|address| slot::ActiveModel {
            rack_id: Set(rack_id),
            direction: Set(address.direction),
            level_no: Set(address.level),
            bay_no: Set(address.bay),
            bin_no: Set(address.bin),
            coordinate: Set(address.coordinate()),
            ..Default::default()
        })
        .collect();

    slot::Entity::insert_many(models).exec(txn).await?;
    Ok(())
}

fn flatten_transaction_error(err: TransactionError<ServiceError>) -> ServiceError {
    match err {
        TransactionError::Connection(e) => ServiceError::DatabaseError(e),
        TransactionError::Transaction(e) => e,
    }
}
