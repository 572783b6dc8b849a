pub mod aisles;
pub mod alerts;
pub mod common;
pub mod depots;
pub mod locations;
pub mod partners;
pub mod products;
pub mod racks;
pub mod routines;
pub mod stocks;
pub mod transactions;

use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub locations: Arc<services::locations::LocationService>,
    pub depots: Arc<services::depots::DepotService>,
    pub aisles: Arc<services::aisles::AisleService>,
    pub racks: Arc<services::racks::RackService>,
    pub stocks: Arc<services::stocks::StockService>,
    pub products: Arc<services::products::ProductService>,
    pub sources: Arc<services::partners::SourceService>,
    pub clients: Arc<services::partners::ClientService>,
    pub transactions: Arc<services::transactions::TransactionService>,
    pub routines: Arc<services::routines::RoutineService>,
    pub alerts: Arc<services::alerts::AlertService>,
}

impl AppServices {
    /// Builds the service container shared by all HTTP handlers.
    pub fn new(db: Arc<DbPool>, event_sender: EventSender) -> Self {
        Self {
            locations: Arc::new(services::locations::LocationService::new(db.clone())),
            depots: Arc::new(services::depots::DepotService::new(db.clone())),
            aisles: Arc::new(services::aisles::AisleService::new(db.clone())),
            racks: Arc::new(services::racks::RackService::new(
                db.clone(),
                event_sender.clone(),
            )),
            stocks: Arc::new(services::stocks::StockService::new(
                db.clone(),
                event_sender.clone(),
            )),
            products: Arc::new(services::products::ProductService::new(db.clone())),
            sources: Arc::new(services::partners::SourceService::new(db.clone())),
            clients: Arc::new(services::partners::ClientService::new(db.clone())),
            transactions: Arc::new(services::transactions::TransactionService::new(db.clone())),
            routines: Arc::new(services::routines::RoutineService::new(db.clone())),
            alerts: Arc::new(services::alerts::AlertService::new(db, event_sender)),
        }
    }
}
