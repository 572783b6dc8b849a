pub mod aisles;
pub mod alerts;
pub mod depots;
pub mod locations;
pub mod partners;
pub mod products;
pub mod racks;
pub mod routines;
pub mod stocks;
pub mod transactions;
