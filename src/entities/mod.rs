pub mod aisle;
pub mod alert;
pub mod client;
pub mod depot;
pub mod location;
pub mod product;
pub mod rack;
pub mod routine;
pub mod slot;
pub mod source;
pub mod stock;
pub mod stock_transaction;
