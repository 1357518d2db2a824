//! Registry models

pub mod product;
pub mod stock;

pub use product::Product;
pub use stock::{MovementType, StockMovement, StockOperation};
