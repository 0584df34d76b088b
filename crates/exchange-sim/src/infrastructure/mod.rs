pub mod config;
pub mod order_book;

pub use config::{ConfigError, SimulatorConfig};
pub use order_book::OrderBook;
