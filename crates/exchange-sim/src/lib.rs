//! Rex Exchange
//!
//! The order book, the matching entry point and the single-user simulation
//! driver built on top of them.
//!
//! ```no_run
//! use rex_exchange::{Exchange, SimulatorConfig};
//!
//! let config = SimulatorConfig::load_default()?;
//! let mut exchange = Exchange::from_config(&config)?;
//! let step = exchange.advance()?;
//! println!("{} trades at {}", step.total_trades(), step.timestamp);
//! # Ok::<(), rex_exchange::ExchangeError>(())
//! ```

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Cross-cutting concerns
pub mod error;
pub mod model;

// Re-export main types for convenience
pub use application::Exchange;
pub use error::{ExchangeError, Result};
pub use infrastructure::{ConfigError, OrderBook, SimulatorConfig};
pub use model::{Admission, ProductStats, SideStats, StepReport};
