mod error;
mod order;
mod product;
mod side;

pub use error::RecordError;
pub use order::{DATASET_OWNER, OrderRecord};
pub use product::Product;
pub use side::OrderSide;
