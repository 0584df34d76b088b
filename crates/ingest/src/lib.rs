//! Rex Ingestion
//!
//! Turns delimited text into order records. Each line carries five
//! comma-separated fields:
//!
//! ```text
//! timestamp,product,side,price,amount
//! 2020/03/17 17:01:24.884492,ETH/BTC,bid,0.02187308,7.44564869
//! ```
//!
//! Bad lines are skipped and counted; they never abort a load.

mod error;
mod parser;
mod reader;

pub use error::IngestError;
pub use parser::{FIELD_COUNT, parse_decimal, parse_line, parse_tokens, tokenise};
pub use reader::{IngestReport, Rejection, load_file, load_str};
