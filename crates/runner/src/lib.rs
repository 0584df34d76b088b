//! Rex Runner
//!
//! Terminal front end for the exchange simulator. A [`Session`] reads menu
//! selections from any `BufRead` and writes prompts and reports to any
//! `Write`, so the same loop drives stdin/stdout and scripted tests.
//!
//! ```text
//!   1: Print help
//!   2: Print exchange stats
//!   3: Make an ask
//!   4: Make a bid
//!   5: Print wallet
//!   6: Go to next timeframe
//!   7: Exit
//! ```

pub mod menu;

pub use menu::{MenuError, MenuOption, Session};
