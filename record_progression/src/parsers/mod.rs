//! Parsers for the free-form fields of world record rows
//!
//! Record tables collected from different sources spell times and dates in
//! several ways. These parsers normalize them into minutes and calendar dates.

pub mod date;
pub mod time;

// Re-export commonly used functions
pub use date::{parse_date, year_fraction};
pub use time::parse_time;
