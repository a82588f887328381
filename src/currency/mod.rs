//! Currency conversion against a static or cached rate table
//!
//! Live rate fetching is out of scope; callers supply a table (the built-in
//! fallback, a CSV snapshot, or USD quotes cached elsewhere).

mod table;
mod history;

pub use table::{format_amount, RateTable, UsdQuotes, PHP_PER_USD_FALLBACK};
pub use history::{ConversionHistory, ConversionResult, DEFAULT_HISTORY_LIMIT};
