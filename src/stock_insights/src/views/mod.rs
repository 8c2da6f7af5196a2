//! View models for the stock list, stock detail and insights pages.
//!
//! Computation here is synchronous; only the `load` methods await a
//! [`StockDataSource`](crate::providers::StockDataSource).

pub mod detail;
pub mod format;
pub mod insights;
pub mod listing;
pub mod load_state;
