//! Client library for the Egyptian stock market insights API.
//!
//! - [`providers`]: the [`StockDataSource`](providers::StockDataSource) seam and its REST implementation
//! - [`normalize`]: raw payload records → canonical [`models`]
//! - [`views`]: list/detail/insights view models driven through the data source
//! - [`preferences`]: persisted language and theme
//! - [`config`]: base URL, timeout and preference file location

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod logging;
pub mod models;
pub mod normalize;
pub mod preferences;
pub mod providers;
pub mod views;

pub use errors::Error;
