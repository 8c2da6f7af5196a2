//! REST client for the stock insights HTTP API.

pub mod params;
pub mod provider;
pub mod response;

pub use provider::RestStockSource;
