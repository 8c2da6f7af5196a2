//! Data source abstraction for the stock API.
//!
//! [`StockDataSource`] is the seam between the view models and the network.
//! The REST implementation lives in [`rest`]; tests substitute in-memory
//! sources. Every implementation hands back *normalized* data: callers never
//! see raw payload keys.
//!
//! The trait is object safe, so view models can hold a `&dyn StockDataSource`
//! chosen at runtime.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use stock_insights::models::{
//!     detail::StockDetail, insights::InsightsBundle, request_params::StockListParams,
//!     stock::StockRecord,
//! };
//! use stock_insights::providers::{Fetched, ProviderError, StockDataSource};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl StockDataSource for Offline {
//!     async fn fetch_stocks(
//!         &self,
//!         _params: &StockListParams,
//!     ) -> Result<Fetched<Vec<StockRecord>>, ProviderError> {
//!         Ok(Fetched::fresh(Vec::new()))
//!     }
//!
//!     async fn fetch_stock_detail(&self, symbol: &str) -> Result<Fetched<StockDetail>, ProviderError> {
//!         Err(ProviderError::Unsuccessful(format!("{symbol} not cached")))
//!     }
//!
//!     async fn fetch_insights(&self) -> Result<Fetched<InsightsBundle>, ProviderError> {
//!         Ok(Fetched::fresh(InsightsBundle::empty()))
//!     }
//! }
//! ```

pub mod errors;
pub mod rest;

use async_trait::async_trait;

pub use errors::{ProviderError, ProviderInitError};

use crate::models::{
    detail::StockDetail, insights::InsightsBundle, request_params::StockListParams,
    stock::StockRecord,
};

/// A successful, normalized payload plus the envelope metadata worth keeping.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    /// Served from the API's cache.
    pub cached: bool,
    /// Record count reported by the list endpoint.
    pub count: Option<u64>,
}

impl<T> Fetched<T> {
    pub fn fresh(data: T) -> Self {
        Self { data, cached: false, count: None }
    }
}

/// Fetches stock data from a backend.
#[async_trait]
pub trait StockDataSource: Send + Sync {
    /// Fetches the stock list, applying the server-side filters in `params`.
    async fn fetch_stocks(
        &self,
        params: &StockListParams,
    ) -> Result<Fetched<Vec<StockRecord>>, ProviderError>;

    /// Fetches the full detail for one symbol.
    async fn fetch_stock_detail(&self, symbol: &str) -> Result<Fetched<StockDetail>, ProviderError>;

    /// Fetches the aggregated market insights.
    async fn fetch_insights(&self) -> Result<Fetched<InsightsBundle>, ProviderError>;
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    struct Canned;
    struct Broken;

    #[async_trait]
    impl StockDataSource for Canned {
        async fn fetch_stocks(
            &self,
            _params: &StockListParams,
        ) -> Result<Fetched<Vec<StockRecord>>, ProviderError> {
            Ok(Fetched::fresh(vec![StockRecord::default()]))
        }

        async fn fetch_stock_detail(&self, _symbol: &str) -> Result<Fetched<StockDetail>, ProviderError> {
            Err(ProviderError::Unsuccessful("no detail".into()))
        }

        async fn fetch_insights(&self) -> Result<Fetched<InsightsBundle>, ProviderError> {
            Ok(Fetched::fresh(InsightsBundle::empty()))
        }
    }

    #[async_trait]
    impl StockDataSource for Broken {
        async fn fetch_stocks(
            &self,
            _params: &StockListParams,
        ) -> Result<Fetched<Vec<StockRecord>>, ProviderError> {
            Err(ProviderError::Api { status: 500, message: "boom".into() })
        }

        async fn fetch_stock_detail(&self, _symbol: &str) -> Result<Fetched<StockDetail>, ProviderError> {
            Err(ProviderError::Api { status: 500, message: "boom".into() })
        }

        async fn fetch_insights(&self) -> Result<Fetched<InsightsBundle>, ProviderError> {
            Err(ProviderError::Decode("not json".into()))
        }
    }

    fn pick(name: &str) -> Box<dyn StockDataSource> {
        if name == "canned" { Box::new(Canned) } else { Box::new(Broken) }
    }

    #[tokio::test]
    async fn sources_are_interchangeable_behind_dyn() {
        let params = StockListParams::default();

        let listed = pick("canned").fetch_stocks(&params).await.unwrap();
        assert_eq!(listed.data.len(), 1);
        assert!(!listed.cached);

        let err = pick("broken").fetch_stocks(&params).await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 500, .. }));
    }
}
