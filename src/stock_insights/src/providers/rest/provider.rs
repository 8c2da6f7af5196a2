use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    models::{
        detail::StockDetail, envelope::Envelope, insights::InsightsBundle,
        request_params::StockListParams, stock::StockRecord,
    },
    normalize::{normalize_detail, normalize_insights, normalize_records},
    providers::{
        Fetched, ProviderError, ProviderInitError, StockDataSource,
        rest::{
            params::{endpoint, parse_base_url, validate_symbol},
            response::{PayloadShape, decode_envelope, into_payload, status_error},
        },
    },
};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`StockDataSource`] backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct RestStockSource {
    client: Client,
    base_url: Url,
}

impl RestStockSource {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// Without a `timeout`, requests wait as long as the server keeps the
    /// connection open.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ProviderInitError> {
        let base_url = parse_base_url(base_url)?;

        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ProviderInitError> {
        Self::new(&config.base_url, config.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get(
        &self,
        url: Url,
        query: &[(&'static str, String)],
        shape: PayloadShape,
    ) -> Result<Envelope<Value>, ProviderError> {
        let result = self.send(&url, query, shape).await;
        if let Err(err) = &result {
            warn!(%url, error = %err, "request failed");
        }
        result
    }

    async fn send(
        &self,
        url: &Url,
        query: &[(&'static str, String)],
        shape: PayloadShape,
    ) -> Result<Envelope<Value>, ProviderError> {
        debug!(%url, ?query, "GET");
        let response = self.client.get(url.clone()).query(query).send().await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }

        let envelope = into_payload(decode_envelope(&body)?, shape)?;
        debug!(
            %url,
            status = status.as_u16(),
            cached = envelope.was_cached(),
            bytes = body.len(),
            "response decoded"
        );
        Ok(envelope)
    }
}

fn fetched<T>(envelope: Envelope<Value>, normalize: impl FnOnce(&Value) -> T) -> Fetched<T> {
    let data = normalize(envelope.data.as_ref().unwrap_or(&Value::Null));
    Fetched {
        data,
        cached: envelope.was_cached(),
        count: envelope.count,
    }
}

#[async_trait]
impl StockDataSource for RestStockSource {
    async fn fetch_stocks(
        &self,
        params: &StockListParams,
    ) -> Result<Fetched<Vec<StockRecord>>, ProviderError> {
        let url = endpoint(&self.base_url, &["stocks"]);
        let envelope = self.get(url, &params.to_query(), PayloadShape::Array).await?;

        let fetched = fetched(envelope, normalize_records);
        debug!(records = fetched.data.len(), count = ?fetched.count, "stock list fetched");
        Ok(fetched)
    }

    async fn fetch_stock_detail(&self, symbol: &str) -> Result<Fetched<StockDetail>, ProviderError> {
        let symbol = validate_symbol(symbol)?;
        let url = endpoint(&self.base_url, &["stocks", symbol]);
        let envelope = self.get(url, &[], PayloadShape::Object).await?;

        Ok(fetched(envelope, normalize_detail))
    }

    async fn fetch_insights(&self) -> Result<Fetched<InsightsBundle>, ProviderError> {
        let url = endpoint(&self.base_url, &["insights"]);
        let envelope = self.get(url, &[], PayloadShape::Object).await?;

        Ok(fetched(envelope, normalize_insights))
    }
}
