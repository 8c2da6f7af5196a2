use std::sync::Mutex;

use async_trait::async_trait;
use stock_insights::{
    models::{
        detail::StockDetail,
        insights::{InsightCategory, InsightsBundle},
        request_params::StockListParams,
        stock::StockRecord,
    },
    normalize::normalize_detail,
    providers::{Fetched, ProviderError, StockDataSource},
    views::{
        detail::StockDetailView,
        insights::InsightsView,
        listing::{SortKey, StockListView},
        load_state::LoadPhase,
    },
};

/// In-memory source; `fail` switches every call to an error.
struct MemorySource {
    stocks: Vec<StockRecord>,
    fail: Mutex<bool>,
    seen_params: Mutex<Vec<StockListParams>>,
}

impl MemorySource {
    fn new(stocks: Vec<StockRecord>) -> Self {
        Self {
            stocks,
            fail: Mutex::new(false),
            seen_params: Mutex::new(Vec::new()),
        }
    }

    fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    fn check(&self) -> Result<(), ProviderError> {
        if *self.fail.lock().unwrap() {
            Err(ProviderError::Api { status: 503, message: "Service Unavailable".into() })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StockDataSource for MemorySource {
    async fn fetch_stocks(
        &self,
        params: &StockListParams,
    ) -> Result<Fetched<Vec<StockRecord>>, ProviderError> {
        self.check()?;
        self.seen_params.lock().unwrap().push(params.clone());
        Ok(Fetched {
            data: self.stocks.clone(),
            cached: false,
            count: Some(self.stocks.len() as u64),
        })
    }

    async fn fetch_stock_detail(&self, symbol: &str) -> Result<Fetched<StockDetail>, ProviderError> {
        self.check()?;
        if !self.stocks.iter().any(|s| s.symbol == symbol) {
            return Err(ProviderError::Api { status: 404, message: "Stock not found".into() });
        }
        let detail = normalize_detail(&serde_json::json!({
            "symbol": symbol,
            "stochastic_k_14_3_3": 85.0,
        }));
        Ok(Fetched::fresh(detail))
    }

    async fn fetch_insights(&self) -> Result<Fetched<InsightsBundle>, ProviderError> {
        self.check()?;
        let mut bundle = InsightsBundle::empty();
        bundle.total_stocks = self.stocks.len() as u64;
        bundle.lists.insert(InsightCategory::VolumeLeaders, self.stocks.clone());
        Ok(Fetched { data: bundle, cached: true, count: None })
    }
}

fn stock(symbol: &str, price: f64) -> StockRecord {
    StockRecord {
        symbol: symbol.into(),
        price,
        ..StockRecord::default()
    }
}

#[tokio::test]
async fn list_view_loads_through_the_source() {
    let source = MemorySource::new(vec![stock("B", 1.0), stock("A", 3.0), stock("C", 2.0)]);
    let mut view = StockListView::new();
    view.set_sort(SortKey::Symbol);

    let params = StockListParams {
        max_market_cap: Some(5e9),
        ..Default::default()
    };
    assert!(view.load(&source, &params).await);

    let symbols: Vec<&str> = view.visible().into_iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, ["A", "B", "C"]);
    assert_eq!(source.seen_params.lock().unwrap().as_slice(), [params]);
}

#[tokio::test]
async fn failed_reload_drops_previous_data() {
    let source = MemorySource::new(vec![stock("A", 1.0)]);
    let mut view = StockListView::new();
    view.load(&source, &StockListParams::default()).await;
    assert_eq!(view.records().len(), 1);

    source.set_failing(true);
    view.load(&source, &StockListParams::default()).await;

    assert!(view.records().is_empty());
    assert!(view.visible().is_empty());
    assert_eq!(
        view.state().error(),
        Some("Error loading stocks: API error (503): Service Unavailable")
    );
}

#[tokio::test]
async fn superseded_list_load_is_discarded() {
    let source = MemorySource::new(vec![stock("OLD", 1.0)]);
    let mut view = StockListView::new();

    let stale = view.begin_load();
    let current = view.begin_load();
    let newer = Ok(Fetched::fresh(vec![stock("NEW", 2.0)]));
    assert!(view.finish_load(current, newer));

    let late = source.fetch_stocks(&StockListParams::default()).await;
    assert!(!view.finish_load(stale, late));
    assert_eq!(view.records()[0].symbol, "NEW");
}

#[tokio::test]
async fn detail_view_loads_and_reports_missing_symbols() {
    let source = MemorySource::new(vec![stock("COMI", 80.0)]);

    let mut view = StockDetailView::new("COMI");
    assert!(view.load(&source).await);
    let detail = view.detail().unwrap();
    assert_eq!(detail.metric("stochastic_k_14_3_3"), 85.0);

    let mut missing = StockDetailView::new("XXXX");
    missing.load(&source).await;
    assert!(matches!(missing.state().phase(), LoadPhase::Failed(m) if m.contains("Stock not found")));

    let mut blank = StockDetailView::new("  ");
    blank.load(&source).await;
    assert!(blank.state().error().unwrap().contains("No stock symbol provided"));
}

#[tokio::test]
async fn insights_view_exposes_non_empty_sections() {
    let source = MemorySource::new(vec![stock("ETEL", 40.0)]);
    let mut view = InsightsView::new();
    assert!(view.load(&source).await);

    assert!(view.cached());
    let sections = view.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].0, InsightCategory::VolumeLeaders);
    assert_eq!(sections[0].1[0].symbol, "ETEL");

    source.set_failing(true);
    view.load(&source).await;
    assert!(view.bundle().is_none());
    assert!(!view.cached());
    assert!(view.sections().is_empty());
}
