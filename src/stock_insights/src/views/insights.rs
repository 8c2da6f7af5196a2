use crate::{
    models::{
        insights::{InsightCategory, InsightsBundle},
        stock::StockRecord,
    },
    providers::StockDataSource,
    views::load_state::LoadState,
};

/// Insights page state. Lists are displayed in server order.
#[derive(Debug, Clone)]
pub struct InsightsView {
    state: LoadState<InsightsBundle>,
    cached: bool,
}

impl Default for InsightsView {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightsView {
    pub fn new() -> Self {
        Self {
            state: LoadState::new("Failed to load insights"),
            cached: false,
        }
    }

    pub fn state(&self) -> &LoadState<InsightsBundle> {
        &self.state
    }

    pub fn bundle(&self) -> Option<&InsightsBundle> {
        self.state.data()
    }

    /// Whether the loaded bundle came from the API's cache.
    pub fn cached(&self) -> bool {
        self.cached
    }

    /// Non-empty categories in display order.
    pub fn sections(&self) -> Vec<(InsightCategory, &[StockRecord])> {
        let Some(bundle) = self.bundle() else {
            return Vec::new();
        };
        InsightCategory::ALL
            .into_iter()
            .map(|category| (category, bundle.list(category)))
            .filter(|(_, list)| !list.is_empty())
            .collect()
    }

    pub async fn load(&mut self, source: &dyn StockDataSource) -> bool {
        let ticket = self.state.begin();
        let result = source.fetch_insights().await;
        self.cached = matches!(&result, Ok(fetched) if fetched.cached);
        self.state.complete(ticket, result.map(|fetched| fetched.data))
    }
}
