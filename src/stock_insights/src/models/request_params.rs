use serde::{Deserialize, Serialize};

/// Server-side filters accepted by the list endpoint.
///
/// Every field is optional; only set fields are sent as query parameters.
/// The server matches `sector`, `industry` and `search` as case-insensitive
/// substrings, unlike the exact matching done by
/// [`StockListView`](crate::views::listing::StockListView).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StockListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_market_cap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl StockListParams {
    /// Builds the `(key, value)` query pairs, skipping unset and blank fields.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        let text = [
            ("sector", &self.sector),
            ("industry", &self.industry),
        ];
        for (key, value) in text {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                query.push((key, v.to_string()));
            }
        }
        if let Some(v) = self.min_market_cap {
            query.push(("min_market_cap", v.to_string()));
        }
        if let Some(v) = self.max_market_cap {
            query.push(("max_market_cap", v.to_string()));
        }
        if let Some(v) = self.search.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            query.push(("search", v.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_set_fields_become_query_pairs() {
        assert!(StockListParams::default().to_query().is_empty());

        let params = StockListParams {
            sector: Some("Industrials".into()),
            industry: Some("  ".into()),
            min_market_cap: Some(1e9),
            search: Some("comi".into()),
            ..Default::default()
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("sector", "Industrials".to_string()),
                ("min_market_cap", "1000000000".to_string()),
                ("search", "comi".to_string()),
            ]
        );
    }
}
