//! Aggregated market insights: summary statistics plus server-ranked lists.

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::models::stock::StockRecord;

/// Market-wide aggregates reported alongside the ranked lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_market_cap: f64,
    pub average_pe_ratio: f64,
    pub average_volume: f64,
}

/// Average daily change of one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorChange {
    pub sector: String,
    /// Mean `change_percent` across the sector's stocks.
    pub change: f64,
}

/// Named ranked list inside an [`InsightsBundle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    TopBullish,
    TopBearish,
    BestShortTerm,
    BestMediumTerm,
    BestLongTerm,
    Overpriced,
    Underpriced,
    VolumeLeaders,
    MomentumStocks,
    DividendStocks,
    GrowthStocks,
    TopPositiveMovers,
    TopNegativeMovers,
    AllStocks,
}

impl InsightCategory {
    /// Display order used by the insights page.
    pub const ALL: [InsightCategory; 14] = [
        InsightCategory::TopBullish,
        InsightCategory::TopBearish,
        InsightCategory::BestShortTerm,
        InsightCategory::BestMediumTerm,
        InsightCategory::BestLongTerm,
        InsightCategory::Overpriced,
        InsightCategory::Underpriced,
        InsightCategory::VolumeLeaders,
        InsightCategory::MomentumStocks,
        InsightCategory::DividendStocks,
        InsightCategory::GrowthStocks,
        InsightCategory::TopPositiveMovers,
        InsightCategory::TopNegativeMovers,
        InsightCategory::AllStocks,
    ];

    /// Payload keys, most current first.
    pub const fn payload_keys(self) -> &'static [&'static str] {
        match self {
            InsightCategory::TopBullish => &["top_bullish"],
            InsightCategory::TopBearish => &["top_bearish"],
            InsightCategory::BestShortTerm => &["best_short_term"],
            InsightCategory::BestMediumTerm => &["best_medium_term"],
            InsightCategory::BestLongTerm => &["best_long_term"],
            InsightCategory::Overpriced => &["overpriced"],
            InsightCategory::Underpriced => &["underpriced"],
            InsightCategory::VolumeLeaders => &["volume_leaders"],
            InsightCategory::MomentumStocks => &["momentum_stocks"],
            InsightCategory::DividendStocks => &["dividend_stocks"],
            InsightCategory::GrowthStocks => &["growth_stocks"],
            InsightCategory::TopPositiveMovers => &["top_positive_movers", "top_positive_change"],
            InsightCategory::TopNegativeMovers => &["top_negative_movers", "top_negative_change"],
            InsightCategory::AllStocks => &["all_stocks"],
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            InsightCategory::TopBullish => "Top Bullish Stocks",
            InsightCategory::TopBearish => "Top Bearish Stocks",
            InsightCategory::BestShortTerm => "Best Short Term (1 Week)",
            InsightCategory::BestMediumTerm => "Best Medium Term (1 Month)",
            InsightCategory::BestLongTerm => "Best Long Term (1 Year)",
            InsightCategory::Overpriced => "Overpriced Stocks",
            InsightCategory::Underpriced => "Underpriced Stocks",
            InsightCategory::VolumeLeaders => "Volume Leaders",
            InsightCategory::MomentumStocks => "Momentum Stocks",
            InsightCategory::DividendStocks => "Dividend Stocks",
            InsightCategory::GrowthStocks => "Growth Stocks",
            InsightCategory::TopPositiveMovers => "Top Positive Movers",
            InsightCategory::TopNegativeMovers => "Top Negative Movers",
            InsightCategory::AllStocks => "All Stocks",
        }
    }
}

/// The insights endpoint's payload after normalization.
///
/// Rankings are produced server-side; the client never re-sorts these lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsBundle {
    /// Generation time as reported by the server, verbatim.
    pub timestamp: String,
    pub total_stocks: u64,
    pub market_overview: MarketOverview,
    /// One entry per [`InsightCategory`], in [`InsightCategory::ALL`] order.
    #[serde(flatten)]
    pub lists: IndexMap<InsightCategory, Vec<StockRecord>>,
    pub top_sectors_change: Vec<SectorChange>,
}

impl InsightsBundle {
    /// An empty bundle stamped with the current time.
    pub fn empty() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            total_stocks: 0,
            market_overview: MarketOverview::default(),
            lists: InsightCategory::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
            top_sectors_change: Vec::new(),
        }
    }

    pub fn list(&self, category: InsightCategory) -> &[StockRecord] {
        self.lists.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parses [`timestamp`](Self::timestamp).
    ///
    /// The server emits naive ISO-8601 (`2025-03-01T10:15:30.123456`); RFC 3339
    /// with an offset is accepted as well. Naive values are taken as UTC.
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn generated_at_accepts_naive_and_offset_timestamps() {
        let mut bundle = InsightsBundle::empty();
        bundle.timestamp = "2025-03-01T10:15:30.123456".into();
        let at = bundle.generated_at().unwrap();
        assert_eq!((at.year(), at.month(), at.day(), at.hour()), (2025, 3, 1, 10));

        bundle.timestamp = "2025-03-01T10:15:30+02:00".into();
        assert_eq!(bundle.generated_at().unwrap().hour(), 8);

        bundle.timestamp = "yesterday".into();
        assert!(bundle.generated_at().is_none());
    }

    #[test]
    fn empty_bundle_has_every_category() {
        let bundle = InsightsBundle::empty();
        assert_eq!(bundle.lists.len(), InsightCategory::ALL.len());
        assert!(bundle.list(InsightCategory::VolumeLeaders).is_empty());
        assert!(bundle.generated_at().is_some());
    }
}
