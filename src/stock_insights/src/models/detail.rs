//! Extended per-symbol view returned by the detail endpoint.
//!
//! A [`StockDetail`] is a [`StockRecord`] plus a long tail of optional numeric
//! metrics. Rather than one struct field per metric, the tail is driven by the
//! [`DETAIL_METRICS`] table: every entry names the canonical key, the
//! human-readable label the upstream screener uses, and the display group.
//! The normalizer walks the table in order, so [`StockDetail::metrics`]
//! preserves table order.

use indexmap::IndexMap;
use serde::Serialize;

use crate::models::stock::StockRecord;

/// Display section a detail metric belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricGroup {
    Price,
    Volume,
    Performance,
    Extremes,
    Size,
    Valuation,
    Earnings,
    Growth,
    Profitability,
    Returns,
    Debt,
    Dividends,
    Oscillators,
    MovingAverages,
    Bands,
    Volatility,
    Ratings,
}

impl MetricGroup {
    /// Display order on the detail page.
    pub const ALL: [MetricGroup; 17] = [
        MetricGroup::Price,
        MetricGroup::Volume,
        MetricGroup::Performance,
        MetricGroup::Extremes,
        MetricGroup::Size,
        MetricGroup::Valuation,
        MetricGroup::Earnings,
        MetricGroup::Growth,
        MetricGroup::Profitability,
        MetricGroup::Returns,
        MetricGroup::Debt,
        MetricGroup::Dividends,
        MetricGroup::Oscillators,
        MetricGroup::MovingAverages,
        MetricGroup::Bands,
        MetricGroup::Volatility,
        MetricGroup::Ratings,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            MetricGroup::Price => "Price",
            MetricGroup::Volume => "Volume",
            MetricGroup::Performance => "Performance",
            MetricGroup::Extremes => "Highs & Lows",
            MetricGroup::Size => "Size",
            MetricGroup::Valuation => "Valuation",
            MetricGroup::Earnings => "Earnings",
            MetricGroup::Growth => "Growth",
            MetricGroup::Profitability => "Profitability",
            MetricGroup::Returns => "Returns",
            MetricGroup::Debt => "Debt",
            MetricGroup::Dividends => "Dividends",
            MetricGroup::Oscillators => "Oscillators",
            MetricGroup::MovingAverages => "Moving Averages",
            MetricGroup::Bands => "Bands & Clouds",
            MetricGroup::Volatility => "Volatility & Flow",
            MetricGroup::Ratings => "Ratings",
        }
    }
}

/// One row of the detail metric table.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    /// Canonical snake_case key.
    pub key: &'static str,
    /// Upstream human-readable column label, tried before `key`.
    pub label: &'static str,
    pub group: MetricGroup,
}

const fn m(key: &'static str, label: &'static str, group: MetricGroup) -> MetricSpec {
    MetricSpec { key, label, group }
}

use MetricGroup as G;

/// Extended numeric metrics carried by the detail payload.
///
/// Fields already present on [`StockRecord`] are not repeated here.
pub const DETAIL_METRICS: &[MetricSpec] = &[
    m("open_price", "Open", G::Price),
    m("high", "High", G::Price),
    m("low", "Low", G::Price),
    m("close_price", "Close", G::Price),
    m("change", "Change", G::Price),
    m("change_from_open", "Change from Open", G::Price),
    m("change_from_open_percent", "Change from Open %", G::Price),
    m("gap_percent", "Gap %", G::Price),
    m("volume_price", "Volume Price", G::Volume),
    m("volume_weighted_average_price", "Volume Weighted Average Price", G::Volume),
    m("relative_volume_at_time", "Relative Volume at Time", G::Volume),
    m("ytd_performance", "Performance (YTD)", G::Performance),
    m("three_month_performance", "Performance (3M)", G::Performance),
    m("six_month_performance", "Performance (6M)", G::Performance),
    m("five_year_performance", "Performance (5Y)", G::Performance),
    m("all_time_performance", "Performance (All)", G::Performance),
    m("all_time_high", "All Time High", G::Extremes),
    m("all_time_low", "All Time Low", G::Extremes),
    m("fifty_two_week_high", "52W High", G::Extremes),
    m("fifty_two_week_low", "52W Low", G::Extremes),
    m("one_month_high", "1M High", G::Extremes),
    m("one_month_low", "1M Low", G::Extremes),
    m("three_month_high", "3M High", G::Extremes),
    m("three_month_low", "3M Low", G::Extremes),
    m("six_month_high", "6M High", G::Extremes),
    m("six_month_low", "6M Low", G::Extremes),
    m("enterprise_value", "Enterprise Value", G::Size),
    m("shares_outstanding", "Shares Outstanding", G::Size),
    m("shares_float", "Shares Float", G::Size),
    m("price_to_book_fy", "Price to Book (FY)", G::Valuation),
    m("price_to_sales_fy", "Price to Sales (FY)", G::Valuation),
    m("price_to_revenue_ratio_ttm", "Price to Revenue Ratio (TTM)", G::Valuation),
    m("price_to_free_cash_flow_ttm", "Price to Free Cash Flow (TTM)", G::Valuation),
    m("enterprise_value_ebitda_ttm", "Enterprise Value EBITDA (TTM)", G::Valuation),
    m("basic_eps_fy", "Basic EPS (FY)", G::Earnings),
    m("basic_eps_ttm", "Basic EPS (TTM)", G::Earnings),
    m("eps_diluted_fy", "EPS Diluted (FY)", G::Earnings),
    m("eps_diluted_mrq", "EPS Diluted (MRQ)", G::Earnings),
    m("eps_diluted_ttm", "EPS Diluted (TTM)", G::Earnings),
    m("eps_forecast_mrq", "EPS Forecast (MRQ)", G::Earnings),
    m("revenue_annual_yoy_growth", "Revenue (Annual YoY Growth)", G::Growth),
    m("revenue_quarterly_qoq_growth", "Revenue (Quarterly QoQ Growth)", G::Growth),
    m("revenue_quarterly_yoy_growth", "Revenue (Quarterly YoY Growth)", G::Growth),
    m("eps_diluted_annual_yoy_growth", "EPS Diluted (Annual YoY Growth)", G::Growth),
    m("eps_diluted_quarterly_qoq_growth", "EPS Diluted (Quarterly QoQ Growth)", G::Growth),
    m("eps_diluted_quarterly_yoy_growth", "EPS Diluted (Quarterly YoY Growth)", G::Growth),
    m("ebitda_annual_yoy_growth", "EBITDA (Annual YoY Growth)", G::Growth),
    m("ebitda_quarterly_qoq_growth", "EBITDA (Quarterly QoQ Growth)", G::Growth),
    m("ebitda_quarterly_yoy_growth", "EBITDA (Quarterly YoY Growth)", G::Growth),
    m("ebitda_ttm_yoy_growth", "EBITDA (TTM YoY Growth)", G::Growth),
    m("gross_margin_fy", "Gross Margin (FY)", G::Profitability),
    m("gross_margin_ttm", "Gross Margin (TTM)", G::Profitability),
    m("operating_margin_fy", "Operating Margin (FY)", G::Profitability),
    m("operating_margin_ttm", "Operating Margin (TTM)", G::Profitability),
    m("net_margin_fy", "Net Margin (FY)", G::Profitability),
    m("net_margin_ttm", "Net Margin (TTM)", G::Profitability),
    m("pretax_margin_ttm", "Pretax Margin (TTM)", G::Profitability),
    m("free_cash_flow_margin_fy", "Free Cash Flow Margin (FY)", G::Profitability),
    m("free_cash_flow_margin_ttm", "Free Cash Flow Margin (TTM)", G::Profitability),
    m("return_on_assets_ttm", "Return on Assets (TTM)", G::Returns),
    m("return_on_invested_capital_ttm", "Return on Invested Capital (TTM)", G::Returns),
    m("debt_to_equity_ratio_mrq", "Debt to Equity Ratio (MRQ)", G::Debt),
    m("current_ratio_mrq", "Current Ratio (MRQ)", G::Debt),
    m("quick_ratio_mrq", "Quick Ratio (MRQ)", G::Debt),
    m("dividends_per_share_mrq", "Dividends per Share (MRQ)", G::Dividends),
    m("dividends_per_share_annual_yoy_growth", "Dividends per Share (Annual YoY Growth)", G::Dividends),
    m("dividends_paid_fy", "Dividends Paid (FY)", G::Dividends),
    m("relative_strength_index_14", "Relative Strength Index (14)", G::Oscillators),
    m("macd_level_12_26", "MACD Level (12, 26)", G::Oscillators),
    m("macd_signal_12_26", "MACD Signal (12, 26)", G::Oscillators),
    m("stochastic_k_14_3_3", "Stochastic %K (14, 3, 3)", G::Oscillators),
    m("stochastic_d_14_3_3", "Stochastic %D (14, 3, 3)", G::Oscillators),
    m("stochastic_rsi_fast_3_3_14_14", "Stochastic RSI Fast (3, 3, 14, 14)", G::Oscillators),
    m("stochastic_rsi_slow_3_3_14_14", "Stochastic RSI Slow (3, 3, 14, 14)", G::Oscillators),
    m("williams_percent_range_14", "Williams Percent Range (14)", G::Oscillators),
    m("average_directional_index_14", "Average Directional Index (14)", G::Oscillators),
    m("positive_directional_indicator_14", "Positive Directional Indicator (14)", G::Oscillators),
    m("negative_directional_indicator_14", "Negative Directional Indicator (14)", G::Oscillators),
    m("commodity_channel_index_20", "Commodity Channel Index (20)", G::Oscillators),
    m("ultimate_oscillator_7_14_28", "Ultimate Oscillator (7, 14, 28)", G::Oscillators),
    m("awesome_oscillator", "Awesome Oscillator", G::Oscillators),
    m("rate_of_change_9", "Rate of Change (9)", G::Oscillators),
    m("bull_bear_power", "Bull Bear Power", G::Oscillators),
    m("simple_moving_average_5", "Simple Moving Average (5)", G::MovingAverages),
    m("simple_moving_average_10", "Simple Moving Average (10)", G::MovingAverages),
    m("simple_moving_average_20", "Simple Moving Average (20)", G::MovingAverages),
    m("simple_moving_average_30", "Simple Moving Average (30)", G::MovingAverages),
    m("simple_moving_average_50", "Simple Moving Average (50)", G::MovingAverages),
    m("simple_moving_average_100", "Simple Moving Average (100)", G::MovingAverages),
    m("simple_moving_average_200", "Simple Moving Average (200)", G::MovingAverages),
    m("exponential_moving_average_5", "Exponential Moving Average (5)", G::MovingAverages),
    m("exponential_moving_average_10", "Exponential Moving Average (10)", G::MovingAverages),
    m("exponential_moving_average_20", "Exponential Moving Average (20)", G::MovingAverages),
    m("exponential_moving_average_30", "Exponential Moving Average (30)", G::MovingAverages),
    m("exponential_moving_average_50", "Exponential Moving Average (50)", G::MovingAverages),
    m("exponential_moving_average_100", "Exponential Moving Average (100)", G::MovingAverages),
    m("exponential_moving_average_200", "Exponential Moving Average (200)", G::MovingAverages),
    m("hull_moving_average_9", "Hull Moving Average (9)", G::MovingAverages),
    m("volume_weighted_moving_average_20", "Volume Weighted Moving Average (20)", G::MovingAverages),
    m("bollinger_upper_band_20", "Bollinger Upper Band (20)", G::Bands),
    m("bollinger_lower_band_20", "Bollinger Lower Band (20)", G::Bands),
    m("ichimoku_conversion_line_9_26_52_26", "Ichimoku Conversion Line (9, 26, 52, 26)", G::Bands),
    m("ichimoku_base_line_9_26_52_26", "Ichimoku Base Line (9, 26, 52, 26)", G::Bands),
    m("ichimoku_leading_span_a_9_26_52_26", "Ichimoku Leading Span A (9, 26, 52, 26)", G::Bands),
    m("ichimoku_leading_span_b_9_26_52_26", "Ichimoku Leading Span B (9, 26, 52, 26)", G::Bands),
    m("parabolic_sar", "Parabolic SAR", G::Volatility),
    m("average_true_range_14", "Average True Range (14)", G::Volatility),
    m("average_day_range_14", "Average Day Range (14)", G::Volatility),
    m("volatility", "Volatility", G::Volatility),
    m("volatility_week", "Volatility Week", G::Volatility),
    m("volatility_month", "Volatility Month", G::Volatility),
    m("aroon_up_14", "Aroon Up (14)", G::Volatility),
    m("aroon_down_14", "Aroon Down (14)", G::Volatility),
    m("money_flow_14", "Money Flow (14)", G::Volatility),
    m("chaikin_money_flow_20", "Chaikin Money Flow (20)", G::Volatility),
    m("oscillators_rating", "Oscillators Rating", G::Ratings),
    m("moving_averages_rating", "Moving Averages Rating", G::Ratings),
    m("one_year_beta", "1 Year Beta", G::Ratings),
];

/// Looks up a metric definition by canonical key.
pub fn metric_spec(key: &str) -> Option<&'static MetricSpec> {
    DETAIL_METRICS.iter().find(|spec| spec.key == key)
}

/// Full detail for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockDetail {
    #[serde(flatten)]
    pub stock: StockRecord,

    /// Extended metrics keyed by canonical key, in [`DETAIL_METRICS`] order.
    /// Every table entry is present; missing values are 0.
    #[serde(flatten)]
    pub metrics: IndexMap<&'static str, f64>,

    pub description: Option<String>,
    pub submarket: Option<String>,
    pub subtype: Option<String>,
    pub type_field: Option<String>,
    pub logoid: Option<String>,

    pub is_bullish: Option<bool>,
    pub is_undervalued: Option<bool>,
    pub is_growth_stock: Option<bool>,

    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl StockDetail {
    /// Reads an extended metric by canonical key. Unknown keys read as 0.
    pub fn metric(&self, key: &str) -> f64 {
        self.metrics.get(key).copied().unwrap_or(0.0)
    }

    /// Extended metrics of one group, in table order.
    pub fn group(&self, group: MetricGroup) -> impl Iterator<Item = (&'static MetricSpec, f64)> + '_ {
        DETAIL_METRICS
            .iter()
            .filter(move |spec| spec.group == group)
            .map(|spec| (spec, self.metric(spec.key)))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::stock::StockField;

    #[test]
    fn metric_keys_are_unique_and_disjoint_from_record_fields() {
        let mut seen = HashSet::new();
        for spec in DETAIL_METRICS {
            assert!(seen.insert(spec.key), "duplicate metric key {}", spec.key);
            assert!(
                spec.key.parse::<StockField>().is_err(),
                "{} is already a StockRecord field",
                spec.key
            );
        }
    }

    #[test]
    fn metric_spec_lookup() {
        let spec = metric_spec("fifty_two_week_high").unwrap();
        assert_eq!(spec.label, "52W High");
        assert_eq!(spec.group, MetricGroup::Extremes);
        assert!(metric_spec("nope").is_none());
    }
}
