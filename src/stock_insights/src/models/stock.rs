//! Canonical in-memory representation of a listed stock.
//!
//! Every record that crosses the [`StockDataSource`](crate::providers::StockDataSource)
//! boundary has been through the [normalizer](crate::normalize), so numeric
//! fields are always finite and string fields are never blank.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Sentinel used when a record carries no symbol.
pub const MISSING_SYMBOL: &str = "N/A";
/// Sentinel used for absent name, sector and industry.
pub const UNKNOWN: &str = "Unknown";
/// Default country for EGX listings.
pub const DEFAULT_COUNTRY: &str = "Egypt";
/// Default quote currency.
pub const DEFAULT_CURRENCY: &str = "EGP";
/// Default exchange code.
pub const DEFAULT_EXCHANGE: &str = "EGX";

/// A single stock as shown in listings and ranked insight lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Ticker symbol (e.g., "COMI"). Unique key within a listing.
    pub symbol: String,
    /// Company name.
    pub name: String,

    pub price: f64,
    pub change_percent: f64,
    pub volume: f64,
    pub market_capitalization: f64,
    pub price_to_earnings_ratio_ttm: f64,
    pub price_to_book_mrq: f64,
    /// Aggregate technical rating, roughly -2 (strong sell) to 2 (strong buy).
    pub technical_rating: f64,
    pub weekly_performance: f64,
    pub monthly_performance: f64,
    pub yearly_performance: f64,
    pub dividend_yield_forward: f64,
    pub dividends_per_share_fy: f64,
    pub relative_volume: f64,
    pub momentum_10: f64,
    pub relative_strength_index_7: f64,
    pub revenue_ttm_yoy_growth: f64,
    pub eps_diluted_ttm_yoy_growth: f64,
    pub return_on_equity_ttm: f64,
    pub change_1m_percent: f64,

    pub sector: String,
    pub industry: String,
    pub country: String,
    pub currency: String,
    pub exchange: String,
}

impl Default for StockRecord {
    fn default() -> Self {
        Self {
            symbol: MISSING_SYMBOL.into(),
            name: UNKNOWN.into(),
            price: 0.0,
            change_percent: 0.0,
            volume: 0.0,
            market_capitalization: 0.0,
            price_to_earnings_ratio_ttm: 0.0,
            price_to_book_mrq: 0.0,
            technical_rating: 0.0,
            weekly_performance: 0.0,
            monthly_performance: 0.0,
            yearly_performance: 0.0,
            dividend_yield_forward: 0.0,
            dividends_per_share_fy: 0.0,
            relative_volume: 0.0,
            momentum_10: 0.0,
            relative_strength_index_7: 0.0,
            revenue_ttm_yoy_growth: 0.0,
            eps_diluted_ttm_yoy_growth: 0.0,
            return_on_equity_ttm: 0.0,
            change_1m_percent: 0.0,
            sector: UNKNOWN.into(),
            industry: UNKNOWN.into(),
            country: DEFAULT_COUNTRY.into(),
            currency: DEFAULT_CURRENCY.into(),
            exchange: DEFAULT_EXCHANGE.into(),
        }
    }
}

impl StockRecord {
    /// Reads a numeric field by its [`StockField`] key.
    pub fn numeric(&self, field: StockField) -> f64 {
        match field {
            StockField::Price => self.price,
            StockField::ChangePercent => self.change_percent,
            StockField::Volume => self.volume,
            StockField::MarketCapitalization => self.market_capitalization,
            StockField::PriceToEarningsRatioTtm => self.price_to_earnings_ratio_ttm,
            StockField::PriceToBookMrq => self.price_to_book_mrq,
            StockField::TechnicalRating => self.technical_rating,
            StockField::WeeklyPerformance => self.weekly_performance,
            StockField::MonthlyPerformance => self.monthly_performance,
            StockField::YearlyPerformance => self.yearly_performance,
            StockField::DividendYieldForward => self.dividend_yield_forward,
            StockField::DividendsPerShareFy => self.dividends_per_share_fy,
            StockField::RelativeVolume => self.relative_volume,
            StockField::Momentum10 => self.momentum_10,
            StockField::RelativeStrengthIndex7 => self.relative_strength_index_7,
            StockField::RevenueTtmYoyGrowth => self.revenue_ttm_yoy_growth,
            StockField::EpsDilutedTtmYoyGrowth => self.eps_diluted_ttm_yoy_growth,
            StockField::ReturnOnEquityTtm => self.return_on_equity_ttm,
            StockField::Change1mPercent => self.change_1m_percent,
        }
    }

    pub(crate) fn numeric_mut(&mut self, field: StockField) -> &mut f64 {
        match field {
            StockField::Price => &mut self.price,
            StockField::ChangePercent => &mut self.change_percent,
            StockField::Volume => &mut self.volume,
            StockField::MarketCapitalization => &mut self.market_capitalization,
            StockField::PriceToEarningsRatioTtm => &mut self.price_to_earnings_ratio_ttm,
            StockField::PriceToBookMrq => &mut self.price_to_book_mrq,
            StockField::TechnicalRating => &mut self.technical_rating,
            StockField::WeeklyPerformance => &mut self.weekly_performance,
            StockField::MonthlyPerformance => &mut self.monthly_performance,
            StockField::YearlyPerformance => &mut self.yearly_performance,
            StockField::DividendYieldForward => &mut self.dividend_yield_forward,
            StockField::DividendsPerShareFy => &mut self.dividends_per_share_fy,
            StockField::RelativeVolume => &mut self.relative_volume,
            StockField::Momentum10 => &mut self.momentum_10,
            StockField::RelativeStrengthIndex7 => &mut self.relative_strength_index_7,
            StockField::RevenueTtmYoyGrowth => &mut self.revenue_ttm_yoy_growth,
            StockField::EpsDilutedTtmYoyGrowth => &mut self.eps_diluted_ttm_yoy_growth,
            StockField::ReturnOnEquityTtm => &mut self.return_on_equity_ttm,
            StockField::Change1mPercent => &mut self.change_1m_percent,
        }
    }
}

/// Numeric columns of a [`StockRecord`].
///
/// The snake_case name of each variant is also the canonical JSON key, and
/// is what the CLI accepts for `--sort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockField {
    Price,
    ChangePercent,
    Volume,
    MarketCapitalization,
    PriceToEarningsRatioTtm,
    PriceToBookMrq,
    TechnicalRating,
    WeeklyPerformance,
    MonthlyPerformance,
    YearlyPerformance,
    DividendYieldForward,
    DividendsPerShareFy,
    RelativeVolume,
    #[serde(rename = "momentum_10")]
    Momentum10,
    #[serde(rename = "relative_strength_index_7")]
    RelativeStrengthIndex7,
    RevenueTtmYoyGrowth,
    EpsDilutedTtmYoyGrowth,
    ReturnOnEquityTtm,
    #[serde(rename = "change_1m_percent")]
    Change1mPercent,
}

impl StockField {
    pub const ALL: [StockField; 19] = [
        StockField::Price,
        StockField::ChangePercent,
        StockField::Volume,
        StockField::MarketCapitalization,
        StockField::PriceToEarningsRatioTtm,
        StockField::PriceToBookMrq,
        StockField::TechnicalRating,
        StockField::WeeklyPerformance,
        StockField::MonthlyPerformance,
        StockField::YearlyPerformance,
        StockField::DividendYieldForward,
        StockField::DividendsPerShareFy,
        StockField::RelativeVolume,
        StockField::Momentum10,
        StockField::RelativeStrengthIndex7,
        StockField::RevenueTtmYoyGrowth,
        StockField::EpsDilutedTtmYoyGrowth,
        StockField::ReturnOnEquityTtm,
        StockField::Change1mPercent,
    ];

    /// Canonical snake_case key.
    pub const fn key(self) -> &'static str {
        match self {
            StockField::Price => "price",
            StockField::ChangePercent => "change_percent",
            StockField::Volume => "volume",
            StockField::MarketCapitalization => "market_capitalization",
            StockField::PriceToEarningsRatioTtm => "price_to_earnings_ratio_ttm",
            StockField::PriceToBookMrq => "price_to_book_mrq",
            StockField::TechnicalRating => "technical_rating",
            StockField::WeeklyPerformance => "weekly_performance",
            StockField::MonthlyPerformance => "monthly_performance",
            StockField::YearlyPerformance => "yearly_performance",
            StockField::DividendYieldForward => "dividend_yield_forward",
            StockField::DividendsPerShareFy => "dividends_per_share_fy",
            StockField::RelativeVolume => "relative_volume",
            StockField::Momentum10 => "momentum_10",
            StockField::RelativeStrengthIndex7 => "relative_strength_index_7",
            StockField::RevenueTtmYoyGrowth => "revenue_ttm_yoy_growth",
            StockField::EpsDilutedTtmYoyGrowth => "eps_diluted_ttm_yoy_growth",
            StockField::ReturnOnEquityTtm => "return_on_equity_ttm",
            StockField::Change1mPercent => "change_1m_percent",
        }
    }
}

impl fmt::Display for StockField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a string names no known [`StockField`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stock field: {0}")]
pub struct UnknownFieldError(pub String);

impl FromStr for StockField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StockField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}
