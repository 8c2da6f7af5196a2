//! Candidate-key tables for [`StockRecord`](crate::models::stock::StockRecord).
//!
//! Each canonical field lists the raw keys to try, in priority order:
//! upstream human-readable labels first, the canonical snake_case key last.

use crate::models::stock::{
    DEFAULT_COUNTRY, DEFAULT_CURRENCY, DEFAULT_EXCHANGE, MISSING_SYMBOL, StockField, UNKNOWN,
};

/// Raw keys for a numeric [`StockField`].
pub const fn numeric_keys(field: StockField) -> &'static [&'static str] {
    match field {
        StockField::Price => &["Price", "price"],
        StockField::ChangePercent => &["Change %", "change_percent"],
        StockField::Volume => &["Volume", "volume"],
        StockField::MarketCapitalization => &["Market Capitalization", "market_capitalization"],
        StockField::PriceToEarningsRatioTtm => {
            &["Price to Earnings Ratio (TTM)", "price_to_earnings_ratio_ttm"]
        }
        StockField::PriceToBookMrq => &["Price to Book (MRQ)", "price_to_book_mrq"],
        StockField::TechnicalRating => &["Technical Rating", "technical_rating"],
        StockField::WeeklyPerformance => {
            &["Weekly Performance", "Performance (Week)", "weekly_performance"]
        }
        StockField::MonthlyPerformance => {
            &["Monthly Performance", "Performance (Month)", "monthly_performance"]
        }
        StockField::YearlyPerformance => {
            &["Yearly Performance", "Performance (Year)", "yearly_performance"]
        }
        StockField::DividendYieldForward => &["Dividend Yield Forward", "dividend_yield_forward"],
        StockField::DividendsPerShareFy => &["Dividends per Share (FY)", "dividends_per_share_fy"],
        StockField::RelativeVolume => &["Relative Volume", "relative_volume"],
        StockField::Momentum10 => &["Momentum (10)", "momentum_10"],
        StockField::RelativeStrengthIndex7 => {
            &["Relative Strength Index (7)", "relative_strength_index_7"]
        }
        StockField::RevenueTtmYoyGrowth => &["Revenue (TTM YoY Growth)", "revenue_ttm_yoy_growth"],
        StockField::EpsDilutedTtmYoyGrowth => {
            &["EPS Diluted (TTM YoY Growth)", "eps_diluted_ttm_yoy_growth"]
        }
        StockField::ReturnOnEquityTtm => &["Return on Equity (TTM)", "return_on_equity_ttm"],
        StockField::Change1mPercent => &["Change 1M, %", "change_1m_percent"],
    }
}

/// A string column: candidate keys plus the sentinel used when all are blank.
#[derive(Debug, Clone, Copy)]
pub struct TextField {
    pub keys: &'static [&'static str],
    pub default: &'static str,
}

pub const SYMBOL: TextField = TextField { keys: &["Symbol", "symbol"], default: MISSING_SYMBOL };
pub const NAME: TextField = TextField { keys: &["Name", "name"], default: UNKNOWN };
pub const SECTOR: TextField = TextField { keys: &["Sector", "sector"], default: UNKNOWN };
pub const INDUSTRY: TextField = TextField { keys: &["Industry", "industry"], default: UNKNOWN };
pub const COUNTRY: TextField = TextField { keys: &["Country", "country"], default: DEFAULT_COUNTRY };
pub const CURRENCY: TextField =
    TextField { keys: &["Currency", "currency"], default: DEFAULT_CURRENCY };
pub const EXCHANGE: TextField =
    TextField { keys: &["Exchange", "exchange"], default: DEFAULT_EXCHANGE };

/// Optional text carried only by the detail payload, as `(canonical, label)`.
pub const DETAIL_TEXT: &[(&str, &str)] = &[
    ("description", "Description"),
    ("submarket", "Submarket"),
    ("subtype", "Subtype"),
    ("type_field", "Type"),
    ("logoid", "LogoID"),
];
