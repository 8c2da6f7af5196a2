//! Raw payload → canonical record normalization.
//!
//! The API is inconsistent about naming: the insights endpoint forwards the
//! upstream screener's column labels ("Price to Earnings Ratio (TTM)"), while
//! the list and detail endpoints emit snake_case (`price_to_earnings_ratio_ttm`).
//! Values may be numbers, numeric strings, `null`, or missing entirely.
//!
//! Rules:
//! - For every canonical field, candidate keys are tried in order (see
//!   [`fields`]). A candidate is usable when present, not `null`, and not an
//!   empty string.
//! - Numbers go through [`coerce_number`]: anything unparseable or
//!   non-finite becomes exactly `0.0`.
//! - Text is trimmed; blank text falls through to the next candidate and
//!   finally to the field's sentinel. Booleans are never text.
//! - A numeric `0` is a usable value; it does not fall through.
//! - Insight lists take the first key holding an array, even an empty one.
//!
//! Every function here is pure.

pub mod fields;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{
    detail::{DETAIL_METRICS, StockDetail},
    insights::{InsightCategory, InsightsBundle, MarketOverview, SectorChange},
    stock::{StockField, StockRecord},
};

use self::fields::{DETAIL_TEXT, TextField};

static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

fn as_object(raw: &Value) -> &Map<String, Value> {
    raw.as_object().unwrap_or(&*EMPTY)
}

/// Returns the first usable value among `keys`.
pub fn pick<'a>(raw: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| raw.get(*k)).find(|v| is_usable(v))
}

fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Coerces a raw JSON value to a finite `f64`, defaulting to `0.0`.
///
/// Strings are parsed leniently from their longest numeric prefix, so
/// `"12.5"` and `"3.2%"` both work while `"abc"` yields `0.0`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_float(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Parses the longest prefix of `s` (after leading whitespace) that forms a
/// decimal float: optional sign, digits with an optional fraction, optional
/// exponent.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    // exponent only counts if at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Coerces a raw value to trimmed, non-blank text.
fn coerce_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn text(raw: &Map<String, Value>, field: TextField) -> String {
    optional_text(raw, field.keys).unwrap_or_else(|| field.default.to_string())
}

fn optional_text(raw: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| raw.get(*k))
        .find_map(coerce_text)
}

fn optional_bool(raw: &Map<String, Value>, key: &str) -> Option<bool> {
    match raw.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Normalizes one raw listing record. Non-object input yields a record of defaults.
pub fn normalize_record(raw: &Value) -> StockRecord {
    normalize_object(as_object(raw))
}

fn normalize_object(raw: &Map<String, Value>) -> StockRecord {
    let mut record = StockRecord {
        symbol: text(raw, fields::SYMBOL),
        name: text(raw, fields::NAME),
        sector: text(raw, fields::SECTOR),
        industry: text(raw, fields::INDUSTRY),
        country: text(raw, fields::COUNTRY),
        currency: text(raw, fields::CURRENCY),
        exchange: text(raw, fields::EXCHANGE),
        ..StockRecord::default()
    };
    for field in StockField::ALL {
        *record.numeric_mut(field) = coerce_number(pick(raw, fields::numeric_keys(field)));
    }
    record
}

/// Normalizes a raw list. Anything that is not an array yields an empty list.
pub fn normalize_records(raw: &Value) -> Vec<StockRecord> {
    raw.as_array()
        .map(|items| items.iter().map(normalize_record).collect())
        .unwrap_or_default()
}

/// Normalizes a raw detail payload.
pub fn normalize_detail(raw: &Value) -> StockDetail {
    let obj = as_object(raw);
    let metrics: IndexMap<&'static str, f64> = DETAIL_METRICS
        .iter()
        .map(|spec| (spec.key, coerce_number(pick(obj, &[spec.label, spec.key]))))
        .collect();
    let detail_text = |canonical: &str| {
        DETAIL_TEXT
            .iter()
            .find(|(key, _)| *key == canonical)
            .and_then(|(key, label)| optional_text(obj, &[label, key]))
    };

    StockDetail {
        stock: normalize_object(obj),
        metrics,
        description: detail_text("description"),
        submarket: detail_text("submarket"),
        subtype: detail_text("subtype"),
        type_field: detail_text("type_field"),
        logoid: detail_text("logoid"),
        is_bullish: optional_bool(obj, "is_bullish"),
        is_undervalued: optional_bool(obj, "is_undervalued"),
        is_growth_stock: optional_bool(obj, "is_growth_stock"),
        created_at: optional_text(obj, &["created_at"]),
        updated_at: optional_text(obj, &["updated_at"]),
    }
}

/// Normalizes the insights payload: summary numbers, every ranked list, and
/// the sector change list.
///
/// Missing lists become empty, missing numbers 0, and a missing timestamp is
/// replaced by the current time.
pub fn normalize_insights(raw: &Value) -> InsightsBundle {
    let obj = as_object(raw);
    let mut bundle = InsightsBundle::empty();

    if let Some(ts) = optional_text(obj, &["timestamp"]) {
        bundle.timestamp = ts;
    }
    bundle.total_stocks = coerce_number(obj.get("total_stocks")).max(0.0) as u64;

    let overview = obj.get("market_overview").map(as_object).unwrap_or(&*EMPTY);
    bundle.market_overview = MarketOverview {
        total_market_cap: coerce_number(overview.get("total_market_cap")),
        average_pe_ratio: coerce_number(overview.get("average_pe_ratio")),
        average_volume: coerce_number(overview.get("average_volume")),
    };

    for category in InsightCategory::ALL {
        let list = category
            .payload_keys()
            .iter()
            .filter_map(|k| obj.get(*k))
            .find(|v| v.is_array())
            .map(normalize_records)
            .unwrap_or_default();
        bundle.lists.insert(category, list);
    }

    bundle.top_sectors_change = obj
        .get("top_sectors_change")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(normalize_sector_change).collect())
        .unwrap_or_default();

    debug!(
        total_stocks = bundle.total_stocks,
        sectors = bundle.top_sectors_change.len(),
        "normalized insights payload"
    );
    bundle
}

fn normalize_sector_change(raw: &Value) -> SectorChange {
    let obj = as_object(raw);
    SectorChange {
        sector: optional_text(obj, &["sector", "Sector"]).unwrap_or_else(|| fields::SECTOR.default.to_string()),
        change: coerce_number(pick(obj, &["change", "Change %", "change_percent"])),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numeric_string_and_null_scenario() {
        let record = normalize_record(&json!({"Price": "12.5", "volume": null}));
        assert_eq!(record.price, 12.5);
        assert_eq!(record.volume, 0.0);
    }

    #[test]
    fn missing_or_garbage_numbers_are_zero() {
        let record = normalize_record(&json!({
            "Symbol": "COMI",
            "Change %": "n/a",
            "market_capitalization": "",
            "Technical Rating": true,
            "Momentum (10)": [1, 2],
            "Volume": {"v": 1},
        }));
        for field in StockField::ALL {
            assert_eq!(record.numeric(field), 0.0, "{field} should coerce to 0");
        }
    }

    #[test]
    fn label_key_beats_snake_case() {
        let record = normalize_record(&json!({
            "Market Capitalization": 5e10,
            "market_capitalization": 1.0,
            "Name": "Commercial International Bank",
            "name": "ignored",
        }));
        assert_eq!(record.market_capitalization, 5e10);
        assert_eq!(record.name, "Commercial International Bank");
    }

    #[test]
    fn blank_or_null_label_falls_through_to_snake_case() {
        let record = normalize_record(&json!({
            "Price": null,
            "price": 45.5,
            "Sector": "  ",
            "sector": "Industrials",
        }));
        assert_eq!(record.price, 45.5);
        assert_eq!(record.sector, "Industrials");
    }

    #[test]
    fn boolean_label_is_not_text() {
        let record = normalize_record(&json!({
            "Price": 0,
            "price": 12.0,
            "Name": false,
            "name": "CIB",
            "Industry": true,
        }));
        assert_eq!(record.price, 0.0);
        assert_eq!(record.name, "CIB");
        assert_eq!(record.industry, "Unknown");
    }

    #[test]
    fn backend_performance_alias_is_recognized() {
        let record = normalize_record(&json!({"Performance (Week)": 3.2}));
        assert_eq!(record.weekly_performance, 3.2);
    }

    #[test]
    fn text_defaults_apply() {
        let record = normalize_record(&json!({}));
        assert_eq!(record, StockRecord::default());
        let record = normalize_record(&json!("not an object"));
        assert_eq!(record.symbol, "N/A");
        assert_eq!(record.currency, "EGP");
    }

    #[test]
    fn lenient_number_parsing() {
        let n = |s: &str| coerce_number(Some(&json!(s)));
        assert_eq!(n("  7"), 7.0);
        assert_eq!(n("3.2%"), 3.2);
        assert_eq!(n("-.5"), -0.5);
        assert_eq!(n("1e3"), 1000.0);
        assert_eq!(n("2e"), 2.0);
        assert_eq!(n("."), 0.0);
        assert_eq!(n("-"), 0.0);
        assert_eq!(n("Infinity"), 0.0);
        assert_eq!(n("1e999"), 0.0);
        assert_eq!(coerce_number(None), 0.0);
    }

    #[test]
    fn detail_reads_labels_snake_case_and_flags() {
        let detail = normalize_detail(&json!({
            "symbol": "SWDY",
            "52W High": "30.1",
            "simple_moving_average_50": 24.0,
            "Description": "Cables",
            "is_bullish": true,
            "logoid": "",
        }));
        assert_eq!(detail.stock.symbol, "SWDY");
        assert_eq!(detail.metric("fifty_two_week_high"), 30.1);
        assert_eq!(detail.metric("simple_moving_average_50"), 24.0);
        assert_eq!(detail.metric("one_year_beta"), 0.0);
        assert_eq!(detail.metrics.len(), DETAIL_METRICS.len());
        assert_eq!(detail.description.as_deref(), Some("Cables"));
        assert_eq!(detail.logoid, None);
        assert_eq!(detail.is_bullish, Some(true));
        assert_eq!(detail.is_undervalued, None);
    }

    #[test]
    fn insights_fill_gaps_and_use_legacy_mover_keys() {
        let bundle = normalize_insights(&json!({
            "total_stocks": 2,
            "market_overview": {"total_market_cap": 6.2e10},
            "top_bullish": [{"Symbol": "EFID", "Price": 18.9}],
            "top_positive_change": [{"Symbol": "COMI"}],
            "top_sectors_change": [{"sector": "Industrials", "change": 2.0}, {"change": "x"}],
        }));
        assert_eq!(bundle.total_stocks, 2);
        assert_eq!(bundle.market_overview.total_market_cap, 6.2e10);
        assert_eq!(bundle.market_overview.average_volume, 0.0);
        assert_eq!(bundle.list(InsightCategory::TopBullish)[0].price, 18.9);
        assert_eq!(bundle.list(InsightCategory::TopPositiveMovers)[0].symbol, "COMI");
        assert!(bundle.list(InsightCategory::Overpriced).is_empty());
        assert_eq!(bundle.top_sectors_change[1].sector, "Unknown");
        assert_eq!(bundle.top_sectors_change[1].change, 0.0);
        assert!(bundle.generated_at().is_some());
    }

    #[test]
    fn empty_current_mover_list_beats_legacy_key() {
        let bundle = normalize_insights(&json!({
            "top_positive_movers": [],
            "top_positive_change": [{"Symbol": "OLD"}],
            "top_negative_movers": null,
            "top_negative_change": [{"Symbol": "HRHO"}],
        }));
        assert!(bundle.list(InsightCategory::TopPositiveMovers).is_empty());
        assert_eq!(bundle.list(InsightCategory::TopNegativeMovers)[0].symbol, "HRHO");
    }
}
