//! Number formatting shared by the text renderers.

/// Compact form for large magnitudes: `1.2B`, `3.4M`, `5.6K`, else a whole number.
pub fn compact_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value:.0}")
    }
}

/// Signed percentage with two decimals, e.g. `+1.25%`.
pub fn percent(value: f64) -> String {
    format!("{value:+.2}%")
}

/// Price with two decimals.
pub fn price(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_thresholds() {
        assert_eq!(compact_number(1_500_000_000.0), "1.5B");
        assert_eq!(compact_number(2_340_000.0), "2.3M");
        assert_eq!(compact_number(1000.0), "1.0K");
        assert_eq!(compact_number(999.4), "999");
        assert_eq!(compact_number(-4_200.0), "-4.2K");
        assert_eq!(compact_number(f64::NAN), "0");
    }

    #[test]
    fn percent_and_price() {
        assert_eq!(percent(1.254), "+1.25%");
        assert_eq!(percent(-3.0), "-3.00%");
        assert_eq!(price(12.5), "12.50");
    }
}
