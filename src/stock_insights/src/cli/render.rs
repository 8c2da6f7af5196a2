//! Plain-text renderers for the CLI pages.

use std::io::{self, Write};

use serde::Serialize;

use crate::{
    models::{
        detail::{MetricGroup, StockDetail},
        insights::InsightsBundle,
        stock::StockRecord,
    },
    preferences::PreferenceStore,
    views::{
        detail::oscillator_readings,
        format::{compact_number, percent, price},
        insights::InsightsView,
        listing::StockListView,
    },
};

/// Rows shown per ranked list on the insights page.
const INSIGHT_ROWS: usize = 5;

pub fn home(out: &mut impl Write, prefs: &PreferenceStore) -> io::Result<()> {
    let language = prefs.language();
    writeln!(out, "Egyptian Stock Market Insights")?;
    writeln!(out, "Discover comprehensive analysis and insights for Egyptian stocks")?;
    writeln!(out)?;
    writeln!(
        out,
        "Language: {} ({}, {})   Theme: {}",
        language.native_name(),
        language.code(),
        language.direction().as_str(),
        prefs.theme()
    )?;
    writeln!(out)?;
    writeln!(out, "  insights         market overview and ranked lists")?;
    writeln!(out, "  stocks           search, filter and sort all listings")?;
    writeln!(out, "  stock <SYMBOL>   full detail for one stock")?;
    writeln!(out, "  prefs            language and theme")?;
    Ok(())
}

pub fn preferences(out: &mut impl Write, prefs: &PreferenceStore) -> io::Result<()> {
    let language = prefs.language();
    writeln!(out, "language   {} ({})", language.code(), language.native_name())?;
    writeln!(out, "direction  {}", language.direction().as_str())?;
    writeln!(out, "theme      {}", prefs.theme())?;
    writeln!(out, "file       {}", prefs.path().display())?;
    Ok(())
}

fn table_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{:<8} {:<32} {:>10} {:>9} {:>9} {:>9}",
        "SYMBOL", "NAME", "PRICE", "CHANGE", "VOLUME", "MKT CAP"
    )
}

fn table_row(out: &mut impl Write, stock: &StockRecord) -> io::Result<()> {
    writeln!(
        out,
        "{:<8} {:<32} {:>10} {:>9} {:>9} {:>9}",
        stock.symbol,
        truncate(&stock.name, 32),
        price(stock.price),
        percent(stock.change_percent),
        compact_number(stock.volume),
        compact_number(stock.market_capitalization),
    )
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn stock_list(out: &mut impl Write, view: &StockListView, show_options: bool) -> io::Result<()> {
    let visible = view.visible();
    if visible.is_empty() {
        writeln!(out, "No stocks match the current filters.")?;
    } else {
        table_header(out)?;
        for stock in visible {
            table_row(out, stock)?;
        }
    }

    let pages: Vec<String> = view
        .page_numbers()
        .into_iter()
        .map(|p| if p == view.page() { format!("[{p}]") } else { p.to_string() })
        .collect();
    writeln!(out)?;
    writeln!(
        out,
        "{} of {} stocks, page {} of {}  {}  (sorted by {})",
        view.filtered_len(),
        view.records().len(),
        view.page(),
        view.total_pages().max(1),
        pages.join(" "),
        view.sort()
    )?;

    if show_options {
        writeln!(out, "Sectors: {}", view.sectors().join(", "))?;
        writeln!(out, "Industries: {}", view.industries().join(", "))?;
    }
    Ok(())
}

pub fn insights(out: &mut impl Write, view: &InsightsView) -> io::Result<()> {
    let Some(bundle) = view.bundle() else {
        return Ok(());
    };
    overview(out, bundle, view.cached())?;

    for (category, list) in view.sections() {
        writeln!(out)?;
        writeln!(out, "{}", category.title())?;
        table_header(out)?;
        for stock in list.iter().take(INSIGHT_ROWS) {
            table_row(out, stock)?;
        }
    }

    if !bundle.top_sectors_change.is_empty() {
        writeln!(out)?;
        writeln!(out, "Sector Performance")?;
        for sector in &bundle.top_sectors_change {
            writeln!(out, "  {:<40} {:>9}", sector.sector, percent(sector.change))?;
        }
    }
    Ok(())
}

fn overview(out: &mut impl Write, bundle: &InsightsBundle, cached: bool) -> io::Result<()> {
    let generated = bundle
        .generated_at()
        .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| bundle.timestamp.clone());
    writeln!(out, "Market Insights  ({generated}{})", if cached { ", cached" } else { "" })?;
    writeln!(out, "  Total stocks       {}", bundle.total_stocks)?;
    writeln!(
        out,
        "  Total market cap   {}",
        compact_number(bundle.market_overview.total_market_cap)
    )?;
    writeln!(
        out,
        "  Average P/E        {}",
        price(bundle.market_overview.average_pe_ratio)
    )?;
    writeln!(
        out,
        "  Average volume     {}",
        compact_number(bundle.market_overview.average_volume)
    )?;
    Ok(())
}

pub fn stock_detail(out: &mut impl Write, detail: &StockDetail) -> io::Result<()> {
    let stock = &detail.stock;
    writeln!(out, "{} - {}", stock.symbol, stock.name)?;
    writeln!(
        out,
        "{} / {}   {} {}   {}",
        stock.sector, stock.industry, stock.exchange, stock.currency, stock.country
    )?;
    if let Some(description) = &detail.description {
        writeln!(out, "{description}")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Price {}  Change {}  Volume {}  Market cap {}  P/E {}  Rating {}",
        price(stock.price),
        percent(stock.change_percent),
        compact_number(stock.volume),
        compact_number(stock.market_capitalization),
        price(stock.price_to_earnings_ratio_ttm),
        price(stock.technical_rating),
    )?;
    writeln!(
        out,
        "Performance  week {}  month {}  year {}",
        percent(stock.weekly_performance),
        percent(stock.monthly_performance),
        percent(stock.yearly_performance),
    )?;

    let flags: Vec<&str> = [
        (detail.is_bullish, "bullish"),
        (detail.is_undervalued, "undervalued"),
        (detail.is_growth_stock, "growth"),
    ]
    .into_iter()
    .filter_map(|(flag, label)| (flag == Some(true)).then_some(label))
    .collect();
    if !flags.is_empty() {
        writeln!(out, "Flags        {}", flags.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Oscillators")?;
    for reading in oscillator_readings(detail) {
        writeln!(
            out,
            "  {:<40} {:>12.2}  {}",
            reading.oscillator.label(),
            reading.value,
            reading.status
        )?;
    }

    for group in MetricGroup::ALL {
        writeln!(out)?;
        writeln!(out, "{}", group.title())?;
        for (spec, value) in detail.group(group) {
            writeln!(out, "  {:<40} {:>12.2}", spec.label, value)?;
        }
    }
    Ok(())
}

/// One page of the stock list, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct StockPage<'a> {
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub filtered: usize,
    pub sort: String,
    pub records: Vec<&'a StockRecord>,
}

impl<'a> StockPage<'a> {
    pub fn from_view(view: &'a StockListView) -> Self {
        Self {
            page: view.page(),
            total_pages: view.total_pages(),
            total: view.records().len(),
            filtered: view.filtered_len(),
            sort: view.sort().to_string(),
            records: view.visible(),
        }
    }
}

pub fn json(out: &mut impl Write, value: &impl Serialize) -> Result<(), crate::Error> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
