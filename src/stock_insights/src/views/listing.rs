//! Stock list view: search, filter, sort and paginate an in-memory list.
//!
//! The pipeline is recomputed eagerly whenever an input changes:
//!
//! 1. search: case-insensitive substring of symbol OR name (empty passes all)
//! 2. sector: exact match (empty passes all)
//! 3. industry: exact match (empty passes all)
//! 4. sort: symbol ascending, any numeric field descending; stable
//! 5. paginate: [`PAGE_SIZE`] per page, current page clamped to the page count
//!
//! Changing search, sector, industry or sort key resets the page to 1.

use std::{cmp::Ordering, collections::BTreeSet, fmt, str::FromStr};

use tracing::debug;

use crate::{
    models::{
        request_params::StockListParams,
        stock::{StockField, StockRecord, UnknownFieldError},
    },
    providers::{Fetched, ProviderError, StockDataSource},
    views::load_state::{LoadState, LoadTicket},
};

pub const PAGE_SIZE: usize = 20;

/// Column the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Symbol,
    Field(StockField),
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Field(StockField::MarketCapitalization)
    }
}

impl SortKey {
    pub fn compare(self, a: &StockRecord, b: &StockRecord) -> Ordering {
        match self {
            SortKey::Symbol => compare_symbols(&a.symbol, &b.symbol),
            SortKey::Field(field) => b
                .numeric(field)
                .partial_cmp(&a.numeric(field))
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// Case-insensitive order; among case variants, lowercase sorts first.
fn compare_symbols(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Symbol => f.write_str("symbol"),
            SortKey::Field(field) => field.fmt(f),
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("symbol") {
            return Ok(SortKey::Symbol);
        }
        s.parse().map(SortKey::Field)
    }
}

#[derive(Debug, Clone)]
pub struct StockListView {
    state: LoadState<Vec<StockRecord>>,
    search: String,
    sector: String,
    industry: String,
    sort: SortKey,
    page: usize,
    /// Indices into the loaded records, filtered and sorted.
    filtered: Vec<usize>,
    total_pages: usize,
}

impl Default for StockListView {
    fn default() -> Self {
        Self::new()
    }
}

impl StockListView {
    pub fn new() -> Self {
        Self {
            state: LoadState::new("Error loading stocks"),
            search: String::new(),
            sector: String::new(),
            industry: String::new(),
            sort: SortKey::default(),
            page: 1,
            filtered: Vec::new(),
            total_pages: 0,
        }
    }

    /// A view over an already fetched list.
    pub fn with_records(records: Vec<StockRecord>) -> Self {
        let mut view = Self::new();
        view.replace_records(records);
        view
    }

    pub fn state(&self) -> &LoadState<Vec<StockRecord>> {
        &self.state
    }

    /// The full, unfiltered list. Empty unless loaded.
    pub fn records(&self) -> &[StockRecord] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn industry(&self) -> &str {
        &self.industry
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// All records passing the filters, in sort order.
    pub fn filtered(&self) -> impl Iterator<Item = &StockRecord> + '_ {
        let records = self.records();
        self.filtered.iter().map(move |&i| &records[i])
    }

    /// The current page of [`filtered`](Self::filtered).
    pub fn visible(&self) -> Vec<&StockRecord> {
        self.filtered()
            .skip((self.page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.reset_page();
    }

    /// Selects a sector; an empty string selects all.
    pub fn set_sector(&mut self, sector: impl Into<String>) {
        self.sector = sector.into();
        self.reset_page();
    }

    /// Selects an industry; an empty string selects all.
    pub fn set_industry(&mut self, industry: impl Into<String>) {
        self.industry = industry.into();
        self.reset_page();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.reset_page();
    }

    /// Moves to `page` if it exists. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if (1..=self.total_pages).contains(&page) {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// Page links around the current page: `[p-2, p+2]` clipped to the range.
    pub fn page_numbers(&self) -> Vec<usize> {
        let start = self.page.saturating_sub(2).max(1);
        let end = (self.page + 2).min(self.total_pages);
        (start..=end).collect()
    }

    /// Distinct non-empty sectors of the full list, ascending.
    pub fn sectors(&self) -> Vec<&str> {
        distinct(self.records().iter().map(|r| r.sector.as_str()))
    }

    /// Distinct non-empty industries of the full list, ascending.
    pub fn industries(&self) -> Vec<&str> {
        distinct(self.records().iter().map(|r| r.industry.as_str()))
    }

    /// Resets search, filters, sort key and page.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.sector.clear();
        self.industry.clear();
        self.sort = SortKey::default();
        self.reset_page();
    }

    /// Installs a freshly fetched list, keeping the current criteria.
    pub fn replace_records(&mut self, records: Vec<StockRecord>) {
        self.state.set_loaded(records);
        self.recompute();
    }

    /// Starts a load; the list is empty until it completes.
    pub fn begin_load(&mut self) -> LoadTicket {
        let ticket = self.state.begin();
        self.recompute();
        ticket
    }

    /// Applies a load result. Returns `false` if `ticket` was superseded.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Fetched<Vec<StockRecord>>, ProviderError>,
    ) -> bool {
        let applied = self.state.complete(ticket, result.map(|fetched| fetched.data));
        if applied {
            self.recompute();
        }
        applied
    }

    /// Fetches the list from `source` and applies it.
    pub async fn load(&mut self, source: &dyn StockDataSource, params: &StockListParams) -> bool {
        let ticket = self.begin_load();
        let result = source.fetch_stocks(params).await;
        self.finish_load(ticket, result)
    }

    fn reset_page(&mut self) {
        self.page = 1;
        self.recompute();
    }

    /// Re-runs the filter, sort and pagination pipeline.
    pub fn recompute(&mut self) {
        let filtered = {
            let records = self.records();
            let needle = self.search.to_lowercase();
            let mut indices: Vec<usize> = records
                .iter()
                .enumerate()
                .filter(|(_, r)| {
                    needle.is_empty()
                        || r.symbol.to_lowercase().contains(&needle)
                        || r.name.to_lowercase().contains(&needle)
                })
                .filter(|(_, r)| self.sector.is_empty() || r.sector == self.sector)
                .filter(|(_, r)| self.industry.is_empty() || r.industry == self.industry)
                .map(|(i, _)| i)
                .collect();
            indices.sort_by(|&a, &b| self.sort.compare(&records[a], &records[b]));
            indices
        };

        self.filtered = filtered;
        self.total_pages = self.filtered.len().div_ceil(PAGE_SIZE);
        self.page = self.page.clamp(1, self.total_pages.max(1));
        debug!(
            total = self.records().len(),
            filtered = self.filtered.len(),
            page = self.page,
            pages = self.total_pages,
            "stock list recomputed"
        );
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
