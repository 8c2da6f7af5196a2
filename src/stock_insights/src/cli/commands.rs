use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    models::request_params::StockListParams,
    preferences::{Language, Theme},
    views::listing::SortKey,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Egyptian stock market insights")]
pub struct Cli {
    /// Path to a TOML config file (base_url, timeout_secs, preferences_path)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print normalized data as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the landing page
    Home,

    /// Show aggregated market insights
    Insights,

    /// List stocks with search, filters, sorting and pagination
    Stocks(StocksArgs),

    /// Show the full detail of one stock
    Stock {
        /// Ticker symbol (e.g. "COMI")
        symbol: String,
    },

    /// Show or change the stored preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct StocksArgs {
    /// Case-insensitive substring of symbol or name
    #[arg(long, default_value = "")]
    pub search: String,

    /// Exact sector name
    #[arg(long, default_value = "")]
    pub sector: String,

    /// Exact industry name
    #[arg(long, default_value = "")]
    pub industry: String,

    /// "symbol" or any numeric field (e.g. price, change_percent, volume)
    #[arg(long, default_value = "market_capitalization")]
    pub sort: SortKey,

    /// 1-based page number; out-of-range pages fall back to page 1
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Server-side lower bound on market capitalization
    #[arg(long)]
    pub min_market_cap: Option<f64>,

    /// Server-side upper bound on market capitalization
    #[arg(long)]
    pub max_market_cap: Option<f64>,

    /// Also print the available sectors and industries
    #[arg(long)]
    pub options: bool,
}

impl StocksArgs {
    /// Query sent to the list endpoint. Search and category filters are
    /// applied locally, so only the market cap bounds go to the server.
    pub fn server_params(&self) -> StockListParams {
        StockListParams {
            min_market_cap: self.min_market_cap,
            max_market_cap: self.max_market_cap,
            ..Default::default()
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    /// Print the current preferences
    Show,

    /// Set the display language (en-GB or ar-EG)
    Language { code: Language },

    /// Set the colour theme (light or dark)
    Theme { theme: Theme },

    /// Switch between light and dark
    ToggleTheme,
}
