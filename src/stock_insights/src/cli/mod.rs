//! Command-line front end: one subcommand per page.

pub mod commands;
pub mod render;

use std::io::{self, Write};

use tracing::{info, warn};

use crate::{
    Error,
    config::ClientConfig,
    preferences::PreferenceStore,
    providers::{StockDataSource, rest::RestStockSource},
    views::{
        detail::StockDetailView, insights::InsightsView, listing::StockListView,
        load_state::LoadState,
    },
};

use self::commands::{Cli, Commands, PrefsAction, StocksArgs};

/// Runs a parsed command line, printing to stdout.
pub async fn run(cli: Cli) -> Result<(), Error> {
    let config = ClientConfig::load(cli.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Home => {
            let prefs = PreferenceStore::open_or_default(config.preferences_path());
            if cli.json {
                render::json(&mut out, &prefs_json(&prefs))?;
            } else {
                render::home(&mut out, &prefs)?;
            }
        }
        Commands::Prefs { action } => {
            let mut prefs = PreferenceStore::open_or_default(config.preferences_path());
            match action.unwrap_or(PrefsAction::Show) {
                PrefsAction::Show => {}
                PrefsAction::Language { code } => {
                    prefs.set_language(code)?;
                    info!(language = code.code(), "language updated");
                }
                PrefsAction::Theme { theme } => {
                    prefs.set_theme(theme)?;
                    info!(%theme, "theme updated");
                }
                PrefsAction::ToggleTheme => {
                    let theme = prefs.toggle_theme()?;
                    info!(%theme, "theme toggled");
                }
            }
            if cli.json {
                render::json(&mut out, &prefs_json(&prefs))?;
            } else {
                render::preferences(&mut out, &prefs)?;
            }
        }
        Commands::Insights => {
            let source = RestStockSource::from_config(&config)?;
            let mut view = InsightsView::new();
            view.load(&source).await;
            let bundle = loaded(view.state())?;
            if cli.json {
                render::json(&mut out, bundle)?;
            } else {
                render::insights(&mut out, &view)?;
            }
        }
        Commands::Stocks(args) => {
            let source = RestStockSource::from_config(&config)?;
            let view = list_stocks(&source, &args).await?;
            if cli.json {
                render::json(&mut out, &render::StockPage::from_view(&view))?;
            } else {
                render::stock_list(&mut out, &view, args.options)?;
            }
        }
        Commands::Stock { symbol } => {
            let source = RestStockSource::from_config(&config)?;
            let mut view = StockDetailView::new(symbol);
            view.load(&source).await;
            let detail = loaded(view.state())?;
            if cli.json {
                render::json(&mut out, detail)?;
            } else {
                render::stock_detail(&mut out, detail)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// Loads the list and applies the command-line criteria to it.
pub async fn list_stocks(
    source: &dyn StockDataSource,
    args: &StocksArgs,
) -> Result<StockListView, Error> {
    let mut view = StockListView::new();
    view.set_search(args.search.as_str());
    view.set_sector(args.sector.as_str());
    view.set_industry(args.industry.as_str());
    view.set_sort(args.sort);

    view.load(source, &args.server_params()).await;
    loaded(view.state())?;

    if args.page != 1 && !view.go_to_page(args.page) {
        warn!(
            requested = args.page,
            total_pages = view.total_pages(),
            "page out of range, showing page 1"
        );
    }
    Ok(view)
}

fn loaded<T>(state: &LoadState<T>) -> Result<&T, Error> {
    match (state.data(), state.error()) {
        (Some(data), _) => Ok(data),
        (None, Some(message)) => Err(Error::Load(message.to_string())),
        (None, None) => Err(Error::Load("load did not complete".to_string())),
    }
}

#[derive(serde::Serialize)]
struct PrefsJson<'a> {
    language: &'static str,
    direction: &'static str,
    theme: &'static str,
    path: &'a std::path::Path,
}

fn prefs_json(prefs: &PreferenceStore) -> PrefsJson<'_> {
    PrefsJson {
        language: prefs.language().code(),
        direction: prefs.language().direction().as_str(),
        theme: prefs.theme().as_str(),
        path: prefs.path(),
    }
}
