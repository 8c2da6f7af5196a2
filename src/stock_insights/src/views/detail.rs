//! Single-symbol detail view and oscillator readings.

use std::fmt;

use serde::Serialize;

use crate::{
    models::detail::StockDetail,
    providers::{ProviderError, StockDataSource},
    views::load_state::LoadState,
};

/// Momentum oscillators with conventional overbought/oversold bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Oscillator {
    Rsi,
    Stochastic,
    WilliamsR,
    Cci,
    UltimateOscillator,
}

impl Oscillator {
    pub const ALL: [Oscillator; 5] = [
        Oscillator::Rsi,
        Oscillator::Stochastic,
        Oscillator::WilliamsR,
        Oscillator::Cci,
        Oscillator::UltimateOscillator,
    ];

    /// Detail metric holding this oscillator's value.
    pub const fn metric_key(self) -> &'static str {
        match self {
            Oscillator::Rsi => "relative_strength_index_14",
            Oscillator::Stochastic => "stochastic_k_14_3_3",
            Oscillator::WilliamsR => "williams_percent_range_14",
            Oscillator::Cci => "commodity_channel_index_20",
            Oscillator::UltimateOscillator => "ultimate_oscillator_7_14_28",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Oscillator::Rsi => "RSI (14)",
            Oscillator::Stochastic => "Stochastic %K",
            Oscillator::WilliamsR => "Williams %R",
            Oscillator::Cci => "CCI (20)",
            Oscillator::UltimateOscillator => "Ultimate Oscillator",
        }
    }

    /// `(oversold_below, overbought_above)`; both bounds are exclusive.
    pub const fn bands(self) -> (f64, f64) {
        match self {
            Oscillator::Rsi => (30.0, 70.0),
            Oscillator::Stochastic => (20.0, 80.0),
            Oscillator::WilliamsR => (-80.0, -20.0),
            Oscillator::Cci => (-100.0, 100.0),
            Oscillator::UltimateOscillator => (30.0, 70.0),
        }
    }

    pub fn classify(self, value: f64) -> OscillatorStatus {
        let (low, high) = self.bands();
        if value > high {
            OscillatorStatus::Overbought
        } else if value < low {
            OscillatorStatus::Oversold
        } else {
            OscillatorStatus::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OscillatorStatus {
    Overbought,
    Oversold,
    Neutral,
}

impl fmt::Display for OscillatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OscillatorStatus::Overbought => "Overbought",
            OscillatorStatus::Oversold => "Oversold",
            OscillatorStatus::Neutral => "Neutral",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OscillatorReading {
    pub oscillator: Oscillator,
    pub value: f64,
    pub status: OscillatorStatus,
}

/// Every oscillator's value and status for `detail`.
pub fn oscillator_readings(detail: &StockDetail) -> Vec<OscillatorReading> {
    Oscillator::ALL
        .into_iter()
        .map(|oscillator| {
            let value = detail.metric(oscillator.metric_key());
            OscillatorReading {
                oscillator,
                value,
                status: oscillator.classify(value),
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct StockDetailView {
    symbol: String,
    state: LoadState<StockDetail>,
}

impl StockDetailView {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into().trim().to_string(),
            state: LoadState::new("Failed to load stock details"),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn state(&self) -> &LoadState<StockDetail> {
        &self.state
    }

    pub fn detail(&self) -> Option<&StockDetail> {
        self.state.data()
    }

    /// Fetches the detail for the view's symbol.
    ///
    /// A blank symbol fails without touching the network.
    pub async fn load(&mut self, source: &dyn StockDataSource) -> bool {
        let ticket = self.state.begin();
        let result = if self.symbol.is_empty() {
            Err(ProviderError::Validation("No stock symbol provided".into()))
        } else {
            source.fetch_stock_detail(&self.symbol).await.map(|f| f.data)
        };
        self.state.complete(ticket, result)
    }
}
