//! Idle → Loading → Loaded/Failed state machine shared by every view.
//!
//! Each [`begin`](LoadState::begin) hands out a [`LoadTicket`]. Only the
//! completion carrying the most recently issued ticket is applied; older
//! completions are dropped, whatever order they arrive in.

use std::fmt::Display;

use tracing::{debug, warn};

/// Sequence number of one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct LoadState<T> {
    phase: LoadPhase<T>,
    latest: u64,
    /// Prefix of the failure message, e.g. "Error loading stocks".
    context: &'static str,
}

impl<T> LoadState<T> {
    pub fn new(context: &'static str) -> Self {
        Self {
            phase: LoadPhase::Idle,
            latest: 0,
            context,
        }
    }

    /// Starts a load. Previously loaded data and errors are discarded.
    pub fn begin(&mut self) -> LoadTicket {
        self.latest += 1;
        self.phase = LoadPhase::Loading;
        LoadTicket(self.latest)
    }

    /// Applies a completion. Returns `false` when `ticket` is stale and the
    /// result was ignored.
    pub fn complete<E: Display>(&mut self, ticket: LoadTicket, result: Result<T, E>) -> bool {
        if ticket.0 != self.latest {
            debug!(
                ticket = ticket.0,
                latest = self.latest,
                context = self.context,
                "discarding stale load"
            );
            return false;
        }
        self.phase = match result {
            Ok(data) => LoadPhase::Loaded(data),
            Err(err) => {
                warn!(context = self.context, error = %err, "load failed");
                LoadPhase::Failed(format!("{}: {err}", self.context))
            }
        };
        true
    }

    /// Installs data directly, superseding any load in flight.
    pub fn set_loaded(&mut self, data: T) {
        self.latest += 1;
        self.phase = LoadPhase::Loaded(data);
    }

    pub fn phase(&self) -> &LoadPhase<T> {
        &self.phase
    }

    pub fn data(&self) -> Option<&T> {
        match &self.phase {
            LoadPhase::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, LoadPhase::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_ticket_cannot_overwrite_newer_load() {
        let mut state: LoadState<&str> = LoadState::new("Error loading stocks");
        let first = state.begin();
        let second = state.begin();

        assert!(state.complete::<String>(second, Ok("fresh")));
        assert!(!state.complete::<String>(first, Ok("stale")));
        assert_eq!(state.data(), Some(&"fresh"));
    }

    #[test]
    fn late_failure_of_old_request_is_ignored() {
        let mut state: LoadState<u8> = LoadState::new("ctx");
        let old = state.begin();
        let new = state.begin();
        assert!(!state.complete(old, Err("timeout")));
        assert!(state.is_loading());
        assert!(state.complete::<&str>(new, Ok(7)));
        assert_eq!(state.data(), Some(&7));
    }

    #[test]
    fn begin_drops_previous_data_and_failure_is_prefixed() {
        let mut state: LoadState<u8> = LoadState::new("Failed to load insights");
        let t = state.begin();
        state.complete::<&str>(t, Ok(1));

        let t = state.begin();
        assert_eq!(state.data(), None);
        state.complete(t, Err("connection refused"));
        assert_eq!(state.error(), Some("Failed to load insights: connection refused"));
    }

    #[test]
    fn set_loaded_supersedes_in_flight_load() {
        let mut state: LoadState<u8> = LoadState::new("ctx");
        let pending = state.begin();
        state.set_loaded(3);
        assert!(!state.complete::<&str>(pending, Ok(9)));
        assert_eq!(state.phase(), &LoadPhase::Loaded(3));
    }
}
