//! Debounced location autocomplete.

use std::time::Duration;
use tracing::{debug, error};

use crate::{model::Suggestion, provider::WeatherProvider, sequence::Sequencer};

/// Quiet period required before a query is sent.
pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);

/// Shorter queries never reach the provider.
pub const MIN_QUERY_CHARS: usize = 3;

/// What the suggestion list should do after an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionUpdate {
    Hide,
    Show(Vec<Suggestion>),
    /// Superseded by newer input, stale, or failed: leave the list alone.
    Unchanged,
}

#[derive(Debug)]
pub struct SuggestionFetcher {
    inputs: Sequencer,
    debounce: Duration,
}

impl Default for SuggestionFetcher {
    fn default() -> Self {
        Self::new(SUGGESTION_DEBOUNCE)
    }
}

impl SuggestionFetcher {
    pub fn new(debounce: Duration) -> Self {
        Self {
            inputs: Sequencer::default(),
            debounce,
        }
    }

    /// Handle one keystroke's worth of input.
    ///
    /// Every call supersedes the previous one. A request goes out only once
    /// `debounce` passes with no newer input, and its answer is dropped if
    /// more input arrived while it was in flight.
    pub async fn on_input<P>(&self, provider: &P, query: &str) -> SuggestionUpdate
    where
        P: WeatherProvider + ?Sized,
    {
        let ticket = self.inputs.issue();

        if query.chars().count() < MIN_QUERY_CHARS {
            return SuggestionUpdate::Hide;
        }

        tokio::time::sleep(self.debounce).await;
        if !self.inputs.is_latest(ticket) {
            return SuggestionUpdate::Unchanged;
        }

        let result = provider.search(query).await;

        if !self.inputs.is_latest(ticket) {
            debug!(query, "discarding stale suggestions");
            return SuggestionUpdate::Unchanged;
        }

        match result {
            Ok(list) if list.is_empty() => SuggestionUpdate::Hide,
            Ok(list) => SuggestionUpdate::Show(list),
            Err(err) => {
                error!(query, error = %err, "Error fetching suggestions");
                SuggestionUpdate::Unchanged
            }
        }
    }
}
