//! Load state of the skip catalog and the guard against overlapping fetches.

use tracing::{debug, info, warn};

use crate::model::SkipOption;
use crate::ports::CatalogError;

#[derive(Debug, Default)]
/// Where the catalog currently stands.
pub enum CatalogState {
    /// No fetch has been started, or the pending one was abandoned.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The catalog arrived; the list may be empty.
    Loaded(Vec<SkipOption>),
    /// The fetch failed.
    Failed(CatalogError),
}

#[derive(Debug, PartialEq, Eq)]
/// Proof that the holder started the pending fetch.
///
/// Only the ticket of the most recent [`CatalogLoader::begin`] may complete the load.
pub struct LoadTicket {
    generation: u64,
}

/// Tracks the catalog load and rejects duplicate or stale fetches.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    state: CatalogState,
    generation: u64,
}

impl CatalogLoader {
    /// Create an idle loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch.
    ///
    /// Returns `None` while another fetch is pending, so callers never issue two at once.
    pub fn begin(&mut self) -> Option<LoadTicket> {
        if self.is_loading() {
            debug!("catalog fetch already pending, not starting another");
            return None;
        }
        self.generation = self.generation.wrapping_add(1);
        self.state = CatalogState::Loading;
        Some(LoadTicket {
            generation: self.generation,
        })
    }

    /// Store the outcome of the fetch started with `ticket`.
    ///
    /// Returns `false` and leaves the state untouched when the ticket is stale.
    pub fn finish(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<SkipOption>, CatalogError>,
    ) -> bool {
        if ticket.generation != self.generation || !self.is_loading() {
            debug!("discarding result of an abandoned catalog fetch");
            return false;
        }
        self.state = match result {
            Ok(options) => {
                info!(count = options.len(), "catalog loaded");
                CatalogState::Loaded(options)
            }
            Err(err) => {
                warn!(%err, "catalog fetch failed");
                CatalogState::Failed(err)
            }
        };
        true
    }

    /// Give up on the pending fetch; its result will be discarded.
    pub fn abandon(&mut self) {
        if self.is_loading() {
            self.generation = self.generation.wrapping_add(1);
            self.state = CatalogState::Idle;
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, CatalogState::Loading)
    }

    /// Loaded options, or an empty slice in any other state.
    #[must_use]
    pub fn options(&self) -> &[SkipOption] {
        match &self.state {
            CatalogState::Loaded(options) => options.as_slice(),
            _ => &[],
        }
    }

    /// Error of the last fetch, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&CatalogError> {
        match &self.state {
            CatalogState::Failed(err) => Some(err),
            _ => None,
        }
    }
}
