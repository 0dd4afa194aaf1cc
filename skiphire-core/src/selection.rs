//! Single-selection state for the skip grid.

use tokio::sync::watch;
use tracing::debug;

use crate::model::{SkipId, SkipOption};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Current selection: nothing, or exactly one skip.
pub enum Selection {
    /// No skip is selected.
    #[default]
    Unselected,
    /// The skip with this identifier is selected.
    Selected(SkipId),
}

impl Selection {
    /// Identifier of the selected skip, if any.
    #[must_use]
    pub fn id(&self) -> Option<&SkipId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(id),
        }
    }

    /// Whether the given skip is the selected one.
    #[must_use]
    pub fn is_selected(&self, id: &SkipId) -> bool {
        self.id() == Some(id)
    }
}

/// Owner of the selection state.
///
/// Every transition is published to subscribers before the mutating call returns.
#[derive(Debug)]
pub struct SelectionController {
    state: watch::Sender<Selection>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionController {
    /// Create a controller in the [`Selection::Unselected`] state.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(Selection::Unselected);
        Self { state }
    }

    /// Toggle `id`: clears the selection if `id` is selected, selects it otherwise.
    pub fn select(&self, id: &SkipId) {
        self.state.send_modify(|selection| {
            *selection = if selection.is_selected(id) {
                Selection::Unselected
            } else {
                Selection::Selected(id.clone())
            };
            debug!(?selection, "selection changed");
        });
    }

    /// Clear the selection, e.g. when the summary sheet is closed.
    pub fn dismiss(&self) {
        self.state.send_if_modified(|selection| {
            if *selection == Selection::Unselected {
                return false;
            }
            *selection = Selection::Unselected;
            debug!("selection dismissed");
            true
        });
    }

    /// Snapshot of the current selection.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.state.borrow().clone()
    }

    /// Look up the selected skip in `catalog`.
    ///
    /// Returns `None` when nothing is selected or the identifier is not in the catalog.
    #[must_use]
    pub fn current_selection<'catalog>(
        &self,
        catalog: &'catalog [SkipOption],
    ) -> Option<&'catalog SkipOption> {
        let selection = self.state.borrow();
        let id = selection.id()?;
        catalog.iter().find(|option| &option.id == id)
    }

    /// Receiver that observes every selection change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Selection> {
        self.state.subscribe()
    }
}
