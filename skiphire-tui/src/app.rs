use skiphire_core::{
    CHECKOUT_STEPS, CatalogError, CatalogLoader, CatalogQuery, LoadTicket, Selection,
    SelectionController, SkipOption, next_step,
};
use tokio::sync::watch;
use tracing::info;

/// Tiles per grid row.
pub(crate) const GRID_COLUMNS: usize = 3;

pub(crate) struct App {
    pub query: CatalogQuery,
    pub catalog: CatalogLoader,
    pub selection: SelectionController,
    selection_events: watch::Receiver<Selection>,

    /// Index of the tile under the cursor.
    pub cursor: usize,
    pub status_message: Option<String>,
}

impl App {
    pub(crate) fn new(query: CatalogQuery) -> Self {
        let selection = SelectionController::new();
        let selection_events = selection.subscribe();
        Self {
            query,
            catalog: CatalogLoader::new(),
            selection,
            selection_events,
            cursor: 0,
            status_message: None,
        }
    }

    pub(crate) fn options(&self) -> &[SkipOption] {
        self.catalog.options()
    }

    /// Option shown in the summary sheet, if any.
    pub(crate) fn selected_option(&self) -> Option<&SkipOption> {
        self.selection.current_selection(self.catalog.options())
    }

    pub(crate) fn summary_open(&self) -> bool {
        self.selected_option().is_some()
    }

    pub(crate) fn begin_load(&mut self) -> Option<LoadTicket> {
        let ticket = self.catalog.begin()?;
        self.status_message = None;
        Some(ticket)
    }

    pub(crate) fn finish_load(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<SkipOption>, CatalogError>,
    ) {
        if self.catalog.finish(ticket, result) {
            self.cursor = 0;
            self.selection.dismiss();
        }
    }

    pub(crate) fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub(crate) fn move_cursor_right(&mut self) {
        if self.cursor + 1 < self.options().len() {
            self.cursor += 1;
        }
    }

    pub(crate) fn move_cursor_up(&mut self) {
        if self.cursor >= GRID_COLUMNS {
            self.cursor -= GRID_COLUMNS;
        }
    }

    pub(crate) fn move_cursor_down(&mut self) {
        if self.cursor + GRID_COLUMNS < self.options().len() {
            self.cursor += GRID_COLUMNS;
        }
    }

    /// Toggle the selection of the tile under the cursor.
    pub(crate) fn activate_cursor(&mut self) {
        let Some(id) = self.options().get(self.cursor).map(|option| option.id.clone()) else {
            return;
        };
        self.selection.select(&id);
    }

    /// Close the summary sheet.
    pub(crate) fn dismiss(&mut self) {
        self.selection.dismiss();
    }

    /// Hand the selected skip over to the next checkout step.
    pub(crate) fn continue_checkout(&mut self) {
        let Some(option) = self.selected_option() else {
            return;
        };
        let next = next_step(&CHECKOUT_STEPS).map_or("next step", |step| step.label);
        info!(skip = %option.id, next, "continuing checkout");
        let message = format!(
            "Proceeding with selected skip: {} (£{}) · next: {next}",
            option.name, option.price
        );
        self.status_message = Some(message);
    }

    pub(crate) fn go_back() {
        info!("going back to previous step");
    }

    /// React to selection changes published since the last call.
    pub(crate) fn sync_selection(&mut self) {
        if !self.selection_events.has_changed().unwrap_or(false) {
            return;
        }
        let selection = self.selection_events.borrow_and_update().clone();
        info!(?selection, "selection updated");
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use skiphire_core::SkipId;

    use super::*;

    fn option(id: &str, size: u32, price: u32) -> SkipOption {
        SkipOption {
            id: SkipId::from(id),
            name: format!("{size} Yard Skip"),
            size: format!("{size} Yards"),
            price,
            hire_period: "14 day hire period".to_owned(),
            description: "Road placement allowed • Standard waste only".to_owned(),
        }
    }

    fn loaded_app(count: usize) -> App {
        let mut app = App::new(CatalogQuery::new("NR32", "Lowestoft"));
        let options = (0..count)
            .map(|idx| {
                let size = u32::try_from(idx).expect("small index") * 2 + 4;
                option(&idx.to_string(), size, 200 + size)
            })
            .collect();
        let ticket = app.begin_load().expect("idle app starts loading");
        app.finish_load(&ticket, Ok(options));
        app
    }

    #[test]
    fn cursor_stays_inside_grid() {
        let mut app = loaded_app(5);
        app.move_cursor_left();
        assert_eq!(app.cursor, 0);
        app.move_cursor_down();
        assert_eq!(app.cursor, 3);
        app.move_cursor_down();
        assert_eq!(app.cursor, 3);
        app.move_cursor_right();
        app.move_cursor_right();
        assert_eq!(app.cursor, 4);
        app.move_cursor_up();
        assert_eq!(app.cursor, 1);
        app.move_cursor_up();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn activating_twice_closes_summary() {
        let mut app = loaded_app(3);
        app.activate_cursor();
        assert_eq!(app.selected_option().map(|found| found.id.0.as_str()), Some("0"));
        assert!(app.summary_open());

        app.activate_cursor();
        assert!(!app.summary_open());
    }

    #[test]
    fn dismiss_closes_summary() {
        let mut app = loaded_app(3);
        app.move_cursor_right();
        app.activate_cursor();
        app.dismiss();
        assert_eq!(app.selection.selection(), Selection::Unselected);
    }

    #[test]
    fn activating_without_options_does_nothing() {
        let mut app = loaded_app(0);
        app.activate_cursor();
        assert!(!app.summary_open());
    }

    #[test]
    fn continue_reports_hand_off() {
        let mut app = loaded_app(2);
        app.activate_cursor();
        app.continue_checkout();
        let message = app.status_message.as_deref().expect("status set");
        assert!(message.contains("4 Yard Skip"), "{message}");
        assert!(message.contains("Permit Check"), "{message}");
    }

    #[test]
    fn continue_without_selection_is_ignored() {
        let mut app = loaded_app(2);
        app.continue_checkout();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn selection_change_clears_stale_status() {
        let mut app = loaded_app(2);
        app.activate_cursor();
        app.sync_selection();
        app.continue_checkout();
        assert!(app.status_message.is_some());

        app.activate_cursor();
        app.sync_selection();
        assert!(app.status_message.is_none());
    }

    #[test]
    fn second_load_is_refused_while_pending() {
        let mut app = App::new(CatalogQuery::new("NR32", "Lowestoft"));
        assert!(app.begin_load().is_some());
        assert!(app.begin_load().is_none());
    }
}
