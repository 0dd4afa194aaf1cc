//! Terminal checkout flow that lets users pick a skip size and review the price.

mod app;
mod input;
mod settings;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Arc, sync::Mutex, time::Duration as StdDuration};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use skiphire_core::{CatalogError, LoadTicket, SkipHireService, SkipOption};
use skiphire_provider_wewantwaste::{WeWantWastePort, http_client};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::input::Action;
use crate::settings::{LogSettings, Settings};

type FetchOutcome = (LoadTicket, Result<Vec<SkipOption>, CatalogError>);

#[derive(Parser, Debug)]
#[command(about = env!("CARGO_PKG_DESCRIPTION"), version = env!("CARGO_PKG_VERSION"))]
struct Args {
    #[arg(long, help = "(Optional) Path to a TOML settings file.")]
    config: Option<PathBuf>,

    #[arg(long, help = "(Optional) Postcode to price skips for.")]
    postcode: Option<String>,

    #[arg(long, help = "(Optional) Area to price skips for.")]
    area: Option<String>,

    #[arg(long, help = "(Optional) Catalog API root.")]
    base_url: Option<String>,
}

fn init_tracing(log: &LogSettings) -> Result<()> {
    // stdout belongs to the terminal UI
    let Some(path) = &log.file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = Settings::load(args.config.as_deref())?;
    settings.apply_overrides(args.postcode, args.area, args.base_url);
    init_tracing(&settings.log)?;

    info!(query = %settings.query(), base_url = %settings.catalog.base_url, "starting");

    // HTTP + service setup
    let client = http_client(settings.timeout())?;
    let port = Arc::new(WeWantWastePort::with_base_url(
        client,
        settings.catalog.base_url.as_str(),
    ));
    let service = Arc::new(SkipHireService::new(port));

    // App state
    let app = App::new(settings.query());

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app, service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    service: Arc<SkipHireService>,
) -> Result<()> {
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<FetchOutcome>();
    let mut pending = start_fetch(&mut app, &service, &results_tx);

    loop {
        // Apply a finished fetch before drawing so the frame shows the new state
        while let Ok((ticket, result)) = results_rx.try_recv() {
            app.finish_load(&ticket, result);
            pending = None;
        }

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::Retry => {
                    if let Some(handle) = start_fetch(&mut app, &service, &results_tx) {
                        pending = Some(handle);
                    }
                }
                Action::Continue => app.continue_checkout(),
                Action::Back => App::go_back(),
            }
            app.sync_selection();
        }
    }

    if let Some(handle) = pending {
        handle.abort();
        app.catalog.abandon();
        warn!("abandoned pending catalog fetch on exit");
    }

    Ok(())
}

/// Spawn the catalog fetch unless one is already in flight.
fn start_fetch(
    app: &mut App,
    service: &Arc<SkipHireService>,
    results_tx: &mpsc::UnboundedSender<FetchOutcome>,
) -> Option<JoinHandle<()>> {
    let ticket = app.begin_load()?;
    let query = app.query.clone();
    let service = Arc::clone(service);
    let results_tx = results_tx.clone();

    Some(tokio::spawn(async move {
        let result = service.fetch_catalog(&query).await;
        // The receiver is gone only when the UI has shut down
        if results_tx.send((ticket, result)).is_err() {
            warn!("catalog fetch finished after the UI closed");
        }
    }))
}
