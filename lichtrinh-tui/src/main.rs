//! Terminal trip wizard for lichtrinh: answer five questions, get a day-by-day
//! itinerary, browse it as a timeline or a map and export it as an image.

mod app;
mod config;
mod headless;
mod input;
mod logging;
mod rotator;
mod ui;

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration as StdDuration, Instant},
};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task;
use tracing::{debug, info, warn};

use lichtrinh_core::model::ItineraryId;
use lichtrinh_core::service::LichtrinhService;
use lichtrinh_infographic::{Rasterizer, ResvgRasterizer, export_itinerary};

use crate::app::{App, AppEvent};
use crate::config::Settings;
use crate::headless::ExportArgs;
use crate::input::Action;
use crate::logging::LogTarget;

/// lichtrinh - trip itineraries in the terminal
#[derive(Parser)]
#[command(name = "lichtrinh")]
#[command(about = "Plan a trip and browse its itinerary", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Open an existing itinerary instead of the wizard
    #[arg(long)]
    itinerary: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the infographic PNG of an itinerary and exit
    Export(ExportArgs),
}

/// Handles shared by the tasks the UI spawns.
struct Runtime {
    service: Arc<LichtrinhService>,
    rasterizer: Arc<dyn Rasterizer>,
    output_dir: PathBuf,
    events: UnboundedSender<AppEvent>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;

    let client = lichtrinh_provider_http::client(settings.timeout())?;
    let port = lichtrinh_provider_http::port(client, settings.api.base_url.clone());
    let service = Arc::new(LichtrinhService::new(port));

    match cli.command {
        Some(Commands::Export(args)) => {
            logging::init(&settings.log.level, LogTarget::Stderr)?;
            headless::export_command(args, &service, &settings.export).await?;
            Ok(())
        }
        None => {
            let log_file = settings.log_file();
            logging::init(&settings.log.level, LogTarget::File(&log_file))?;
            info!(base_url = %settings.api.base_url, "starting");
            run_tui(&settings, service, cli.itinerary).await
        }
    }
}

fn rasterizer(font_file: Option<&Path>) -> Result<ResvgRasterizer> {
    match ResvgRasterizer::new(font_file) {
        Ok(rasterizer) => Ok(rasterizer),
        Err(err) => {
            warn!(error = %err, "falling back to system fonts");
            Ok(ResvgRasterizer::new(None)?)
        }
    }
}

async fn run_tui(
    settings: &Settings,
    service: Arc<LichtrinhService>,
    itinerary: Option<String>,
) -> Result<()> {
    let (events, mut results) = unbounded_channel();
    let runtime = Runtime {
        service,
        rasterizer: Arc::new(rasterizer(settings.export.font_file.as_deref())?),
        output_dir: settings.export.output_dir.clone(),
        events,
    };

    // App state
    let mut app = App::new(settings.trip_defaults(), settings.map.tile_token.clone());
    if let Some(id) = itinerary {
        let id = ItineraryId(id);
        let ticket = app.begin_fetch(&id);
        spawn_fetch(&runtime, ticket, id);
    }

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app, &runtime, &mut results);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    info!("bye");
    res
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    runtime: &Runtime,
    results: &mut UnboundedReceiver<AppEvent>,
) -> Result<()> {
    loop {
        // Results of spawned work first, so this frame shows them
        while let Ok(event) = results.try_recv() {
            app.apply(event, Instant::now());
        }
        app.tick(Instant::now());

        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Generate => {
                    if let Some((ticket, request)) = app.begin_generate(Local::now().date_naive()) {
                        let service = Arc::clone(&runtime.service);
                        let events = runtime.events.clone();
                        tokio::spawn(async move {
                            let result = service.generate(&request).await;
                            if events.send(AppEvent::Generated { ticket, result }).is_err() {
                                debug!(ticket, "ui closed before generation finished");
                            }
                        });
                    }
                }
                Action::Export => {
                    if let Some(itinerary) = app.begin_export() {
                        let rasterizer = Arc::clone(&runtime.rasterizer);
                        let output_dir = runtime.output_dir.clone();
                        let events = runtime.events.clone();
                        let today = Local::now().date_naive();
                        task::spawn_blocking(move || {
                            let result = export_itinerary(
                                rasterizer.as_ref(),
                                &itinerary,
                                today,
                                &output_dir,
                            );
                            if events.send(AppEvent::Exported(result)).is_err() {
                                debug!("ui closed before export finished");
                            }
                        });
                    }
                }
            }
        }
    }

    Ok(())
}

fn spawn_fetch(runtime: &Runtime, ticket: u64, id: ItineraryId) {
    let service = Arc::clone(&runtime.service);
    let events = runtime.events.clone();
    tokio::spawn(async move {
        let result = service.itinerary(&id).await;
        if events.send(AppEvent::Fetched { ticket, result }).is_err() {
            debug!(ticket, "ui closed before fetch finished");
        }
    });
}
