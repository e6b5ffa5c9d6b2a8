use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs::OpenOptions, io, sync::Arc, sync::Mutex, time::Duration};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use balibuddy::api::HttpRateSource;
use balibuddy::cache::{AnyStore, CacheDb, MemoryStore};
use balibuddy::config::{get_config_path, Config};
use balibuddy::logic::field_sync::InvalidInputPolicy;
use balibuddy::model::Model;
use balibuddy::services::connectivity::{probe, probe_target};
use balibuddy::services::{ExchangeRateService, NetworkMonitor, RateCache};
use balibuddy::{utils, Tab};

mod handlers;
mod ui;

/// Bali Buddy: currency, distance, weight and volume converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to <temp dir>/balibuddy-debug.log
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Start offline: no connectivity probe and no rate fetch
    #[arg(long)]
    offline: bool,

    /// Tab to open on start
    #[arg(long, value_enum, ignore_case = true)]
    tab: Option<Tab>,

    /// Show "Invalid input" in the converted field instead of keeping its value
    #[arg(long)]
    invalid_marker: bool,
}

pub struct App {
    pub model: Model,

    rates: ExchangeRateService<AnyStore>,
    probe_task: Option<JoinHandle<()>>,
}

impl App {
    async fn new(config: &Config, config_path: Option<String>, offline: bool) -> Result<Self> {
        let mut model = Model::new(config.default_tab, config.invalid_input);
        model.ui.config_path = config_path;

        let store = open_store(config);
        let source = HttpRateSource::new(
            config.rate_url.clone(),
            config.rate_pointer.clone(),
            config.request_timeout(),
        )
        .context("Failed to build HTTP client")?;

        let (monitor, probe_task) = start_monitor(config, offline).await;

        let mut rates = ExchangeRateService::new(
            RateCache::new(store),
            Arc::new(source),
            Arc::new(monitor),
        );
        if let Some(notice) = rates.start() {
            model.show_toast(notice.toast_message());
        }

        let mut app = App {
            model,
            rates,
            probe_task,
        };
        handlers::rate::sync_rate_model(&mut app);
        Ok(app)
    }

    /// Release the connectivity subscription and stop probing
    fn shutdown(&mut self) {
        self.rates.stop();
        if let Some(task) = self.probe_task.take() {
            task.abort();
        }
        debug!("shutdown complete");
    }
}

/// SQLite cache, or an in-memory one if the database cannot be opened
fn open_store(config: &Config) -> AnyStore {
    let opened = match &config.cache_path {
        Some(path) => CacheDb::open(path),
        None => CacheDb::new(),
    };

    match opened {
        Ok(db) => AnyStore::Sqlite(db),
        Err(e) => {
            warn!("rate cache unavailable, keeping rates in memory: {}", e);
            AnyStore::Memory(MemoryStore::new())
        }
    }
}

/// Connectivity monitor seeded with an initial probe of the rate host
async fn start_monitor(config: &Config, offline: bool) -> (NetworkMonitor, Option<JoinHandle<()>>) {
    if offline {
        info!("starting in offline mode");
        return (NetworkMonitor::new(false), None);
    }

    let Some((host, port)) = probe_target(&config.rate_url) else {
        warn!("cannot derive probe target from {}, assuming online", config.rate_url);
        return (NetworkMonitor::new(true), None);
    };

    let online = probe(&host, port, config.probe_timeout()).await;
    info!("initial connectivity to {}:{}: {}", host, port, online);

    let monitor = NetworkMonitor::new(online);
    let task = monitor.spawn_probe(host, port, config.probe_interval(), config.probe_timeout());
    (monitor, Some(task))
}

fn init_logging(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let log_path = utils::get_debug_log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open debug log: {}", log_path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("balibuddy=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    init_logging(args.debug)?;
    debug!("Debug mode enabled");

    // Determine config file path
    let config_path = get_config_path(args.config)?;
    let mut config = match &config_path {
        Some(path) => {
            debug!("Loading config from: {:?}", path);
            Config::load(path)?
        }
        None => {
            debug!("No config file found, using defaults");
            Config::default()
        }
    };

    // Override config with CLI flags
    if let Some(tab) = args.tab {
        config.default_tab = tab;
    }
    if args.invalid_marker {
        config.invalid_input = InvalidInputPolicy::Marker;
    }

    // Initialize app
    let config_path_str = config_path.map(|p| p.display().to_string());
    let mut app = App::new(&config, config_path_str, args.offline).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;
    app.shutdown();

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if app.model.should_dismiss_toast() {
            app.model.ui.dismiss_toast();
        }

        if app.model.ui.should_quit {
            break;
        }

        // Finished fetches and connectivity changes (non-blocking)
        for notice in app.rates.poll() {
            handlers::rate::handle_rate_notice(app, notice);
        }
        handlers::rate::sync_rate_model(app);

        // Poll briefly so fetch results show up without a keypress
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handlers::keyboard::handle_key(app, key)?;
                }
            }
        }
    }

    Ok(())
}
