//! Vault-inator - Terminal Password Vault Client
//!
//! A vim-style TUI for the Vault-inator password backend.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

mod api;
mod app;
mod input;
mod logging;
mod ui;
mod vault;

use api::HttpVaultApi;
use app::{App, AppConfig};

#[derive(Parser)]
#[command(name = "vaultinator", version, about = "Terminal client for the Vault-inator password backend")]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = "VAULTINATOR_URL")]
    url: Option<String>,

    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the log file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load(&config_path)?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }

    let log_path = cli.log_file.unwrap_or_else(AppConfig::default_log_path);
    logging::init(&log_path)?;
    let api = HttpVaultApi::new(&config.base_url, config.request_timeout());
    tracing::info!(base_url = api.base_url(), "starting");
    let mut app = App::new(config, Box::new(api));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.check_status();
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "terminal error");
    }
    tracing::info!("exiting");
    result?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key_event(key) {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }

        app.check_auto_lock();
    }

    Ok(())
}
