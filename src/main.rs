//! MOTORDASH - Industrial Motor Monitoring Dashboard
//!
//! A terminal-based dashboard for monitoring an industrial motor: live
//! sensor readouts, health analytics, and an alert feed with transient
//! toast notifications.
//!
//! ## Usage
//!
//! ```bash
//! # Start the dashboard
//! motordash
//!
//! # With verbose logging
//! motordash -v
//!
//! # With a custom config file
//! motordash --config /path/to/config.yaml
//!
//! # With custom log directory
//! motordash --log-dir /path/to/logs/
//! ```

use std::io::Write;
use std::panic;
use std::process::ExitCode;

use clap::Parser;
use motordash_core::{init_logging, DashConfig, LogGuard};
use motordash_tui::App;
use tracing::{error, info};

/// MOTORDASH Motor Monitoring Dashboard
///
/// A terminal-based interface for monitoring an industrial motor,
/// tracking its health analytics, and managing alerts.
#[derive(Parser, Debug)]
#[command(name = "motordash")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (increases log level)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory for log files (defaults to ~/.motordash/logs/)
    #[arg(long)]
    log_dir: Option<std::path::PathBuf>,

    /// Configuration file (defaults to ~/.motordash/config.yaml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::from(1);
        }
    };

    // Install panic hook to ensure terminal cleanup
    install_panic_hook();

    // Load configuration
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(1);
        }
    };

    info!(machine_id = %config.machine_id, "Starting MOTORDASH");

    // Run the TUI application
    match run_app(config) {
        Ok(()) => {
            info!("MOTORDASH exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("MOTORDASH error: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Install a panic hook that restores the terminal before printing the panic message.
///
/// This ensures that even if the application panics while in raw mode with the
/// alternate screen enabled, the terminal will be properly restored so the user
/// can see the panic message and continue using their terminal.
fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore terminal state
        let _ = restore_terminal();

        // Call the original panic hook to print the panic message
        original_hook(panic_info);
    }));
}

/// Restore terminal to its normal state.
///
/// This function is called both on normal exit and during panic handling.
fn restore_terminal() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();

    // Disable raw mode first
    let _ = crossterm::terminal::disable_raw_mode();

    // Leave alternate screen
    crossterm::execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;

    // Show cursor
    crossterm::execute!(stdout, crossterm::cursor::Show)?;

    // Flush to ensure all escape sequences are written
    stdout.flush()?;

    Ok(())
}

/// Set up logging based on CLI arguments.
fn setup_logging(cli: &Cli) -> motordash_core::Result<LogGuard> {
    // verbose flag increases log level
    let debug = cli.verbose > 0;
    init_logging(cli.log_dir.clone(), debug)
}

/// Load configuration from the given path, or the default location.
fn load_config(cli: &Cli) -> motordash_core::Result<DashConfig> {
    match &cli.config {
        Some(path) => DashConfig::load(path),
        None => DashConfig::load_default(),
    }
}

/// Run the TUI application.
fn run_app(config: DashConfig) -> motordash_tui::AppResult<()> {
    let mut app = App::new(config);
    app.run()
}
