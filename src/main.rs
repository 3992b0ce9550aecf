//! Entry point: logging, runtime and terminal lifecycle.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;

mod app;
mod config;
mod dialog;
mod events;
mod form;
mod input;
mod layout;
mod report;
mod sender;
mod shortcuts;
mod status;
mod ui;
mod worker;

/// Set up file logging and keep the non-blocking writer alive.
fn init_logging() -> Result<WorkerGuard> {
    let log_file = "shelter_status_tui.log";
    // Write to a file so log lines never land on the TUI.
    let file_appender = tracing_appender::rolling::never(".", log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // Plain text: no color codes in the file.
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
    tracing::info!("logging to {}", log_file);
    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Guard must live until exit or buffered lines are lost.
    let _log_guard = init_logging()?;
    tracing::info!("app starting");
    // Raw mode + alternate screen.
    let mut terminal = ui::init_terminal()?;
    let res = app::run_app(&mut terminal).await;
    // Always hand the terminal back, even when the app failed.
    ui::restore_terminal()?;
    if let Err(ref e) = res {
        tracing::error!("app error: {e}");
    }
    tracing::info!("app exiting");
    res
}
