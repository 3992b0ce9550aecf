//! TUI event loop, input dispatch and application state.

mod handlers;
mod render;

use anyhow::Result;
use crossterm::event::{self, Event};
use std::{path::PathBuf, time::Duration};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    config::Config,
    dialog::DialogState,
    events::{Screen, UiState},
    form::FormState,
    input::InputBoxState,
    report::{ShelterReport, build_report},
    shortcuts::Shortcuts,
    ui::Tui,
    worker::{self, WorkerCmd, WorkerEvent},
};

use handlers::{handle_key, is_ctrl_c};
use render::draw;

/// A submitted report that has not been confirmed yet.
#[derive(Clone, Debug)]
pub struct PendingReport {
    /// Correlates worker events with this submission.
    pub submission_id: Uuid,
    /// Payload captured at submit time; retries resend it unchanged.
    pub report: ShelterReport,
}

/// App state shared between input handling and rendering.
pub struct App {
    /// Path to the persisted config file.
    pub cfg_path: PathBuf,
    /// Current config values in memory.
    pub cfg: Config,
    /// Screen, status text and log.
    pub ui: UiState,
    /// Slider positions.
    pub form: FormState,
    /// Command channel to the background worker.
    pub worker_tx: mpsc::Sender<WorkerCmd>,
    /// Event channel from the background worker.
    pub worker_rx: mpsc::Receiver<WorkerEvent>,

    /// Editable backend URL for the settings screen.
    pub base_url: String,
    /// Editable shelter id for the settings screen.
    pub shelter_id: String,
    /// Editable auth token for the settings screen.
    pub auth_token: String,

    /// Current InputBox state (Some while typing).
    pub input_box: Option<InputBoxState>,
    /// Confirmation or failure popup.
    pub dialog: Option<DialogState>,
    /// Report waiting for delivery or a retry decision.
    pub pending: Option<PendingReport>,

    /// Key bindings.
    pub shortcuts: Shortcuts,
}

impl App {
    /// Build the initial state from config, with sliders at their configured positions.
    pub fn new(
        cfg_path: PathBuf,
        cfg: Config,
        shortcuts: Shortcuts,
        worker_tx: mpsc::Sender<WorkerCmd>,
        worker_rx: mpsc::Receiver<WorkerEvent>,
    ) -> Self {
        Self {
            cfg_path,
            form: FormState::new(cfg.form.initial_levels()),
            ui: UiState::new(Screen::Form),
            worker_tx,
            worker_rx,
            base_url: cfg.backend.base_url.clone(),
            shelter_id: cfg.backend.shelter_id.clone(),
            auth_token: cfg.backend.auth_token.clone(),
            input_box: None,
            dialog: None,
            pending: None,
            shortcuts,
            cfg,
        }
    }
}

/// Run the main TUI loop until the user exits.
pub async fn run_app(terminal: &mut Tui) -> Result<()> {
    // Load config or create a default file on first run.
    let cfg_path = PathBuf::from("config.toml");
    let cfg = Config::load_or_default(&cfg_path)?;

    let shortcuts = Shortcuts::load_or_default(PathBuf::from("shortcut.toml"))?;

    let (tx_cmd, rx_cmd) = mpsc::channel::<WorkerCmd>(16);
    let (tx_ev, rx_ev) = mpsc::channel::<WorkerEvent>(64);

    // The worker starts from the same config snapshot as the UI.
    tokio::spawn(worker::run(rx_cmd, tx_ev, cfg.clone()));

    let mut app = App::new(cfg_path, cfg, shortcuts, tx_cmd, rx_ev);

    loop {
        terminal.draw(|f| draw(f, &app))?;

        // Drain worker events before handling input.
        while let Ok(ev) = app.worker_rx.try_recv() {
            handle_worker_event(&mut app, ev);
        }

        // Short poll timeout keeps the UI responsive to worker events.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(k) = event::read()?
        {
            if is_ctrl_c(&k) {
                break;
            }
            if handle_key(&mut app, k).await? {
                break;
            }
        }
    }
    Ok(())
}

/// Apply a worker event to the UI state.
fn handle_worker_event(app: &mut App, ev: WorkerEvent) {
    match ev {
        WorkerEvent::ReportSent { submission_id } => {
            if !is_pending(app, submission_id) {
                tracing::warn!("ignoring confirmation for unknown submission {submission_id}");
                return;
            }
            app.pending = None;
            app.dialog = Some(DialogState::sent());
            app.ui.error = None;
            app.ui.status = "Status update sent".into();
            app.ui.push_log(format!("sent {submission_id}"));
        }
        WorkerEvent::SendFailed {
            submission_id,
            error,
        } => {
            if !is_pending(app, submission_id) {
                tracing::warn!("ignoring failure for unknown submission {submission_id}");
                return;
            }
            app.ui.status = "Status update failed".into();
            app.ui.push_log(format!("failed {submission_id}: {error}"));
            app.dialog = Some(DialogState::send_failed(error));
        }
        WorkerEvent::Log(s) => app.ui.push_log(s),
    }
}

fn is_pending(app: &App, submission_id: Uuid) -> bool {
    app.pending
        .as_ref()
        .is_some_and(|p| p.submission_id == submission_id)
}

/// Capture the sliders into a report and hand it to the worker.
pub async fn submit_report(app: &mut App) -> Result<()> {
    if app.pending.is_some() {
        app.ui.status = "Previous status update is still in progress".into();
        return Ok(());
    }
    // Timestamp is taken now and kept for retries.
    let report = build_report(&app.form.levels(), chrono::Utc::now());
    let submission_id = Uuid::new_v4();
    tracing::info!("submit {submission_id}: {}", report.to_json()?);

    // Remember the report until the worker answers.
    app.pending = Some(PendingReport {
        submission_id,
        report: report.clone(),
    });
    app.worker_tx
        .send(WorkerCmd::SendReport {
            submission_id,
            report,
        })
        .await?;
    app.ui.error = None;
    app.ui.status = "Sending status update...".into();
    Ok(())
}

/// Resend the pending report after a failure.
pub async fn retry_report(app: &mut App) -> Result<()> {
    let Some(pending) = app.pending.clone() else {
        return Ok(());
    };
    tracing::info!("retry {}", pending.submission_id);
    app.dialog = None;
    app.worker_tx
        .send(WorkerCmd::SendReport {
            submission_id: pending.submission_id,
            report: pending.report,
        })
        .await?;
    app.ui.status = "Retrying status update...".into();
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// App wired to channels the test controls, with a throwaway config path.
    pub fn test_app() -> (App, mpsc::Receiver<WorkerCmd>, mpsc::Sender<WorkerEvent>) {
        let (tx_cmd, rx_cmd) = mpsc::channel(16);
        let (tx_ev, rx_ev) = mpsc::channel(16);
        let cfg_path = std::env::temp_dir().join(format!("{}-config.toml", Uuid::new_v4()));
        let app = App::new(
            cfg_path,
            Config::default(),
            Shortcuts::default(),
            tx_cmd,
            rx_ev,
        );
        (app, rx_cmd, tx_ev)
    }
}
