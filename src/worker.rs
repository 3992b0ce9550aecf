//! Background worker that delivers status reports off the UI loop.

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    config::Config,
    report::ShelterReport,
    sender::{self, ReportTransport},
};

/// Commands sent from the UI to the worker.
#[derive(Debug)]
pub enum WorkerCmd {
    /// Deliver one report. Retries reuse the same id and report.
    SendReport {
        submission_id: Uuid,
        report: ShelterReport,
    },
    /// Apply updated backend settings.
    SaveSettings(Config),
}

/// Events emitted by the worker for UI updates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkerEvent {
    /// The report was accepted by the transport.
    ReportSent { submission_id: Uuid },
    /// Delivery failed; the UI offers a retry.
    SendFailed { submission_id: Uuid, error: String },
    /// Informational log message.
    Log(String),
}

/// Main worker loop: build the transport from config, then handle commands.
pub async fn run(rx: mpsc::Receiver<WorkerCmd>, tx: mpsc::Sender<WorkerEvent>, cfg: Config) {
    let transport = sender::from_config(&cfg.backend);
    run_with_transport(rx, tx, transport).await
}

/// Worker loop over an explicit transport.
pub async fn run_with_transport(
    mut rx: mpsc::Receiver<WorkerCmd>,
    tx: mpsc::Sender<WorkerEvent>,
    mut transport: Box<dyn ReportTransport>,
) {
    tracing::info!("worker started ({})", transport.describe());
    let _ = tx
        .send(WorkerEvent::Log(format!("delivery: {}", transport.describe())))
        .await;

    // One command at a time so reports go out in submission order.
    while let Some(cmd) = rx.recv().await {
        match cmd {
            WorkerCmd::SaveSettings(new_cfg) => {
                // Later sends go through the new backend.
                transport = sender::from_config(&new_cfg.backend);
                tracing::info!("settings updated ({})", transport.describe());
                let _ = tx
                    .send(WorkerEvent::Log(format!(
                        "settings updated, delivery: {}",
                        transport.describe()
                    )))
                    .await;
            }

            WorkerCmd::SendReport {
                submission_id,
                report,
            } => {
                tracing::info!("send report start: {submission_id}");
                // Failures go back to the UI, which decides about a retry.
                let ev = match transport.send(&report).await {
                    Ok(()) => {
                        tracing::info!("send report done: {submission_id}");
                        WorkerEvent::ReportSent { submission_id }
                    }
                    Err(e) => {
                        tracing::error!("send report failed: {submission_id}: {e}");
                        WorkerEvent::SendFailed {
                            submission_id,
                            error: e.to_string(),
                        }
                    }
                };
                // UI may already be gone on shutdown.
                let _ = tx.send(ev).await;
            }
        }
    }
    tracing::info!("worker stopped");
}
