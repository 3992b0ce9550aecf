//! Delivery of status reports to the rescue coordination backend.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::{config::BackendCfg, report::ShelterReport};

/// Something that can deliver a finished report.
#[async_trait]
pub trait ReportTransport: Send + Sync {
    /// Deliver one report. Errors are shown to the user with a retry option.
    async fn send(&self, report: &ShelterReport) -> Result<()>;

    /// Short description for logs and the status bar.
    fn describe(&self) -> String;
}

/// `PUT {base_url}/shelters/{shelter_id}/status` with a JSON body.
pub struct HttpTransport {
    http: Client,
    url: String,
    auth_token: String,
}

impl HttpTransport {
    /// Build a client for the configured backend.
    pub fn new(cfg: &BackendCfg) -> Result<Self> {
        if cfg.shelter_id.trim().is_empty() {
            return Err(anyhow!("shelter_id is not set"));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            url: status_url(&cfg.base_url, &cfg.shelter_id),
            auth_token: cfg.auth_token.trim().to_string(),
        })
    }
}

#[async_trait]
impl ReportTransport for HttpTransport {
    async fn send(&self, report: &ShelterReport) -> Result<()> {
        let mut req = self.http.put(&self.url).json(report);
        if !self.auth_token.is_empty() {
            req = req.bearer_auth(&self.auth_token);
        }
        let resp = req.send().await?;
        ensure_success(resp).await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("PUT {}", self.url)
    }
}

/// Keeps reports on this machine; used when no backend URL is configured.
pub struct LocalTransport;

#[async_trait]
impl ReportTransport for LocalTransport {
    async fn send(&self, report: &ShelterReport) -> Result<()> {
        let body = report.to_json()?;
        tracing::info!("local mode, report not transmitted: {body}");
        Ok(())
    }

    fn describe(&self) -> String {
        "local only".into()
    }
}

/// Stands in for a backend whose settings are unusable; every send fails.
pub struct MisconfiguredTransport {
    reason: String,
}

#[async_trait]
impl ReportTransport for MisconfiguredTransport {
    async fn send(&self, _report: &ShelterReport) -> Result<()> {
        Err(anyhow!("backend misconfigured: {}", self.reason))
    }

    fn describe(&self) -> String {
        format!("misconfigured ({})", self.reason)
    }
}

/// Pick the transport matching the backend settings.
pub fn from_config(cfg: &BackendCfg) -> Box<dyn ReportTransport> {
    if !cfg.is_remote() {
        return Box::new(LocalTransport);
    }
    match HttpTransport::new(cfg) {
        Ok(t) => Box::new(t),
        Err(e) => {
            tracing::warn!("backend settings rejected: {e}");
            Box::new(MisconfiguredTransport {
                reason: e.to_string(),
            })
        }
    }
}

/// Endpoint for one shelter's status updates.
pub fn status_url(base_url: &str, shelter_id: &str) -> String {
    format!(
        "{}/shelters/{}/status",
        base_url.trim().trim_end_matches('/'),
        urlencoding::encode(shelter_id.trim())
    )
}

/// Convert non-2xx responses into a structured error.
async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(anyhow!("authentication failed (HTTP 401), check auth_token"));
    }
    let body = resp.text().await.unwrap_or_else(|_| "".into());
    Err(anyhow!("HTTP status {status} error: {body}"))
}
