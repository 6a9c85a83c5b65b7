//! # Health-E Client
//!
//! HTTP implementation of the intake backend seam.
//!
//! [`HttpIntakeBackend`] posts a validated intake draft to the backend's
//! create-intake endpoint and maps the response onto the core's
//! [`SubmitError`] taxonomy:
//! - success status with a non-empty `ref_id` body is the only success
//! - success status without a usable `ref_id` is an application error
//! - non-success statuses surface the body's `detail`, falling back to
//!   `message`, falling back to a generic text embedding the status code
//! - an unparseable body is tolerated and degrades to "no detail available"
//!   semantics rather than propagating a parse error
//!
//! Requests carry a per-request timeout so a hung backend resolves to a
//! transport failure instead of leaving the submit control stuck.

use healthe_core::{CoreConfig, CreateIntake, IntakeCreated, IntakeStartReq, SubmitError};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;

/// Errors that can occur constructing the HTTP backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

/// Lenient view of a success-shaped create-intake response body.
#[derive(Debug, Deserialize)]
struct IntakeCreatedWire {
    #[serde(default)]
    ref_id: Option<String>,
    #[serde(default)]
    report_pdf_url: Option<String>,
}

/// Best-effort view of a failure response body.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    /// Picks the user-facing message: `detail`, then `message`, then a
    /// generic text embedding the numeric status code.
    fn into_message(self, status: reqwest::StatusCode) -> String {
        self.detail
            .filter(|s| !s.trim().is_empty())
            .or(self.message.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| format!("The server responded with status {}.", status.as_u16()))
    }
}

/// `reqwest`-backed implementation of [`CreateIntake`].
#[derive(Clone, Debug)]
pub struct HttpIntakeBackend {
    cfg: Arc<CoreConfig>,
    http: reqwest::Client,
}

impl HttpIntakeBackend {
    /// Builds the backend with the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Build` if the HTTP client cannot be
    /// constructed.
    pub fn new(cfg: Arc<CoreConfig>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self { cfg, http })
    }

    async fn post_intake(&self, req: IntakeStartReq) -> Result<IntakeCreated, SubmitError> {
        let url = self.cfg.create_intake_url();
        let response = self
            .http
            .post(&url)
            .json(&req)
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        // The body is read as text first: an unparseable body must degrade
        // to "no detail available", not fail the whole exchange.
        let body = response.text().await.unwrap_or_default();

        if status.is_success() {
            let wire: IntakeCreatedWire = match serde_json::from_str(&body) {
                Ok(wire) => wire,
                Err(e) => {
                    tracing::error!(error = %e, "success response body did not parse");
                    return Err(SubmitError::MissingRefId);
                }
            };
            match wire.ref_id.filter(|r| !r.trim().is_empty()) {
                Some(ref_id) => Ok(IntakeCreated {
                    ref_id,
                    report_pdf_url: wire.report_pdf_url,
                }),
                None => Err(SubmitError::MissingRefId),
            }
        } else {
            let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = parsed.into_message(status);
            tracing::error!(status = status.as_u16(), %message, "create intake rejected");
            Err(SubmitError::Rejected(message))
        }
    }
}

impl CreateIntake for HttpIntakeBackend {
    fn create_intake(
        &self,
        req: IntakeStartReq,
    ) -> impl Future<Output = Result<IntakeCreated, SubmitError>> + Send {
        self.post_intake(req)
    }
}
