//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! the controllers and the HTTP backend. Environment variables are never read
//! during event handling, which keeps behaviour consistent across runtimes
//! and test harnesses.

use crate::{IntakeError, IntakeResult};
use healthe_types::ReportRef;
use std::time::Duration;

/// Default backend base URL when `HEALTHE_API_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Default per-request timeout in seconds when `HEALTHE_HTTP_TIMEOUT_SECS`
/// is unset.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    api_base_url: String,
    request_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The base URL is trimmed and stripped of any trailing slash so path
    /// construction stays uniform.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidInput` if the base URL is empty or is not
    /// an http(s) URL.
    pub fn new(api_base_url: impl Into<String>, request_timeout: Duration) -> IntakeResult<Self> {
        let api_base_url = api_base_url.into().trim().trim_end_matches('/').to_owned();
        if api_base_url.is_empty() {
            return Err(IntakeError::InvalidInput(
                "api_base_url cannot be empty".into(),
            ));
        }
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(IntakeError::InvalidInput(
                "api_base_url must start with http:// or https://".into(),
            ));
        }
        if request_timeout.is_zero() {
            return Err(IntakeError::InvalidInput(
                "request_timeout must be non-zero".into(),
            ));
        }

        Ok(Self {
            api_base_url,
            request_timeout,
        })
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// URL of the create-intake endpoint.
    pub fn create_intake_url(&self) -> String {
        format!("{}/api/intake/start", self.api_base_url)
    }

    /// URL of the report PDF resource for a reference token.
    pub fn report_pdf_url(&self, report_ref: &ReportRef) -> String {
        format!("{}/api/report/{}.pdf", self.api_base_url, report_ref)
    }
}

/// Parse the request timeout from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns the default timeout.
///
/// # Errors
///
/// Returns `IntakeError::InvalidInput` if the value is present but is not a
/// positive integer number of seconds.
pub fn request_timeout_from_env_value(value: Option<String>) -> IntakeResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v.parse::<u64>().map_err(|_| {
            IntakeError::InvalidInput(
                "HEALTHE_HTTP_TIMEOUT_SECS must be a whole number of seconds".into(),
            )
        })?,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    if secs == 0 {
        return Err(IntakeError::InvalidInput(
            "HEALTHE_HTTP_TIMEOUT_SECS must be non-zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}
