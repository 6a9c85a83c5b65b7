//! Report lookup controller.
//!
//! Normalizes a reference-ID input on every keystroke and, on lookup,
//! produces the URL of the report PDF to open in a new viewing context. The
//! controller never performs the fetch itself; "not found" and friends are
//! the report resource's own concern.

use crate::config::CoreConfig;
use healthe_types::fields;
use healthe_types::ReportRef;
use std::sync::Arc;

/// Inline message shown when the entered reference is not 20 characters.
pub const REF_LENGTH_MESSAGE: &str = "Please enter a valid 20-character reference ID.";

/// Event-driven controller for the report lookup input.
#[derive(Debug)]
pub struct ReportLookupController {
    cfg: Arc<CoreConfig>,
    value: String,
    validation_message: Option<&'static str>,
}

impl ReportLookupController {
    /// Creates the controller in its page-load state with an empty input.
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            value: String::new(),
            validation_message: None,
        }
    }

    /// Current (normalized) input value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Current inline validation message, if any.
    pub fn validation_message(&self) -> Option<&'static str> {
        self.validation_message
    }

    /// Deep-link prefill: copies the `ref` query parameter verbatim into the
    /// input if present. Normalization happens on the next input or lookup
    /// event, exactly as it would for a pasted value.
    pub fn prefill_from_query(&mut self, query: &str) {
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&') {
            if let Some(value) = pair.strip_prefix("ref=") {
                tracing::debug!(value, "prefilling reference from deep link");
                self.value = value.to_owned();
                return;
            }
        }
    }

    /// Reference input event: normalizes and stores the value, mirroring the
    /// write-back-if-changed behaviour of the input field.
    pub fn input_ref(&mut self, raw: &str) {
        self.value = fields::normalize_ref(raw);
    }

    /// Lookup trigger.
    ///
    /// Re-normalizes the current value; if it is not exactly 20 characters,
    /// sets the inline validation message and returns `None` (no request is
    /// issued). Otherwise clears the message and returns the report PDF URL
    /// to open in a new viewing context.
    pub fn lookup(&mut self) -> Option<String> {
        self.value = fields::normalize_ref(&self.value);
        match ReportRef::parse(&self.value) {
            Ok(report_ref) => {
                self.validation_message = None;
                Some(self.cfg.report_pdf_url(&report_ref))
            }
            Err(_) => {
                self.validation_message = Some(REF_LENGTH_MESSAGE);
                None
            }
        }
    }
}
