//! Intake form controller.
//!
//! Owns the in-progress intake draft, per-field error visibility, submit
//! gating, the terms overlay, and the create-intake submission cycle. One
//! controller instance is constructed per page and owns all of its state;
//! there are no process-wide singletons.

use crate::backend::{CreateIntake, IntakeStartReq, SubmitError};
use crate::terms::{FrameMessages, OverlayClick, TermsOverlay};
use healthe_types::fields;
use healthe_types::{Age, PatientName, Sex};

/// Submit control label while a request is in flight.
pub const SUBMIT_BUSY_LABEL: &str = "Submitting...";

/// Default submit control label.
pub const SUBMIT_LABEL: &str = "Get My Report";

/// Transient, unsaved form state for one patient submission.
///
/// Values are stored exactly as the form widgets hold them: raw text for
/// name and age, the raw selection value for sex. Created empty on page
/// load, mutated on every input event, discarded after a successful submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntakeDraft {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub accepted_terms: bool,
}

/// The four intake fields, for error-visibility queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Age,
    Sex,
    Terms,
}

/// Where the submission cycle currently stands.
///
/// Validation is synchronous, so the validating step never outlives a call
/// to [`IntakeFormController::submit`]: an invalid draft lands straight back
/// in `Idle` with its errors showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// A blocking user notification produced by a terminal submission state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The submission succeeded; present the reference ID (and report URL
    /// when the backend returned one) to the user.
    Confirmation {
        ref_id: String,
        report_pdf_url: Option<String>,
    },
    /// The submission failed with this user-facing message.
    Error(String),
}

/// Event-driven controller for the intake form.
#[derive(Debug)]
pub struct IntakeFormController {
    draft: IntakeDraft,
    overlay: TermsOverlay,
    phase: SubmitPhase,
    submit_enabled: bool,
    submit_label: String,
    saved_label: Option<String>,
    notice: Option<Notice>,
}

impl IntakeFormController {
    /// Creates the controller in its page-load state: empty draft, hidden
    /// overlay, submit control disabled.
    pub fn new() -> Self {
        Self {
            draft: IntakeDraft::default(),
            overlay: TermsOverlay::new(),
            phase: SubmitPhase::Idle,
            submit_enabled: false,
            submit_label: SUBMIT_LABEL.to_owned(),
            saved_label: None,
            notice: None,
        }
    }

    pub fn draft(&self) -> &IntakeDraft {
        &self.draft
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    /// Whether the submit control is currently enabled. Always a pure
    /// function of the current field values and submission phase.
    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    /// Current label of the submit control.
    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Takes the pending user notification, if a terminal submission state
    /// produced one.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    // ------------------------------------------------------------------
    // Field input events
    // ------------------------------------------------------------------

    /// Name input event. Sanitizes the raw value and stores the result,
    /// mirroring the sanitize-and-write-back behaviour of the form field.
    pub fn input_name(&mut self, raw: &str) {
        self.draft.name = fields::sanitize_name(raw);
        self.refresh_submit_gate();
    }

    /// Age input event. The raw value is stored as-is; the numeric widget
    /// constrains what can be typed and validation does the rest.
    pub fn input_age(&mut self, raw: &str) {
        self.draft.age = raw.to_owned();
        self.refresh_submit_gate();
    }

    /// Sex selection change event. Stores the raw selection value; only the
    /// exact values `"Male"` and `"Female"` validate.
    pub fn select_sex(&mut self, value: &str) {
        self.draft.sex = value.to_owned();
        self.refresh_submit_gate();
    }

    /// Terms checkbox change event.
    pub fn set_accepted_terms(&mut self, checked: bool) {
        self.draft.accepted_terms = checked;
        self.refresh_submit_gate();
    }

    /// True iff all four fields pass validation right now.
    pub fn is_draft_valid(&self) -> bool {
        fields::is_valid_name(&self.draft.name)
            && fields::is_valid_age(&self.draft.age)
            && self.draft.sex.parse::<Sex>().is_ok()
            && self.draft.accepted_terms
    }

    /// Whether the error indicator for `field` should be shown.
    ///
    /// An indicator is hidden while its field is still empty (the user has
    /// not engaged it) and whenever the field is valid. The terms indicator
    /// is the exception: it shows whenever the box is unchecked.
    pub fn field_error_visible(&self, field: Field) -> bool {
        match field {
            Field::Name => {
                !self.draft.name.is_empty() && !fields::is_valid_name(&self.draft.name)
            }
            Field::Age => !self.draft.age.is_empty() && !fields::is_valid_age(&self.draft.age),
            Field::Sex => !self.draft.sex.is_empty() && self.draft.sex.parse::<Sex>().is_err(),
            Field::Terms => !self.draft.accepted_terms,
        }
    }

    // ------------------------------------------------------------------
    // Terms overlay events
    // ------------------------------------------------------------------

    /// "Open terms" click: shows the overlay (default navigation is assumed
    /// to have been prevented by the caller).
    pub fn open_terms(&mut self) {
        self.overlay.open();
    }

    /// A click inside the open overlay.
    pub fn overlay_click(&mut self, target: OverlayClick) {
        self.overlay.click(target);
    }

    pub fn overlay(&self) -> &TermsOverlay {
        &self.overlay
    }

    /// Drains every already-delivered inter-frame message into the overlay.
    pub fn pump_frame_messages(&mut self, messages: &mut FrameMessages) {
        while let Some(payload) = messages.try_recv() {
            self.overlay.handle_message(&payload);
        }
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    /// Submit event.
    ///
    /// Runs the validation step synchronously; an invalid draft stays in
    /// `Idle` with its error indicators already visible. A valid draft
    /// enters `Submitting` (submit control disabled, label swapped to the
    /// in-progress label) and issues exactly one create-intake request. On
    /// both terminal states the label is restored and the control's enabled
    /// state is recomputed from current field validity, not unconditionally
    /// re-enabled. Calling this while a request is in flight is a no-op;
    /// the disabled control serialises user-initiated submissions.
    pub async fn submit<B: CreateIntake>(&mut self, backend: &B) {
        if self.phase == SubmitPhase::Submitting {
            return;
        }

        let Some(req) = self.validated_request() else {
            self.phase = SubmitPhase::Idle;
            self.refresh_submit_gate();
            return;
        };

        self.phase = SubmitPhase::Submitting;
        self.submit_enabled = false;
        self.saved_label = Some(std::mem::replace(
            &mut self.submit_label,
            SUBMIT_BUSY_LABEL.to_owned(),
        ));

        tracing::info!("submitting intake draft");
        match backend.create_intake(req).await {
            Ok(created) => {
                tracing::info!(ref_id = %created.ref_id, "intake submission succeeded");
                self.notice = Some(Notice::Confirmation {
                    ref_id: created.ref_id,
                    report_pdf_url: created.report_pdf_url,
                });
                self.phase = SubmitPhase::Succeeded;
                // The draft is discarded once the confirmation is handed over.
                self.draft = IntakeDraft::default();
            }
            Err(err) => {
                tracing::error!(error = %err, "intake submission failed");
                self.notice = Some(Notice::Error(err.to_string()));
                self.phase = SubmitPhase::Failed;
            }
        }

        if let Some(label) = self.saved_label.take() {
            self.submit_label = label;
        }
        self.refresh_submit_gate();
    }

    fn validated_request(&self) -> Option<IntakeStartReq> {
        if !self.draft.accepted_terms {
            return None;
        }
        let name = PatientName::new(&self.draft.name).ok()?;
        let age = Age::parse(&self.draft.age).ok()?;
        let sex = self.draft.sex.parse::<Sex>().ok()?;
        Some(IntakeStartReq {
            name,
            age,
            sex,
            accepted_terms: true,
        })
    }

    fn refresh_submit_gate(&mut self) {
        self.submit_enabled = self.phase != SubmitPhase::Submitting && self.is_draft_valid();
    }
}

impl Default for IntakeFormController {
    fn default() -> Self {
        Self::new()
    }
}
