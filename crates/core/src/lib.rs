//! # Health-E Core
//!
//! Client-side core for the Health-E intake workflow.
//!
//! This crate contains the two page controllers and everything they own:
//! - [`intake::IntakeFormController`] — field validation, error display,
//!   submit gating, the terms overlay, and the create-report submission
//!   state machine
//! - [`lookup::ReportLookupController`] — reference-ID normalization and
//!   report URL construction
//!
//! **No transport concerns**: the HTTP implementation of the backend seam
//! lives in `healthe-client`; binaries wire the two together.

pub mod backend;
pub mod config;
pub mod error;
pub mod intake;
pub mod lookup;
pub mod terms;

pub use backend::{CreateIntake, IntakeCreated, IntakeStartReq, SubmitError};
pub use config::{CoreConfig, DEFAULT_API_BASE_URL};
pub use error::{IntakeError, IntakeResult};
pub use intake::{Field, IntakeDraft, IntakeFormController, Notice, SubmitPhase};
pub use lookup::ReportLookupController;
pub use terms::{frame_message_channel, FrameMessages, FrameSender, TermsOverlay};
