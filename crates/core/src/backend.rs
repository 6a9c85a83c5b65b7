//! The backend seam for intake submission.
//!
//! The intake controller talks to the backend through [`CreateIntake`], so
//! the core stays free of transport concerns. The HTTP implementation lives
//! in `healthe-client`; tests substitute stubs.

use healthe_types::{Age, PatientName, Sex};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Request body of the create-intake endpoint.
///
/// The backend schema names the consent flag `acceptedTerms`; it is always
/// `true` on the wire because an unconsented draft never validates.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IntakeStartReq {
    pub name: PatientName,
    pub age: Age,
    pub sex: Sex,
    #[serde(rename = "acceptedTerms")]
    pub accepted_terms: bool,
}

/// Successful create-intake response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IntakeCreated {
    /// Reference identifier for the stored report. Implementations must only
    /// produce this type with a non-empty `ref_id`.
    pub ref_id: String,
    /// Relative or absolute URL of the generated report PDF, when the
    /// backend returned one.
    pub report_pdf_url: Option<String>,
}

/// Why a submission did not produce a reference identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The backend answered with a non-success status. The string is the
    /// best available description: the response's `detail` field, falling
    /// back to `message`, falling back to a generic text embedding the
    /// numeric status code.
    #[error("{0}")]
    Rejected(String),

    /// The request never completed: connection failure, timeout, or another
    /// transport-level error.
    #[error("could not reach the server: {0}")]
    Transport(String),

    /// The backend reported success but the body carried no usable
    /// reference identifier.
    #[error("server did not return a reference identifier")]
    MissingRefId,
}

/// One-shot create-intake operation against the backend collaborator.
pub trait CreateIntake {
    /// Submits a validated intake draft and resolves to the created record
    /// or the mapped failure.
    fn create_intake(
        &self,
        req: IntakeStartReq,
    ) -> impl Future<Output = Result<IntakeCreated, SubmitError>> + Send;
}
