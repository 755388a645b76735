//! Error type shared by every client flow.

use shared::{config::ConfigError, validation::FieldErrors, wizard::WizardError};
use thiserror::Error;

use crate::{api::SubmissionError, session::SessionError};

/// Everything a LocalPro Canvas flow can fail with. None of these end a
/// session; the user can correct the input or retry.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// One or more fields failed validation.
    #[error("{0}")]
    Validation(#[from] FieldErrors),

    /// The server refused the request or could not be reached.
    #[error(transparent)]
    Submission(#[from] SubmissionError),

    /// No lookup tier resolved the identifier.
    #[error("Portfolio Not Found: {identifier}")]
    NotFound {
        /// Identifier that was looked up.
        identifier: String,
    },

    /// The stored session could not be read or written.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A submit was attempted from step one.
    #[error("portfolio can only be submitted from the details step")]
    NotOnDetailsStep,

    /// A submit was attempted while another one is outstanding.
    #[error("a submission is already in progress")]
    InFlight,
}

impl From<WizardError> for CanvasError {
    fn from(err: WizardError) -> Self {
        match err {
            WizardError::NotOnDetailsStep => Self::NotOnDetailsStep,
            WizardError::Invalid(errors) => Self::Validation(errors),
        }
    }
}
