use crate::{FieldErrors, SubmissionState};

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(FieldErrors),

    #[error("form is {0}, submit ignored")]
    Busy(SubmissionState),

    #[error("delivery failed: {0}")]
    Delivery(anyhow::Error),
}

impl SubmitError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
