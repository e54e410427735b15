use thiserror::Error;

use super::models::InterviewId;
use crate::domain::application::models::JobApplicationId;
use crate::domain::auth::errors::AccessError;
use crate::domain::errors::FieldErrors;
use crate::domain::errors::StoreError;

/// Top-level error for all interview operations
#[derive(Debug, Clone, Error)]
pub enum InterviewError {
    #[error("Invalid interview: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Interview not found: {0}")]
    NotFound(InterviewId),

    #[error("Application not found: {0}")]
    ApplicationNotFound(JobApplicationId),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
