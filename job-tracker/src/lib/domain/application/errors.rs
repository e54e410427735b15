use thiserror::Error;

use super::models::JobApplicationId;
use crate::domain::auth::errors::AccessError;
use crate::domain::errors::FieldErrors;
use crate::domain::errors::StoreError;
use crate::domain::job::models::JobId;

/// Top-level error for all job application operations
#[derive(Debug, Clone, Error)]
pub enum JobApplicationError {
    #[error("Invalid application: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Application not found: {0}")]
    NotFound(JobApplicationId),

    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
