use thiserror::Error;

use super::models::JobId;
use crate::domain::auth::errors::AccessError;
use crate::domain::company::models::CompanyId;
use crate::domain::errors::FieldErrors;
use crate::domain::errors::StoreError;

/// Error for SalaryRange validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SalaryRangeError {
    #[error("salary bounds must not be negative")]
    Negative,

    #[error("minimum salary {min} exceeds maximum salary {max}")]
    Inverted { min: i64, max: i64 },
}

/// Top-level error for all job operations
#[derive(Debug, Clone, Error)]
pub enum JobError {
    #[error("Invalid job: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Job not found: {0}")]
    NotFound(JobId),

    /// The posting company was deleted while its token is still valid.
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
