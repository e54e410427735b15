use thiserror::Error;

use super::models::CompanyId;
use crate::domain::auth::errors::AccessError;
use crate::domain::errors::FieldErrors;
use crate::domain::errors::StoreError;

/// Error for CompanyName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompanyNameError {
    #[error("must not be blank")]
    Blank,

    #[error("must be at most {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all company operations
#[derive(Debug, Clone, Error)]
pub enum CompanyError {
    #[error("Invalid company profile: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Company not found: {0}")]
    NotFound(CompanyId),

    #[error("Company name already exists: {0}")]
    NameAlreadyExists(String),

    #[error(transparent)]
    Forbidden(#[from] AccessError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CompanyError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateCompanyName(name) => CompanyError::NameAlreadyExists(name),
            other => CompanyError::Store(other),
        }
    }
}
