use auth::PrincipalKind;
use thiserror::Error;

use crate::domain::errors::FieldErrors;
use crate::domain::errors::StoreError;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("must be a well-formed email address ({0})")]
    InvalidFormat(String),
}

/// Error for Password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("must be at least {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Failure to establish who is calling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Inconsistent token claims")]
    InconsistentClaims,
}

/// Authenticated caller is not entitled to the resource.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Access denied: requires a {required} account")]
    RoleMismatch { required: PrincipalKind },

    #[error("Access denied: not the owner of this resource")]
    NotOwner,
}

/// Top-level error for registration and login
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid registration: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Company name already exists: {0}")]
    CompanyNameAlreadyExists(String),

    /// Wrong password and unknown email are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("Password hashing failed: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token issuance failed: {0}")]
    Token(#[from] auth::TokenError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(email) => AuthError::EmailAlreadyExists(email),
            StoreError::DuplicateCompanyName(name) => AuthError::CompanyNameAlreadyExists(name),
            other => AuthError::Store(other),
        }
    }
}
