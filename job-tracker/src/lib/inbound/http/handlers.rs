use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::application::errors::JobApplicationError;
use crate::domain::auth::errors::AccessError;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::AuthenticationError;
use crate::domain::company::errors::CompanyError;
use crate::domain::errors::FieldErrors;
use crate::domain::interview::errors::InterviewError;
use crate::domain::job::errors::JobError;

pub mod applications;
pub mod authentication;
pub mod companies;
pub mod interviews;
pub mod jobs;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    ValidationFailed(FieldErrors),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        Self::ValidationFailed(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, data) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Unexpected error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorData::message("An unexpected error occurred"),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiErrorData::message(msg)),
            ApiError::ValidationFailed(fields) => (
                StatusCode::BAD_REQUEST,
                ApiErrorData {
                    message: "Validation failed".to_string(),
                    fields: Some(fields),
                },
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiErrorData::message(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiErrorData::message(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ApiErrorData::message(msg)),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiErrorData::message(msg)),
        };

        (status, Json(ApiResponseBody::new(status, data))).into_response()
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(fields) => ApiError::ValidationFailed(fields),
            AuthError::EmailAlreadyExists(_) | AuthError::CompanyNameAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            AuthError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            AuthError::Authentication(e) => e.into(),
            AuthError::Password(_) | AuthError::Token(_) | AuthError::Store(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<CompanyError> for ApiError {
    fn from(err: CompanyError) -> Self {
        match err {
            CompanyError::Validation(fields) => ApiError::ValidationFailed(fields),
            CompanyError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CompanyError::NameAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            CompanyError::Forbidden(e) => e.into(),
            CompanyError::Store(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        match err {
            JobError::Validation(fields) => ApiError::ValidationFailed(fields),
            JobError::NotFound(_) | JobError::CompanyNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            JobError::Forbidden(e) => e.into(),
            JobError::Store(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JobApplicationError> for ApiError {
    fn from(err: JobApplicationError) -> Self {
        match err {
            JobApplicationError::Validation(fields) => ApiError::ValidationFailed(fields),
            JobApplicationError::NotFound(_) | JobApplicationError::JobNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            JobApplicationError::Forbidden(e) => e.into(),
            JobApplicationError::Store(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<InterviewError> for ApiError {
    fn from(err: InterviewError) -> Self {
        match err {
            InterviewError::Validation(fields) => ApiError::ValidationFailed(fields),
            InterviewError::NotFound(_) | InterviewError::ApplicationNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            InterviewError::Forbidden(e) => e.into(),
            InterviewError::Store(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl ApiErrorData {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: None,
        }
    }
}

/// Parse a numeric path segment.
pub(crate) fn parse_id(raw: &str, name: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {}: {}", name, raw)))
}
