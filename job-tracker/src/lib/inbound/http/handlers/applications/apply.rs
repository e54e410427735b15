use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::optional_email;
use super::ApplicationResponseData;
use crate::domain::application::models::ApplicationStatus;
use crate::domain::application::models::ApplyForJobCommand;
use crate::domain::auth::principal::Principal;
use crate::domain::errors::FieldErrors;
use crate::domain::job::models::JobId;
use crate::domain::values::optional_text;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn apply_for_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<ApplyRequest>,
) -> Result<ApiSuccess<ApplicationResponseData>, ApiError> {
    state
        .application_service
        .apply_for_job(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref application| ApiSuccess::new(StatusCode::CREATED, application.into()))
}

/// HTTP request body for applying to a listed job (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApplyRequest {
    job_id: Option<i64>,
    status: Option<String>,
    notes: Option<String>,
    contact_person: Option<String>,
    contact_email: Option<String>,
}

impl ApplyRequest {
    fn try_into_command(self) -> Result<ApplyForJobCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.job_id.is_none() {
            errors.add("job_id", "must be provided");
        }
        let status = self
            .status
            .and_then(|raw| errors.check("status", raw.parse::<ApplicationStatus>()));
        let contact_email = optional_email(&mut errors, self.contact_email);

        match self.job_id {
            Some(job_id) => errors.into_result(ApplyForJobCommand {
                job_id: JobId(job_id),
                status,
                notes: optional_text(self.notes),
                contact_person: optional_text(self.contact_person),
                contact_email,
            }),
            None => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_request() {
        let command = ApplyRequest {
            job_id: Some(3),
            status: Some("screening".to_string()),
            notes: Some(" referred ".to_string()),
            ..ApplyRequest::default()
        }
        .try_into_command()
        .unwrap();

        assert_eq!(command.job_id, JobId(3));
        assert_eq!(command.status, Some(ApplicationStatus::Screening));
        assert_eq!(command.notes.as_deref(), Some("referred"));
    }

    #[test]
    fn test_apply_request_requires_job() {
        let errors = ApplyRequest::default().try_into_command().unwrap_err();
        assert_eq!(errors.get("job_id"), Some("must be provided"));
    }
}
