use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::JobResponseData;
use crate::domain::auth::principal::Principal;
use crate::domain::errors::FieldErrors;
use crate::domain::job::models::CreateJobCommand;
use crate::domain::job::models::SalaryRange;
use crate::domain::values::optional_text;
use crate::domain::values::RequiredText;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn create_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<CreateJobRequest>,
) -> Result<ApiSuccess<JobResponseData>, ApiError> {
    state
        .job_service
        .create_job(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref job| ApiSuccess::new(StatusCode::CREATED, job.into()))
}

/// HTTP request body for posting a job (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    requirements: Option<String>,
    #[serde(default)]
    location: String,
    job_type: Option<String>,
    work_mode: Option<String>,
    salary_min: Option<i64>,
    salary_max: Option<i64>,
    currency: Option<String>,
    job_url: Option<String>,
    posted_date: Option<NaiveDate>,
    deadline_date: Option<NaiveDate>,
}

impl CreateJobRequest {
    fn try_into_command(self) -> Result<CreateJobCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = errors.check("title", RequiredText::new(&self.title));
        let description = errors.check("description", RequiredText::new(&self.description));
        let location = errors.check("location", RequiredText::new(&self.location));
        let job_type = required_label(&mut errors, "job_type", self.job_type.as_deref());
        let work_mode = required_label(&mut errors, "work_mode", self.work_mode.as_deref());
        let salary = errors.check("salary_min", SalaryRange::new(self.salary_min, self.salary_max));

        match (title, description, location, job_type, work_mode, salary) {
            (
                Some(title),
                Some(description),
                Some(location),
                Some(job_type),
                Some(work_mode),
                Some(salary),
            ) => errors.into_result(CreateJobCommand {
                title,
                description,
                requirements: optional_text(self.requirements),
                location,
                job_type,
                work_mode,
                salary,
                currency: optional_text(self.currency),
                job_url: optional_text(self.job_url),
                posted_date: self.posted_date,
                deadline_date: self.deadline_date,
            }),
            _ => Err(errors),
        }
    }
}

/// Parse a label that must be present.
fn required_label<T>(errors: &mut FieldErrors, field: &str, raw: Option<&str>) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => errors.check(field, raw.parse::<T>()),
        None => {
            errors.add(field, "must be provided");
            None
        }
    }
}
