use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use super::JobResponseData;
use crate::domain::auth::principal::Principal;
use crate::domain::errors::FieldErrors;
use crate::domain::job::models::JobId;
use crate::domain::job::models::JobType;
use crate::domain::job::models::UpdateJobCommand;
use crate::domain::job::models::WorkMode;
use crate::domain::values::optional_text;
use crate::domain::values::RequiredText;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(job_id): Path<String>,
    Json(body): Json<UpdateJobRequest>,
) -> Result<ApiSuccess<JobResponseData>, ApiError> {
    let job_id = JobId(parse_id(&job_id, "job_id")?);

    state
        .job_service
        .update_job(&principal, job_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref job| ApiSuccess::new(StatusCode::OK, job.into()))
}

/// HTTP request body for a partial job update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateJobRequest {
    title: Option<String>,
    description: Option<String>,
    requirements: Option<String>,
    location: Option<String>,
    job_type: Option<String>,
    work_mode: Option<String>,
    salary_min: Option<i64>,
    salary_max: Option<i64>,
    currency: Option<String>,
    job_url: Option<String>,
    deadline_date: Option<NaiveDate>,
    is_active: Option<bool>,
}

impl UpdateJobRequest {
    fn try_into_command(self) -> Result<UpdateJobCommand, FieldErrors> {
        let mut errors = FieldErrors::new();

        let mut required = |field: &str, raw: Option<String>| {
            raw.and_then(|raw| errors.check(field, RequiredText::new(&raw)))
        };
        let title = required("title", self.title);
        let description = required("description", self.description);
        let location = required("location", self.location);

        let job_type = self
            .job_type
            .and_then(|raw| errors.check("job_type", raw.parse::<JobType>()));
        let work_mode = self
            .work_mode
            .and_then(|raw| errors.check("work_mode", raw.parse::<WorkMode>()));

        errors.into_result(UpdateJobCommand {
            title,
            description,
            requirements: optional_text(self.requirements),
            location,
            job_type,
            work_mode,
            salary_min: self.salary_min,
            salary_max: self.salary_max,
            currency: optional_text(self.currency),
            job_url: optional_text(self.job_url),
            deadline_date: self.deadline_date,
            is_active: self.is_active,
        })
    }
}
