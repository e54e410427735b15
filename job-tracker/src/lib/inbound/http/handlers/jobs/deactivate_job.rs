use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::JobResponseData;
use crate::domain::auth::principal::Principal;
use crate::domain::job::models::JobId;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn deactivate_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(job_id): Path<String>,
) -> Result<ApiSuccess<JobResponseData>, ApiError> {
    let job_id = JobId(parse_id(&job_id, "job_id")?);

    state
        .job_service
        .deactivate_job(&principal, job_id)
        .await
        .map_err(ApiError::from)
        .map(|ref job| ApiSuccess::new(StatusCode::OK, job.into()))
}
