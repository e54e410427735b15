use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::application_list;
use super::ApplicationResponseData;
use crate::domain::auth::principal::Principal;
use crate::domain::job::models::JobId;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_my_applications(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<ApplicationResponseData>>, ApiError> {
    state
        .application_service
        .list_my_applications(&principal)
        .await
        .map_err(ApiError::from)
        .map(|applications| ApiSuccess::new(StatusCode::OK, application_list(applications)))
}

/// Applications received on one of the caller's jobs.
pub async fn list_applications_for_job(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(job_id): Path<String>,
) -> Result<ApiSuccess<Vec<ApplicationResponseData>>, ApiError> {
    let job_id = JobId(parse_id(&job_id, "job_id")?);

    state
        .application_service
        .list_applications_for_job(&principal, job_id)
        .await
        .map_err(ApiError::from)
        .map(|applications| ApiSuccess::new(StatusCode::OK, application_list(applications)))
}
