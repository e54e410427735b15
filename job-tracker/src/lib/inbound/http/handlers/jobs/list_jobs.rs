use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::Utc;
use serde::Deserialize;

use super::job_list;
use super::JobResponseData;
use crate::domain::auth::principal::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobSearchParams {
    search: Option<String>,
}

/// Active jobs, optionally filtered by `?search=`.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Result<ApiSuccess<Vec<JobResponseData>>, ApiError> {
    let jobs = match params.search {
        Some(term) => state.job_service.search_active_jobs(&term).await,
        None => state.job_service.list_active_jobs().await,
    };

    jobs.map_err(ApiError::from)
        .map(|jobs| ApiSuccess::new(StatusCode::OK, job_list(jobs)))
}

pub async fn list_upcoming_deadlines(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<JobResponseData>>, ApiError> {
    state
        .job_service
        .list_upcoming_deadlines(Utc::now().date_naive())
        .await
        .map_err(ApiError::from)
        .map(|jobs| ApiSuccess::new(StatusCode::OK, job_list(jobs)))
}

pub async fn list_my_jobs(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<JobResponseData>>, ApiError> {
    state
        .job_service
        .list_my_jobs(&principal)
        .await
        .map_err(ApiError::from)
        .map(|jobs| ApiSuccess::new(StatusCode::OK, job_list(jobs)))
}
