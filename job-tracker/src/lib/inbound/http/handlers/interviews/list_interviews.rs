use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::Utc;

use super::interview_list;
use super::InterviewResponseData;
use crate::domain::application::models::JobApplicationId;
use crate::domain::auth::principal::Principal;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_interviews(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<InterviewResponseData>>, ApiError> {
    state
        .interview_service
        .list_interviews(&principal)
        .await
        .map_err(ApiError::from)
        .map(|interviews| ApiSuccess::new(StatusCode::OK, interview_list(interviews)))
}

pub async fn list_upcoming(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<InterviewResponseData>>, ApiError> {
    state
        .interview_service
        .list_upcoming(&principal, Utc::now())
        .await
        .map_err(ApiError::from)
        .map(|interviews| ApiSuccess::new(StatusCode::OK, interview_list(interviews)))
}

pub async fn list_completed(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<Vec<InterviewResponseData>>, ApiError> {
    state
        .interview_service
        .list_completed(&principal, Utc::now())
        .await
        .map_err(ApiError::from)
        .map(|interviews| ApiSuccess::new(StatusCode::OK, interview_list(interviews)))
}

pub async fn list_for_application(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
) -> Result<ApiSuccess<Vec<InterviewResponseData>>, ApiError> {
    let application_id = JobApplicationId(parse_id(&application_id, "application_id")?);

    state
        .interview_service
        .list_for_application(&principal, application_id)
        .await
        .map_err(ApiError::from)
        .map(|interviews| ApiSuccess::new(StatusCode::OK, interview_list(interviews)))
}
