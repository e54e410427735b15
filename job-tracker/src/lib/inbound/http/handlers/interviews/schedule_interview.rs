use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::InterviewRequest;
use super::InterviewResponseData;
use crate::domain::auth::principal::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn schedule_interview(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<InterviewRequest>,
) -> Result<ApiSuccess<InterviewResponseData>, ApiError> {
    state
        .interview_service
        .schedule_interview(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref interview| ApiSuccess::new(StatusCode::CREATED, interview.into()))
}
