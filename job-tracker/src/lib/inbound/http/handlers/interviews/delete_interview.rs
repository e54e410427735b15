use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::auth::principal::Principal;
use crate::domain::interview::models::InterviewId;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_interview(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(interview_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let interview_id = InterviewId(parse_id(&interview_id, "interview_id")?);

    state
        .interview_service
        .delete_interview(&principal, interview_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
