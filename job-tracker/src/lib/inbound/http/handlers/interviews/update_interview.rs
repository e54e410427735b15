use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::InterviewRequest;
use super::InterviewResponseData;
use crate::domain::auth::principal::Principal;
use crate::domain::interview::models::InterviewId;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_interview(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(interview_id): Path<String>,
    Json(body): Json<InterviewRequest>,
) -> Result<ApiSuccess<InterviewResponseData>, ApiError> {
    let interview_id = InterviewId(parse_id(&interview_id, "interview_id")?);

    state
        .interview_service
        .update_interview(&principal, interview_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref interview| ApiSuccess::new(StatusCode::OK, interview.into()))
}
