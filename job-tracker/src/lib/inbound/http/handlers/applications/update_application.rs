use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::Utc;

use super::ApplicationRequest;
use super::ApplicationResponseData;
use crate::domain::application::models::JobApplicationId;
use crate::domain::auth::principal::Principal;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_application(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
    Json(body): Json<ApplicationRequest>,
) -> Result<ApiSuccess<ApplicationResponseData>, ApiError> {
    let application_id = JobApplicationId(parse_id(&application_id, "application_id")?);
    let details = body.try_into_details(Utc::now().date_naive())?;

    state
        .application_service
        .update_application(&principal, application_id, details)
        .await
        .map_err(ApiError::from)
        .map(|ref application| ApiSuccess::new(StatusCode::OK, application.into()))
}
