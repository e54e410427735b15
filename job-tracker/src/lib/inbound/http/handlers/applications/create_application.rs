use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::Utc;

use super::ApplicationRequest;
use super::ApplicationResponseData;
use crate::domain::auth::principal::Principal;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Track an application made outside the platform.
pub async fn create_application(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<ApplicationRequest>,
) -> Result<ApiSuccess<ApplicationResponseData>, ApiError> {
    let details = body.try_into_details(Utc::now().date_naive())?;

    state
        .application_service
        .create_application(&principal, details)
        .await
        .map_err(ApiError::from)
        .map(|ref application| ApiSuccess::new(StatusCode::CREATED, application.into()))
}
