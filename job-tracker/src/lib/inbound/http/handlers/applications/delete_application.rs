use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::application::models::JobApplicationId;
use crate::domain::auth::principal::Principal;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_application(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(application_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let application_id = JobApplicationId(parse_id(&application_id, "application_id")?);

    state
        .application_service
        .delete_application(&principal, application_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
