use axum::extract::State;
use axum::http::StatusCode;

use super::CompanyResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<CompanyResponseData>>, ApiError> {
    state
        .company_service
        .list_companies()
        .await
        .map_err(ApiError::from)
        .map(|companies| {
            ApiSuccess::new(
                StatusCode::OK,
                companies.iter().map(CompanyResponseData::from).collect(),
            )
        })
}
