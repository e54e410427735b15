use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::CompanyResponseData;
use crate::domain::company::models::CompanyId;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_company(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<ApiSuccess<CompanyResponseData>, ApiError> {
    let company_id = CompanyId(parse_id(&company_id, "company_id")?);

    state
        .company_service
        .get_company(company_id)
        .await
        .map_err(ApiError::from)
        .map(|ref company| ApiSuccess::new(StatusCode::OK, company.into()))
}
