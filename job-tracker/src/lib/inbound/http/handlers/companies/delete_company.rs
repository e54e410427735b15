use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::auth::principal::Principal;
use crate::domain::company::models::CompanyId;
use crate::inbound::http::handlers::parse_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_company(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(company_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let company_id = CompanyId(parse_id(&company_id, "company_id")?);

    state
        .company_service
        .delete_company(&principal, company_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
