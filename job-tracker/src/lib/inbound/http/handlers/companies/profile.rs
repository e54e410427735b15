use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::CompanyResponseData;
use crate::domain::auth::principal::Principal;
use crate::domain::company::models::CompanyProfile;
use crate::domain::company::models::UpdateCompanyProfileCommand;
use crate::domain::errors::FieldErrors;
use crate::domain::values::optional_text;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<ApiSuccess<CompanyResponseData>, ApiError> {
    state
        .company_service
        .get_profile(&principal)
        .await
        .map_err(ApiError::from)
        .map(|ref company| ApiSuccess::new(StatusCode::OK, company.into()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<CompanyResponseData>, ApiError> {
    state
        .company_service
        .update_profile(&principal, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref company| ApiSuccess::new(StatusCode::OK, company.into()))
}

/// HTTP request body for a partial profile update (raw JSON)
///
/// Absent or blank fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    name: Option<String>,
    description: Option<String>,
    website: Option<String>,
    industry: Option<String>,
    location: Option<String>,
    company_size: Option<String>,
    headquarter: Option<String>,
    founded_year: Option<i32>,
    logo_url: Option<String>,
}

impl UpdateProfileRequest {
    fn try_into_command(self) -> Result<UpdateCompanyProfileCommand, FieldErrors> {
        let profile = CompanyProfile {
            description: optional_text(self.description),
            website: optional_text(self.website),
            industry: optional_text(self.industry),
            location: optional_text(self.location),
            company_size: optional_text(self.company_size),
            headquarter: optional_text(self.headquarter),
            founded_year: self.founded_year,
            logo_url: optional_text(self.logo_url),
        };

        UpdateCompanyProfileCommand::new(self.name.as_deref(), profile)
    }
}
