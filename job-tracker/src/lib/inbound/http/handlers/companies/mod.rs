pub mod delete_company;
pub mod get_company;
pub mod list_companies;
pub mod profile;

pub use delete_company::delete_company;
pub use get_company::get_company;
pub use list_companies::list_companies;
pub use profile::get_profile;
pub use profile::update_profile;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::company::models::Company;

/// Public view of a company. Credentials never leave the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyResponseData {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub company_size: Option<String>,
    pub headquarter: Option<String>,
    pub founded_year: Option<i32>,
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Company> for CompanyResponseData {
    fn from(company: &Company) -> Self {
        let profile = &company.profile;
        Self {
            id: company.id.0,
            email: company.email.as_str().to_string(),
            name: company.name.as_str().to_string(),
            description: profile.description.clone(),
            website: profile.website.clone(),
            industry: profile.industry.clone(),
            location: profile.location.clone(),
            company_size: profile.company_size.clone(),
            headquarter: profile.headquarter.clone(),
            founded_year: profile.founded_year,
            logo_url: profile.logo_url.clone(),
            created_at: company.created_at,
            updated_at: company.updated_at,
        }
    }
}
