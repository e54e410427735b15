use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::corrupt;
use super::unique_violation;
use crate::domain::auth::models::EmailAddress;
use crate::domain::company::models::Company;
use crate::domain::company::models::CompanyId;
use crate::domain::company::models::CompanyName;
use crate::domain::company::models::CompanyProfile;
use crate::domain::company::ports::CompanyRepository;
use crate::domain::errors::StoreError;

pub(super) const COMPANY_COLUMNS: &str = "id, email, password_hash, name, description, website, \
     industry, location, company_size, headquarter, founded_year, logo_url, created_at, updated_at";

pub(super) fn company_from_row(row: &PgRow) -> Result<Company, StoreError> {
    let email: String = row.try_get("email")?;
    let name: String = row.try_get("name")?;

    Ok(Company {
        id: CompanyId(row.try_get("id")?),
        email: EmailAddress::new(&email).map_err(|e| corrupt("email", e))?,
        password_hash: row.try_get("password_hash")?,
        name: CompanyName::new(&name).map_err(|e| corrupt("name", e))?,
        profile: CompanyProfile {
            description: row.try_get("description")?,
            website: row.try_get("website")?,
            industry: row.try_get("industry")?,
            location: row.try_get("location")?,
            company_size: row.try_get("company_size")?,
            headquarter: row.try_get("headquarter")?,
            founded_year: row.try_get("founded_year")?,
            logo_url: row.try_get("logo_url")?,
        },
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub struct PostgresCompanyRepository {
    pool: PgPool,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    async fn find_by_id(&self, id: CompanyId) -> Result<Option<Company>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM companies WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(company_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Company>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM companies WHERE LOWER(name) = LOWER($1)",
            COMPANY_COLUMNS
        ))
        .bind(name.trim())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(company_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Company>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM companies ORDER BY name ASC",
            COMPANY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(company_from_row).collect()
    }

    async fn update(&self, company: Company) -> Result<Company, StoreError> {
        let profile = &company.profile;

        let row = sqlx::query(&format!(
            r#"
            UPDATE companies
            SET name = $2, description = $3, website = $4, industry = $5, location = $6,
                company_size = $7, headquarter = $8, founded_year = $9, logo_url = $10,
                updated_at = $11
            WHERE id = $1
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(company.id.0)
        .bind(company.name.as_str())
        .bind(&profile.description)
        .bind(&profile.website)
        .bind(&profile.industry)
        .bind(&profile.location)
        .bind(&profile.company_size)
        .bind(&profile.headquarter)
        .bind(profile.founded_year)
        .bind(&profile.logo_url)
        .bind(company.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_violation(e, company.email.as_str(), Some(company.name.as_str())))?;

        company_from_row(&row)
    }

    async fn delete(&self, id: CompanyId) -> Result<bool, StoreError> {
        // Removing the registered email cascades to the company and its jobs.
        let result = sqlx::query(
            r#"
            DELETE FROM registered_emails
            WHERE email = (SELECT email FROM companies WHERE id = $1)
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
