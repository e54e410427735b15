use async_trait::async_trait;
use auth::PrincipalKind;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::company::company_from_row;
use super::company::COMPANY_COLUMNS;
use super::corrupt;
use super::unique_violation;
use crate::domain::auth::models::Account;
use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::NewCompany;
use crate::domain::auth::models::NewUser;
use crate::domain::auth::models::User;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::CredentialStore;
use crate::domain::company::models::Company;
use crate::domain::company::models::CompanyName;
use crate::domain::errors::StoreError;

const USER_COLUMNS: &str = "id, email, password_hash, full_name, username, created_at";

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let email: String = row.try_get("email")?;

    Ok(User {
        id: UserId(row.try_get("id")?),
        email: EmailAddress::new(&email).map_err(|e| corrupt("email", e))?,
        password_hash: row.try_get("password_hash")?,
        full_name: row.try_get("full_name")?,
        username: row.try_get("username")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Users and companies for authentication.
///
/// Each account row is inserted in one transaction with its
/// `registered_emails` entry, whose primary key keeps an email unique
/// across both kinds.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM registered_emails WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn company_name_exists(&self, name: &CompanyName) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM companies WHERE LOWER(name) = LOWER($1))",
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_account_by_email(
        &self,
        kind: PrincipalKind,
        email: &str,
    ) -> Result<Option<Account>, StoreError> {
        match kind {
            PrincipalKind::User => {
                let row = sqlx::query(&format!(
                    "SELECT {} FROM users WHERE email = $1",
                    USER_COLUMNS
                ))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

                row.map(|r| user_from_row(&r).map(Account::User))
                    .transpose()
            }
            PrincipalKind::Company => {
                let row = sqlx::query(&format!(
                    "SELECT {} FROM companies WHERE email = $1",
                    COMPANY_COLUMNS
                ))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

                row.map(|r| company_from_row(&r).map(Account::Company))
                    .transpose()
            }
        }
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let email = user.email.as_str();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO registered_emails (email, kind) VALUES ($1, $2)")
            .bind(email)
            .bind(PrincipalKind::User.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| unique_violation(e, email, None))?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (email, password_hash, full_name, username)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(&user.username)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, email, None))?;

        let created = user_from_row(&row)?;
        tx.commit().await?;

        Ok(created)
    }

    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError> {
        let email = company.email.as_str();
        let name = company.name.as_str();
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO registered_emails (email, kind) VALUES ($1, $2)")
            .bind(email)
            .bind(PrincipalKind::Company.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| unique_violation(e, email, Some(name)))?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO companies (email, password_hash, name)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(email)
        .bind(&company.password_hash)
        .bind(name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| unique_violation(e, email, Some(name)))?;

        let created = company_from_row(&row)?;
        tx.commit().await?;

        Ok(created)
    }
}
