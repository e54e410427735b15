pub mod application;
pub mod company;
pub mod credentials;
pub mod interview;
pub mod job;
pub mod memory;

use std::fmt;
use std::str::FromStr;

pub use application::PostgresJobApplicationRepository;
pub use company::PostgresCompanyRepository;
pub use credentials::PostgresCredentialStore;
pub use interview::PostgresInterviewRepository;
pub use job::PostgresJobRepository;
pub use memory::InMemoryStore;

use crate::domain::errors::StoreError;
use crate::domain::errors::UnknownLabel;

/// A stored value that no longer passes domain validation.
fn corrupt(column: &str, e: impl fmt::Display) -> StoreError {
    StoreError::Database(format!("invalid {} in stored row: {}", column, e))
}

fn parse_label<T>(column: &str, value: &str) -> Result<T, StoreError>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.parse().map_err(|e| corrupt(column, e))
}

fn parse_optional_label<T>(column: &str, value: Option<String>) -> Result<Option<T>, StoreError>
where
    T: FromStr<Err = UnknownLabel>,
{
    value.map(|v| parse_label(column, &v)).transpose()
}

/// Classify a failed insert or update by the unique constraint it hit.
fn unique_violation(e: sqlx::Error, email: &str, company_name: Option<&str>) -> StoreError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("companies_name_lower_key") => {
                    return StoreError::DuplicateCompanyName(
                        company_name.unwrap_or_default().to_string(),
                    );
                }
                Some("registered_emails_pkey")
                | Some("users_email_key")
                | Some("companies_email_key") => {
                    return StoreError::DuplicateEmail(email.to_string());
                }
                _ => {}
            }
        }
    }
    StoreError::Database(e.to_string())
}

fn missing_reference(e: sqlx::Error, what: &str) -> StoreError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_foreign_key_violation() => {
            StoreError::MissingReference(what.to_string())
        }
        _ => StoreError::Database(e.to_string()),
    }
}

/// ILIKE pattern matching `term` anywhere, with wildcards in `term` escaped.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
