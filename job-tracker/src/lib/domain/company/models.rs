use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use super::errors::CompanyNameError;
use crate::domain::auth::models::EmailAddress;
use crate::domain::errors::FieldErrors;

/// Company aggregate entity.
///
/// A registered hiring company. Owns the jobs it posts.
#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub name: CompanyName,
    pub profile: CompanyProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Apply the provided fields of a profile update, leaving the rest untouched.
    pub fn apply(&mut self, command: UpdateCompanyProfileCommand, now: DateTime<Utc>) {
        let UpdateCompanyProfileCommand { name, profile } = command;

        if let Some(name) = name {
            self.name = name;
        }

        let current = &mut self.profile;
        replace_if_some(&mut current.description, profile.description);
        replace_if_some(&mut current.website, profile.website);
        replace_if_some(&mut current.industry, profile.industry);
        replace_if_some(&mut current.location, profile.location);
        replace_if_some(&mut current.company_size, profile.company_size);
        replace_if_some(&mut current.headquarter, profile.headquarter);
        replace_if_some(&mut current.founded_year, profile.founded_year);
        replace_if_some(&mut current.logo_url, profile.logo_url);

        self.updated_at = now;
    }
}

fn replace_if_some<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Company unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompanyId(pub i64);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Company display name.
///
/// Trimmed, non-blank, at most 150 characters. Uniqueness is
/// case-insensitive and enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyName(String);

impl CompanyName {
    const MAX_LENGTH: usize = 150;

    pub fn new(name: &str) -> Result<Self, CompanyNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(CompanyNameError::Blank)
        } else if length > Self::MAX_LENGTH {
            Err(CompanyNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompanyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Optional descriptive fields of a company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyProfile {
    pub description: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub location: Option<String>,
    pub company_size: Option<String>,
    pub headquarter: Option<String>,
    pub founded_year: Option<i32>,
    pub logo_url: Option<String>,
}

/// Partial update of the caller's own company profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCompanyProfileCommand {
    pub name: Option<CompanyName>,
    pub profile: CompanyProfile,
}

impl UpdateCompanyProfileCommand {
    /// Validate a raw profile update.
    ///
    /// # Errors
    /// Field errors for a blank or oversized name, or a founding year
    /// outside 1000..=9999.
    pub fn new(name: Option<&str>, profile: CompanyProfile) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = match name {
            Some(raw) => errors.check("name", CompanyName::new(raw)),
            None => None,
        };

        if let Some(year) = profile.founded_year {
            if !(1000..=9999).contains(&year) {
                errors.add("founded_year", "must be a four-digit year");
            }
        }

        errors.into_result(Self { name, profile })
    }
}
