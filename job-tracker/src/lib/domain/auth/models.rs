use std::fmt;
use std::str::FromStr;

use auth::PrincipalKind;
use chrono::DateTime;
use chrono::Utc;

use super::errors::EmailError;
use super::errors::PasswordPolicyError;
use crate::domain::company::models::Company;
use crate::domain::company::models::CompanyName;
use crate::domain::errors::FieldErrors;

/// User aggregate entity.
///
/// An individual job seeker. Owns the applications it files.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: &str) -> Result<Self, EmailError> {
        let email = email.trim();
        email_address::EmailAddress::from_str(email)
            .map(|_| EmailAddress(email.to_string()))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that satisfies the registration policy.
///
/// Never printed: `Debug` redacts the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Kind-specific registration details.
///
/// A company always has a name; a user never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountDetails {
    User {
        full_name: Option<String>,
        username: Option<String>,
    },
    Company {
        name: CompanyName,
    },
}

impl AccountDetails {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            AccountDetails::User { .. } => PrincipalKind::User,
            AccountDetails::Company { .. } => PrincipalKind::Company,
        }
    }
}

/// Command to register a new user or company with domain types
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub details: AccountDetails,
}

impl RegisterCommand {
    /// Validate raw registration input, collecting every field error.
    ///
    /// # Arguments
    /// * `email` - Raw email
    /// * `password` - Plaintext password, at least 6 characters
    /// * `kind` - `USER` or `COMPANY`
    /// * `full_name`, `username` - Optional user details
    /// * `company_name` - Required for companies, forbidden for users
    ///
    /// # Errors
    /// Field errors keyed by `email`, `password`, `type` and `company_name`.
    pub fn new(
        email: &str,
        password: String,
        kind: Option<&str>,
        full_name: Option<String>,
        username: Option<String>,
        company_name: Option<String>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = errors.check("email", EmailAddress::new(email));
        let password = errors.check("password", Password::new(password));

        let kind = match kind {
            Some(raw) => errors.check("type", PrincipalKind::from_str(raw.trim())),
            None => {
                errors.add("type", "must be provided");
                None
            }
        };

        let details = match kind {
            Some(PrincipalKind::Company) => match company_name.as_deref() {
                Some(raw) => errors
                    .check("company_name", CompanyName::new(raw))
                    .map(|name| AccountDetails::Company { name }),
                None => {
                    errors.add("company_name", "is required for a company");
                    None
                }
            },
            Some(PrincipalKind::User) => {
                if company_name.is_some() {
                    errors.add("company_name", "must not be set for a user");
                }
                Some(AccountDetails::User {
                    full_name: non_blank(full_name),
                    username: non_blank(username),
                })
            }
            None => None,
        };

        match (email, password, details) {
            (Some(email), Some(password), Some(details)) if errors.is_empty() => Ok(Self {
                email,
                password,
                details,
            }),
            _ => Err(errors),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Login attempt. The email is not validated: any mismatch is reported
/// as invalid credentials.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Account data handed to the credential store on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCompany {
    pub email: EmailAddress,
    pub password_hash: String,
    pub name: CompanyName,
}

/// A stored account of either kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Account {
    User(User),
    Company(Company),
}

impl Account {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Account::User(_) => PrincipalKind::User,
            Account::Company(_) => PrincipalKind::Company,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Account::User(user) => user.id.0,
            Account::Company(company) => company.id.0,
        }
    }

    /// Company id carried in tokens: the company's own id, none for users.
    pub fn company_id(&self) -> Option<i64> {
        match self {
            Account::User(_) => None,
            Account::Company(company) => Some(company.id.0),
        }
    }

    pub fn email(&self) -> &EmailAddress {
        match self {
            Account::User(user) => &user.email,
            Account::Company(company) => &company.email,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Account::User(user) => &user.password_hash,
            Account::Company(company) => &company.password_hash,
        }
    }

    /// Full name, then username, then email for users; the name for companies.
    pub fn display_name(&self) -> String {
        match self {
            Account::User(user) => user
                .full_name
                .clone()
                .or_else(|| user.username.clone())
                .unwrap_or_else(|| user.email.as_str().to_string()),
            Account::Company(company) => company.name.as_str().to_string(),
        }
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub kind: PrincipalKind,
    pub token: String,
}
