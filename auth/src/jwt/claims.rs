use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// The two kinds of account that can hold a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrincipalKind {
    User,
    Company,
}

impl PrincipalKind {
    /// Authority granted to every principal of this kind.
    pub fn role(&self) -> &'static str {
        match self {
            PrincipalKind::User => "ROLE_USER",
            PrincipalKind::Company => "ROLE_COMPANY",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalKind::User => "USER",
            PrincipalKind::Company => "COMPANY",
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known principal kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown principal kind: {0}")]
pub struct UnknownPrincipalKind(pub String);

impl FromStr for PrincipalKind {
    type Err = UnknownPrincipalKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(PrincipalKind::User),
            "COMPANY" => Ok(PrincipalKind::Company),
            other => Err(UnknownPrincipalKind(other.to_string())),
        }
    }
}

/// Payload carried by every bearer token.
///
/// Field names on the wire follow the established token format:
/// `sub`, `userId`, `role`, `type`, `companyId`, `iat`, `exp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject email
    pub sub: String,

    /// Id of the user or company the token was issued to
    #[serde(rename = "userId")]
    pub user_id: i64,

    /// Single authority, `ROLE_USER` or `ROLE_COMPANY`
    pub role: String,

    #[serde(rename = "type")]
    pub kind: PrincipalKind,

    /// Equal to `user_id` for companies, null for users
    #[serde(rename = "companyId")]
    pub company_id: Option<i64>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    /// Check if token is expired.
    ///
    /// Expiry is absolute: a token is rejected from the instant `exp` is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Role and company id agree with the principal kind.
    pub fn is_consistent(&self) -> bool {
        let company_ok = match self.kind {
            PrincipalKind::User => self.company_id.is_none(),
            PrincipalKind::Company => self.company_id == Some(self.user_id),
        };

        company_ok && self.role == self.kind.role()
    }
}
