use std::collections::BTreeSet;

use auth::PrincipalKind;
use auth::TokenClaims;

use super::errors::AuthenticationError;
use super::models::UserId;
use crate::domain::company::models::CompanyId;

/// The authenticated caller of one request.
///
/// Built from validated token claims and dropped with the request. Fields
/// are private so the company id invariant holds: a company principal
/// carries its own id as company id, a user principal carries none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject_id: i64,
    email: String,
    kind: PrincipalKind,
    company_id: Option<i64>,
    authorities: BTreeSet<String>,
}

impl Principal {
    pub fn user(id: UserId, email: impl Into<String>) -> Self {
        Self::new(id.0, email.into(), PrincipalKind::User, None)
    }

    pub fn company(id: CompanyId, email: impl Into<String>) -> Self {
        Self::new(id.0, email.into(), PrincipalKind::Company, Some(id.0))
    }

    fn new(subject_id: i64, email: String, kind: PrincipalKind, company_id: Option<i64>) -> Self {
        Self {
            subject_id,
            email,
            kind,
            company_id,
            authorities: BTreeSet::from([kind.role().to_string()]),
        }
    }

    /// Rebuild a principal from decoded token claims.
    ///
    /// # Errors
    /// * `InconsistentClaims` - Role disagrees with kind, or the company id
    ///   does not match the kind
    pub fn from_claims(claims: TokenClaims) -> Result<Self, AuthenticationError> {
        if !claims.is_consistent() {
            return Err(AuthenticationError::InconsistentClaims);
        }

        Ok(Self::new(
            claims.user_id,
            claims.sub,
            claims.kind,
            claims.company_id,
        ))
    }

    pub fn subject_id(&self) -> i64 {
        self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn kind(&self) -> PrincipalKind {
        self.kind
    }

    pub fn company_id(&self) -> Option<i64> {
        self.company_id
    }

    pub fn authorities(&self) -> &BTreeSet<String> {
        &self.authorities
    }

    pub fn has_authority(&self, role: &str) -> bool {
        self.authorities.contains(role)
    }
}
