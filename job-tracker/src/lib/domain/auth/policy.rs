//! Allow/deny decisions for an authenticated principal.
//!
//! Pure functions: no lookups happen here. Services walk the ownership
//! chain (interview, application, job, company) themselves and hand the
//! resulting owner ids in.

use auth::PrincipalKind;

use super::errors::AccessError;
use super::models::UserId;
use super::principal::Principal;
use crate::domain::company::models::CompanyId;

/// Decide whether `principal` may act.
///
/// Rules, in order:
/// 1. a required kind the principal does not have denies;
/// 2. a required owner denies unless it is the user's subject id (user)
///    or the company id (company);
/// 3. otherwise allow.
pub fn authorize(
    principal: &Principal,
    required_kind: Option<PrincipalKind>,
    required_owner: Option<i64>,
) -> Result<(), AccessError> {
    if let Some(required) = required_kind {
        if principal.kind() != required {
            return Err(AccessError::RoleMismatch { required });
        }
    }

    if let Some(owner) = required_owner {
        let caller = match principal.kind() {
            PrincipalKind::User => Some(principal.subject_id()),
            PrincipalKind::Company => principal.company_id(),
        };
        if caller != Some(owner) {
            return Err(AccessError::NotOwner);
        }
    }

    Ok(())
}

/// Require a user principal and return its id.
pub fn require_user(principal: &Principal) -> Result<UserId, AccessError> {
    authorize(principal, Some(PrincipalKind::User), None)?;
    Ok(UserId(principal.subject_id()))
}

/// Require a company principal and return its company id.
pub fn require_company(principal: &Principal) -> Result<CompanyId, AccessError> {
    authorize(principal, Some(PrincipalKind::Company), None)?;
    // A company principal's subject is its company.
    Ok(CompanyId(principal.subject_id()))
}

/// Owners of a resource on each side of the tenancy split.
///
/// A job has only a company owner. An application has a user owner and,
/// when filed against a listing, the company owning that listing. An
/// interview inherits both from its application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceOwners {
    pub user: Option<UserId>,
    pub company: Option<CompanyId>,
}

impl ResourceOwners {
    pub fn company(company: CompanyId) -> Self {
        Self {
            user: None,
            company: Some(company),
        }
    }

    pub fn user(user: UserId) -> Self {
        Self {
            user: Some(user),
            company: None,
        }
    }

    pub fn with_company(mut self, company: Option<CompanyId>) -> Self {
        self.company = company;
        self
    }
}

/// Check the principal against the owner of its own kind.
///
/// A resource with no owner of the principal's kind denies.
pub fn authorize_owners(principal: &Principal, owners: &ResourceOwners) -> Result<(), AccessError> {
    let owner = match principal.kind() {
        PrincipalKind::User => owners.user.map(|id| id.0),
        PrincipalKind::Company => owners.company.map(|id| id.0),
    };

    match owner {
        Some(owner) => authorize(principal, Some(principal.kind()), Some(owner)),
        None => Err(AccessError::NotOwner),
    }
}
