use async_trait::async_trait;
use auth::PrincipalKind;

use super::errors::AuthError;
use super::errors::AuthenticationError;
use super::models::Account;
use super::models::AuthResult;
use super::models::EmailAddress;
use super::models::LoginCommand;
use super::models::NewCompany;
use super::models::NewUser;
use super::models::RegisterCommand;
use super::models::User;
use super::principal::Principal;
use crate::domain::company::models::Company;
use crate::domain::company::models::CompanyName;
use crate::domain::errors::StoreError;

/// Port for registration, login and token resolution.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a user or company and issue its first token.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is held by a user or a company
    /// * `CompanyNameAlreadyExists` - Company name is taken
    /// * `Password` / `Token` / `Store` - Infrastructure failure
    async fn register(&self, command: RegisterCommand) -> Result<AuthResult, AuthError>;

    /// Authenticate by email and password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    async fn login(&self, command: LoginCommand) -> Result<AuthResult, AuthError>;

    /// Resolve the principal of a raw bearer token.
    fn resolve_principal(&self, raw_token: &str) -> Result<Principal, AuthenticationError>;
}

/// Persistence of users and companies for authentication.
///
/// Email uniqueness spans both kinds of account.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// True when a user or a company is registered with this email.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, StoreError>;

    /// True when a company with this name exists, ignoring case.
    async fn company_name_exists(&self, name: &CompanyName) -> Result<bool, StoreError>;

    /// Look up an account of the given kind by exact email.
    async fn find_account_by_email(
        &self,
        kind: PrincipalKind,
        email: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Persist a new user.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Lost a race for the email
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Persist a new company.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Lost a race for the email
    /// * `DuplicateCompanyName` - Lost a race for the name
    async fn create_company(&self, company: NewCompany) -> Result<Company, StoreError>;
}
