use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::PrincipalKind;
use auth::TokenService;

use super::errors::AuthError;
use super::errors::AuthenticationError;
use super::models::Account;
use super::models::AccountDetails;
use super::models::AuthResult;
use super::models::LoginCommand;
use super::models::NewCompany;
use super::models::NewUser;
use super::models::RegisterCommand;
use super::ports::AuthServicePort;
use super::ports::CredentialStore;
use super::principal::Principal;
use super::resolver::PrincipalResolver;

/// Domain service implementation for registration and login.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    password_hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    resolver: PrincipalResolver,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `tokens` - Token issuance and validation
    pub fn new(store: Arc<CS>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            resolver: PrincipalResolver::new(Arc::clone(&tokens)),
            tokens,
        }
    }

    fn issue(&self, account: &Account) -> Result<AuthResult, AuthError> {
        let token = self.tokens.issue(
            account.email().as_str(),
            account.kind(),
            account.id(),
            account.company_id(),
        )?;

        Ok(AuthResult {
            id: account.id(),
            email: account.email().as_str().to_string(),
            display_name: account.display_name(),
            kind: account.kind(),
            token,
        })
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthResult, AuthError> {
        let RegisterCommand {
            email,
            password,
            details,
        } = command;

        if self.store.email_exists(&email).await? {
            tracing::warn!(kind = %details.kind(), "Registration rejected: email already exists");
            return Err(AuthError::EmailAlreadyExists(email.to_string()));
        }

        if let AccountDetails::Company { name } = &details {
            if self.store.company_name_exists(name).await? {
                tracing::warn!(company_name = %name, "Registration rejected: company name taken");
                return Err(AuthError::CompanyNameAlreadyExists(name.to_string()));
            }
        }

        let password_hash = self.password_hasher.hash(password.as_str())?;

        let account = match details {
            AccountDetails::User {
                full_name,
                username,
            } => Account::User(
                self.store
                    .create_user(NewUser {
                        email,
                        password_hash,
                        full_name,
                        username,
                    })
                    .await?,
            ),
            AccountDetails::Company { name } => Account::Company(
                self.store
                    .create_company(NewCompany {
                        email,
                        password_hash,
                        name,
                    })
                    .await?,
            ),
        };

        tracing::info!(
            account_id = account.id(),
            kind = %account.kind(),
            "Account registered"
        );

        self.issue(&account)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthResult, AuthError> {
        let email = command.email.trim();

        let account = match self
            .store
            .find_account_by_email(PrincipalKind::User, email)
            .await?
        {
            Some(user) => Some(user),
            None => {
                self.store
                    .find_account_by_email(PrincipalKind::Company, email)
                    .await?
            }
        };

        let Some(account) = account else {
            self.password_hasher.verify_decoy(&command.password);
            tracing::warn!("Login failed");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .password_hasher
            .verify(&command.password, account.password_hash())
        {
            tracing::warn!("Login failed");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(
            account_id = account.id(),
            kind = %account.kind(),
            "Login succeeded"
        );

        self.issue(&account)
    }

    fn resolve_principal(&self, raw_token: &str) -> Result<Principal, AuthenticationError> {
        self.resolver.resolve(raw_token)
    }
}
