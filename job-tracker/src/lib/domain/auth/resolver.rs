use std::sync::Arc;

use auth::TokenService;
use chrono::DateTime;
use chrono::Utc;

use super::errors::AuthenticationError;
use super::principal::Principal;

/// Turns a raw bearer token into the request's principal.
pub struct PrincipalResolver {
    tokens: Arc<TokenService>,
}

impl PrincipalResolver {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn resolve(&self, raw_token: &str) -> Result<Principal, AuthenticationError> {
        self.resolve_at(raw_token, Utc::now())
    }

    /// Resolve against an explicit clock.
    ///
    /// # Errors
    /// * `MissingToken` - Token is empty
    /// * `InvalidToken` - Bad signature, malformed, or expired at `now`
    /// * `InconsistentClaims` - Claims violate the principal invariants
    pub fn resolve_at(
        &self,
        raw_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthenticationError> {
        let raw_token = raw_token.trim();
        if raw_token.is_empty() {
            return Err(AuthenticationError::MissingToken);
        }

        let claims = self.tokens.verify_at(raw_token, now).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
            AuthenticationError::InvalidToken
        })?;

        Principal::from_claims(claims).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
            e
        })
    }
}
