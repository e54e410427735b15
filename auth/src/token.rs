use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::PrincipalKind;
use crate::jwt::TokenClaims;

/// Issues and validates signed, time-limited bearer tokens.
///
/// Stateless: a token stays valid until its expiration instant, there is
/// no server-side revocation list.
pub struct TokenService {
    jwt_handler: JwtHandler,
    ttl: Duration,
}

/// Token operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TokenError {
    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Token is expired")]
    Expired,

    #[error("Inconsistent token claims: {0}")]
    InconsistentClaims(String),
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for HS256 signing
    /// * `ttl` - Lifetime of every issued token
    pub fn new(jwt_secret: &[u8], ttl: Duration) -> Self {
        Self {
            jwt_handler: JwtHandler::new(jwt_secret),
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token that expires `ttl` from now.
    ///
    /// # Errors
    /// * `InconsistentClaims` - Company without its own id as company id, or
    ///   user with a company id
    /// * `Jwt` - Signing failed
    pub fn issue(
        &self,
        email: &str,
        kind: PrincipalKind,
        subject_id: i64,
        company_id: Option<i64>,
    ) -> Result<String, TokenError> {
        self.issue_at(email, kind, subject_id, company_id, Utc::now())
    }

    /// Issue a token with an explicit issue time.
    pub fn issue_at(
        &self,
        email: &str,
        kind: PrincipalKind,
        subject_id: i64,
        company_id: Option<i64>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = TokenClaims {
            sub: email.to_string(),
            user_id: subject_id,
            role: kind.role().to_string(),
            kind,
            company_id,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        if !claims.is_consistent() {
            return Err(TokenError::InconsistentClaims(format!(
                "{} token for subject {} cannot carry company id {:?}",
                kind, subject_id, company_id
            )));
        }

        Ok(self.jwt_handler.encode(&claims)?)
    }

    /// True when the token is well-formed, correctly signed and not expired.
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        self.verify_at(token, now).is_ok()
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// # Errors
    /// * `Jwt` - Token is malformed or its signature does not match
    /// * `Expired` - `now` is at or past the expiration instant
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let claims = self.extract(token)?;

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Decode the claims of a correctly signed token without checking expiry.
    pub fn extract(&self, token: &str) -> Result<TokenClaims, TokenError> {
        Ok(self.jwt_handler.decode(token)?)
    }
}
