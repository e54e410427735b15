//! Authentication primitives for the job tracker.
//!
//! - Password hashing (Argon2id) with decoy verification
//! - JWT encoding and decoding (HS256)
//! - Bearer token issuance and validation for user and company principals
//!
//! The service crate defines its own principal and ownership rules on top
//! of these building blocks.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("secret1").unwrap();
//! assert!(hasher.verify("secret1", &hash));
//! assert!(!hasher.verify("wrong", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::{PrincipalKind, TokenService};
//! use chrono::Duration;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = tokens
//!     .issue("hr@acme.com", PrincipalKind::Company, 7, Some(7))
//!     .unwrap();
//!
//! assert!(tokens.validate(&token));
//! let claims = tokens.extract(&token).unwrap();
//! assert_eq!(claims.role, "ROLE_COMPANY");
//! assert_eq!(claims.company_id, Some(7));
//! ```

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::PrincipalKind;
pub use jwt::TokenClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
pub use token::TokenService;
