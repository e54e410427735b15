pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::PrincipalKind;
pub use claims::TokenClaims;
pub use claims::UnknownPrincipalKind;
pub use errors::JwtError;
pub use handler::JwtHandler;
