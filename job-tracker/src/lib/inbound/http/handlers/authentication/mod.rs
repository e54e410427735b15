pub mod login;
pub mod register;

pub use login::login;
pub use register::register;

use auth::PrincipalKind;
use serde::Serialize;

use crate::domain::auth::models::AuthResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub id: i64,
    pub email: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PrincipalKind,
    pub token: String,
}

impl From<AuthResult> for AuthResponseData {
    fn from(result: AuthResult) -> Self {
        Self {
            id: result.id,
            email: result.email,
            name: result.display_name,
            kind: result.kind,
            token: result.token,
        }
    }
}
