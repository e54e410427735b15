use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthenticationError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Middleware that resolves the bearer token into a `Principal` and adds it
/// to request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?;

    let principal = state.auth_service.resolve_principal(token).map_err(|e| {
        tracing::warn!(error = %e, uri = %req.uri(), "Token rejected");
        ApiError::from(e)
    })?;

    tracing::debug!(
        subject_id = principal.subject_id(),
        kind = %principal.kind(),
        "Request authenticated"
    );
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, AuthenticationError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthenticationError::MissingToken)?
        .to_str()
        .map_err(|_| AuthenticationError::InvalidToken)?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthenticationError::MissingToken)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request(authorization: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri("/api/jobs/mine");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token(&request(Some("Bearer abc.def"))), Ok("abc.def"));
        assert_eq!(
            extract_bearer_token(&request(None)),
            Err(AuthenticationError::MissingToken)
        );
        assert_eq!(
            extract_bearer_token(&request(Some("Basic dXNlcg=="))),
            Err(AuthenticationError::MissingToken)
        );
        assert_eq!(
            extract_bearer_token(&request(Some("Bearer "))),
            Err(AuthenticationError::MissingToken)
        );
    }
}
