use auth::TokenPurpose;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::account::models::CredentialId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub credential_id: CredentialId,
    pub email: String,
}

/// Middleware that accepts only access tokens and adds the caller to request extensions.
///
/// Reset tokens are rejected here even though they share the signing key.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state
        .authenticator
        .verify_token(token, TokenPurpose::Access, state.clock.now())
        .map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            unauthorized("Invalid or expired token")
        })?;

    let credential_id = claims
        .sub
        .as_deref()
        .ok_or_else(|| {
            tracing::error!("Missing 'sub' claim in access token");
            unauthorized("Invalid token format")
        })
        .and_then(|sub| {
            CredentialId::from_string(sub).map_err(|e| {
                tracing::error!(error = %e, "Failed to parse credential ID from token");
                unauthorized("Invalid token format")
            })
        })?;

    let email = claims.email.unwrap_or_default();

    req.extensions_mut()
        .insert(AuthenticatedUser {
            credential_id,
            email,
        });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}
