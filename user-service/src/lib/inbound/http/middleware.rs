use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity bound to the request after successful token verification.
///
/// Lives in request extensions for exactly one request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

/// Auth gate middleware.
///
/// Terminal on first failure: extract the Authorization header, parse the
/// Bearer scheme, validate signature/algorithm/expiry/audience, then bind
/// the identity claims into request extensions. No downstream handler runs
/// on any failure.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        let message = match e {
            auth::JwtError::InvalidSignature => "invalid signature",
            _ => "invalid or expired token",
        };
        ApiError::Unauthorized(message.to_string()).into_response()
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId(claims.user_id),
        username: claims.username,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
///
/// Exactly two whitespace-separated parts, the first the literal `Bearer`.
fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("no credentials".to_string()).into_response())?;

    let auth_str = auth_header.to_str().map_err(|_| {
        ApiError::Unauthorized("invalid authorization format".to_string()).into_response()
    })?;

    let mut parts = auth_str.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) => Ok(token),
        _ => Err(ApiError::Unauthorized("invalid authorization format".to_string()).into_response()),
    }
}
