use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::{app_state::AppState, auth::dtos::ErrorResponse};

/// Caller identity taken from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

impl AuthenticatedUser {
    pub fn new(username: String) -> Self {
        Self { username }
    }
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::InvalidTokenFormat)?;

        let claims = state
            .jwt
            .verify_token(token.trim())
            .map_err(|_| AuthError::InvalidToken)?;

        if claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        Ok(AuthenticatedUser::new(claims.sub))
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidTokenFormat,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidTokenFormat => "Invalid token format",
            AuthError::InvalidToken => "Could not validate credentials",
        };

        (
            StatusCode::UNAUTHORIZED,
            [("www-authenticate", "Bearer")],
            Json(ErrorResponse::new(message)),
        )
            .into_response()
    }
}
