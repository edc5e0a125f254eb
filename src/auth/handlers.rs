use std::time::Instant;

use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::{
    app_state::AppState,
    auth::dtos::{
        ErrorResponse, LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, UserOut,
    },
};

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[utoipa::path(
    post,
    path = "/api/user/register",
    tag = "User",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Username or email taken", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    let started = Instant::now();

    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }
    let username = payload.username.to_lowercase();

    match state.user_repo.find_by_username(&username).await {
        Ok(Some(_)) => return error_response(StatusCode::CONFLICT, "Username already registered"),
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "user lookup failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    }

    match state.user_repo.find_by_email(&payload.email).await {
        Ok(Some(_)) => return error_response(StatusCode::CONFLICT, "Email already registered"),
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "user lookup failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    }

    let pw_hash = match state.passwords.hash(&payload.password) {
        Ok(hash) => hash,
        Err(e) => {
            error!(error = %e, "password hashing failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to hash password");
        }
    };

    let user = match state
        .user_repo
        .create(&username, &payload.email, &pw_hash)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            error!(error = %e, "user insert failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create user");
        }
    };

    info!(username = %user.username, "user registered");
    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "success".to_string(),
            message: "User registered".to_string(),
            data: UserOut {
                username: user.username,
                email: user.email,
            },
            elapsed: started.elapsed().as_secs_f64() * 1000.0,
        }),
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = "User",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
    )
)]
pub async fn login(State(state): State<AppState>, Form(payload): Form<LoginRequest>) -> Response {
    if let Err(error) = payload.validate() {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response();
    }
    let username = payload.username.to_lowercase();

    let user = match state.user_repo.find_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        Err(e) => {
            error!(error = %e, "user lookup failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
        }
    };

    match state.passwords.verify(&payload.password, &user.pw_hash) {
        Ok(true) => {}
        Ok(false) => return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials"),
        Err(e) => {
            error!(error = %e, "stored password hash unreadable");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Password verification failed",
            );
        }
    }

    let access_token = match state.jwt.generate_token(&user.username) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "token signing failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate token");
        }
    };

    info!(username = %user.username, "user logged in");
    (
        StatusCode::OK,
        Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }),
    )
        .into_response()
}
