/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /register` - register a new user
/// - `POST /login` - verify credentials and issue a session token
///
/// Both are public. Registration hashes the password and persists the
/// credential pair; login verifies the pair and mints a token that is
/// valid for one hour. There is no logout endpoint: tokens are stateless
/// and clients simply discard them.

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskdeck_shared::auth::jwt;
use validator::Validate;

/// Register / login request
///
/// Fields default to empty so a missing field fails the presence check
/// with a 400 instead of a body-rejection error.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    /// Username (natural key, exact match)
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    /// Plaintext password, hashed before storage
    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Session token, valid for one hour
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field, or the username is already taken
/// - `500 Internal Server Error`: storage or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()?;

    state.users.create(&req.username, &req.password).await?;

    Ok(Json(RegisterResponse {
        message: "User registered".to_string(),
    }))
}

/// Login and obtain a session token
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field
/// - `401 Unauthorized`: wrong password
/// - `404 Not Found`: unknown username
/// - `500 Internal Server Error`: storage or signing failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;

    state.users.verify(&req.username, &req.password).await?;

    let claims = jwt::Claims::new(&req.username);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse { token }))
}
