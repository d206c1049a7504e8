/// Request identity for authenticated routes
///
/// After the HTTP layer validates a session token it inserts an
/// [`AuthContext`] into the request extensions. Handlers extract it and
/// thread the caller's username into every store and policy call as an
/// explicit parameter; there is no ambient identity anywhere else.
///
/// Token extraction accepts the Authorization header either bare or with a
/// `Bearer ` prefix, since existing clients send the raw token.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdeck_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.username)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

/// Authentication context added to request extensions
///
/// Carries the verified identity of the caller for the duration of one
/// request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Username the validated token was issued to
    pub username: String,
}

impl AuthContext {
    /// Creates an auth context for a verified username
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Error type for credential extraction
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token supplied with the request
    #[error("Token required")]
    MissingToken,

    /// Authorization header is not valid UTF-8
    #[error("Invalid authorization header")]
    InvalidHeader,
}

/// Extracts the session token from the Authorization header
///
/// Accepts both `Authorization: <token>` and `Authorization: Bearer <token>`.
///
/// # Errors
///
/// - `AuthError::MissingToken` if the header is absent or empty
/// - `AuthError::InvalidHeader` if the header value is not valid UTF-8
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader)?;

    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}
