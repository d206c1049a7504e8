/// Authentication utilities
///
/// This module provides the authentication primitives for Taskdeck:
///
/// # Modules
///
/// - [`password`]: salted password hashing with a tunable cost factor
/// - [`jwt`]: stateless session token generation and validation
/// - [`middleware`]: request identity and Authorization header parsing
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
/// use taskdeck_shared::auth::jwt::{create_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password", 10)?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token issuance
/// let claims = Claims::new("alice");
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
/// # Ok(())
/// # }
/// ```
pub mod jwt;
pub mod middleware;
pub mod password;
