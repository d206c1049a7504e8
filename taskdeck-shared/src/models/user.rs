/// User model
///
/// A user is a username paired with a bcrypt password hash. The username is
/// the natural key; equality is exact string match. Users are created at
/// registration and never mutated or deleted afterwards (there is no
/// endpoint for either).

use serde::{Deserialize, Serialize};

/// A registered account
///
/// Passwords are stored as bcrypt hashes, never in plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique username (natural key)
    pub username: String,

    /// bcrypt password hash
    pub password_hash: String,
}

impl User {
    /// Creates a user record from a username and an already-computed hash
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_roundtrips_through_json() {
        let user = User::new("alice", "$2b$10$abcdefghijklmnopqrstuv");

        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();

        assert_eq!(back.username, "alice");
        assert_eq!(back.password_hash, user.password_hash);
    }
}
