/// Credential store
///
/// Persists username/password-hash pairs over an injected [`Collection`]
/// and exposes the three credential operations: existence check, creation,
/// and verification. Every mutation rewrites the whole backing collection;
/// a crash mid-write can corrupt it (accepted, not mitigated).
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck_shared::models::user::User;
/// use taskdeck_shared::store::{CredentialStore, InMemory};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = CredentialStore::new(Arc::new(InMemory::<User>::new()));
///
/// store.create("alice", "pw1").await?;
/// assert!(store.exists("alice").await?);
/// store.verify("alice", "pw1").await?;
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use crate::auth::password::{self, PasswordError};
use crate::models::user::User;

use super::{Collection, StoreError};

/// Error type for credential operations
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Registration attempted with a username that is already taken
    #[error("User already exists")]
    UserExists(String),

    /// Verification attempted for a username that is not registered
    #[error("User does not exist")]
    UserNotFound(String),

    /// The supplied password does not match the stored hash
    #[error("Incorrect password")]
    BadPassword,

    /// Hashing or hash parsing failed
    #[error(transparent)]
    Hash(#[from] PasswordError),

    /// Backing storage failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store of registered credentials
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<dyn Collection<User>>,
    hash_cost: u32,
}

impl CredentialStore {
    /// Creates a credential store with the default hash cost
    pub fn new(users: Arc<dyn Collection<User>>) -> Self {
        Self::with_cost(users, password::DEFAULT_COST)
    }

    /// Creates a credential store with an explicit bcrypt cost
    ///
    /// Tests use the bcrypt minimum (4) to stay fast.
    pub fn with_cost(users: Arc<dyn Collection<User>>, hash_cost: u32) -> Self {
        Self { users, hash_cost }
    }

    /// Checks whether a username is registered
    pub async fn exists(&self, username: &str) -> Result<bool, CredentialError> {
        let users = self.users.load().await?;
        Ok(users.iter().any(|u| u.username == username))
    }

    /// Registers a new credential pair
    ///
    /// Hashes the password and appends the record, rewriting the whole
    /// store.
    ///
    /// # Errors
    ///
    /// `CredentialError::UserExists` if the username is already taken.
    pub async fn create(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        let mut users = self.users.load().await?;

        if users.iter().any(|u| u.username == username) {
            return Err(CredentialError::UserExists(username.to_string()));
        }

        let hash = password::hash_password(password, self.hash_cost)?;
        users.push(User::new(username, hash));
        self.users.replace_all(&users).await?;

        Ok(())
    }

    /// Verifies a username/password pair
    ///
    /// # Errors
    ///
    /// - `CredentialError::UserNotFound` if the username is not registered
    /// - `CredentialError::BadPassword` if the hash comparison fails
    pub async fn verify(&self, username: &str, password: &str) -> Result<(), CredentialError> {
        let users = self.users.load().await?;

        let user = users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| CredentialError::UserNotFound(username.to_string()))?;

        if !password::verify_password(password, &user.password_hash)? {
            return Err(CredentialError::BadPassword);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemory;

    fn store() -> CredentialStore {
        CredentialStore::with_cost(Arc::new(InMemory::<User>::new()), 4)
    }

    #[tokio::test]
    async fn test_create_then_exists() {
        let store = store();

        assert!(!store.exists("alice").await.unwrap());
        store.create("alice", "pw1").await.unwrap();
        assert!(store.exists("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = store();

        store.create("alice", "pw1").await.unwrap();
        let result = store.create("alice", "pw2").await;

        assert!(matches!(result, Err(CredentialError::UserExists(u)) if u == "alice"));
    }

    #[tokio::test]
    async fn test_verify_correct_password() {
        let store = store();

        store.create("alice", "pw1").await.unwrap();
        store.verify("alice", "pw1").await.unwrap();
    }

    #[tokio::test]
    async fn test_verify_wrong_password() {
        let store = store();

        store.create("alice", "pw1").await.unwrap();
        let result = store.verify("alice", "pw2").await;

        assert!(matches!(result, Err(CredentialError::BadPassword)));
    }

    #[tokio::test]
    async fn test_verify_unknown_user() {
        let store = store();

        let result = store.verify("ghost", "pw").await;
        assert!(matches!(result, Err(CredentialError::UserNotFound(u)) if u == "ghost"));
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let users = Arc::new(InMemory::<User>::new());
        let store = CredentialStore::with_cost(users.clone(), 4);

        store.create("alice", "pw1").await.unwrap();

        let stored = users.load().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_ne!(stored[0].password_hash, "pw1");
        assert!(stored[0].password_hash.starts_with("$2"));
    }
}
