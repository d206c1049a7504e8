/// Password hashing module
///
/// Passwords are hashed with bcrypt, which embeds a per-password random
/// salt and a tunable work factor (the "cost") in the output string.
/// Verification is constant-time at the hashing-library level.
///
/// # Parameters
///
/// - **Algorithm**: bcrypt (2b variant)
/// - **Cost**: configurable, default 10 rounds
/// - **Salt**: 16 random bytes generated by the library
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::password::{hash_password, verify_password, DEFAULT_COST};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("super_secret", DEFAULT_COST)?;
///
/// assert!(verify_password("super_secret", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

/// Default bcrypt cost factor (2^10 rounds)
pub const DEFAULT_COST: u32 = 10;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password against a stored hash
    #[error("Failed to verify password: {0}")]
    VerifyError(String),
}

/// Hashes a password with bcrypt at the given cost factor
///
/// The salt is generated by the library from the OS RNG and is embedded,
/// together with the cost, in the returned hash string.
///
/// # Arguments
///
/// * `password` - The plaintext password to hash
/// * `cost` - bcrypt cost factor (valid range 4..=31)
///
/// # Errors
///
/// Returns `PasswordError::HashError` if the cost is out of range or
/// hashing fails.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::password::{hash_password, DEFAULT_COST};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("my_password", DEFAULT_COST)?;
/// assert!(hash.starts_with("$2"));
/// # Ok(())
/// # }
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(password, cost).map_err(|e| PasswordError::HashError(e.to_string()))
}

/// Verifies a password against a stored bcrypt hash
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
/// The comparison inside the library is constant-time.
///
/// # Errors
///
/// Returns `PasswordError::VerifyError` if the stored hash cannot be
/// parsed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::VerifyError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // cost 4 is the bcrypt minimum, keeps the suite fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("test_password_123", TEST_COST).expect("Hash should succeed");

        assert!(hash.starts_with("$2"));
        assert!(hash.contains("$04$"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let password = "same_password";

        let hash1 = hash_password(password, TEST_COST).expect("Hash 1 should succeed");
        let hash2 = hash_password(password, TEST_COST).expect("Hash 2 should succeed");

        // Different salts = different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let password = "correct_password";
        let hash = hash_password(password, TEST_COST).expect("Hash should succeed");

        let result = verify_password(password, &hash).expect("Verify should succeed");
        assert!(result, "Correct password should verify");
    }

    #[test]
    fn test_verify_password_incorrect() {
        let password = "correct_password";
        let hash = hash_password(password, TEST_COST).expect("Hash should succeed");

        let result = verify_password("wrong_password", &hash).expect("Verify should succeed");
        assert!(!result, "Wrong password should not verify");
    }

    #[test]
    fn test_verify_password_empty() {
        let hash = hash_password("password", TEST_COST).expect("Hash should succeed");

        let result = verify_password("", &hash).expect("Verify should succeed");
        assert!(!result, "Empty password should not verify");
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("password", "not_a_bcrypt_hash");
        assert!(result.is_err(), "Invalid hash should return error");
    }

    #[test]
    fn test_hash_out_of_range_cost() {
        let result = hash_password("password", 99);
        assert!(matches!(result, Err(PasswordError::HashError(_))));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
        ];

        for password in passwords {
            let hash = hash_password(password, TEST_COST).expect("Hash should succeed");
            let verified = verify_password(password, &hash).expect("Verify should succeed");
            assert!(verified, "Password '{}' should verify", password);
        }
    }
}
