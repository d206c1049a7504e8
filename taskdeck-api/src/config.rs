/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 3000)
/// - `JWT_SECRET`: secret key for token signing (required, min 32 bytes)
/// - `DATA_DIR`: directory holding the JSON record files (default: ./data)
/// - `HASH_COST`: bcrypt cost factor for new passwords (default: 10)
/// - `RUST_LOG`: log level (default: info)
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Credential hashing configuration
    pub auth: AuthConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// Must be kept secret and should be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON record files
    pub data_dir: PathBuf,
}

/// Credential hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// bcrypt cost factor for newly registered passwords
    pub hash_cost: u32,
}

impl StorageConfig {
    /// Path of the user collection file
    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    /// Path of the task collection file
    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or have invalid
    /// values.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let data_dir = env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());

        let hash_cost = env::var("HASH_COST")
            .unwrap_or_else(|_| taskdeck_shared::auth::password::DEFAULT_COST.to_string())
            .parse::<u32>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            jwt: JwtConfig { secret: jwt_secret },
            storage: StorageConfig {
                data_dir: Path::new(&data_dir).to_path_buf(),
            },
            auth: AuthConfig { hash_cost },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            storage: StorageConfig {
                data_dir: PathBuf::from("/tmp/taskdeck"),
            },
            auth: AuthConfig { hash_cost: 4 },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_storage_file_paths() {
        let config = test_config();
        assert_eq!(
            config.storage.users_file(),
            PathBuf::from("/tmp/taskdeck/users.json")
        );
        assert_eq!(
            config.storage.tasks_file(),
            PathBuf::from("/tmp/taskdeck/tasks.json")
        );
    }
}
