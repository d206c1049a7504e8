/// JSON file collection backing
///
/// The default persistence model: one JSON file per collection, read whole
/// on every load and rewritten whole on every mutation. An absent or empty
/// file loads as an empty collection so a fresh data directory needs no
/// seeding.
///
/// The rewrite is a plain overwrite with no temp-file rename, so a crash
/// mid-write can corrupt the file. That is a documented property of this
/// storage model, not something this backing mitigates.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::User;
/// use taskdeck_shared::store::{Collection, JsonFile};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let users: JsonFile<User> = JsonFile::new("./data/users.json");
///
/// let mut all = users.load().await?;
/// all.push(User::new("alice", "$2b$10$..."));
/// users.replace_all(&all).await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::PathBuf;

use super::{Collection, StoreError};

/// A collection persisted as a single JSON file
pub struct JsonFile<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T> {
    /// Creates a backing for the given file path
    ///
    /// The file does not need to exist yet; it is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T> Collection<T> for JsonFile<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        // an empty or whitespace-only file counts as an empty collection
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&raw)?)
    }

    async fn replace_all(&self, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(items)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!(path = %self.path.display(), records = items.len(), "collection rewritten");
        Ok(())
    }
}
