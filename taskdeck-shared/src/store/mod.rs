/// Storage layer
///
/// All persistent state lives in flat record collections that are read and
/// rewritten whole on every operation. The [`Collection`] trait isolates
/// that behavior behind an injected interface so the credential and task
/// stores can run against an in-memory fake in tests while the default
/// backing stays the file-rewrite model.
///
/// There is no locking between concurrent operations: two writers to the
/// same collection race and the last write wins. Callers that expect
/// concurrent clients must serialize externally.
///
/// # Modules
///
/// - [`file`]: JSON file backing (whole-file read and rewrite)
/// - [`memory`]: in-memory backing for tests
/// - [`users`]: credential store (exists / create / verify)
/// - [`tasks`]: task store (create / list / update / delete)

use async_trait::async_trait;

pub mod file;
pub mod memory;
pub mod tasks;
pub mod users;

pub use file::JsonFile;
pub use memory::InMemory;
pub use tasks::{TaskError, TaskStore};
pub use users::{CredentialError, CredentialStore};

/// Error type for collection backends
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored bytes are not a valid record collection
    #[error("Stored data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A whole-collection storage backend
///
/// `load` returns every record in insertion order; `replace_all` rewrites
/// the entire collection. Mutating stores are expected to load, mutate in
/// memory, and write everything back.
#[async_trait]
pub trait Collection<T: Send + Sync + 'static>: Send + Sync {
    /// Loads the full collection in insertion order
    async fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Replaces the full collection with `items`
    async fn replace_all(&self, items: &[T]) -> Result<(), StoreError>;
}
