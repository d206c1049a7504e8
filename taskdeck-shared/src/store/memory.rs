/// In-memory collection backing
///
/// Test double for [`JsonFile`](super::JsonFile): same whole-collection
/// load/replace contract, no disk.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Collection, StoreError};

/// A collection held in memory
#[derive(Debug, Default)]
pub struct InMemory<T> {
    items: RwLock<Vec<T>>,
}

impl<T> InMemory<T> {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Creates a collection pre-seeded with records
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl<T> Collection<T> for InMemory<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.items.read().await.clone())
    }

    async fn replace_all(&self, items: &[T]) -> Result<(), StoreError> {
        *self.items.write().await = items.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store: InMemory<String> = InMemory::new();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_all_overwrites() {
        let store = InMemory::with_items(vec!["a".to_string()]);

        store
            .replace_all(&["b".to_string(), "c".to_string()])
            .await
            .unwrap();

        assert_eq!(store.load().await.unwrap(), vec!["b", "c"]);
    }
}
