/// Task store
///
/// CRUD over the task collection. Each operation loads the whole
/// collection, mutates it in memory, and rewrites it whole; there is no
/// incremental I/O and no locking between concurrent operations (last
/// writer wins).
///
/// Ids are derived from the creation time in milliseconds. When the clock
/// collides with an existing id the new id is bumped past the current
/// maximum, keeping ids unique and monotonically increasing.

use std::sync::Arc;

use chrono::Utc;

use crate::models::task::{CreateTask, Task, UpdateTask};

use super::{Collection, StoreError};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// No task with the given id
    #[error("Task {0} does not exist")]
    NotFound(i64),

    /// Backing storage failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store of task records
#[derive(Clone)]
pub struct TaskStore {
    tasks: Arc<dyn Collection<Task>>,
}

impl TaskStore {
    pub fn new(tasks: Arc<dyn Collection<Task>>) -> Self {
        Self { tasks }
    }

    /// Creates a task on behalf of `created_by`
    ///
    /// Assigns a fresh id, stamps the creation time, persists, and returns
    /// the created record. New tasks always start incomplete.
    pub async fn create(&self, data: CreateTask, created_by: &str) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.load().await?;

        let now = Utc::now();
        let mut id = now.timestamp_millis();
        if let Some(max) = tasks.iter().map(|t| t.id).max() {
            if id <= max {
                id = max + 1;
            }
        }

        let task = Task {
            id,
            title: data.title,
            description: data.description,
            completed: false,
            created_by: created_by.to_string(),
            assigned_to: data.assigned_to,
            assignment_date: data.assignment_date,
            created_at: now,
        };

        tasks.push(task.clone());
        self.tasks.replace_all(&tasks).await?;

        Ok(task)
    }

    /// Returns every task in storage (insertion) order
    ///
    /// No caller filtering happens here; visibility is applied by the
    /// policy layer on top of this list.
    pub async fn list(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.tasks.load().await?)
    }

    /// Merges a partial update into the task with the given id
    ///
    /// Unspecified fields retain their prior values.
    ///
    /// # Errors
    ///
    /// `TaskError::NotFound` if the id is absent.
    pub async fn update(&self, id: i64, data: UpdateTask) -> Result<Task, TaskError> {
        let mut tasks = self.tasks.load().await?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TaskError::NotFound(id))?;

        task.merge(data);
        let updated = task.clone();

        self.tasks.replace_all(&tasks).await?;

        Ok(updated)
    }

    /// Removes the task with the given id
    ///
    /// # Errors
    ///
    /// `TaskError::NotFound` if the id is absent.
    pub async fn delete(&self, id: i64) -> Result<(), TaskError> {
        let mut tasks = self.tasks.load().await?;

        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(TaskError::NotFound(id));
        }

        self.tasks.replace_all(&tasks).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemory;

    fn store() -> TaskStore {
        TaskStore::new(Arc::new(InMemory::<Task>::new()))
    }

    fn create_data(title: &str) -> CreateTask {
        CreateTask {
            title: title.to_string(),
            description: "desc".to_string(),
            assigned_to: String::new(),
            assignment_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_fills_in_record() {
        let store = store();

        let task = store.create(create_data("T"), "alice").await.unwrap();

        assert_eq!(task.title, "T");
        assert_eq!(task.created_by, "alice");
        assert_eq!(task.assigned_to, "");
        assert!(!task.completed);
        assert!(task.id > 0);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_monotonic() {
        let store = store();

        let mut ids = Vec::new();
        for i in 0..5 {
            let task = store
                .create(create_data(&format!("task {}", i)), "alice")
                .await
                .unwrap();
            ids.push(task.id);
        }

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, ids, "ids must be strictly increasing");
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = store();

        store.create(create_data("first"), "alice").await.unwrap();
        store.create(create_data("second"), "bob").await.unwrap();
        store.create(create_data("third"), "alice").await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let store = store();
        let task = store.create(create_data("T"), "alice").await.unwrap();

        let updated = store
            .update(
                task.id,
                UpdateTask {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "T");
        assert_eq!(updated.description, "desc");
        assert_eq!(updated.created_by, "alice");
        assert_eq!(updated.created_at, task.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let store = store();

        let result = store.update(42, UpdateTask::default()).await;
        assert!(matches!(result, Err(TaskError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_removes_task() {
        let store = store();
        let task = store.create(create_data("T"), "alice").await.unwrap();

        store.delete(task.id).await.unwrap();

        let remaining = store.list().await.unwrap();
        assert!(remaining.iter().all(|t| t.id != task.id));
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let store = store();

        let result = store.delete(42).await;
        assert!(matches!(result, Err(TaskError::NotFound(42))));
    }
}
