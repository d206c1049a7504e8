/// Task model
///
/// A task is created by an authenticated user and may be delegated to
/// another registered user via `assigned_to`. The wire format uses
/// camelCase field names, matching the clients that already speak this
/// protocol.
///
/// # Mutability
///
/// `id`, `created_by`, and `created_at` are fixed at creation. Everything
/// else can be overwritten through a partial update: any subset of the
/// mutable fields may be supplied and the rest retain their prior values.
/// Unknown JSON keys in an update are ignored rather than merged.
///
/// # Example
///
/// ```
/// use taskdeck_shared::models::task::{Task, UpdateTask};
/// use chrono::Utc;
///
/// let mut task = Task {
///     id: 1,
///     title: "Write report".to_string(),
///     description: "Quarterly numbers".to_string(),
///     completed: false,
///     created_by: "alice".to_string(),
///     assigned_to: String::new(),
///     assignment_date: None,
///     created_at: Utc::now(),
/// };
///
/// task.merge(UpdateTask {
///     completed: Some(true),
///     ..Default::default()
/// });
///
/// assert!(task.completed);
/// assert_eq!(task.title, "Write report");
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A task record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique id, derived from the creation timestamp in milliseconds
    pub id: i64,

    /// Short title
    pub title: String,

    /// Longer free-form description
    pub description: String,

    /// Completion flag, toggled only via explicit update
    pub completed: bool,

    /// Username of the creator (immutable)
    pub created_by: String,

    /// Username the task is delegated to, empty when unassigned
    #[serde(default)]
    pub assigned_to: String,

    /// When the task was handed to the assignee, if ever
    #[serde(default)]
    pub assignment_date: Option<DateTime<Utc>>,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// `id`, `completed`, `created_by`, and `created_at` are filled in by the
/// task store at creation time.
#[derive(Debug, Clone)]
pub struct CreateTask {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    pub assignment_date: Option<DateTime<Utc>>,
}

/// Partial update for an existing task
///
/// Absent fields keep their prior values. `assignment_date` distinguishes
/// "absent" from an explicit `null`, which clears the date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    pub title: Option<String>,

    pub description: Option<String>,

    pub completed: Option<bool>,

    pub assigned_to: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub assignment_date: Option<Option<DateTime<Utc>>>,
}

/// Maps an absent field to `None` and a present-but-null field to
/// `Some(None)`
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Task {
    /// Merges a partial update into this task
    ///
    /// Only supplied fields are overwritten; `id`, `created_by`, and
    /// `created_at` are never touched.
    pub fn merge(&mut self, update: UpdateTask) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        if let Some(assigned_to) = update.assigned_to {
            self.assigned_to = assigned_to;
        }
        if let Some(assignment_date) = update.assignment_date {
            self.assignment_date = assignment_date;
        }
    }
}
