/// Task visibility and assignment policy
///
/// A caller sees a task iff they created it or it is assigned to them.
/// Assignment targets must be registered users; an empty assignee means
/// the task is unassigned and always passes.
///
/// The policy is applied at creation time (reject unknown assignees) and
/// at list time (filter). Update and delete are deliberately not gated on
/// creator/assignee identity: any authenticated caller may modify or
/// delete any task by id. That asymmetry comes from the source system and
/// is kept as-is.

use crate::models::task::Task;
use crate::store::{CredentialError, CredentialStore};

/// Error type for policy checks
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// Assignment target is not a registered user
    #[error("Assignee {0} is not a registered user")]
    UnknownAssignee(String),

    /// Credential store lookup failed
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Filters a task list down to the ones `caller` may see
///
/// Retains a task iff `created_by == caller || assigned_to == caller`,
/// preserving the underlying store order.
///
/// # Example
///
/// ```
/// use taskdeck_shared::policy::filter_visible;
/// # use taskdeck_shared::models::task::Task;
/// # use chrono::Utc;
/// # fn task(id: i64, created_by: &str, assigned_to: &str) -> Task {
/// #     Task {
/// #         id,
/// #         title: String::new(),
/// #         description: String::new(),
/// #         completed: false,
/// #         created_by: created_by.to_string(),
/// #         assigned_to: assigned_to.to_string(),
/// #         assignment_date: None,
/// #         created_at: Utc::now(),
/// #     }
/// # }
///
/// let tasks = vec![task(1, "alice", ""), task(2, "bob", "alice")];
/// let visible = filter_visible(tasks, "alice");
/// assert_eq!(visible.len(), 2);
/// ```
pub fn filter_visible(tasks: Vec<Task>, caller: &str) -> Vec<Task> {
    tasks
        .into_iter()
        .filter(|t| t.created_by == caller || t.assigned_to == caller)
        .collect()
}

/// Validates an assignment target
///
/// An empty assignee always passes (unassigned task). A non-empty assignee
/// must exist in the credential store.
///
/// Only enforced at creation time; updates do not re-validate.
pub async fn validate_assignee(
    users: &CredentialStore,
    assigned_to: &str,
) -> Result<(), PolicyError> {
    if assigned_to.is_empty() {
        return Ok(());
    }

    if users.exists(assigned_to).await? {
        Ok(())
    } else {
        Err(PolicyError::UnknownAssignee(assigned_to.to_string()))
    }
}
