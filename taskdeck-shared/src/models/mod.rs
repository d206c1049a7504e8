/// Data models for Taskdeck
///
/// # Models
///
/// - `user`: registered accounts (username + password hash)
/// - `task`: task records with creator, assignee, and completion state

pub mod task;
pub mod user;
