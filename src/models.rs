use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a single to-do item.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Unique identifier, generated when the task is created. Never changes.
    pub id: Uuid,
    /// Timestamp when the task was created (UTC).
    pub created_at: DateTime<Utc>,
    /// Short name of the task. Used as the lookup key for `complete` and
    /// `delete`, so it is not guaranteed to be unique.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// Owner of the task. No command reads or writes it yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

impl Task {
    /// Builds a pending task stamped with the current time.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Task {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            name: name.into(),
            description,
            completed: false,
            user_id: None,
        }
    }
}

/// An account record. Stored in the `user` collection, which nothing
/// touches yet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub password: String,
}
