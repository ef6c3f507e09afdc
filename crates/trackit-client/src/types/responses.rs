/*
[INPUT]:  Raw JSON bodies returned by the TrackIt API
[OUTPUT]: Typed response envelopes and the lenient task-list decoder
[POS]:    Data layer - response payloads
[UPDATE]: When response envelopes change
*/

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{Task, User};

/// `POST /api/login` and `POST /api/register`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `GET /api/me`
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

/// `POST /api/tasks`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub task: Task,
}

/// Acknowledgement returned by update, delete and logout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Result of decoding a `GET /api/tasks` body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskList {
    pub tasks: Vec<Task>,
    /// Entries dropped because they were not valid tasks.
    pub rejected: usize,
    /// The body did not carry a `tasks` array at all.
    pub malformed: bool,
}

impl TaskList {
    /// Decode the list envelope without failing on shape problems.
    ///
    /// A missing or non-array `tasks` field yields an empty list. Individual entries that
    /// do not decode (unknown status, missing title, ...) are dropped; order is kept.
    pub fn from_body(body: &Value) -> Self {
        let Some(entries) = body.get("tasks").and_then(Value::as_array) else {
            return Self {
                malformed: true,
                ..Self::default()
            };
        };

        let mut list = Self::default();
        for entry in entries {
            match Task::deserialize(entry) {
                Ok(task) => list.tasks.push(task),
                Err(err) => {
                    let id = entry.get("id").and_then(Value::as_str).unwrap_or("<none>");
                    warn!(task_id = id, error = %err, "rejecting malformed task from list response");
                    list.rejected += 1;
                }
            }
        }
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;

    #[test]
    fn test_task_list_null_is_malformed() {
        let list = TaskList::from_body(&serde_json::json!({"tasks": null}));
        assert!(list.malformed);
        assert!(list.tasks.is_empty());

        let list = TaskList::from_body(&serde_json::json!({"items": []}));
        assert!(list.malformed);

        let list = TaskList::from_body(&serde_json::json!([]));
        assert!(list.malformed);
    }

    #[test]
    fn test_task_list_drops_invalid_entries_in_order() {
        let body = serde_json::json!({
            "tasks": [
                {"id": "1", "title": "A", "status": "todo"},
                {"id": "2", "title": "B", "status": "archived"},
                {"id": "3", "title": "C", "status": "completed"},
                42
            ]
        });

        let list = TaskList::from_body(&body);
        assert!(!list.malformed);
        assert_eq!(list.rejected, 2);
        let ids: Vec<&str> = list.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(list.tasks[1].status, TaskStatus::Completed);
    }
}
