/*
[INPUT]:  Status values requested by the user (free-form strings from the front end)
[OUTPUT]: Validated TaskStatus / TaskPatch ready for SyncController::update
[POS]:    Domain layer - three-state task lifecycle
[UPDATE]: When task states or transition rules change
*/

use thiserror::Error;
use trackit_client::{TaskPatch, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("invalid status {0:?}: expected one of todo, in_progress, completed")]
    InvalidStatus(String),
}

/// Validate a requested status value.
pub fn parse_status(requested: &str) -> Result<TaskStatus, LifecycleError> {
    requested
        .parse()
        .map_err(|_| LifecycleError::InvalidStatus(requested.to_string()))
}

/// Every state may move to every other state; nothing is terminal.
pub fn can_transition(_from: TaskStatus, _to: TaskStatus) -> bool {
    true
}

/// States a task in `from` can be moved to from the board (excluding its own column).
pub fn targets(from: TaskStatus) -> impl Iterator<Item = TaskStatus> {
    TaskStatus::ALL
        .into_iter()
        .filter(move |to| *to != from && can_transition(from, *to))
}

/// Build the update payload for a move, rejecting unknown states locally.
pub fn transition_patch(requested: &str) -> Result<TaskPatch, LifecycleError> {
    parse_status(requested).map(TaskPatch::status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("todo", TaskStatus::Todo)]
    #[case("in_progress", TaskStatus::InProgress)]
    #[case("completed", TaskStatus::Completed)]
    fn test_known_states_are_accepted(#[case] requested: &str, #[case] expected: TaskStatus) {
        assert_eq!(parse_status(requested), Ok(expected));
        assert_eq!(
            transition_patch(requested).unwrap(),
            TaskPatch::status(expected)
        );
    }

    #[rstest]
    #[case("done")]
    #[case("")]
    #[case("IN_PROGRESS")]
    #[case("archived")]
    #[case(" todo ")]
    fn test_unknown_states_are_rejected(#[case] requested: &str) {
        assert_eq!(
            transition_patch(requested),
            Err(LifecycleError::InvalidStatus(requested.to_string()))
        );
    }

    #[test]
    fn test_graph_is_complete() {
        let mut edges = 0;
        for from in TaskStatus::ALL {
            for to in targets(from) {
                assert!(can_transition(from, to));
                edges += 1;
            }
        }
        assert_eq!(edges, 6);
        assert!(can_transition(TaskStatus::Completed, TaskStatus::Todo));
    }
}
