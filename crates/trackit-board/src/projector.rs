/*
[INPUT]:  Task snapshot + active filter
[OUTPUT]: Filtered task list, per-status statistics, board columns
[POS]:    View layer - pure projections, no I/O and no state
[UPDATE]: When adding derived views or filter kinds
*/

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use trackit_client::{Task, TaskStatus};

use crate::lifecycle::{self, LifecycleError};

/// Which tasks the board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Status(TaskStatus),
}

impl Filter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Status(status) => task.status == status,
        }
    }
}

impl FromStr for Filter {
    type Err = LifecycleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Filter::All);
        }
        lifecycle::parse_status(value).map(Filter::Status)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Status(status) => write!(f, "{status}"),
        }
    }
}

/// Task counts, always derived from one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl Statistics {
    pub fn count(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }
}

/// One board column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn title(&self) -> String {
        format!("{} ({})", self.status.label(), self.tasks.len())
    }
}

/// Tasks selected by `selection`, in snapshot order.
pub fn filter(tasks: &[Task], selection: Filter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| selection.matches(task))
        .cloned()
        .collect()
}

/// Single pass over the snapshot.
pub fn statistics(tasks: &[Task]) -> Statistics {
    tasks.iter().fold(Statistics::default(), |mut acc, task| {
        acc.total += 1;
        match task.status {
            TaskStatus::Todo => acc.todo += 1,
            TaskStatus::InProgress => acc.in_progress += 1,
            TaskStatus::Completed => acc.completed += 1,
        }
        acc
    })
}

/// Split tasks into the three Kanban columns, preserving order inside each column.
pub fn columns(tasks: &[Task]) -> [Column; 3] {
    TaskStatus::ALL.map(|status| Column {
        status,
        tasks: filter(tasks, Filter::Status(status)),
    })
}
