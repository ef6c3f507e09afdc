/*
[INPUT]:  Snapshot projections (columns, statistics, filtered tasks)
[OUTPUT]: Plain-text board, list and statistics views
[POS]:    Presentation layer - terminal text for the CLI
[UPDATE]: When the board layout or task line format changes
*/

use std::fmt::Write as _;

use trackit_client::{Task, TaskStatus};

use crate::projector::{Column, Filter, Statistics};

const DESCRIPTION_PREVIEW: usize = 60;

/// One-line summary: `[status] id  title`.
pub fn task_line(task: &Task) -> String {
    format!("[{:<11}] {}  {}", task.status.as_str(), task.id, task.title)
}

/// Summary line plus an indented description preview, if there is one.
pub fn task_entry(task: &Task) -> String {
    let mut out = task_line(task);
    if let Some(description) = task.description() {
        let _ = write!(out, "\n    {}", preview(description));
    }
    out
}

pub fn statistics(stats: &Statistics) -> String {
    format!(
        "Total: {}  {}: {}  {}: {}  {}: {}",
        stats.total,
        TaskStatus::Todo.label(),
        stats.todo,
        TaskStatus::InProgress.label(),
        stats.in_progress,
        TaskStatus::Completed.label(),
        stats.completed,
    )
}

pub fn list(tasks: &[Task], filter: Filter) -> String {
    if tasks.is_empty() {
        return match filter {
            Filter::All => "No tasks yet.".to_string(),
            Filter::Status(status) => format!("No tasks in {}.", status.label()),
        };
    }
    tasks.iter().map(task_entry).collect::<Vec<_>>().join("\n")
}

/// Columns stacked vertically, each headed by its title and count.
pub fn board(columns: &[Column], stats: &Statistics) -> String {
    let mut out = statistics(stats);
    for column in columns {
        let _ = write!(out, "\n\n== {} ==", column.title());
        if column.tasks.is_empty() {
            out.push_str("\n  (empty)");
        }
        for task in &column.tasks {
            let _ = write!(out, "\n  {}  {}", task.id, task.title);
            if let Some(description) = task.description() {
                let _ = write!(out, "\n      {}", preview(description));
            }
        }
    }
    out
}

fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() > DESCRIPTION_PREVIEW {
        let cut: String = line.chars().take(DESCRIPTION_PREVIEW).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
