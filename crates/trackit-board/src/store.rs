/*
[INPUT]:  Full task lists produced by successful refreshes
[OUTPUT]: Immutable snapshots via `watch` for projector and renderer
[POS]:    State layer - the single shared mutable resource (owned by SyncController)
[UPDATE]: When snapshot representation or change notification semantics change
*/

use std::sync::Arc;

use tokio::sync::watch;
use trackit_client::Task;

/// Immutable, point-in-time copy of the store contents.
pub type Snapshot = Arc<[Task]>;

/// Ordered task snapshot, only ever replaced as a whole.
///
/// Writers live in this crate (the sync controller); everyone else reads snapshots or
/// subscribes to changes.
#[derive(Debug)]
pub struct TaskStore {
    tx: watch::Sender<Snapshot>,
}

impl TaskStore {
    /// Empty store.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(empty_snapshot());
        Self { tx }
    }

    /// Current snapshot. Cheap: clones an `Arc`.
    pub fn current(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Replace the whole snapshot. Subscribers are woken only when the contents differ.
    ///
    /// Returns whether the contents changed.
    pub(crate) fn replace(&self, tasks: Vec<Task>) -> bool {
        let next: Snapshot = Arc::from(tasks);
        self.tx.send_if_modified(|current| {
            if **current == *next {
                return false;
            }
            *current = next;
            true
        })
    }

    /// Drop every task.
    pub(crate) fn clear(&self) -> bool {
        self.replace(Vec::new())
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

fn empty_snapshot() -> Snapshot {
    Arc::from(Vec::<Task>::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackit_client::TaskStatus;

    fn task(id: &str, status: TaskStatus) -> Task {
        Task::new(id, format!("task {id}"), status)
    }

    #[test]
    fn test_store_starts_empty() {
        let store = TaskStore::new();
        assert!(store.is_empty());
        assert_eq!(store.current().len(), 0);
    }

    #[test]
    fn test_replace_is_wholesale_and_ordered() {
        let store = TaskStore::new();
        assert!(store.replace(vec![task("1", TaskStatus::Todo), task("2", TaskStatus::Completed)]));
        assert!(store.replace(vec![task("3", TaskStatus::InProgress), task("1", TaskStatus::Todo)]));

        let ids: Vec<String> = store.current().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec!["3", "1"]);
    }

    #[test]
    fn test_old_snapshot_is_unaffected_by_replace() {
        let store = TaskStore::new();
        store.replace(vec![task("1", TaskStatus::Todo)]);
        let before = store.current();

        store.clear();
        assert_eq!(before.len(), 1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_only() {
        let store = TaskStore::new();
        let mut rx = store.subscribe();

        assert!(!store.replace(Vec::new()));
        assert!(!rx.has_changed().unwrap());

        store.replace(vec![task("1", TaskStatus::Todo)]);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);

        assert!(!store.replace(vec![task("1", TaskStatus::Todo)]));
        assert!(!rx.has_changed().unwrap());
    }
}
