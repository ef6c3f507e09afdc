/*
[INPUT]:  SyncController + active Filter
[OUTPUT]: The surface a board renderer consumes (filtered tasks, statistics, columns, intents)
[POS]:    Facade - renderer-facing contract over the sync engine
[UPDATE]: When the renderer contract changes
*/

use tokio::sync::watch;
use trackit_client::{Task, TaskDraft, TaskGateway, TaskPatch};

use crate::notify::Notifier;
use crate::projector::{self, Column, Filter, Statistics};
use crate::session::SessionContext;
use crate::store::Snapshot;
use crate::sync::{BoardError, RefreshOutcome, SyncController};

/// Board state: the synced snapshot seen through the active filter.
pub struct Board<G, N> {
    sync: SyncController<G, N>,
    filter: Filter,
}

impl<G, N> Board<G, N>
where
    G: TaskGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(sync: SyncController<G, N>) -> Self {
        Self {
            sync,
            filter: Filter::All,
        }
    }

    pub fn sync(&self) -> &SyncController<G, N> {
        &self.sync
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Tasks visible under the active filter.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        projector::filter(&self.sync.snapshot(), self.filter)
    }

    /// Counts over the whole snapshot, independent of the filter.
    pub fn statistics(&self) -> Statistics {
        projector::statistics(&self.sync.snapshot())
    }

    /// Kanban columns of the filtered tasks.
    pub fn columns(&self) -> [Column; 3] {
        projector::columns(&self.filtered_tasks())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.sync.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.sync.subscribe()
    }

    pub async fn start(&mut self, session: &SessionContext) -> bool {
        self.sync.start(session).await
    }

    pub fn stop(&mut self) {
        self.sync.stop();
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.sync.refresh().await
    }

    pub async fn create(&self, draft: TaskDraft) -> Result<Task, BoardError> {
        self.sync.create(draft).await
    }

    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<(), BoardError> {
        self.sync.update(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), BoardError> {
        self.sync.delete(id).await
    }

    pub async fn move_task(&self, id: &str, requested: &str) -> Result<(), BoardError> {
        self.sync.move_task(id, requested).await
    }
}
