/*
[INPUT]:  Board engine requests (list/create/update/delete)
[OUTPUT]: Remote task data or gateway errors
[POS]:    Port - the only seam through which the board engine performs network I/O
[UPDATE]: When the board engine needs a new remote operation
*/

use std::sync::Arc;

use async_trait::async_trait;

use crate::http::{Result, TrackitClient};
use crate::types::{Task, TaskDraft, TaskPatch};

/// Remote source of truth for tasks.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Fetch the full task list. Malformed shapes decode as an empty list.
    async fn list(&self) -> Result<Vec<Task>>;

    async fn create(&self, draft: &TaskDraft) -> Result<Task>;

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl TaskGateway for TrackitClient {
    async fn list(&self) -> Result<Vec<Task>> {
        Ok(self.list_tasks().await?.tasks)
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        self.create_task(draft).await
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<()> {
        self.update_task(id, patch).await.map(|_| ())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_task(id).await.map(|_| ())
    }
}

#[async_trait]
impl<G: TaskGateway + ?Sized> TaskGateway for Arc<G> {
    async fn list(&self) -> Result<Vec<Task>> {
        (**self).list().await
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<()> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        (**self).delete(id).await
    }
}
