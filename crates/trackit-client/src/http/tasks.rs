/*
[INPUT]:  Task drafts, patches and ids with a bearer token
[OUTPUT]: Task lists and mutation acknowledgements
[POS]:    HTTP layer - task endpoints (require bearer auth)
[UPDATE]: When task routes or envelopes change
*/

use crate::http::{Result, TrackitClient};
use crate::types::{CreateTaskResponse, MessageResponse, Task, TaskDraft, TaskList, TaskPatch};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

const TASKS_ENDPOINT: &str = "api/tasks";

impl TrackitClient {
    /// List the tasks created by or assigned to the current user
    ///
    /// GET /api/tasks
    pub async fn list_tasks(&self) -> Result<TaskList> {
        let builder = self.authed_request(Method::GET, TASKS_ENDPOINT)?;
        let body: Value = self.send_json(builder).await?;
        let list = TaskList::from_body(&body);
        if list.malformed {
            warn!("task list response carried no tasks array; treating as empty");
        }
        debug!(count = list.tasks.len(), rejected = list.rejected, "tasks listed");
        Ok(list)
    }

    /// Create a task
    ///
    /// POST /api/tasks
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        let builder = self.authed_request(Method::POST, TASKS_ENDPOINT)?.json(draft);
        let response: CreateTaskResponse = self.send_json(builder).await?;
        debug!(task_id = %response.task.id, "task created");
        Ok(response.task)
    }

    /// Apply a partial update to a task
    ///
    /// PUT /api/tasks/{id}
    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<MessageResponse> {
        let url = self.url_with_segment(TASKS_ENDPOINT, id)?;
        let builder = self.authed_request_to(Method::PUT, url)?.json(patch);
        let ack = self.send_ack(builder).await?;
        debug!(task_id = id, "task updated");
        Ok(ack)
    }

    /// Delete a task owned by the current user
    ///
    /// DELETE /api/tasks/{id}
    pub async fn delete_task(&self, id: &str) -> Result<MessageResponse> {
        let url = self.url_with_segment(TASKS_ENDPOINT, id)?;
        let builder = self.authed_request_to(Method::DELETE, url)?;
        let ack = self.send_ack(builder).await?;
        debug!(task_id = id, "task deleted");
        Ok(ack)
    }
}
