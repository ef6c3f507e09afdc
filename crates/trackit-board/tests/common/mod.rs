/*
[INPUT]:  Scripted task lists, delays, and failure switches
[OUTPUT]: In-memory TaskGateway with call recording, shared fixtures
[POS]:    Test infrastructure - shared across board test modules
[UPDATE]: When TaskGateway gains operations or tests need new scripting
*/

//! Common test utilities for trackit-board tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;
use trackit_board::{Notification, SessionContext};
use trackit_client::{Result, Task, TaskDraft, TaskGateway, TaskPatch, TaskStatus, TrackitError, User};

/// One gateway call, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(String),
    Update(String, TaskPatch),
    Delete(String),
}

/// Reply for a single `list` call, overriding the in-memory tasks.
pub struct ListReply {
    pub delay: Duration,
    pub result: Result<Vec<Task>>,
}

impl ListReply {
    pub fn ok(delay: Duration, tasks: Vec<Task>) -> Self {
        Self {
            delay,
            result: Ok(tasks),
        }
    }
}

/// Backend kept in memory. Mutations apply to the task list so follow-up lists see them.
#[derive(Default)]
pub struct FakeGateway {
    tasks: Mutex<Vec<Task>>,
    script: Mutex<VecDeque<ListReply>>,
    calls: Mutex<Vec<Call>>,
    fail_list: AtomicBool,
    fail_mutations: AtomicBool,
    mutation_delay: Mutex<Duration>,
    next_id: AtomicUsize,
}

impl FakeGateway {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let gateway = Self::default();
        gateway.next_id.store(tasks.len() + 1, Ordering::SeqCst);
        *gateway.tasks.lock().unwrap() = tasks;
        gateway
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        *self.tasks.lock().unwrap() = tasks;
    }

    pub fn push_list_reply(&self, reply: ListReply) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn set_mutation_delay(&self, delay: Duration) {
        *self.mutation_delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls().iter().filter(|call| **call == Call::List).count()
    }

    pub fn mutation_calls(&self) -> usize {
        self.calls().len() - self.list_calls()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn before_mutation(&self) -> Result<()> {
        let delay = *self.mutation_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl TaskGateway for FakeGateway {
    async fn list(&self) -> Result<Vec<Task>> {
        self.record(Call::List);
        let scripted = self.script.lock().unwrap().pop_front();
        if let Some(reply) = scripted {
            tokio::time::sleep(reply.delay).await;
            return reply.result;
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn create(&self, draft: &TaskDraft) -> Result<Task> {
        self.record(Call::Create(draft.title.clone()));
        self.before_mutation().await?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let mut task = Task::new(id, draft.title.clone(), draft.status);
        task.description = draft.description.clone();
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &str, patch: &TaskPatch) -> Result<()> {
        self.record(Call::Update(id.to_string(), patch.clone()));
        self.before_mutation().await?;

        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks.iter_mut().find(|task| task.id == id).ok_or_else(not_found)?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(description) = &patch.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record(Call::Delete(id.to_string()));
        self.before_mutation().await?;

        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

pub fn server_error() -> TrackitError {
    TrackitError::Api {
        code: 500,
        message: "database unavailable".to_string(),
    }
}

pub fn not_found() -> TrackitError {
    TrackitError::Api {
        code: 404,
        message: "Task not found".to_string(),
    }
}

pub fn test_user() -> User {
    User {
        id: "64f0c0ffee".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn signed_in() -> SessionContext {
    SessionContext::Authenticated(test_user())
}

/// The two-task board used across suites: one to-do, one completed.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("1", "A", TaskStatus::Todo),
        Task::new("2", "B", TaskStatus::Completed),
    ]
}

/// Everything queued on the notification channel so far.
pub fn drain(rx: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        out.push(notification);
    }
    out
}

/// Sleep past `duration` so timers due at exactly `duration` have fired and settled.
pub async fn settle(duration: Duration) {
    tokio::time::sleep(duration + Duration::from_millis(10)).await;
}
