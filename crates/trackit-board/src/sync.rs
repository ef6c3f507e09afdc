/*
[INPUT]:  TaskGateway + Notifier, SessionContext, user intents (create/update/delete/move)
[OUTPUT]: TaskStore snapshots kept in step with the remote source; one notification per outcome
[POS]:    Orchestration layer - refresh cadence and mutate-then-refresh protocol
[UPDATE]: When changing polling, failure handling, or liveness semantics
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use trackit_client::{Task, TaskDraft, TaskGateway, TaskPatch, TrackitError};

use crate::lifecycle::{self, LifecycleError};
use crate::notify::Notifier;
use crate::session::SessionContext;
use crate::store::{Snapshot, TaskStore};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Errors returned to the caller of a mutation. Each one has already been reported on
/// the notification channel.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("invalid task: {0}")]
    InvalidTask(String),

    #[error("task sync is stopped")]
    Stopped,

    #[error(transparent)]
    Gateway(#[from] TrackitError),
}

/// What a refresh did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Snapshot replaced with `count` tasks.
    Applied { count: usize },
    /// List failed; store cleared and the error reported.
    Failed,
    /// Response arrived after `stop()` (or after a restart) and was dropped.
    Discarded,
}

struct Shared<G, N> {
    gateway: G,
    notifier: N,
    store: TaskStore,
    stopped: AtomicBool,
    // Bumped by every start and stop; a refresh only applies within the run it began in.
    epoch: AtomicU64,
}

impl<G, N> Shared<G, N> {
    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    fn begin_run(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.stopped.store(false, Ordering::Release);
    }

    fn end_run(&self) {
        self.stopped.store(true, Ordering::Release);
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }
}

impl<G: TaskGateway, N: Notifier> Shared<G, N> {
    // Overlapping calls within one run are neither cancelled nor sequenced; the last to
    // resolve wins.
    async fn refresh(&self) -> RefreshOutcome {
        let epoch = self.epoch();
        let result = self.gateway.list().await;
        if self.is_stopped() || self.epoch() != epoch {
            debug!(epoch, "run ended while listing; discarding refresh result");
            return RefreshOutcome::Discarded;
        }

        match result {
            Ok(tasks) => {
                let count = tasks.len();
                let changed = self.store.replace(tasks);
                debug!(count, changed, "task snapshot refreshed");
                RefreshOutcome::Applied { count }
            }
            Err(err) => {
                error!(error = %err, retryable = err.is_retryable(), "failed to fetch tasks");
                self.notifier.error(&format!("Failed to fetch tasks: {err}"));
                self.store.clear();
                RefreshOutcome::Failed
            }
        }
    }
}

/// Recurring refresh timer. Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct PollHandle {
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    fn cancel(&self) {
        self.shutdown.cancel();
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Owns the task store and keeps it in sync with the remote gateway.
pub struct SyncController<G, N> {
    shared: Arc<Shared<G, N>>,
    poll_interval: Duration,
    poller: Option<PollHandle>,
}

impl<G, N> SyncController<G, N>
where
    G: TaskGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(gateway: G, notifier: N) -> Self {
        Self::with_poll_interval(gateway, notifier, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(gateway: G, notifier: N, poll_interval: Duration) -> Self {
        let poll_interval = if poll_interval.is_zero() {
            warn!("zero poll interval requested; using default");
            DEFAULT_POLL_INTERVAL
        } else {
            poll_interval
        };
        Self {
            shared: Arc::new(Shared {
                gateway,
                notifier,
                store: TaskStore::new(),
                stopped: AtomicBool::new(false),
                epoch: AtomicU64::new(0),
            }),
            poll_interval,
            poller: None,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Read-only access to the store.
    pub fn store(&self) -> &TaskStore {
        &self.shared.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.shared.store.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.shared.store.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.poller.as_ref().is_some_and(|poller| !poller.is_finished())
    }

    /// True after `stop()` until the next successful `start()`.
    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }

    /// Fetch immediately, then every `poll_interval` until `stop()`.
    ///
    /// Does nothing (returns `false`) unless the session is loaded with a user present,
    /// or when already running.
    pub async fn start(&mut self, session: &SessionContext) -> bool {
        let Some(user) = session.user().filter(|_| session.is_loaded()) else {
            debug!(loaded = session.is_loaded(), "no authenticated user; sync not started");
            return false;
        };
        if self.poller.is_some() {
            warn!("sync already running; ignoring start");
            return false;
        }

        info!(
            user_id = %user.id,
            poll_interval_secs = self.poll_interval.as_secs(),
            "starting task sync"
        );
        self.shared.begin_run();
        self.shared.refresh().await;
        self.poller = Some(self.spawn_poller());
        true
    }

    /// Cancel the timer. In-flight calls keep running; their results are discarded, even
    /// if the controller is started again before they resolve.
    pub fn stop(&mut self) {
        self.shared.end_run();
        match self.poller.take() {
            Some(poller) => {
                poller.cancel();
                info!("task sync stopped");
            }
            None => debug!("stop called while not running"),
        }
    }

    /// Re-list from the gateway and replace the snapshot.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.shared.refresh().await
    }

    /// Create a task, then refresh.
    pub async fn create(&self, draft: TaskDraft) -> Result<Task, BoardError> {
        self.ensure_live()?;
        if draft.title.trim().is_empty() {
            return Err(self.reject(BoardError::InvalidTask("title must not be empty".to_string())));
        }

        match self.shared.gateway.create(&draft).await {
            Ok(task) => {
                info!(task_id = %task.id, "task created");
                self.shared.refresh().await;
                self.shared.notifier.success("Task created successfully");
                Ok(task)
            }
            Err(err) => Err(self.failed("create", err)),
        }
    }

    /// Apply a partial update, then refresh.
    pub async fn update(&self, id: &str, patch: TaskPatch) -> Result<(), BoardError> {
        self.ensure_live()?;
        if patch.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(self.reject(BoardError::InvalidTask("title must not be empty".to_string())));
        }

        match self.shared.gateway.update(id, &patch).await {
            Ok(()) => {
                info!(task_id = id, "task updated");
                self.shared.refresh().await;
                self.shared.notifier.success("Task updated successfully");
                Ok(())
            }
            Err(err) => Err(self.failed("update", err)),
        }
    }

    /// Delete a task, then refresh.
    pub async fn delete(&self, id: &str) -> Result<(), BoardError> {
        self.ensure_live()?;
        match self.shared.gateway.delete(id).await {
            Ok(()) => {
                info!(task_id = id, "task deleted");
                self.shared.refresh().await;
                self.shared.notifier.success("Task deleted successfully");
                Ok(())
            }
            Err(err) => Err(self.failed("delete", err)),
        }
    }

    /// Move a task to the requested column. Unknown states never reach the gateway.
    pub async fn move_task(&self, id: &str, requested: &str) -> Result<(), BoardError> {
        let patch = lifecycle::transition_patch(requested).map_err(|err| self.reject(err.into()))?;
        self.update(id, patch).await
    }

    /// Mutations are refused between `stop()` and the next `start()`.
    fn ensure_live(&self) -> Result<(), BoardError> {
        if self.shared.is_stopped() {
            return Err(self.reject(BoardError::Stopped));
        }
        Ok(())
    }

    fn reject(&self, err: BoardError) -> BoardError {
        warn!(error = %err, "rejected locally");
        self.shared.notifier.error(&err.to_string());
        err
    }

    fn failed(&self, action: &str, err: TrackitError) -> BoardError {
        error!(action, error = %err, "task mutation failed");
        self.shared
            .notifier
            .error(&format!("Failed to {action} task: {err}"));
        BoardError::Gateway(err)
    }

    fn spawn_poller(&self) -> PollHandle {
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        let shared = Arc::clone(&self.shared);
        let period = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        let shared = Arc::clone(&shared);
                        tokio::spawn(async move {
                            shared.refresh().await;
                        });
                    }
                }
            }
            debug!("poll loop exited");
        });

        PollHandle { shutdown, handle }
    }
}

impl<G, N> Drop for SyncController<G, N> {
    fn drop(&mut self) {
        self.shared.end_run();
    }
}
