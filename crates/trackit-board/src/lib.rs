/*
[INPUT]:  Public API exports for trackit-board crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod board;
pub mod config;
pub mod lifecycle;
pub mod notify;
pub mod projector;
pub mod render;
pub mod session;
pub mod store;
pub mod sync;

// Re-export main types for convenience
pub use board::Board;
pub use config::BoardConfig;
pub use lifecycle::LifecycleError;
pub use notify::{ChannelNotifier, Notification, Notifier, TracingNotifier};
pub use projector::{Column, Filter, Statistics};
pub use session::SessionContext;
pub use store::{Snapshot, TaskStore};
pub use sync::{BoardError, DEFAULT_POLL_INTERVAL, RefreshOutcome, SyncController};
