/*
[INPUT]:  Loaded BoardConfig, persisted session
[OUTPUT]: Shared helpers for the CLI subcommands
[POS]:    CLI layer - wiring between config, auth, and the board engine
[UPDATE]: When subcommands need new shared plumbing
*/

pub mod account;
pub mod init;
pub mod tasks;

use anyhow::{Context, Result, bail};
use console::style;
use tokio::sync::mpsc::UnboundedReceiver;

use trackit_board::{BoardConfig, Notification, SessionContext};
use trackit_client::{AuthManager, TrackitClient};

pub fn build_auth(config: &BoardConfig) -> Result<AuthManager> {
    let client = TrackitClient::with_config_and_base_url(config.client_config(), &config.api.base_url)
        .context("create TrackIt client")?;
    Ok(AuthManager::new_with_session_dir(client, config.session_dir()))
}

/// Resolve the stored session, failing when nobody is signed in.
pub async fn require_session(auth: &AuthManager) -> Result<SessionContext> {
    let session = SessionContext::resolve(auth).await;
    if !session.is_ready() {
        bail!("not signed in; run `trackit login` first");
    }
    Ok(session)
}

pub fn print_notification(notification: &Notification) {
    match notification {
        Notification::Success(message) => println!("{}", style(message).green()),
        Notification::Error(message) => eprintln!("{}", style(message).red()),
    }
}

/// Print everything queued so far without waiting.
pub fn drain_notifications(rx: &mut UnboundedReceiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        print_notification(&notification);
    }
}
