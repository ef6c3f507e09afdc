/*
[INPUT]:  Persisted session + AuthManager
[OUTPUT]: SessionContext gating SyncController::start
[POS]:    Session layer - "loaded and present" user context
[UPDATE]: When session resolution rules change
*/

use tracing::{debug, warn};
use trackit_client::{AuthManager, User};

/// Authentication state seen by the board engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionContext {
    /// Session resolution has not finished.
    #[default]
    Loading,
    /// Resolution finished and nobody is signed in.
    Anonymous,
    Authenticated(User),
}

impl SessionContext {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionContext::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !matches!(self, SessionContext::Loading)
    }

    /// Loaded and a user is present.
    pub fn is_ready(&self) -> bool {
        self.is_loaded() && self.user().is_some()
    }

    /// Restore the persisted session and confirm it with the server.
    ///
    /// A token the server rejects signs the user out locally. Any other failure keeps the
    /// stored profile so the board can start and surface its own fetch errors.
    pub async fn resolve(auth: &AuthManager) -> Self {
        let Some(stored) = auth.restore() else {
            debug!("no stored session");
            return SessionContext::Anonymous;
        };

        match auth.me().await {
            Ok(user) => SessionContext::Authenticated(user),
            Err(err) if err.is_auth_error() => {
                warn!(error = %err, "stored session rejected by server");
                if let Err(err) = auth.logout().await {
                    warn!(error = %err, "failed to clear rejected session");
                }
                SessionContext::Anonymous
            }
            Err(err) => {
                warn!(error = %err, "could not confirm session; using stored profile");
                SessionContext::Authenticated(stored)
            }
        }
    }
}
