/*
[INPUT]:  Email/password credentials and HTTP client
[OUTPUT]: Authenticated user profile with bearer token stored and persisted
[POS]:    Auth layer - orchestrates register/login/logout and session restore
[UPDATE]: When auth endpoints or flow steps change
*/

use std::path::{Path, PathBuf};

use reqwest::Method;
use tracing::{debug, info, warn};

use crate::http::{Result, TrackitClient, TrackitError};
use crate::types::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, User, UserResponse};

use super::{SessionFile, TokenData, TokenStore};

/// Manages the complete authentication flow
#[derive(Debug, Clone)]
pub struct AuthManager {
    client: TrackitClient,
    session_file: SessionFile,
}

impl AuthManager {
    /// Create a new auth manager using the default session directory.
    ///
    /// Default: `./.trackit-config` relative to current working directory.
    pub fn new(client: TrackitClient) -> Self {
        Self::new_with_session_dir(client, default_session_dir())
    }

    /// Create a new auth manager with an explicit session directory.
    pub fn new_with_session_dir(client: TrackitClient, session_dir: impl AsRef<Path>) -> Self {
        Self {
            client,
            session_file: SessionFile::new(session_dir),
        }
    }

    /// Client whose token store this manager maintains
    pub fn client(&self) -> &TrackitClient {
        &self.client
    }

    pub fn token_store(&self) -> &TokenStore {
        self.client.token_store()
    }

    pub fn session_file(&self) -> &SessionFile {
        &self.session_file
    }

    /// Create an account and sign in
    ///
    /// POST /api/register
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        validate_credentials(email, password)?;
        if name.trim().is_empty() {
            return Err(TrackitError::Config("name must not be empty".to_string()));
        }

        let builder = self
            .client
            .request(Method::POST, "api/register")?
            .json(&RegisterRequest { name, email, password });
        let response: AuthResponse = self.client.send_json(builder).await?;
        info!(user_id = %response.user.id, "account registered");
        self.establish(response)
    }

    /// Sign in with email and password
    ///
    /// POST /api/login
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        validate_credentials(email, password)?;

        let builder = self
            .client
            .request(Method::POST, "api/login")?
            .json(&LoginRequest { email, password });
        let response: AuthResponse = self.client.send_json(builder).await?;
        info!(user_id = %response.user.id, "signed in");
        self.establish(response)
    }

    /// Fetch the profile behind the current token
    ///
    /// GET /api/me
    pub async fn me(&self) -> Result<User> {
        let builder = self.client.authed_request(Method::GET, "api/me")?;
        let response: UserResponse = self.client.send_json(builder).await?;
        Ok(response.user)
    }

    /// Sign out. The server call is best-effort; local state is always cleared.
    ///
    /// POST /api/logout
    pub async fn logout(&self) -> Result<()> {
        if self.token_store().get_token().is_some() {
            let outcome = match self.client.authed_request(Method::POST, "api/logout") {
                Ok(builder) => self.client.send_ack::<MessageResponse>(builder).await.map(|_| ()),
                Err(err) => Err(err),
            };
            if let Err(err) = outcome {
                warn!(error = %err, "server logout failed; clearing local session anyway");
            }
        }

        self.token_store().clear();
        self.session_file.clear()?;
        info!("signed out");
        Ok(())
    }

    /// Load a previously persisted session into the token store.
    ///
    /// Returns the stored user when a non-expired session exists. Expired sessions are
    /// deleted.
    pub fn restore(&self) -> Option<User> {
        let data = self.session_file.load()?;
        if data.is_expired() {
            debug!(expires_at = %data.expires_at, "stored session expired");
            if let Err(err) = self.session_file.clear() {
                warn!(error = %err, "failed to remove expired session file");
            }
            return None;
        }

        let user = data.user.clone();
        self.token_store().set(data);
        Some(user)
    }

    fn establish(&self, response: AuthResponse) -> Result<User> {
        let data = TokenData::new(response.token, response.user);
        let user = data.user.clone();
        self.session_file.save(&data)?;
        self.token_store().set(data);
        Ok(user)
    }
}

fn default_session_dir() -> PathBuf {
    let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    base_dir.join(".trackit-config")
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if !email.contains('@') {
        return Err(TrackitError::Config(format!("invalid email address: {email}")));
    }
    if password.is_empty() {
        return Err(TrackitError::Config("password must not be empty".to_string()));
    }
    Ok(())
}
