//! # Session Module
//!
//! The logged-in user and their bearer token, held in an explicit [`Session`]
//! value that callers own and pass to whatever needs it. There is no global
//! auth state.
//!
//! Lifecycle:
//!
//! 1. [`Session::restore`] reads whatever a previous run persisted.
//! 2. [`Session::login`] / [`Session::register`] authenticate against the
//!    backend and persist the result.
//! 3. [`Session::logout`] forgets the user and clears the store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use iut_erp_core::{
    errors::{ErpError, ErpResult},
    models::user::{AuthResponse, RegisterRequest, Role, User},
};

use crate::client::ErpClient;

/// What survives between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: User,
}

impl From<AuthResponse> for StoredSession {
    fn from(response: AuthResponse) -> Self {
        Self {
            token: response.token,
            user: response.user,
        }
    }
}

/// Persistence for the session between runs.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore {
    fn load(&self) -> ErpResult<Option<StoredSession>>;
    fn save(&self, session: &StoredSession) -> ErpResult<()>;
    fn clear(&self) -> ErpResult<()>;
}

/// Keeps the session as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ErpResult<Option<StoredSession>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(eyre::Report::new(e)
                    .wrap_err(format!("Failed to read session file {}", self.path.display()))
                    .into());
            }
        };

        let session = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Corrupt session file {}", self.path.display()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &StoredSession) -> ErpResult<()> {
        let raw = serde_json::to_string_pretty(session).wrap_err("Failed to encode session")?;
        fs::write(&self.path, raw)
            .wrap_err_with(|| format!("Failed to write session file {}", self.path.display()))?;
        Ok(())
    }

    fn clear(&self) -> ErpResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(eyre::Report::new(e)
                .wrap_err(format!("Failed to remove session file {}", self.path.display()))
                .into()),
        }
    }
}

/// The current user of the application.
pub struct Session<S: SessionStore> {
    store: S,
    current: Option<StoredSession>,
}

impl<S: SessionStore> Session<S> {
    /// Starts a session from whatever `store` holds.
    pub fn restore(store: S) -> ErpResult<Self> {
        let current = store.load()?;
        match &current {
            Some(stored) => info!("Restored session for {}", stored.user.email),
            None => debug!("No stored session"),
        }

        Ok(Self { store, current })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref().map(|stored| &stored.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|stored| stored.token.as_str())
    }

    /// The logged-in user; protected pages refuse to load without one.
    pub fn require_user(&self) -> ErpResult<&User> {
        self.user()
            .ok_or_else(|| ErpError::Authentication("Not logged in".to_string()))
    }

    pub fn require_role(&self, role: Role) -> ErpResult<&User> {
        let user = self.require_user()?;
        if user.role != role {
            return Err(ErpError::Authorization(format!(
                "{:?} role required, {} is {:?}",
                role, user.email, user.role
            )));
        }
        Ok(user)
    }

    /// `client` carrying this session's token.
    pub fn authorize(&self, client: &ErpClient) -> ErpResult<ErpClient> {
        let token = self
            .token()
            .ok_or_else(|| ErpError::Authentication("Not logged in".to_string()))?;
        Ok(client.authenticated(token))
    }

    pub async fn login(
        &mut self,
        client: &ErpClient,
        email: &str,
        password: &str,
    ) -> ErpResult<&User> {
        let response = client.login(email, password).await?;
        self.establish(response)
    }

    pub async fn register(
        &mut self,
        client: &ErpClient,
        request: &RegisterRequest,
    ) -> ErpResult<&User> {
        let response = client.register(request).await?;
        self.establish(response)
    }

    fn establish(&mut self, response: AuthResponse) -> ErpResult<&User> {
        let stored = StoredSession::from(response);
        self.store.save(&stored)?;
        info!("Logged in as {} ({:?})", stored.user.email, stored.user.role);

        let stored = self.current.insert(stored);
        Ok(&stored.user)
    }

    /// Forgets the user, in memory and in the store.
    pub fn logout(&mut self) -> ErpResult<()> {
        if let Some(stored) = self.current.take() {
            info!("Logging out {}", stored.user.email);
        }
        self.store.clear()
    }
}
