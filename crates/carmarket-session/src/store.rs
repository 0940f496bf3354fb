//! Session stores: persistence for the opaque session token.
//!
//! The [`SessionStore`] trait is the seam the login workflow talks to.
//! [`FileStore`] persists the session as a small JSON record on disk so it
//! survives process restarts; [`MemoryStore`] keeps it in process for tests
//! and short-lived embeddings. An expired session is indistinguishable from
//! no session: `load` returns `None` for both.

use std::path::PathBuf;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use carmarket_core::{CarmarketError, CarmarketResult};

use crate::cookie::Cookie;

/// A persisted session: the opaque server-issued token plus its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The opaque token string issued by the login endpoint.
    pub token: String,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Returns `true` if the session has expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Cookie scoping applied to every session a store persists.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// The cookie name (the persistence key).
    pub name: String,
    /// The path scope.
    pub path: String,
    /// Whether to mark the cookie secure-transport-only (production).
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "token".to_string(),
            path: "/".to_string(),
            secure: false,
        }
    }
}

/// Persistence for the session token across workflow lifetimes.
pub trait SessionStore: Send + Sync {
    /// Stores `token` with the given time-to-live.
    ///
    /// Returns the session rendered as a [`Cookie`] so an embedding UI can
    /// mirror the persisted state into a real browser cookie.
    fn save(&self, token: &str, ttl: Duration) -> CarmarketResult<Cookie>;

    /// Returns the stored session if present and unexpired.
    fn load(&self) -> CarmarketResult<Option<Session>>;

    /// Removes any stored session.
    fn clear(&self) -> CarmarketResult<()>;
}

fn expiry_after(ttl: Duration) -> DateTime<Utc> {
    Utc::now()
        + chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(28_800))
}

fn cookie_for(config: &CookieConfig, session: &Session, ttl: Duration) -> Cookie {
    Cookie::new(config.name.clone(), session.token.clone())
        .max_age(ttl.as_secs())
        .path(config.path.clone())
        .secure(config.secure)
}

/// A file-backed session store.
///
/// The session is written as a JSON record at a fixed path. Reading a
/// corrupt record is a [`CarmarketError::Session`]; reading a missing file
/// is simply no session.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    config: CookieConfig,
}

impl FileStore {
    /// Creates a store persisting to `path` with the given cookie scoping.
    pub fn new(path: impl Into<PathBuf>, config: CookieConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }
}

impl SessionStore for FileStore {
    fn save(&self, token: &str, ttl: Duration) -> CarmarketResult<Cookie> {
        let session = Session {
            token: token.to_string(),
            expires_at: expiry_after(ttl),
        };
        let record = serde_json::to_string(&session)?;
        std::fs::write(&self.path, record).map_err(|e| {
            CarmarketError::Session(format!(
                "Failed to write session file '{}': {e}",
                self.path.display()
            ))
        })?;
        tracing::debug!(path = %self.path.display(), "session persisted");
        Ok(cookie_for(&self.config, &session, ttl))
    }

    fn load(&self) -> CarmarketResult<Option<Session>> {
        let record = match std::fs::read_to_string(&self.path) {
            Ok(r) => r,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CarmarketError::Session(format!(
                    "Failed to read session file '{}': {e}",
                    self.path.display()
                )))
            }
        };
        let session: Session = serde_json::from_str(&record)
            .map_err(|e| CarmarketError::Session(format!("Corrupt session record: {e}")))?;
        if session.is_expired() {
            return Ok(None);
        }
        Ok(Some(session))
    }

    fn clear(&self) -> CarmarketResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CarmarketError::Session(format!(
                "Failed to remove session file '{}': {e}",
                self.path.display()
            ))),
        }
    }
}

/// An in-memory session store for tests and short-lived embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    session: RwLock<Option<Session>>,
    config: CookieConfig,
}

impl MemoryStore {
    /// Creates an empty store with default cookie scoping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with the given cookie scoping.
    pub fn with_config(config: CookieConfig) -> Self {
        Self {
            session: RwLock::new(None),
            config,
        }
    }
}

impl SessionStore for MemoryStore {
    fn save(&self, token: &str, ttl: Duration) -> CarmarketResult<Cookie> {
        let session = Session {
            token: token.to_string(),
            expires_at: expiry_after(ttl),
        };
        let cookie = cookie_for(&self.config, &session, ttl);
        *self
            .session
            .write()
            .map_err(|_| CarmarketError::Session("session lock poisoned".into()))? =
            Some(session);
        Ok(cookie)
    }

    fn load(&self) -> CarmarketResult<Option<Session>> {
        let guard = self
            .session
            .read()
            .map_err(|_| CarmarketError::Session("session lock poisoned".into()))?;
        Ok(guard.clone().filter(|s| !s.is_expired()))
    }

    fn clear(&self) -> CarmarketResult<()> {
        *self
            .session
            .write()
            .map_err(|_| CarmarketError::Session("session lock poisoned".into()))? = None;
        Ok(())
    }
}
