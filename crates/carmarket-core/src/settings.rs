//! Settings for the carmarket client.
//!
//! This module provides the [`Settings`] struct, which holds all client
//! configuration, and [`LazySettings`], a globally-accessible, lazily
//! initialized settings instance with sensible defaults.
//!
//! Both workflows target the same configurable API base address; the
//! original deployment mixed a local address for one endpoint with a
//! deployed address for the other, which is exactly the kind of drift a
//! single setting prevents.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Session persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// The name under which the session token is persisted.
    pub cookie_name: String,
    /// Session lifetime in seconds.
    pub ttl_secs: u64,
    /// The path scope for the session cookie.
    pub path: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "token".to_string(),
            // Roughly eight hours, matching the deployed client.
            ttl_secs: 28_800,
            path: "/".to_string(),
        }
    }
}

/// The complete set of client settings.
///
/// # Examples
///
/// ```
/// use carmarket_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.production);
/// assert_eq!(settings.session.ttl_secs, 28_800);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base address of the marketplace API (e.g. `https://api.example.com`).
    pub api_base_url: String,
    /// Whether this is a production deployment. Controls secure-transport
    /// marking of the session cookie and the logging format.
    pub production: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
    /// Session persistence configuration.
    pub session: SessionSettings,
    /// The route navigated to after a successful login (and on mount when
    /// a stored session already exists).
    pub landing_route: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            production: false,
            log_level: "info".to_string(),
            session: SessionSettings::default(),
            landing_route: "/cars".to_string(),
        }
    }
}

/// A lazily-initialized, globally accessible settings container.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
///
/// Call `SETTINGS.configure(settings)` once at application startup, then
/// access settings via `SETTINGS.get()` anywhere in the client.
pub static SETTINGS: LazySettings = LazySettings::new();
