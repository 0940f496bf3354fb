//! The cookie model for session persistence.
//!
//! Describes how the session token is scoped when handed to a browser-like
//! environment: path, lifetime, and secure-transport marking. The client
//! itself persists sessions through a [`SessionStore`](crate::store), but
//! the cookie attributes travel with the session so an embedding UI can
//! set a real cookie from them.

use std::fmt;

/// A cookie carrying the session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// The cookie name.
    pub name: String,
    /// The cookie value (the opaque session token).
    pub value: String,
    /// Maximum age in seconds. `None` means session cookie.
    pub max_age: Option<u64>,
    /// The path for which the cookie is valid.
    pub path: String,
    /// Whether the cookie should only be sent over HTTPS.
    ///
    /// Set in production deployments only.
    pub secure: bool,
}

impl Cookie {
    /// Creates a new cookie with the given name and value, and sensible defaults.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: None,
            path: "/".to_string(),
            secure: false,
        }
    }

    /// Sets the max age.
    #[must_use]
    pub const fn max_age(mut self, max_age: u64) -> Self {
        self.max_age = Some(max_age);
        self
    }

    /// Sets the path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the secure flag.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Formats this cookie as a `Set-Cookie` header value.
    pub fn header_value(&self) -> String {
        let mut parts = vec![format!("{}={}", self.name, self.value)];

        if let Some(max_age) = self.max_age {
            parts.push(format!("Max-Age={max_age}"));
        }

        parts.push(format!("Path={}", self.path));

        if self.secure {
            parts.push("Secure".to_string());
        }

        parts.join("; ")
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header_value())
    }
}
