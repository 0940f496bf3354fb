//! User-feedback seams: transient notifications and navigation.
//!
//! Both traits are fire-and-forget and stateless relative to the
//! workflows; they never block or fail a submission. The tracing-backed
//! defaults make a headless embedding observable, and test doubles record
//! calls instead.

/// Surfaces transient success/error messages to the user.
pub trait Notifier: Send + Sync {
    /// Shows a transient success message.
    fn success(&self, message: &str);

    /// Shows a transient error message.
    fn error(&self, message: &str);
}

/// Triggers navigation to another view.
pub trait Navigator: Send + Sync {
    /// Navigates to the given route (e.g. `/cars`).
    fn navigate(&self, route: &str);
}

/// A [`Notifier`] that emits notifications as tracing events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "carmarket::notify", kind = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "carmarket::notify", kind = "error", "{message}");
    }
}

/// A [`Navigator`] that records navigation as tracing events.
///
/// Real embeddings plug in their router here.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: &str) {
        tracing::info!(target: "carmarket::navigate", "{route}");
    }
}
