//! Logging integration for the carmarket client.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-workflow spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info",
/// "warn", "error"). Outside production a pretty, human-readable format is
/// used; in production a structured JSON format is used.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.production {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for a single form workflow.
///
/// Attach this span to a submit future with [`tracing::Instrument`] so
/// that all log entries emitted during validation and submission include
/// the workflow name. Instrumenting the future (rather than holding an
/// entered guard across an await) keeps it `Send` and keeps events
/// attributed to the right span across suspension points.
///
/// # Examples
///
/// ```
/// use carmarket_core::logging::workflow_span;
/// use tracing::Instrument;
///
/// async fn submit() {
///     tracing::info!("submitting");
/// }
///
/// # async fn run() {
/// submit().instrument(workflow_span("listing")).await;
/// # }
/// ```
pub fn workflow_span(workflow: &str) -> tracing::Span {
    tracing::info_span!("workflow", name = workflow)
}
