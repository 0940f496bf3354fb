//! # carmarket-workflows
//!
//! The two user-facing workflows of the marketplace client:
//!
//! - [`ListingWorkflow`](listing::ListingWorkflow) — collect vehicle
//!   attributes and pictures, validate, submit to the create-listing
//!   endpoint.
//! - [`LoginWorkflow`](login::LoginWorkflow) — collect credentials, submit
//!   to the login endpoint, persist a session, navigate on success.
//!
//! Both share the same submit lifecycle: validate locally (no network call
//! on failure), assemble the payload, gate on a single in-flight submission
//! per form instance, delegate to the
//! [`ApiClient`](carmarket_api::ApiClient), and surface the outcome through
//! a [`Notifier`](notifier::Notifier). The in-flight mark is released on
//! every completion path, including when a pending submit future is
//! dropped, so a failed or abandoned submit leaves the form editable and
//! resubmittable.

mod gate;
pub mod listing;
pub mod login;
pub mod notifier;

pub use listing::ListingWorkflow;
pub use login::LoginWorkflow;
pub use notifier::{Navigator, Notifier, TracingNavigator, TracingNotifier};
