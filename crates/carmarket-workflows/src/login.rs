//! The authentication workflow.
//!
//! Collects credentials, submits them to the login endpoint, and on success
//! persists the issued session token and navigates to the landing view.
//! On mount, an already-stored unexpired token triggers the same navigation
//! without a server round-trip; the token is trusted at face value, which
//! matches the low-assurance client this replaces.

use std::time::Duration;

use tracing::Instrument;

use carmarket_api::{ApiClient, Method, SubmissionResult};
use carmarket_core::logging::workflow_span;
use carmarket_core::settings::Settings;
use carmarket_core::{CarmarketError, CarmarketResult};
use carmarket_forms::fields::{FieldDef, FieldType};
use carmarket_forms::FormState;
use carmarket_session::SessionStore;

use crate::gate::InFlightGuard;
use crate::notifier::{Navigator, Notifier};

/// The login endpoint, relative to the API base address.
pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

const SUCCESS_MESSAGE: &str = "Login successful!";
const FAILURE_FALLBACK: &str = "Login failed!";
const NETWORK_MESSAGE: &str = "Something went wrong! Please try again.";
const INCOMPLETE_MESSAGE: &str = "Please complete the form correctly.";

fn login_form() -> FormState {
    FormState::new(vec![
        FieldDef::new("email", FieldType::Email)
            .label("Email")
            .error_message("required", "Please enter your email!")
            .error_message("invalid", "Please enter a valid email!"),
        FieldDef::new(
            "password",
            FieldType::Char {
                min_length: None,
                max_length: None,
                strip: false,
            },
        )
        .label("Password")
        .error_message("required", "Please enter your password!"),
    ])
}

/// One login interaction: credential form plus the submit lifecycle.
pub struct LoginWorkflow {
    form: FormState,
    session_ttl: Duration,
    landing_route: String,
    in_flight: bool,
}

impl LoginWorkflow {
    /// Creates a fresh workflow configured from [`Settings`].
    pub fn new(settings: &Settings) -> Self {
        Self {
            form: login_form(),
            session_ttl: Duration::from_secs(settings.session.ttl_secs),
            landing_route: settings.landing_route.clone(),
            in_flight: false,
        }
    }

    /// Merges a user input event into the form state.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) {
        self.form.update_field(name, value);
    }

    /// Returns `true` while a submission is awaiting its response.
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Read access to the form state (for rendering).
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// The mount-time session check.
    ///
    /// If the store holds an unexpired token, navigation to the landing
    /// view fires immediately and `true` is returned. The token is not
    /// re-validated with the server.
    pub fn on_mount(
        &self,
        store: &dyn SessionStore,
        navigator: &dyn Navigator,
    ) -> CarmarketResult<bool> {
        if store.load()?.is_some() {
            navigator.navigate(&self.landing_route);
            return Ok(true);
        }
        Ok(false)
    }

    /// Runs the full submit lifecycle.
    ///
    /// Validation failures resolve locally with zero network calls. On a
    /// successful response the session token is persisted (with the TTL
    /// and secure marking the store is configured for) before the success
    /// notification and navigation fire. No session is persisted on any
    /// failure path, and the in-flight mark is held by a drop guard, so it
    /// is released on every path, including when the submit future is
    /// dropped at its suspension point.
    pub async fn submit(
        &mut self,
        client: &dyn ApiClient,
        store: &dyn SessionStore,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> CarmarketResult<SubmissionResult> {
        let span = workflow_span("login");
        self.submit_inner(client, store, notifier, navigator)
            .instrument(span)
            .await
    }

    async fn submit_inner(
        &mut self,
        client: &dyn ApiClient,
        store: &dyn SessionStore,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> CarmarketResult<SubmissionResult> {
        let gate = InFlightGuard::acquire(&mut self.in_flight)?;

        if let Err(err) = self.form.full_clean() {
            tracing::debug!(fields = err.field_errors.len(), "validation failed");
            notifier.error(INCOMPLETE_MESSAGE);
            return Err(err.into());
        }

        let payload = serde_json::Value::Object(self.form.payload_fields());

        let outcome = client.send(LOGIN_ENDPOINT, Method::Post, &payload).await;
        drop(gate);

        match outcome {
            Ok(SubmissionResult::Success(body)) => {
                let Some(token) = body.get("token").and_then(serde_json::Value::as_str) else {
                    // A 2xx without a token is a broken server contract;
                    // persisting an empty session would lock the user out
                    // of retrying.
                    notifier.error(FAILURE_FALLBACK);
                    return Err(CarmarketError::Api {
                        status: 200,
                        message: "Login response did not carry a token".to_string(),
                    });
                };
                store.save(token, self.session_ttl)?;
                notifier.success(SUCCESS_MESSAGE);
                navigator.navigate(&self.landing_route);
                Ok(SubmissionResult::Success(body))
            }
            Ok(SubmissionResult::Failure { status, message }) => {
                notifier.error(message.as_deref().unwrap_or(FAILURE_FALLBACK));
                Ok(SubmissionResult::Failure { status, message })
            }
            Err(err) => {
                notifier.error(NETWORK_MESSAGE);
                Err(err)
            }
        }
    }
}
