//! The listing-submission workflow.
//!
//! Collects vehicle attributes and pictures, validates them at submit time,
//! and posts the listing to the create-listing endpoint. The max-pictures
//! control is part of the form but never part of the payload; the seller
//! identity is an explicit constructor parameter, sourced from the session
//! store by the caller rather than baked in as a constant.

use tracing::Instrument;

use carmarket_api::{ApiClient, Method, SubmissionResult};
use carmarket_core::logging::workflow_span;
use carmarket_core::{CarmarketResult, ValidationError};
use carmarket_forms::fields::{FieldDef, FieldType};
use carmarket_forms::{Attachment, AttachmentList, FormState};

use crate::gate::InFlightGuard;
use crate::notifier::Notifier;

/// The create-listing endpoint, relative to the API base address.
pub const LISTING_ENDPOINT: &str = "/api/cars";

/// Success and fallback-failure texts shown to the user.
const SUCCESS_MESSAGE: &str = "Car details submitted successfully!";
const FAILURE_FALLBACK: &str = "Submission failed!";
const NETWORK_MESSAGE: &str = "An error occurred. Please try again.";
const INCOMPLETE_MESSAGE: &str = "Please complete the form correctly.";

fn listing_form() -> FormState {
    FormState::new(vec![
        FieldDef::new(
            "model",
            FieldType::Char {
                min_length: Some(3),
                max_length: None,
                strip: true,
            },
        )
        .label("Car Model")
        .error_message("required", "Please enter the car model!")
        .error_message("min_length", "Car model must be at least 3 characters!"),
        FieldDef::new(
            "price",
            FieldType::Integer {
                min_value: Some(0),
                max_value: None,
            },
        )
        .label("Price")
        .error_message("required", "Please enter the price!"),
        FieldDef::new(
            "phone",
            FieldType::Regex {
                pattern: r"^\d{11}$".to_string(),
            },
        )
        .label("Phone Number")
        .error_message("required", "Please enter your phone number!")
        .error_message("invalid", "Phone number must be 11 digits!"),
        FieldDef::new(
            "city",
            FieldType::Char {
                min_length: None,
                max_length: None,
                strip: true,
            },
        )
        .label("City")
        .error_message("required", "Please enter your city!"),
        FieldDef::new(
            "max_pictures",
            FieldType::Integer {
                min_value: Some(1),
                max_value: Some(10),
            },
        )
        .label("Max Number of Pictures")
        .error_message("required", "Please specify the maximum number of pictures!")
        .transient(true),
    ])
}

/// One listing-submission interaction: form state, attachments, and the
/// submit lifecycle.
pub struct ListingWorkflow {
    form: FormState,
    attachments: AttachmentList,
    seller: String,
    in_flight: bool,
}

impl ListingWorkflow {
    /// Creates a fresh workflow for the given seller identity.
    ///
    /// `seller` is the authenticated user's identifier; callers obtain it
    /// from the session rather than hardcoding it.
    pub fn new(seller: impl Into<String>) -> Self {
        Self {
            form: listing_form(),
            attachments: AttachmentList::new(),
            seller: seller.into(),
            in_flight: false,
        }
    }

    /// Merges a user input event into the form state. No validation runs
    /// until submit.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) {
        self.form.update_field(name, value);
    }

    /// Appends user-selected pictures, truncating to the hard ceiling of
    /// ten. The drop beyond ten is silent by policy.
    pub fn add_attachments(&mut self, items: impl IntoIterator<Item = Attachment>) {
        self.attachments.add(items);
    }

    /// The current attachment count.
    pub fn attachment_count(&self) -> usize {
        self.attachments.len()
    }

    /// Returns `true` while a submission is awaiting its response.
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Read access to the form state (for rendering).
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Runs the full submit lifecycle.
    ///
    /// Validation failures and the too-many-pictures check resolve locally
    /// with zero network calls. A second submit while one is in flight is
    /// rejected with [`carmarket_core::CarmarketError::InFlight`]. The
    /// in-flight mark is held by a drop guard, so it is released on every
    /// completion path, including when the submit future is dropped at its
    /// suspension point, and the form stays editable after any failure.
    pub async fn submit(
        &mut self,
        client: &dyn ApiClient,
        notifier: &dyn Notifier,
    ) -> CarmarketResult<SubmissionResult> {
        let span = workflow_span("listing");
        self.submit_inner(client, notifier).instrument(span).await
    }

    async fn submit_inner(
        &mut self,
        client: &dyn ApiClient,
        notifier: &dyn Notifier,
    ) -> CarmarketResult<SubmissionResult> {
        let gate = InFlightGuard::acquire(&mut self.in_flight)?;

        if let Err(err) = self.form.full_clean() {
            tracing::debug!(fields = err.field_errors.len(), "validation failed");
            notifier.error(INCOMPLETE_MESSAGE);
            return Err(err.into());
        }

        // Cross-field check: attachment count against the declared maximum.
        // The field validated as Integer 1..=10, so the cleaned value is
        // present and in range here.
        let max_pictures = self
            .form
            .cleaned_value("max_pictures")
            .and_then(carmarket_forms::Value::as_int)
            .unwrap_or(carmarket_forms::MAX_ATTACHMENTS as i64);
        if self.attachments.len() as i64 > max_pictures {
            let message = format!("You can upload a maximum of {max_pictures} pictures.");
            notifier.error(&message);
            return Err(ValidationError::new(message, "max_pictures")
                .with_param("max", max_pictures.to_string())
                .into());
        }

        let mut payload = self.form.payload_fields();
        payload.insert("user".to_string(), serde_json::json!(self.seller));
        payload.insert(
            "images".to_string(),
            serde_json::json!(self.attachments.previews()),
        );
        let payload = serde_json::Value::Object(payload);

        let outcome = client.send(LISTING_ENDPOINT, Method::Post, &payload).await;
        drop(gate);

        match outcome {
            Ok(SubmissionResult::Success(body)) => {
                notifier.success(SUCCESS_MESSAGE);
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
