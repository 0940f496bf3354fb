//! End-to-end workflow tests against in-process doubles.
//!
//! The network seam is a scripted [`ApiClient`] that records every call, so
//! each test can assert not just the outcome but exactly how many requests
//! were made (validation failures must make zero) and what was in them.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use carmarket_api::{ApiClient, Method, SubmissionResult};
use carmarket_core::settings::Settings;
use carmarket_core::{CarmarketError, CarmarketResult};
use carmarket_forms::Attachment;
use carmarket_session::{MemoryStore, SessionStore};
use carmarket_workflows::{ListingWorkflow, LoginWorkflow, Navigator, Notifier};

/// What the scripted client should do when called.
#[derive(Debug, Clone)]
enum Scripted {
    Success(serde_json::Value),
    Failure { status: u16, message: Option<String> },
    Network(String),
}

/// An [`ApiClient`] double that records calls and replays a script.
struct MockClient {
    scripted: Scripted,
    calls: Mutex<Vec<(String, Method, serde_json::Value)>>,
}

impl MockClient {
    fn new(scripted: Scripted) -> Self {
        Self {
            scripted,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn last_call(&self) -> (String, Method, serde_json::Value) {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ApiClient for MockClient {
    async fn send(
        &self,
        endpoint: &str,
        method: Method,
        payload: &serde_json::Value,
    ) -> CarmarketResult<SubmissionResult> {
        self.calls
            .lock()
            .unwrap()
            .push((endpoint.to_string(), method, payload.clone()));
        match &self.scripted {
            Scripted::Success(body) => Ok(SubmissionResult::Success(body.clone())),
            Scripted::Failure { status, message } => Ok(SubmissionResult::Failure {
                status: *status,
                message: message.clone(),
            }),
            Scripted::Network(reason) => Err(CarmarketError::Network(reason.clone())),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    successes: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

fn picture(n: u8) -> Attachment {
    Attachment::new(format!("photo{n}.jpg"), vec![0xFF, 0xD8, n], "image/jpeg")
}

fn fill_valid_listing(wf: &mut ListingWorkflow, max_pictures: &str) {
    wf.update_field("model", "Honda Civic");
    wf.update_field("price", "2500000");
    wf.update_field("phone", "03001234567");
    wf.update_field("city", "Karachi");
    wf.update_field("max_pictures", max_pictures);
}

fn fill_valid_login(wf: &mut LoginWorkflow) {
    wf.update_field("email", "buyer@example.com");
    wf.update_field("password", "hunter2");
}

// ── Listing workflow ────────────────────────────────────────────────

#[tokio::test]
async fn listing_missing_required_field_makes_no_network_call() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({})));
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    wf.update_field("model", "Honda Civic");

    let result = wf.submit(&client, &notifier).await;

    assert!(matches!(result, Err(CarmarketError::Validation(_))));
    assert_eq!(client.call_count(), 0);
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.successes().is_empty());
    assert!(!wf.is_in_flight());
}

#[tokio::test]
async fn listing_too_many_pictures_makes_no_network_call() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({})));
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "2");
    wf.add_attachments((0..3).map(picture));

    let result = wf.submit(&client, &notifier).await;

    assert!(matches!(result, Err(CarmarketError::Validation(_))));
    assert_eq!(client.call_count(), 0);
    assert_eq!(
        notifier.errors(),
        vec!["You can upload a maximum of 2 pictures.".to_string()]
    );
}

#[tokio::test]
async fn listing_attachments_beyond_ten_truncate_before_submit() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({})));
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "10");
    wf.add_attachments((0..25).map(picture));

    assert_eq!(wf.attachment_count(), 10);

    let result = wf.submit(&client, &notifier).await.unwrap();
    assert!(result.is_success());

    let (_, _, payload) = client.last_call();
    assert_eq!(payload["images"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn listing_success_payload_and_notification() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({"id": "car-9"})));
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("6755ee70161495befd86a5e2");
    fill_valid_listing(&mut wf, "5");
    wf.add_attachments((0..2).map(picture));

    let result = wf.submit(&client, &notifier).await.unwrap();

    assert!(result.is_success());
    assert_eq!(client.call_count(), 1);
    assert_eq!(
        notifier.successes(),
        vec!["Car details submitted successfully!".to_string()]
    );
    assert!(notifier.errors().is_empty());

    let (endpoint, method, payload) = client.last_call();
    assert_eq!(endpoint, "/api/cars");
    assert_eq!(method, Method::Post);
    assert_eq!(payload["model"], "Honda Civic");
    assert_eq!(payload["price"], 2_500_000);
    assert_eq!(payload["phone"], "03001234567");
    assert_eq!(payload["city"], "Karachi");
    assert_eq!(payload["user"], "6755ee70161495befd86a5e2");
    assert_eq!(payload["images"].as_array().unwrap().len(), 2);
    // The max-pictures control is transient and never leaves the client.
    assert!(payload.get("max_pictures").is_none());
}

#[tokio::test]
async fn listing_failure_passes_server_message_through() {
    let client = MockClient::new(Scripted::Failure {
        status: 422,
        message: Some("price out of range".to_string()),
    });
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "5");

    let result = wf.submit(&client, &notifier).await.unwrap();

    assert!(!result.is_success());
    assert_eq!(notifier.errors(), vec!["price out of range".to_string()]);
}

#[tokio::test]
async fn listing_failure_without_message_uses_fallback() {
    let client = MockClient::new(Scripted::Failure {
        status: 500,
        message: None,
    });
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "5");

    wf.submit(&client, &notifier).await.unwrap();

    assert_eq!(notifier.errors(), vec!["Submission failed!".to_string()]);
}

#[tokio::test]
async fn listing_network_failure_notifies_generically_and_clears_in_flight() {
    let client = MockClient::new(Scripted::Network("connection refused".to_string()));
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "5");

    let result = wf.submit(&client, &notifier).await;

    assert!(matches!(result, Err(CarmarketError::Network(_))));
    assert_eq!(
        notifier.errors(),
        vec!["An error occurred. Please try again.".to_string()]
    );
    assert!(!wf.is_in_flight());
}

#[tokio::test]
async fn listing_form_editable_and_resubmittable_after_failure() {
    let client = MockClient::new(Scripted::Failure {
        status: 400,
        message: Some("bad listing".to_string()),
    });
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "5");

    wf.submit(&client, &notifier).await.unwrap();
    // Edit and submit again; the gate must have been released.
    wf.update_field("price", "2400000");
    wf.submit(&client, &notifier).await.unwrap();

    assert_eq!(client.call_count(), 2);
    let (_, _, payload) = client.last_call();
    assert_eq!(payload["price"], 2_400_000);
}

#[tokio::test]
async fn listing_update_field_idempotent_across_submit() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({})));
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "5");
    // Same value twice: no change, no extra validation errors.
    wf.update_field("city", "Karachi");
    wf.update_field("city", "Karachi");

    let result = wf.submit(&client, &notifier).await.unwrap();
    assert!(result.is_success());
    assert!(wf.form().errors().is_empty());
}

// ── Login workflow ──────────────────────────────────────────────────

#[tokio::test]
async fn login_success_persists_session_notifies_and_navigates() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({"token": "abc"})));
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    let mut wf = LoginWorkflow::new(&Settings::default());
    fill_valid_login(&mut wf);

    let result = wf.submit(&client, &store, &notifier, &navigator).await.unwrap();

    assert!(result.is_success());
    let session = store.load().unwrap().expect("session should be persisted");
    assert_eq!(session.token, "abc");
    assert_eq!(notifier.successes(), vec!["Login successful!".to_string()]);
    assert!(notifier.errors().is_empty());
    assert_eq!(navigator.routes(), vec!["/cars".to_string()]);
}

#[tokio::test]
async fn login_validation_failure_makes_no_network_call() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({"token": "abc"})));
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    let mut wf = LoginWorkflow::new(&Settings::default());
    wf.update_field("email", "not-an-email");
    wf.update_field("password", "hunter2");

    let result = wf.submit(&client, &store, &notifier, &navigator).await;

    assert!(matches!(result, Err(CarmarketError::Validation(_))));
    assert_eq!(client.call_count(), 0);
    assert_eq!(store.load().unwrap(), None);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn login_rejected_credentials_notify_server_message() {
    let client = MockClient::new(Scripted::Failure {
        status: 401,
        message: Some("bad credentials".to_string()),
    });
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    let mut wf = LoginWorkflow::new(&Settings::default());
    fill_valid_login(&mut wf);

    let result = wf.submit(&client, &store, &notifier, &navigator).await.unwrap();

    assert!(!result.is_success());
    assert_eq!(notifier.errors(), vec!["bad credentials".to_string()]);
    assert!(notifier.successes().is_empty());
    assert_eq!(store.load().unwrap(), None);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn login_network_failure_is_generic_and_clears_in_flight() {
    let client = MockClient::new(Scripted::Network("connection refused".to_string()));
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    let mut wf = LoginWorkflow::new(&Settings::default());
    fill_valid_login(&mut wf);

    let result = wf.submit(&client, &store, &notifier, &navigator).await;

    assert!(matches!(result, Err(CarmarketError::Network(_))));
    assert_eq!(
        notifier.errors(),
        vec!["Something went wrong! Please try again.".to_string()]
    );
    assert_eq!(store.load().unwrap(), None);
    assert!(!wf.is_in_flight());
}

#[tokio::test]
async fn login_success_without_token_is_an_api_error() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({"user": "x"})));
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    let mut wf = LoginWorkflow::new(&Settings::default());
    fill_valid_login(&mut wf);

    let result = wf.submit(&client, &store, &notifier, &navigator).await;

    assert!(matches!(result, Err(CarmarketError::Api { .. })));
    assert_eq!(store.load().unwrap(), None);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn login_session_ttl_comes_from_settings() {
    let client = MockClient::new(Scripted::Success(serde_json::json!({"token": "abc"})));
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();

    let mut settings = Settings::default();
    settings.session.ttl_secs = 2;
    let mut wf = LoginWorkflow::new(&settings);
    fill_valid_login(&mut wf);

    wf.submit(&client, &store, &notifier, &navigator).await.unwrap();

    let session = store.load().unwrap().expect("fresh session");
    let remaining = session.expires_at - chrono::Utc::now();
    assert!(remaining <= chrono::Duration::seconds(2));
    assert!(remaining > chrono::Duration::seconds(0));
}

// ── Mount-time session check ────────────────────────────────────────

#[tokio::test]
async fn mount_with_stored_token_navigates_immediately() {
    let store = MemoryStore::new();
    store.save("existing", Duration::from_secs(3600)).unwrap();
    let navigator = RecordingNavigator::default();
    let wf = LoginWorkflow::new(&Settings::default());

    let navigated = wf.on_mount(&store, &navigator).unwrap();

    assert!(navigated);
    assert_eq!(navigator.routes(), vec!["/cars".to_string()]);
}

#[tokio::test]
async fn mount_without_token_stays_put() {
    let store = MemoryStore::new();
    let navigator = RecordingNavigator::default();
    let wf = LoginWorkflow::new(&Settings::default());

    let navigated = wf.on_mount(&store, &navigator).unwrap();

    assert!(!navigated);
    assert!(navigator.routes().is_empty());
}

#[tokio::test]
async fn mount_with_expired_token_stays_put() {
    let store = MemoryStore::new();
    store.save("stale", Duration::from_secs(0)).unwrap();
    let navigator = RecordingNavigator::default();
    let wf = LoginWorkflow::new(&Settings::default());

    let navigated = wf.on_mount(&store, &navigator).unwrap();

    assert!(!navigated);
    assert!(navigator.routes().is_empty());
}

// ── In-flight gate ──────────────────────────────────────────────────

/// An [`ApiClient`] whose response never arrives. Awaiting it parks the
/// submit future at its suspension point forever.
struct StalledClient;

#[async_trait]
impl ApiClient for StalledClient {
    async fn send(
        &self,
        _endpoint: &str,
        _method: Method,
        _payload: &serde_json::Value,
    ) -> CarmarketResult<SubmissionResult> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn listing_dropped_submit_releases_the_gate() {
    let notifier = RecordingNotifier::default();
    let mut wf = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut wf, "5");

    // Abandon a submit mid-await, the way an embedding racing it against
    // a deadline would.
    let abandoned = tokio::time::timeout(
        Duration::from_millis(20),
        wf.submit(&StalledClient, &notifier),
    )
    .await;
    assert!(abandoned.is_err());
    assert!(!wf.is_in_flight());

    // The form must still be editable and submittable afterwards.
    let client = MockClient::new(Scripted::Success(serde_json::json!({})));
    wf.update_field("city", "Lahore");
    let result = wf.submit(&client, &notifier).await.unwrap();
    assert!(result.is_success());
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn login_dropped_submit_releases_the_gate() {
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();
    let mut wf = LoginWorkflow::new(&Settings::default());
    fill_valid_login(&mut wf);

    let abandoned = tokio::time::timeout(
        Duration::from_millis(20),
        wf.submit(&StalledClient, &store, &notifier, &navigator),
    )
    .await;
    assert!(abandoned.is_err());
    assert!(!wf.is_in_flight());

    let client = MockClient::new(Scripted::Success(serde_json::json!({"token": "abc"})));
    let result = wf.submit(&client, &store, &notifier, &navigator).await.unwrap();
    assert!(result.is_success());
    assert_eq!(store.load().unwrap().unwrap().token, "abc");
}

#[tokio::test]
async fn submit_futures_are_send() {
    fn spawnable<F: std::future::Future + Send>(f: F) -> F {
        f
    }

    let client = MockClient::new(Scripted::Success(serde_json::json!({"token": "abc"})));
    let store = MemoryStore::new();
    let notifier = RecordingNotifier::default();
    let navigator = RecordingNavigator::default();

    let mut listing = ListingWorkflow::new("seller-1");
    fill_valid_listing(&mut listing, "5");
    spawnable(listing.submit(&client, &notifier)).await.unwrap();

    let mut login = LoginWorkflow::new(&Settings::default());
    fill_valid_login(&mut login);
    spawnable(login.submit(&client, &store, &notifier, &navigator))
        .await
        .unwrap();
}
