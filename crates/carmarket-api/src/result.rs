//! Response classification: mapping an HTTP response to a [`SubmissionResult`].
//!
//! Classification is pure (status code + body text in, tagged result out)
//! so it can be tested without a server. The transport layer in
//! [`client`](crate::client) feeds it whatever came back on the wire.

/// The outcome of a submission, as seen by a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The server accepted the submission (2xx). Carries the parsed
    /// response body; a body that is not valid JSON parses to `Null`.
    Success(serde_json::Value),
    /// The server rejected the submission (non-2xx). Carries a message
    /// extracted from the response body when one was present.
    Failure {
        /// The HTTP status code.
        status: u16,
        /// The server-reported message, if the body carried one.
        message: Option<String>,
    },
}

impl SubmissionResult {
    /// Returns `true` for the success variant.
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Classifies a response by status code and raw body text.
///
/// 2xx maps to [`SubmissionResult::Success`] with the parsed body; anything
/// else maps to [`SubmissionResult::Failure`] with a message pulled from
/// the body when it is parseable JSON. The two production endpoints report
/// errors under different keys (`message` for auth, `msg` for listings),
/// so both are consulted.
pub fn classify_response(status: u16, body_text: &str) -> SubmissionResult {
    let body: serde_json::Value =
        serde_json::from_str(body_text).unwrap_or(serde_json::Value::Null);

    if (200..300).contains(&status) {
        SubmissionResult::Success(body)
    } else {
        SubmissionResult::Failure {
            status,
            message: extract_message(&body),
        }
    }
}

/// Pulls a human-readable error message out of a response body.
fn extract_message(body: &serde_json::Value) -> Option<String> {
    for key in ["message", "msg"] {
        if let Some(msg) = body.get(key).and_then(serde_json::Value::as_str) {
            if !msg.is_empty() {
                return Some(msg.to_string());
            }
        }
    }
    None
}
