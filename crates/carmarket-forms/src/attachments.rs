//! Attachment handling for forms with file uploads.
//!
//! An [`Attachment`] is a user-selected file held in memory for the
//! lifetime of the form, before any durable storage exists. The
//! [`AttachmentList`] is bounded above by a hard ceiling of
//! [`MAX_ATTACHMENTS`]: appending beyond it keeps the first ten and
//! silently drops the remainder. That is a truncation policy, not an
//! error, so it produces no validation failure.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as Base64Engine;

/// The hard ceiling on attachments per form, regardless of the
/// user-declared maximum.
pub const MAX_ATTACHMENTS: usize = 10;

/// A user-selected file intended for upload.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// The original filename as provided by the user.
    pub name: String,
    /// The raw file content.
    pub bytes: Vec<u8>,
    /// A transmissible preview representation (a data URL).
    pub preview: String,
}

impl Attachment {
    /// Creates an attachment from a filename and raw bytes, deriving the
    /// preview data URL from the content.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, content_type: &str) -> Self {
        let preview = format!("data:{content_type};base64,{}", STANDARD.encode(&bytes));
        Self {
            name: name.into(),
            bytes,
            preview,
        }
    }

    /// Creates an attachment with an externally supplied preview reference.
    pub fn with_preview(name: impl Into<String>, bytes: Vec<u8>, preview: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            preview: preview.into(),
        }
    }

    /// The size of the file content in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// An ordered, bounded list of attachments.
///
/// Created empty on form mount, appended to on each user attachment
/// action, and read once at submit time.
#[derive(Debug, Clone, Default)]
pub struct AttachmentList {
    items: Vec<Attachment>,
}

impl AttachmentList {
    /// Creates an empty attachment list.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends attachments, truncating to the first [`MAX_ATTACHMENTS`]
    /// whenever the total exceeds the ceiling. The drop is silent.
    pub fn add(&mut self, items: impl IntoIterator<Item = Attachment>) {
        self.items.extend(items);
        self.items.truncate(MAX_ATTACHMENTS);
    }

    /// The number of attachments currently held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no attachments are held.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the attachments in order.
    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.items.iter()
    }

    /// Returns the preview references of all attachments, in order.
    ///
    /// This is the representation submitted in the request payload.
    pub fn previews(&self) -> Vec<String> {
        self.items.iter().map(|a| a.preview.clone()).collect()
    }
}
