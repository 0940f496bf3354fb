//! # carmarket-forms
//!
//! Form state and validation for the carmarket client. A form is a set of
//! [`FieldDef`](fields::FieldDef)s plus the raw values the user has typed;
//! validation is deferred to submit time, when the whole form is cleaned in
//! one accumulating pass. File attachments live alongside the form in an
//! [`AttachmentList`](attachments::AttachmentList) with a hard upper bound.
//!
//! ## Modules
//!
//! - [`fields`] - Field definitions and type-level cleaning
//! - [`validation`] - The accumulating validation pipeline
//! - [`form`] - [`FormState`](form::FormState), the mutable form instance
//! - [`attachments`] - Attachment descriptors and the bounded list

pub mod attachments;
pub mod fields;
pub mod form;
pub mod validation;

pub use attachments::{Attachment, AttachmentList, MAX_ATTACHMENTS};
pub use fields::{FieldDef, FieldType, Value};
pub use form::FormState;
