//! # carmarket-session
//!
//! Persistence for the opaque session token issued by the login endpoint.
//! The token survives the workflow that obtained it (the client-side analog
//! of a cookie surviving page reloads) until it expires or is cleared.
//!
//! ## Modules
//!
//! - [`cookie`] - The cookie model: attributes and header rendering
//! - [`store`] - The [`SessionStore`](store::SessionStore) trait and its
//!   file-backed and in-memory implementations

pub mod cookie;
pub mod store;

pub use cookie::Cookie;
pub use store::{FileStore, MemoryStore, Session, SessionStore};
