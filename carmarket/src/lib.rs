//! # carmarket
//!
//! Client-side form workflows for a vehicle marketplace.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient
//! access. You can depend on `carmarket` to get the whole client, or depend
//! on individual crates for finer-grained control.
//!
//! ## Example
//!
//! ```no_run
//! use carmarket::api::HttpClient;
//! use carmarket::core::settings::Settings;
//! use carmarket::workflows::{ListingWorkflow, TracingNotifier};
//!
//! # async fn run() -> carmarket::core::CarmarketResult<()> {
//! let settings = Settings::default();
//! let client = HttpClient::new(&settings.api_base_url);
//!
//! let mut listing = ListingWorkflow::new("6755ee70161495befd86a5e2");
//! listing.update_field("model", "Honda Civic");
//! listing.update_field("price", "2500000");
//! listing.update_field("phone", "03001234567");
//! listing.update_field("city", "Karachi");
//! listing.update_field("max_pictures", "5");
//! listing.submit(&client, &TracingNotifier).await?;
//! # Ok(())
//! # }
//! ```

/// Core types: errors, settings, and logging.
pub use carmarket_core as core;

/// Form state, field validation, and attachments.
pub use carmarket_forms as forms;

/// The HTTP client and outcome classification.
pub use carmarket_api as api;

/// Session token persistence.
pub use carmarket_session as session;

/// The listing-submission and login workflows.
pub use carmarket_workflows as workflows;

// Third-party re-exports for user convenience.
pub use async_trait;
pub use chrono;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tracing;
pub use tracing_subscriber;
