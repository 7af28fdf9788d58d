//! urlclass-core - classify URLs in bulk against a URL-categorization API.
//!
//! The library logs in with a time-derived API key, submits URLs in
//! batches of at most 100, writes the classifications to CSV and always
//! logs out again.
//!
//! ```no_run
//! # async fn example() -> anyhow::Result<()> {
//! use urlclass_core::{run, ApiSettings, Credentials, RunConfig};
//!
//! let config = RunConfig {
//!     api: ApiSettings::new("https://api.example.com/api/v1"),
//!     credentials: Credentials::new("admin@example.com", "password", "api-key-seed"),
//!     input: "urls.csv".into(),
//!     output: "results.csv".into(),
//! };
//! let summary = run(&config).await?;
//! println!("{} of {} URLs classified", summary.classified, summary.urls_read);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod records;
pub mod runner;
pub mod utils;

pub use api::{ApiClient, ApiError, ApiSettings};
pub use auth::{with_session, CredentialStore, Credentials, SessionToken};
pub use config::{Config, ConfigError, RunConfig};
pub use models::ClassificationResult;
pub use runner::{run, RunSummary};
