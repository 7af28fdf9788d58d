//! Data models for the URL-categorization API.
//!
//! - `ClassificationResult`: one classified URL as returned by the lookup endpoint
//! - `LoginRequest`: body posted to the authentication endpoint

pub mod classification;

pub use classification::{ClassificationResult, LoginRequest};
