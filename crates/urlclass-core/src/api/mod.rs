//! REST API client module for the URL-categorization service.
//!
//! This module provides the `ApiClient` for authenticating against the
//! service, submitting URL batches for classification and ending the
//! session again.
//!
//! The API uses a cookie-based session (`JSESSIONID` by default) obtained
//! by posting credentials and a time-derived API key to the
//! authentication endpoint.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiSettings};
pub use error::ApiError;
