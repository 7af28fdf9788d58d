//! Authentication module for the URL-categorization API.
//!
//! This module provides:
//! - `derive_credential`: the time-based API key sent with each login
//! - `SessionToken` and `with_session`: a login/use/logout scope that always
//!   ends the session
//! - `Credentials` and `CredentialStore`: login secrets and their OS-level
//!   storage via keyring
//!
//! Sessions are never persisted; each run logs in and out once.

pub mod credentials;
pub mod obfuscate;
pub mod session;

pub use credentials::{CredentialStore, Credentials};
pub use obfuscate::{derive_credential, derive_credential_now, DerivedKey, ObfuscationError};
pub use session::{with_session, SessionToken};
