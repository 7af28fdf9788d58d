use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use anyhow::Result;
use futures::FutureExt;
use tracing::info;

use crate::api::ApiClient;

use super::Credentials;

/// Opaque session cookie value issued by the authentication endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Log in, run `body` with the session token, then log out.
///
/// Logout runs exactly once whether `body` succeeds, fails or panics; a
/// panic is resumed after the session has been closed. If login fails,
/// `body` is never run and there is nothing to log out.
pub async fn with_session<F, Fut, T>(api: &ApiClient, credentials: &Credentials, body: F) -> Result<T>
where
    F: FnOnce(SessionToken) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let token = api.login(credentials).await?;
    info!(username = %credentials.username, "Authenticated successfully");

    let scoped = token.clone();
    let outcome = AssertUnwindSafe(async move { body(scoped).await })
        .catch_unwind()
        .await;

    api.logout(&token).await;

    match outcome {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
