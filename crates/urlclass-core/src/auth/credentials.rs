use std::fmt;

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "urlclass";

/// Suffix for the keychain entry holding the API key seed
const API_KEY_SUFFIX: &str = "#api-key";

/// Secrets needed to open a session.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Seed the login key is derived from
    pub api_key: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            api_key: api_key.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("api_key", &"***")
            .finish()
    }
}

pub struct CredentialStore;

impl CredentialStore {
    fn api_key_account(username: &str) -> String {
        format!("{}{}", username, API_KEY_SUFFIX)
    }

    fn set(account: &str, secret: &str) -> Result<()> {
        let entry = Entry::new(SERVICE_NAME, account).context("Failed to create keyring entry")?;
        entry
            .set_password(secret)
            .context("Failed to store secret in keychain")?;
        Ok(())
    }

    fn get(account: &str) -> Result<String> {
        let entry = Entry::new(SERVICE_NAME, account).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve secret from keychain")
    }

    /// Store password and API key seed for a username in the OS keychain
    pub fn store(credentials: &Credentials) -> Result<()> {
        Self::set(&credentials.username, &credentials.password)?;
        Self::set(&Self::api_key_account(&credentials.username), &credentials.api_key)
    }

    /// Retrieve the password for a username from the OS keychain
    pub fn get_password(username: &str) -> Result<String> {
        Self::get(username)
    }

    /// Retrieve the API key seed for a username from the OS keychain
    pub fn get_api_key(username: &str) -> Result<String> {
        Self::get(&Self::api_key_account(username))
    }

    /// Delete both stored secrets for a username. Missing entries are not an error.
    pub fn delete(username: &str) -> Result<()> {
        for account in [username.to_string(), Self::api_key_account(username)] {
            let entry =
                Entry::new(SERVICE_NAME, &account).context("Failed to create keyring entry")?;
            match entry.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => return Err(e).context("Failed to delete credential from keychain"),
            }
        }
        Ok(())
    }
}
