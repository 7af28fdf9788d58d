//! Command-line arguments and resolution into a `RunConfig`.
//!
//! Precedence for every setting: flag, then `URLCLASS_*` environment
//! variable (including `.env`), then the config file, then the built-in
//! default. Secrets fall back to the OS keychain and finally to a prompt.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};

use urlclass_core::{run, ApiSettings, Config, ConfigError, CredentialStore, Credentials, RunConfig};

/// Default report file name
const DEFAULT_OUTPUT: &str = "url_classifications.csv";

/// Classify URLs from a CSV file and write the categories to another CSV
#[derive(Parser, Debug)]
#[command(name = "urlclass")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV file with one URL per row in the first column (first row is skipped)
    #[arg(short, long, env = "URLCLASS_INPUT")]
    pub input: PathBuf,

    /// Where to write the classification report
    #[arg(short, long, env = "URLCLASS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    // === Service ===
    /// API base URL, e.g. https://api.example.net/api/v1
    #[arg(long, env = "URLCLASS_BASE_URL")]
    pub base_url: Option<String>,

    /// Login/logout endpoint relative to the base URL
    #[arg(long, env = "URLCLASS_AUTH_ENDPOINT")]
    pub auth_endpoint: Option<String>,

    /// Lookup endpoint relative to the base URL
    #[arg(long, env = "URLCLASS_LOOKUP_ENDPOINT")]
    pub lookup_endpoint: Option<String>,

    /// Name of the session cookie set on login
    #[arg(long, env = "URLCLASS_SESSION_COOKIE")]
    pub session_cookie: Option<String>,

    // === Credentials ===
    #[arg(short, long, env = "URLCLASS_USERNAME")]
    pub username: Option<String>,

    #[arg(long, env = "URLCLASS_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API key seed used to derive the login key
    #[arg(long, env = "URLCLASS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Store password and API key in the OS keychain and remember the username
    #[arg(long)]
    pub remember: bool,

    /// Remove the stored password and API key for the username from the OS keychain
    #[arg(long, conflicts_with = "remember")]
    pub forget: bool,

    // === Batching ===
    /// URLs per lookup request (1-100)
    #[arg(long, env = "URLCLASS_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Seconds to wait between lookup requests
    #[arg(long, env = "URLCLASS_CHUNK_DELAY_SECS")]
    pub chunk_delay_secs: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "URLCLASS_REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    // === Logging ===
    /// Also write logs to this file
    #[arg(long, env = "URLCLASS_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Config file settings overridden by anything given on the command line.
    pub fn api_settings(&self, config: &Config) -> ApiSettings {
        let mut settings = config.api_settings();
        if let Some(ref base_url) = self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(ref endpoint) = self.auth_endpoint {
            settings.auth_endpoint = endpoint.clone();
        }
        if let Some(ref endpoint) = self.lookup_endpoint {
            settings.lookup_endpoint = endpoint.clone();
        }
        if let Some(ref cookie) = self.session_cookie {
            settings.session_cookie = cookie.clone();
        }
        if let Some(size) = self.chunk_size {
            settings.chunk_size = size;
        }
        if let Some(secs) = self.chunk_delay_secs {
            settings.chunk_delay = Duration::from_secs(secs);
        }
        if let Some(secs) = self.request_timeout_secs {
            settings.request_timeout = Some(Duration::from_secs(secs));
        }
        settings
    }

    pub fn username(&self, config: &Config) -> Option<String> {
        self.username
            .clone()
            .or_else(|| config.last_username.clone())
            .filter(|u| !u.trim().is_empty())
    }
}

/// Use the given secret, else the stored one, else ask.
fn resolve_secret(
    given: Option<String>,
    stored: impl FnOnce() -> Result<String>,
    prompt: &str,
) -> Result<String> {
    if let Some(value) = given.filter(|v| !v.is_empty()) {
        return Ok(value);
    }
    match stored() {
        Ok(value) if !value.is_empty() => {
            debug!(prompt, "Using secret from keychain");
            return Ok(value);
        }
        Ok(_) => {}
        Err(e) => debug!(error = %e, "No secret in keychain"),
    }
    Ok(rpassword::prompt_password(prompt)?)
}

pub async fn execute(args: Args) -> Result<()> {
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };

    let api = args.api_settings(&config);
    let username = args.username(&config).ok_or(ConfigError::MissingUsername)?;
    if args.forget {
        match CredentialStore::delete(&username) {
            Ok(()) => info!(username = %username, "Removed stored credentials"),
            Err(e) => warn!(error = %e, "Failed to remove stored credentials"),
        }
    }
    let password = resolve_secret(
        args.password.clone(),
        || CredentialStore::get_password(&username),
        "Password: ",
    )?;
    let api_key = resolve_secret(
        args.api_key.clone(),
        || CredentialStore::get_api_key(&username),
        "API key: ",
    )?;

    let run_config = RunConfig {
        api,
        credentials: Credentials::new(username, password, api_key),
        input: args.input.clone(),
        output: args.output.clone(),
    };
    run_config.validate()?;

    if args.remember {
        if let Err(e) = CredentialStore::store(&run_config.credentials) {
            warn!(error = %e, "Failed to store credentials");
        }
        config.last_username = Some(run_config.credentials.username.clone());
        if let Err(e) = config.save() {
            warn!(error = %e, "Failed to save config");
        }
    }

    let summary = run(&run_config).await?;

    println!(
        "Retrieved classifications for {} of {} URLs.",
        summary.classified, summary.urls_read
    );
    if summary.missing() > 0 {
        println!("{} URLs were not classified (see log for failed chunks).", summary.missing());
    }
    println!("Results saved to {}.", summary.output.display());
    Ok(())
}
