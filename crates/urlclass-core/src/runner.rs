//! One complete lookup run: read input, classify inside a session, write
//! the report.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::api::ApiClient;
use crate::auth::with_session;
use crate::config::RunConfig;
use crate::records::{read_urls, write_results};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub urls_read: usize,
    pub classified: usize,
    pub output: PathBuf,
}

impl RunSummary {
    /// URLs that were read but have no result (failed chunks).
    pub fn missing(&self) -> usize {
        self.urls_read.saturating_sub(self.classified)
    }
}

pub async fn run(config: &RunConfig) -> Result<RunSummary> {
    config.validate()?;

    let urls = read_urls(&config.input)?;
    info!(count = urls.len(), input = %config.input.display(), "Read URLs");

    let api = ApiClient::new(config.api.clone())?;

    let classified = with_session(&api, &config.credentials, |token| {
        let api = &api;
        let urls = &urls;
        async move {
            let results = api.lookup(&token, urls).await?;
            info!(count = results.len(), "Retrieved classifications");

            write_results(&config.output, &results)?;
            info!(output = %config.output.display(), "Results saved");
            Ok(results.len())
        }
    })
    .await?;

    Ok(RunSummary {
        urls_read: urls.len(),
        classified,
        output: config.output.clone(),
    })
}
