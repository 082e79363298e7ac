//! Document sources: HTTP, local file, and in-memory.

use super::DocumentSource;
use crate::error::{DataError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent sent with every request.
const USER_AGENT: &str = "bankrank/0.1 (quarterly bank market-cap report)";

/// Blocking HTTP source for a fixed URL.
///
/// No retries: any transport failure or non-success status is returned
/// to the caller as-is.
#[derive(Debug)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSource {
    /// Create a source for `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a source for `url` with a custom request timeout.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(DataError::Network)?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl DocumentSource for HttpSource {
    fn location(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<String> {
        info!(url = %self.url, "fetching source document");

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(DataError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http(format!(
                "GET {} returned HTTP {}",
                self.url, status
            )));
        }

        let body = response.text().map_err(DataError::Network)?;
        debug!(bytes = body.len(), "source document received");
        Ok(body)
    }
}

/// A saved copy of the source page on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    display: String,
}

impl FileSource {
    /// Create a source reading from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        Self { path, display }
    }
}

impl DocumentSource for FileSource {
    fn location(&self) -> &str {
        &self.display
    }

    fn fetch(&self) -> Result<String> {
        info!(path = %self.display, "reading source document");
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

/// Markup held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    markup: String,
}

impl StaticSource {
    /// Wrap existing markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }
}

impl DocumentSource for StaticSource {
    fn location(&self) -> &str {
        "<memory>"
    }

    fn fetch(&self) -> Result<String> {
        Ok(self.markup.clone())
    }
}
