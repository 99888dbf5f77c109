//! Data sources serving benchmark history files
//!
//! A source resolves paths such as `summary.json` or `data/a.json` against
//! its root and returns the raw bytes. Any non-success outcome is an error;
//! deciding what an error means is left to the loader.

use async_trait::async_trait;
use benchboard_common::{BoardError, Result};
use reqwest::{Client, Url};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Anything able to fetch a history file by relative path
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human readable root, used in log messages
    fn describe(&self) -> String;

    /// Fetch the raw contents of `path`
    async fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

/// Pick a source for a location string: `http(s)://` URLs are fetched over
/// HTTP, anything else is treated as a directory.
pub fn from_location(location: &str) -> Result<Box<dyn DataSource>> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(DirSource::new(location)))
    }
}

/// Fetches files relative to a base URL
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: &str) -> Result<Self> {
        Self::with_client(Client::new(), base)
    }

    pub fn with_client(client: Client, base: &str) -> Result<Self> {
        // Without a trailing slash the last segment would be replaced on join.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{}/", base)
        };
        let base = Url::parse(&normalized)
            .map_err(|e| BoardError::InvalidLocation(format!("{}: {}", base, e)))?;
        Ok(Self { client, base })
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| BoardError::InvalidLocation(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.resolve(path)?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| BoardError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BoardError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BoardError::Http(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Reads files below a root directory
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(BoardError::InvalidLocation(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl DataSource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        debug!("Reading {}", full.display());
        Ok(tokio::fs::read(&full).await?)
    }
}
