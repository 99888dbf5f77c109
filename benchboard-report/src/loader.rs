//! Fault-tolerant JSON loading
//!
//! Every failure (transport, status, parse) collapses into
//! [`LoadOutcome::Unavailable`]; callers only ever see data or its absence.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::source::DataSource;

/// Result of loading one history file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Unavailable,
}

impl<T> LoadOutcome<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            LoadOutcome::Loaded(value) => Some(value),
            LoadOutcome::Unavailable => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}

/// Fetch `path` from `source` and decode it as JSON
pub async fn load_json<T: DeserializeOwned>(source: &dyn DataSource, path: &str) -> LoadOutcome<T> {
    let bytes = match source.fetch(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("{} unavailable from {}: {}", path, source.describe(), e);
            return LoadOutcome::Unavailable;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => LoadOutcome::Loaded(value),
        Err(e) => {
            debug!("{} from {} is not valid: {}", path, source.describe(), e);
            LoadOutcome::Unavailable
        }
    }
}
