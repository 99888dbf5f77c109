//! Benchmark trend table renderer
//!
//! Loads the summary manifest, then each benchmark's series one at a time in
//! manifest order, and writes a table row per non-empty series into the
//! document's mount. Missing or malformed data never surfaces as an error:
//! it ends in one of three plain-text messages.

use benchboard_common::{ReportConfig, Series, Summary};
use std::fmt;
use tracing::{debug, info, warn};

use crate::loader::{load_json, LoadOutcome};
use crate::source::DataSource;
use crate::table::Row;
use crate::target::Document;

pub const NO_SUMMARY_MESSAGE: &str = "No benchmark summary available.";
pub const EMPTY_SUMMARY_MESSAGE: &str = "Benchmark summary empty.";
pub const NO_SERIES_MESSAGE: &str = "No benchmark series data.";

/// Table and sparkline styling. Colours come from the documentation theme's
/// custom properties so light and dark palettes both apply.
pub const STYLE: &str = ".spark{background:var(--md-code-bg-color);border:1px solid var(--md-default-fg-color--light);border-radius:2px;margin:0 2px}\
.spark.better polyline{stroke:var(--md-typeset-color-success,#00aa55)}\
.spark.worse polyline{stroke:var(--md-typeset-color-error,#cc3344)}\
.spark.same polyline{stroke:var(--md-default-fg-color--light,currentColor)} \
table{width:100%;border-collapse:collapse;margin-top:.75rem;font-size:.8rem}\
th,td{padding:4px 6px;border-bottom:1px solid var(--md-default-fg-color--light);}";

/// How a render ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The document has no mount element; nothing was written
    NoMount,
    NoSummary,
    EmptySummary,
    /// Every series was missing or empty
    NoSeries { skipped: usize },
    Rendered { rows: usize, skipped: usize },
}

impl RenderOutcome {
    /// Text written into the mount for fallback outcomes
    pub fn message(&self) -> Option<&'static str> {
        match self {
            RenderOutcome::NoSummary => Some(NO_SUMMARY_MESSAGE),
            RenderOutcome::EmptySummary => Some(EMPTY_SUMMARY_MESSAGE),
            RenderOutcome::NoSeries { .. } => Some(NO_SERIES_MESSAGE),
            RenderOutcome::NoMount | RenderOutcome::Rendered { .. } => None,
        }
    }
}

impl fmt::Display for RenderOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderOutcome::NoMount => write!(f, "no mount element"),
            RenderOutcome::NoSummary => write!(f, "summary unavailable"),
            RenderOutcome::EmptySummary => write!(f, "summary empty"),
            RenderOutcome::NoSeries { skipped } => {
                write!(f, "no series data ({} benchmarks skipped)", skipped)
            }
            RenderOutcome::Rendered { rows, skipped } => {
                write!(f, "{} rows rendered, {} skipped", rows, skipped)
            }
        }
    }
}

/// Renders benchmark history into a document
pub struct ChartRenderer {
    config: ReportConfig,
}

impl ChartRenderer {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Populate the document's mount from `source`. Never fails; the outcome
    /// only reports what was written.
    pub async fn render(&self, source: &dyn DataSource, document: &mut dyn Document) -> RenderOutcome {
        let Some(mount) = document.mount(&self.config.mount_id) else {
            debug!("No element with id {}; nothing to render", self.config.mount_id);
            return RenderOutcome::NoMount;
        };

        let summary: Summary = match load_json(source, &self.config.summary_path).await {
            LoadOutcome::Loaded(summary) => summary,
            LoadOutcome::Unavailable => {
                warn!("Benchmark summary unavailable from {}", source.describe());
                mount.set_text(NO_SUMMARY_MESSAGE);
                return RenderOutcome::NoSummary;
            }
        };
        if summary.is_empty() {
            warn!("Benchmark summary from {} lists no benchmarks", source.describe());
            mount.set_text(EMPTY_SUMMARY_MESSAGE);
            return RenderOutcome::EmptySummary;
        }
        mount.clear();

        let mut skipped = 0;
        for entry in &summary.benchmarks {
            let Some(file) = entry.file.as_deref() else {
                debug!("Skipping {:?}: summary entry names no series file", entry.name);
                skipped += 1;
                continue;
            };
            let path = self.config.series_path(file);
            let series: Series = load_json(source, &path).await.into_option().unwrap_or_default();

            match Row::from_series(entry, &series, &self.config.sparkline) {
                Some(row) => mount.append_row(&row),
                None => {
                    debug!("Skipping {}: no series at {}", entry.name, path);
                    skipped += 1;
                }
            }
        }

        let rows = mount.row_count();
        if rows == 0 {
            warn!("None of {} benchmarks had series data", summary.benchmarks.len());
            mount.set_text(NO_SERIES_MESSAGE);
            return RenderOutcome::NoSeries { skipped };
        }

        mount.inject_style(STYLE);
        info!("Rendered {} benchmark rows ({} skipped)", rows, skipped);
        RenderOutcome::Rendered { rows, skipped }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_messages() {
        assert_eq!(RenderOutcome::NoSummary.message(), Some("No benchmark summary available."));
        assert_eq!(RenderOutcome::EmptySummary.message(), Some("Benchmark summary empty."));
        assert_eq!(RenderOutcome::NoSeries { skipped: 1 }.message(), Some("No benchmark series data."));
        assert_eq!(RenderOutcome::NoMount.message(), None);
        assert_eq!(RenderOutcome::Rendered { rows: 1, skipped: 0 }.message(), None);
    }

    #[test]
    fn test_style_covers_trend_classes() {
        assert!(STYLE.contains(".spark.better polyline"));
        assert!(STYLE.contains(".spark.worse polyline"));
        assert!(STYLE.contains("var(--md-default-fg-color--light)"));
    }
}
