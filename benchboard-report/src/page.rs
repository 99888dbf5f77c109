//! Benchmark documentation page generation
//!
//! Turns a history directory into `bench.md` for the documentation site.
//! With usable history the page carries the mount element pre-rendered by
//! [`ChartRenderer`]; otherwise it is a one-line placeholder.

use benchboard_common::{ReportConfig, Result, Summary};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::renderer::{ChartRenderer, RenderOutcome};
use crate::source::DirSource;
use crate::target::HtmlPage;

pub const PAGE_FILE: &str = "bench.md";

/// Which page was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    NoHistory,
    Unreadable,
    Empty,
    Rich,
}

impl PageKind {
    fn placeholder(&self) -> Option<&'static str> {
        match self {
            PageKind::NoHistory => Some("_No benchmark history yet._"),
            PageKind::Unreadable => Some("_Benchmark summary unreadable._"),
            PageKind::Empty => Some("_Benchmark summary empty._"),
            PageKind::Rich => None,
        }
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKind::NoHistory => write!(f, "placeholder (no history)"),
            PageKind::Unreadable => write!(f, "placeholder (summary unreadable)"),
            PageKind::Empty => write!(f, "placeholder (summary empty)"),
            PageKind::Rich => write!(f, "benchmark table"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageReport {
    pub kind: PageKind,
    pub path: PathBuf,
    pub render: Option<RenderOutcome>,
}

pub struct PageWriter {
    renderer: ChartRenderer,
}

impl PageWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            renderer: ChartRenderer::new(config),
        }
    }

    fn config(&self) -> &ReportConfig {
        self.renderer.config()
    }

    /// Write `bench.md` into `site`, copying the history files it needs
    pub async fn write(&self, history: &Path, site: &Path) -> Result<PageReport> {
        fs::create_dir_all(site).await?;
        let path = site.join(PAGE_FILE);

        let kind = self.classify(history).await;
        if let Some(message) = kind.placeholder() {
            info!("Writing {} placeholder: {}", path.display(), message);
            fs::write(&path, format!("# {}\n\n{}\n", self.config().page_title, message)).await?;
            return Ok(PageReport {
                kind,
                path,
                render: None,
            });
        }

        self.copy_history(history, site).await?;

        let mut page = HtmlPage::new(self.page_skeleton(), self.config().thousands_separator.clone());
        let source = DirSource::new(site);
        let outcome = self.renderer.render(&source, &mut page).await;
        fs::write(&path, page.into_html()).await?;
        info!("Wrote {} ({})", path.display(), outcome);

        Ok(PageReport {
            kind,
            path,
            render: Some(outcome),
        })
    }

    async fn classify(&self, history: &Path) -> PageKind {
        let summary_file = history.join(&self.config().summary_path);
        let Ok(content) = fs::read_to_string(&summary_file).await else {
            return PageKind::NoHistory;
        };
        match serde_json::from_str::<Summary>(&content) {
            Ok(summary) if summary.is_empty() => PageKind::Empty,
            Ok(_) => PageKind::Rich,
            Err(e) => {
                debug!("Unreadable summary {}: {}", summary_file.display(), e);
                PageKind::Unreadable
            }
        }
    }

    async fn copy_history(&self, history: &Path, site: &Path) -> Result<()> {
        let config = self.config();
        let summary_dest = site.join(&config.summary_path);
        if let Some(parent) = summary_dest.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::copy(history.join(&config.summary_path), &summary_dest).await?;

        let data_src = history.join(&config.data_dir);
        let data_dest = site.join(&config.data_dir);
        fs::create_dir_all(&data_dest).await?;
        if fs::metadata(&data_src).await.map_or(false, |meta| meta.is_dir()) {
            let mut entries = fs::read_dir(&data_src).await?;
            while let Some(entry) = entries.next_entry().await? {
                let file = entry.path();
                if file.extension().map_or(false, |ext| ext == "json") {
                    fs::copy(&file, data_dest.join(entry.file_name())).await?;
                }
            }
        }
        Ok(())
    }

    fn page_skeleton(&self) -> String {
        let config = self.config();
        format!(
            "# {title}\n\nBenchmark performance over time.\n\nRaw summary: [{summary}]({summary})\n\n<div id=\"{mount}\">Loading benchmark history...</div>\n",
            title = config.page_title,
            summary = config.summary_path,
            mount = config.mount_id,
        )
    }
}
