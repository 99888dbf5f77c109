//! Benchboard - benchmark history tables with inline trend sparklines
//!
//! This is the facade crate tying the workspace together: the shared data
//! model and configuration, plus loading, rendering, ingest and page
//! generation.

pub use benchboard_common as common;
pub use benchboard_report as report;

/// Re-export the types most callers need
pub mod prelude {
    pub use crate::common::{BenchmarkEntry, ReportConfig, SeriesRecord, Summary};
    pub use crate::report::{
        from_location, ChartRenderer, DataSource, Document, FragmentDocument, HtmlPage, RenderOutcome,
        RenderTarget,
    };
}
