//! Benchmark history reporting
//!
//! This crate turns benchmark history (a `summary.json` manifest plus one
//! JSON series per benchmark) into an HTML trend table:
//! - Data sources over HTTP or a local directory
//! - Fault-tolerant loading, where any failure means "no data"
//! - Inline SVG sparklines classified as better/worse/same
//! - Rendering into abstract mount points, HTML fragments or existing pages
//! - Ingesting `go test -bench` output into the history directory
//! - Generating the documentation page that hosts the table

pub mod source;
pub mod loader;
pub mod sparkline;
pub mod table;
pub mod target;
pub mod renderer;
pub mod ingest;
pub mod page;

pub use loader::{load_json, LoadOutcome};
pub use renderer::{ChartRenderer, RenderOutcome};
pub use source::{from_location, DataSource, DirSource, HttpSource};
pub use sparkline::{render_sparkline, Sparkline, Trend};
pub use table::Row;
pub use target::{Document, FragmentDocument, HtmlMount, HtmlPage, RenderTarget};
