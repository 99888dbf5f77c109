//! Integration tests for the chart renderer against directory and HTTP sources

use benchboard_common::ReportConfig;
use benchboard_report::{
    ChartRenderer, DirSource, Document, FragmentDocument, HtmlPage, HttpSource, RenderOutcome,
    RenderTarget, Row, Trend,
};
use std::fs;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Every call the renderer makes on the mount
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Clear,
    Text(String),
    Row(String, f64, Option<Trend>),
    Style,
}

#[derive(Default)]
struct RecordingTarget {
    calls: Vec<Call>,
    rows: usize,
}

impl RenderTarget for RecordingTarget {
    fn clear(&mut self) {
        self.rows = 0;
        self.calls.push(Call::Clear);
    }

    fn set_text(&mut self, text: &str) {
        self.rows = 0;
        self.calls.push(Call::Text(text.to_string()));
    }

    fn append_row(&mut self, row: &Row) {
        self.rows += 1;
        self.calls.push(Call::Row(
            row.name.clone(),
            row.ns_per_op,
            row.sparkline.as_ref().map(|s| s.trend()),
        ));
    }

    fn row_count(&self) -> usize {
        self.rows
    }

    fn inject_style(&mut self, _css: &str) {
        self.calls.push(Call::Style);
    }
}

struct RecordingDocument {
    mount_id: &'static str,
    target: RecordingTarget,
}

impl RecordingDocument {
    fn with_mount() -> Self {
        Self {
            mount_id: "bench-charts",
            target: RecordingTarget::default(),
        }
    }

    fn without_mount() -> Self {
        Self {
            mount_id: "somewhere-else",
            target: RecordingTarget::default(),
        }
    }

    /// Text the mount would show last, if it ended as text
    fn final_text(&self) -> Option<&str> {
        match self.target.calls.last() {
            Some(Call::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }
}

impl Document for RecordingDocument {
    fn mount(&mut self, id: &str) -> Option<&mut dyn RenderTarget> {
        if id == self.mount_id {
            Some(&mut self.target)
        } else {
            None
        }
    }
}

fn write_history(root: &Path, summary: &str, series: &[(&str, &str)]) {
    fs::create_dir_all(root.join("data")).unwrap();
    fs::write(root.join("summary.json"), summary).unwrap();
    for (file, body) in series {
        fs::write(root.join("data").join(file), body).unwrap();
    }
}

fn renderer() -> ChartRenderer {
    ChartRenderer::new(ReportConfig::default())
}

#[tokio::test]
async fn test_single_benchmark_renders_better_row() {
    let dir = tempfile::tempdir().unwrap();
    write_history(
        dir.path(),
        r#"{"benchmarks":[{"name":"A","file":"a.json"}]}"#,
        &[("a.json", r#"[{"ns_per_op":100},{"ns_per_op":80}]"#)],
    );

    let mut doc = RecordingDocument::with_mount();
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::Rendered { rows: 1, skipped: 0 });
    assert_eq!(
        doc.target.calls,
        vec![
            Call::Clear,
            Call::Row("A".to_string(), 80.0, Some(Trend::Better)),
            Call::Style,
        ]
    );
}

#[tokio::test]
async fn test_missing_mount_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), r#"{"benchmarks":[]}"#, &[]);

    let mut doc = RecordingDocument::without_mount();
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::NoMount);
    assert!(doc.target.calls.is_empty());
}

#[tokio::test]
async fn test_missing_summary() {
    let dir = tempfile::tempdir().unwrap();

    let mut doc = RecordingDocument::with_mount();
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::NoSummary);
    assert_eq!(doc.final_text(), Some("No benchmark summary available."));
}

#[tokio::test]
async fn test_unparseable_summary_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), "<html>not json</html>", &[]);

    let mut doc = RecordingDocument::with_mount();
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;
    assert_eq!(outcome, RenderOutcome::NoSummary);
}

#[tokio::test]
async fn test_empty_summary_message_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), r#"{"benchmarks":[]}"#, &[]);

    let mut doc = FragmentDocument::new(",");
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::EmptySummary);
    assert_eq!(doc.into_html(), "Benchmark summary empty.");
}

#[tokio::test]
async fn test_null_benchmark_list_is_empty_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_history(dir.path(), r#"{"benchmarks":null}"#, &[]);

    let mut doc = FragmentDocument::new(",");
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::EmptySummary);
    assert_eq!(doc.into_html(), "Benchmark summary empty.");
}

#[tokio::test]
async fn test_entry_without_file_skips_one_row() {
    let dir = tempfile::tempdir().unwrap();
    write_history(
        dir.path(),
        r#"{"benchmarks":[{"name":"Orphan"},{"name":"A","file":"a.json"}]}"#,
        &[("a.json", r#"[{"ns_per_op":3}]"#)],
    );

    let mut doc = RecordingDocument::with_mount();
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::Rendered { rows: 1, skipped: 1 });
    assert_eq!(
        doc.target.calls,
        vec![
            Call::Clear,
            Call::Row("A".to_string(), 3.0, Some(Trend::Same)),
            Call::Style,
        ]
    );
}

#[tokio::test]
async fn test_rows_follow_summary_order_and_skip_empty_series() {
    let dir = tempfile::tempdir().unwrap();
    write_history(
        dir.path(),
        r#"{"benchmarks":[
            {"name":"Zeta","file":"z.json"},
            {"name":"Empty","file":"e.json"},
            {"name":"Missing","file":"m.json"},
            {"name":"NoNs","file":"n.json"},
            {"name":"Alpha","file":"a.json"}
        ]}"#,
        &[
            ("z.json", r#"[{"ns_per_op":1},{"ns_per_op":2}]"#),
            ("e.json", "[]"),
            ("n.json", r#"[{"bytes_per_op":4}]"#),
            ("a.json", r#"[{"ns_per_op":4},{"ns_per_op":4}]"#),
        ],
    );

    let mut doc = RecordingDocument::with_mount();
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::Rendered { rows: 2, skipped: 3 });
    assert_eq!(
        doc.target.calls,
        vec![
            Call::Clear,
            Call::Row("Zeta".to_string(), 2.0, Some(Trend::Worse)),
            Call::Row("Alpha".to_string(), 4.0, Some(Trend::Same)),
            Call::Style,
        ]
    );
}

#[tokio::test]
async fn test_all_series_empty_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    write_history(
        dir.path(),
        r#"{"benchmarks":[{"name":"A","file":"a.json"},{"name":"B","file":"b.json"}]}"#,
        &[("a.json", "[]")],
    );

    let mut doc = FragmentDocument::new(",");
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut doc).await;

    assert_eq!(outcome, RenderOutcome::NoSeries { skipped: 2 });
    assert_eq!(doc.into_html(), "No benchmark series data.");
}

#[tokio::test]
async fn test_http_source_series_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bench/summary.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"benchmarks":[{"name":"A","file":"a.json"}]}"#),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/bench/data/a.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpSource::new(&format!("{}/bench", server.uri())).unwrap();
    let mut doc = FragmentDocument::new(",");
    let outcome = renderer().render(&source, &mut doc).await;

    assert_eq!(outcome, RenderOutcome::NoSeries { skipped: 1 });
    assert_eq!(doc.into_html(), "No benchmark series data.");
}

#[tokio::test]
async fn test_http_source_summary_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/summary.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri()).unwrap();
    let mut doc = RecordingDocument::with_mount();
    let outcome = renderer().render(&source, &mut doc).await;

    assert_eq!(outcome, RenderOutcome::NoSummary);
    assert_eq!(doc.final_text(), Some("No benchmark summary available."));
}

#[tokio::test]
async fn test_http_source_renders_table() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/summary.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"benchmarks":[{"name":"BenchmarkEncode-8","file":"BenchmarkEncode-8.json"}]}"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/BenchmarkEncode-8.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"ns_per_op":1500000,"bytes_per_op":2048,"allocs_per_op":12},{"ns_per_op":1250000,"bytes_per_op":1024,"allocs_per_op":9}]"#,
        ))
        .mount(&server)
        .await;

    let source = HttpSource::new(&server.uri()).unwrap();
    let mut doc = FragmentDocument::new(",");
    let outcome = renderer().render(&source, &mut doc).await;
    assert_eq!(outcome, RenderOutcome::Rendered { rows: 1, skipped: 0 });

    let html = doc.into_html();
    assert!(html.starts_with("<style>.spark{"));
    assert!(html.contains(
        "<tr><td><code>BenchmarkEncode-8</code></td><td>1,250,000</td><td>1024</td><td>9</td><td><svg viewBox=\"0 0 160 40\" width=\"160\" height=\"40\" class=\"spark better\">"
    ));
    assert!(html.contains(r#"points="3.0,3.0 157.0,37.0""#));
}

#[tokio::test]
async fn test_page_mount_is_replaced_in_place() {
    let dir = tempfile::tempdir().unwrap();
    write_history(
        dir.path(),
        r#"{"benchmarks":[{"name":"A","file":"a.json"}]}"#,
        &[("a.json", r#"[{"ns_per_op":3}]"#)],
    );

    let html = "<html><body><h1>Perf</h1><div id=\"bench-charts\">Loading...</div><footer>f</footer></body></html>";
    let mut page = HtmlPage::new(html, ",");
    let outcome = renderer().render(&DirSource::new(dir.path()), &mut page).await;
    assert_eq!(outcome, RenderOutcome::Rendered { rows: 1, skipped: 0 });

    let rendered = page.into_html();
    assert!(rendered.starts_with("<html><body><h1>Perf</h1><div id=\"bench-charts\"><style>"));
    assert!(rendered.ends_with("</table></div><footer>f</footer></body></html>"));
    assert!(!rendered.contains("Loading..."));
}
