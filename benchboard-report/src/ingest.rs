//! Benchmark history ingestion
//!
//! Parses `go test -run=^$ -bench=. -benchmem` output and appends each
//! measurement to the per-benchmark series files of a history directory,
//! then rewrites `summary.json` for the benchmarks seen in this run.

use benchboard_common::{BenchmarkEntry, BoardError, ReportConfig, Result, Summary};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One parsed measurement as appended to a series file. Counts stay
/// integers so they are stored exactly as `go test` printed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchRecord {
    pub timestamp: DateTime<Utc>,
    pub iterations: u64,
    pub ns_per_op: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_per_op: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allocs_per_op: Option<u64>,
}

/// Parse one result line:
/// `BenchmarkName-8   1000   1234 ns/op   64 B/op   2 allocs/op`
///
/// Only integer measurements are accepted; other lines yield `None`.
pub fn parse_bench_line(line: &str, timestamp: DateTime<Utc>) -> Option<(String, BenchRecord)> {
    let mut fields = line.split_whitespace();
    let name = fields
        .next()
        .filter(|n| n.len() > "Benchmark".len() && n.starts_with("Benchmark"))?;
    let iterations: u64 = fields.next()?.parse().ok()?;
    let ns_per_op: u64 = fields.next()?.parse().ok()?;
    if fields.next()? != "ns/op" {
        return None;
    }

    let mut record = BenchRecord {
        timestamp,
        iterations,
        ns_per_op,
        bytes_per_op: None,
        allocs_per_op: None,
    };

    // Optional "<n> B/op" then "<n> allocs/op", in that order.
    let rest: Vec<&str> = fields.collect();
    let mut idx = 0;
    if let Some(bytes) = unit_value(&rest, idx, "B/op") {
        record.bytes_per_op = Some(bytes);
        idx += 2;
    }
    if let Some(allocs) = unit_value(&rest, idx, "allocs/op") {
        record.allocs_per_op = Some(allocs);
    }

    Some((name.to_string(), record))
}

fn unit_value(fields: &[&str], idx: usize, unit: &str) -> Option<u64> {
    match (fields.get(idx), fields.get(idx + 1)) {
        (Some(value), Some(found)) if *found == unit => value.parse().ok(),
        _ => None,
    }
}

/// Parse a whole benchmark log, keeping line order
pub fn parse_bench_output(text: &str, timestamp: DateTime<Utc>) -> Vec<(String, BenchRecord)> {
    text.lines()
        .filter_map(|line| parse_bench_line(line.trim(), timestamp))
        .collect()
}

/// File stem for a benchmark: each run of characters outside
/// `[A-Za-z0-9_.-]` becomes a single `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_run = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
            stem.push(ch);
            in_run = false;
        } else if !in_run {
            stem.push('_');
            in_run = true;
        }
    }
    stem
}

/// What an ingest run changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub benchmarks: usize,
    pub records: usize,
    pub files: Vec<String>,
}

/// A history directory: `<root>/summary.json` plus `<root>/<data_dir>/*.json`
pub struct HistoryStore {
    root: PathBuf,
    summary_path: String,
    data_dir: String,
}

impl HistoryStore {
    pub fn new(root: impl Into<PathBuf>, config: &ReportConfig) -> Self {
        Self {
            root: root.into(),
            summary_path: config.summary_path.clone(),
            data_dir: config.data_dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn summary_file(&self) -> PathBuf {
        self.root.join(&self.summary_path)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(&self.data_dir)
    }

    /// Append `records` to their series and rewrite the summary.
    /// An empty batch leaves the directory untouched.
    ///
    /// Records already in a series file are carried over verbatim, whatever
    /// their shape. A file that is not JSON at all starts a fresh series.
    pub fn update(&self, records: Vec<(String, BenchRecord)>) -> Result<IngestReport> {
        if records.is_empty() {
            info!("No benchmarks parsed; nothing to do");
            return Ok(IngestReport::default());
        }

        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, Vec<BenchRecord>> = HashMap::new();
        for (name, record) in records {
            if !grouped.contains_key(&name) {
                order.push(name.clone());
            }
            grouped.entry(name).or_default().push(record);
        }

        let data_dir = self.data_dir();
        std::fs::create_dir_all(&data_dir)?;

        // Read every series before writing any, so a refused file leaves
        // the whole directory as it was.
        let mut pending = Vec::with_capacity(order.len());
        for name in order {
            let new_records = grouped.remove(&name).unwrap_or_default();
            let file = format!("{}.json", sanitize_file_stem(&name));
            let path = data_dir.join(&file);
            let series = read_existing_series(&path)?;
            pending.push((name, file, path, series, new_records));
        }

        let mut report = IngestReport::default();
        let mut summary = Summary::default();
        for (name, file, path, mut series, new_records) in pending {
            report.records += new_records.len();
            for record in new_records {
                series.push(serde_json::to_value(record)?);
            }
            write_pretty(&path, &series)?;
            debug!("Wrote {} records to {}", series.len(), path.display());

            report.files.push(file.clone());
            summary.benchmarks.push(BenchmarkEntry::new(name, file));
        }

        summary.benchmarks.sort_by_key(|entry| entry.name.to_lowercase());
        report.benchmarks = summary.benchmarks.len();

        let summary_file = self.summary_file();
        if let Some(parent) = summary_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        write_pretty(&summary_file, &summary)?;
        info!(
            "Updated {} benchmarks ({} new records) in {}",
            report.benchmarks,
            report.records,
            self.root.display()
        );
        Ok(report)
    }
}

/// Existing series entries as raw JSON. Unparseable content is replaced;
/// valid JSON that is not an array is refused so it is never overwritten.
fn read_existing_series(path: &Path) -> Result<Vec<Value>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Array(series)) => Ok(series),
        Ok(other) => Err(BoardError::Config(format!(
            "{} holds a JSON {} instead of a series array",
            path.display(),
            json_kind(&other)
        ))),
        Err(e) => {
            warn!("Discarding unreadable history {}: {}", path.display(), e);
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}
