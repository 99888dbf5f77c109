use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Element id the rendered table is mounted into
pub const DEFAULT_MOUNT_ID: &str = "bench-charts";
/// Manifest location, relative to the history root
pub const DEFAULT_SUMMARY_PATH: &str = "summary.json";
/// Directory holding one series file per benchmark
pub const DEFAULT_DATA_DIR: &str = "data";

/// Top-level manifest listing every benchmark and its series file.
///
/// A missing or `null` benchmark list reads as empty. Entries that do not
/// have the expected shape are kept without a file so they cost a single
/// row rather than the whole manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "lenient_entries")]
    pub benchmarks: Vec<BenchmarkEntry>,
}

fn lenient_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<BenchmarkEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(BenchmarkEntry::from_value)
        .collect())
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

/// One manifest entry. `file` is relative to the data directory; an entry
/// without one has no series to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl BenchmarkEntry {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: Some(file.into()),
        }
    }

    fn from_value(value: Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        serde_json::from_value(value).unwrap_or(Self { name, file: None })
    }
}

/// A single historical measurement.
///
/// `bytes_per_op` and `allocs_per_op` keep the JSON number they were read
/// from so they can be displayed exactly as stored. A record without
/// `ns_per_op` does not deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
    pub ns_per_op: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_per_op: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocs_per_op: Option<Number>,
}

impl SeriesRecord {
    pub fn new(ns_per_op: f64) -> Self {
        Self {
            timestamp: None,
            iterations: None,
            ns_per_op,
            bytes_per_op: None,
            allocs_per_op: None,
        }
    }

    pub fn with_bytes(mut self, bytes: u64) -> Self {
        self.bytes_per_op = Some(Number::from(bytes));
        self
    }

    pub fn with_allocs(mut self, allocs: u64) -> Self {
        self.allocs_per_op = Some(Number::from(allocs));
        self
    }
}

/// Ordered measurements for one benchmark, oldest first.
pub type Series = Vec<SeriesRecord>;
