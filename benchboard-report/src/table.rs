//! Table rows and cell formatting

use benchboard_common::{BenchmarkEntry, SeriesRecord, SparklineGeometry};
use serde_json::Number;

use crate::sparkline::Sparkline;

/// Column headings, in display order
pub const COLUMNS: [&str; 5] = ["Name", "ns/op", "bytes/op", "allocs/op", "trend"];

/// One rendered benchmark: latest measurements plus the ns/op trend
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub name: String,
    pub ns_per_op: f64,
    pub bytes_per_op: Option<Number>,
    pub allocs_per_op: Option<Number>,
    pub sparkline: Option<Sparkline>,
}

impl Row {
    /// Build a row from a benchmark's series; `None` when the series is empty
    pub fn from_series(
        entry: &BenchmarkEntry,
        series: &[SeriesRecord],
        geometry: &SparklineGeometry,
    ) -> Option<Self> {
        let latest = series.last()?;
        let trend: Vec<f64> = series.iter().map(|r| r.ns_per_op).collect();

        Some(Self {
            name: entry.name.clone(),
            ns_per_op: latest.ns_per_op,
            bytes_per_op: latest.bytes_per_op.clone(),
            allocs_per_op: latest.allocs_per_op.clone(),
            sparkline: Sparkline::from_values(&trend, geometry),
        })
    }

    pub fn to_html(&self, thousands_separator: &str) -> String {
        format!(
            "<tr><td><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&self.name),
            format_thousands(self.ns_per_op, thousands_separator),
            optional_number(&self.bytes_per_op),
            optional_number(&self.allocs_per_op),
            self.sparkline.as_ref().map(|s| s.to_svg()).unwrap_or_default(),
        )
    }
}

fn optional_number(value: &Option<Number>) -> String {
    value.as_ref().map(|n| n.to_string()).unwrap_or_default()
}

/// Format a number the way an en-US `toLocaleString()` does: digits grouped
/// in threes, at most three fraction digits, trailing zeros dropped.
///
/// When the grouping separator is `.` the decimal mark becomes `,`.
pub fn format_thousands(value: f64, separator: &str) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let fixed = format!("{:.3}", rounded);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 * separator.len());
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push_str(if separator == "." { "," } else { "." });
        out.push_str(frac_part);
    }
    out
}

/// Escape text for use inside HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
