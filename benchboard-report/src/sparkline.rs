//! Inline SVG sparklines
//!
//! A sparkline maps a numeric sequence onto a small polyline without axes or
//! labels. Higher values are drawn higher, so y is inverted. A constant
//! sequence uses a span of 1 and draws a flat line.

use benchboard_common::SparklineGeometry;
use std::fmt;

/// Direction of the series, comparing the last value to the first.
/// Lower ns/op is faster, so a decreasing series is `Better`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Better,
    Worse,
    Same,
}

impl Trend {
    pub fn classify(first: f64, last: f64) -> Self {
        let diff = last - first;
        if diff < 0.0 {
            Trend::Better
        } else if diff > 0.0 {
            Trend::Worse
        } else {
            Trend::Same
        }
    }

    /// CSS class selecting the stroke colour
    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Better => "better",
            Trend::Worse => "worse",
            Trend::Same => "same",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css_class())
    }
}

/// One plotted coordinate, already rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    points: Vec<Point>,
    trend: Trend,
    geometry: SparklineGeometry,
}

impl Sparkline {
    /// Build a sparkline, or `None` for an empty sequence
    pub fn from_values(values: &[f64], geometry: &SparklineGeometry) -> Option<Self> {
        let (first, last) = match (values.first(), values.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return None,
        };

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = if max - min == 0.0 { 1.0 } else { max - min };

        let pad = geometry.padding;
        let inner_width = geometry.width - 2.0 * pad;
        let inner_height = geometry.height - 2.0 * pad;
        let steps = values.len().saturating_sub(1);

        let points = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let fraction = if steps == 0 { 0.0 } else { i as f64 / steps as f64 };
                let x = pad + fraction * inner_width;
                let y = pad + (1.0 - (v - min) / span) * inner_height;
                Point {
                    x: round_tenth(x),
                    y: round_tenth(y),
                }
            })
            .collect();

        Some(Self {
            points,
            trend: Trend::classify(first, last),
            geometry: *geometry,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// The `points` attribute of the polyline
    pub fn points_attr(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{:.1},{:.1}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_svg(&self) -> String {
        let SparklineGeometry { width, height, .. } = self.geometry;
        format!(
            r#"<svg viewBox="0 0 {w} {h}" width="{w}" height="{h}" class="spark {cls}"><polyline fill="none" stroke="currentColor" stroke-width="1.2" points="{pts}"/></svg>"#,
            w = width,
            h = height,
            cls = self.trend.css_class(),
            pts = self.points_attr(),
        )
    }
}

/// Render `values` as SVG markup; an empty sequence renders as nothing
pub fn render_sparkline(values: &[f64], geometry: &SparklineGeometry) -> String {
    Sparkline::from_values(values, geometry)
        .map(|spark| spark.to_svg())
        .unwrap_or_default()
}

/// Round to one decimal from the exact binary value, the way
/// `Number.prototype.toFixed(1)` does: 6.85 is stored just below 6.85 and
/// becomes 6.8, while an exact tie such as 20.25 rounds away from zero.
fn round_tenth(value: f64) -> f64 {
    let twentieths = value * 20.0;
    let exact_tie = twentieths.fract() == 0.0
        && twentieths % 2.0 != 0.0
        && value.mul_add(20.0, -twentieths) == 0.0;
    if exact_tie {
        return (twentieths + twentieths.signum()) / 20.0;
    }
    // `{:.1}` formats the exact decimal expansion, so only true ties differ.
    format!("{:.1}", value).parse().unwrap_or(value)
}
