//! Render targets
//!
//! The renderer never touches markup directly. It locates a mount through a
//! [`Document`] and drives it through [`RenderTarget`], which lets tests swap
//! in a recording double and lets the CLI splice output into existing pages.

use crate::table::{escape_html, Row, COLUMNS};

/// The element output is written into
pub trait RenderTarget {
    /// Drop any previous content
    fn clear(&mut self);

    /// Replace all content, including a partially built table, with text
    fn set_text(&mut self, text: &str);

    /// Append a row to the table
    fn append_row(&mut self, row: &Row);

    /// Rows appended since the last `clear`/`set_text`
    fn row_count(&self) -> usize;

    /// Attach a style block ahead of the table
    fn inject_style(&mut self, css: &str);
}

/// Something holding mount points addressed by element id
pub trait Document {
    fn mount(&mut self, id: &str) -> Option<&mut dyn RenderTarget>;
}

/// Mount that serializes to HTML
#[derive(Debug, Clone, Default)]
pub struct HtmlMount {
    thousands_separator: String,
    touched: bool,
    text: String,
    style: Option<String>,
    rows: Vec<String>,
}

impl HtmlMount {
    pub fn new(thousands_separator: impl Into<String>) -> Self {
        Self {
            thousands_separator: thousands_separator.into(),
            ..Default::default()
        }
    }

    /// Whether anything was written to the mount
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn to_html(&self) -> String {
        if self.rows.is_empty() {
            return escape_html(&self.text);
        }

        let mut html = String::new();
        if let Some(css) = &self.style {
            html.push_str("<style>");
            html.push_str(css);
            html.push_str("</style>");
        }
        html.push_str("<table><thead><tr>");
        for column in COLUMNS {
            html.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        html.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            html.push_str(row);
        }
        html.push_str("</tbody></table>");
        html
    }
}

impl RenderTarget for HtmlMount {
    fn clear(&mut self) {
        self.touched = true;
        self.text.clear();
        self.style = None;
        self.rows.clear();
    }

    fn set_text(&mut self, text: &str) {
        self.clear();
        self.text = text.to_string();
    }

    fn append_row(&mut self, row: &Row) {
        self.touched = true;
        self.rows.push(row.to_html(&self.thousands_separator));
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn inject_style(&mut self, css: &str) {
        self.touched = true;
        self.style = Some(css.to_string());
    }
}

/// Document with a single mount that answers to any id
#[derive(Debug, Clone, Default)]
pub struct FragmentDocument {
    mount: HtmlMount,
}

impl FragmentDocument {
    pub fn new(thousands_separator: impl Into<String>) -> Self {
        Self {
            mount: HtmlMount::new(thousands_separator),
        }
    }

    pub fn into_html(self) -> String {
        self.mount.to_html()
    }
}

impl Document for FragmentDocument {
    fn mount(&mut self, _id: &str) -> Option<&mut dyn RenderTarget> {
        Some(&mut self.mount)
    }
}

/// Byte range of an element's content inside a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ContentSpan {
    start: usize,
    end: usize,
}

/// An existing HTML (or markdown with inline HTML) page
///
/// `mount` finds the element carrying the requested id; `into_html` replaces
/// that element's content with whatever was rendered into it.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    source: String,
    thousands_separator: String,
    mounted: Option<(ContentSpan, HtmlMount)>,
}

impl HtmlPage {
    pub fn new(source: impl Into<String>, thousands_separator: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            thousands_separator: thousands_separator.into(),
            mounted: None,
        }
    }

    pub fn into_html(self) -> String {
        match self.mounted {
            Some((span, mount)) if mount.is_touched() => {
                let mut html = String::with_capacity(self.source.len());
                html.push_str(&self.source[..span.start]);
                html.push_str(&mount.to_html());
                html.push_str(&self.source[span.end..]);
                html
            }
            _ => self.source,
        }
    }
}

impl Document for HtmlPage {
    fn mount(&mut self, id: &str) -> Option<&mut dyn RenderTarget> {
        let span = find_element_content(&self.source, id)?;
        let mount = HtmlMount::new(self.thousands_separator.clone());
        let (_, mount) = self.mounted.insert((span, mount));
        Some(mount)
    }
}

/// Locate the content of the element whose `id` attribute equals `id`
fn find_element_content(html: &str, id: &str) -> Option<ContentSpan> {
    let attr_pos = [format!("id=\"{}\"", id), format!("id='{}'", id)]
        .iter()
        .filter_map(|needle| {
            html.match_indices(needle.as_str())
                .map(|(pos, _)| pos)
                .find(|pos| *pos > 0 && html[..*pos].ends_with(|c: char| c.is_whitespace()))
        })
        .min()?;

    let tag_start = html[..attr_pos].rfind('<')?;
    let tag_name: String = html[tag_start + 1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    if tag_name.is_empty() {
        return None;
    }

    let open_end = attr_pos + html[attr_pos..].find('>')?;
    if html[..open_end].ends_with('/') {
        return None;
    }
    let start = open_end + 1;

    let open_tag = format!("<{}", tag_name);
    let close_tag = format!("</{}>", tag_name);
    let mut depth = 0usize;
    let mut cursor = start;
    loop {
        let rest = &html[cursor..];
        let next_close = rest.find(&close_tag)?;
        let next_open = rest.match_indices(&open_tag).map(|(pos, _)| pos).find(|pos| {
            rest[pos + open_tag.len()..]
                .chars()
                .next()
                .map_or(false, |c| c.is_whitespace() || c == '>' || c == '/')
        });

        match next_open {
            Some(open) if open < next_close => {
                depth += 1;
                cursor += open + open_tag.len();
            }
            _ if depth == 0 => {
                return Some(ContentSpan {
                    start,
                    end: cursor + next_close,
                });
            }
            _ => {
                depth -= 1;
                cursor += next_close + close_tag.len();
            }
        }
    }
}
