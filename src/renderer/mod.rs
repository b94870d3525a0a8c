//! Recursive table renderer.
//!
//! A document is rendered with one of two mutually recursive layouts:
//!
//! - [`horizontal`]: one record becomes one table, fields as columns.
//! - [`vertical`]: each record of a list becomes its own table, fields as rows.
//!
//! A single-record document uses the horizontal layout; a list of records uses
//! the vertical one. Inside either layout a nested record is rendered
//! horizontally and a nested record list vertically.

pub mod horizontal;
pub mod link;
pub mod vertical;

pub use horizontal::render_horizontal;
pub use vertical::render_vertical;

use crate::document::{Document, Node};

/// Opening tag shared by every rendered table.
pub const TABLE_OPEN: &str = r#"<table data="yaml-metadata">"#;

/// Renders a decoded document as an HTML fragment.
pub fn render_document(document: &Document) -> String {
    match document {
        Document::Record(record) => render_horizontal(record),
        Document::RecordList(records) => render_vertical(records),
    }
}

/// Renders the content of a key cell.
///
/// A record list used as a key renders each record horizontally, concatenated.
pub(crate) fn render_key(key: &Node) -> String {
    match key {
        Node::Scalar(scalar) => escape_html(&scalar.to_string()),
        Node::Record(record) => render_horizontal(record),
        Node::RecordList(records) => records.iter().map(render_horizontal).collect(),
    }
}

/// Renders the content of a value cell.
pub(crate) fn render_value(value: &Node) -> String {
    match value {
        Node::Scalar(scalar) => escape_html(&scalar.to_string()),
        Node::Record(record) => render_horizontal(record),
        Node::RecordList(records) => render_vertical(records),
    }
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
