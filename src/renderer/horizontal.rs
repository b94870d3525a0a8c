use crate::document::Record;

use super::{render_key, render_value, TABLE_OPEN};

/// Renders a record as one table: a header row with one cell per key and a
/// single body row with one cell per value.
///
/// An empty record renders to the empty string. Link fields are not rewritten
/// in this layout.
pub fn render_horizontal(record: &Record) -> String {
    if record.is_empty() {
        return String::new();
    }

    let mut thead = String::new();
    let mut tbody = String::new();
    for (key, value) in record.iter() {
        thead.push_str(&format!("<th>{}</th>", render_key(key)));
        tbody.push_str(&format!("<td>{}</td>", render_value(value)));
    }

    format!(
        "{}<thead><tr>{}</tr></thead><tbody><tr>{}</tr></tbody></table>",
        TABLE_OPEN, thead, tbody
    )
}
