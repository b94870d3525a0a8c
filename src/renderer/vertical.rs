use log::debug;

use crate::document::Record;

use super::link::rewrite_link_field;
use super::{render_key, render_value, TABLE_OPEN};

/// Renders each record as its own table with one `key | value` row per field.
///
/// The tables are concatenated in order with no wrapping table. Values under
/// the `slug` and `link` keys are turned into anchors.
pub fn render_vertical(records: &[Record]) -> String {
    records.iter().map(render_record_table).collect()
}

fn render_record_table(record: &Record) -> String {
    let mut table = String::from(TABLE_OPEN);
    table.push_str("<tbody>");
    for (key, value) in record.iter() {
        debug!("vertical row: key={:?} value={:?}", key.shape(), value.shape());
        let key_cell = render_key(key);
        let value_cell = rewrite_link_field(key, value, render_value(value));
        table.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>", key_cell, value_cell));
    }
    table.push_str("</tbody></table>");
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Node;

    fn flat(pairs: &[(&str, &str)]) -> Record {
        let mut record = Record::new();
        for (k, v) in pairs {
            record.push(*k, *v);
        }
        record
    }

    #[test]
    fn test_no_records() {
        assert_eq!(render_vertical(&[]), "");
    }

    #[test]
    fn test_empty_record_still_gets_a_table() {
        assert_eq!(
            render_vertical(&[Record::new()]),
            r#"<table data="yaml-metadata"><tbody></tbody></table>"#
        );
    }

    #[test]
    fn test_one_table_per_record() {
        let html = render_vertical(&[flat(&[("a", "1"), ("b", "2")]), flat(&[("a", "3")])]);
        assert_eq!(
            html,
            concat!(
                r#"<table data="yaml-metadata"><tbody><tr><td>a</td><td>1</td></tr><tr><td>b</td><td>2</td></tr></tbody></table>"#,
                r#"<table data="yaml-metadata"><tbody><tr><td>a</td><td>3</td></tr></tbody></table>"#,
            )
        );
    }

    #[test]
    fn test_slug_and_link_rows() {
        let html = render_vertical(&[flat(&[("slug", "genesis"), ("link", "gen")])]);
        assert_eq!(
            html,
            concat!(
                r#"<table data="yaml-metadata"><tbody>"#,
                r#"<tr><td>slug</td><td><a href="content/genesis.md">genesis</a></td></tr>"#,
                r#"<tr><td>link</td><td><a href="gen/01.md">gen</a></td></tr>"#,
                r#"</tbody></table>"#,
            )
        );
    }

    #[test]
    fn test_nested_values_recurse() {
        let mut record = Record::new();
        record.push("meta", flat(&[("x", "1")]));
        record.push("items", Node::RecordList(vec![flat(&[("slug", "a")])]));
        let html = render_vertical(&[record]);
        assert_eq!(
            html,
            concat!(
                r#"<table data="yaml-metadata"><tbody>"#,
                r#"<tr><td>meta</td><td><table data="yaml-metadata"><thead><tr><th>x</th></tr></thead><tbody><tr><td>1</td></tr></tbody></table></td></tr>"#,
                r#"<tr><td>items</td><td><table data="yaml-metadata"><tbody><tr><td>slug</td><td><a href="content/a.md">a</a></td></tr></tbody></table></td></tr>"#,
                r#"</tbody></table>"#,
            )
        );
    }
}
