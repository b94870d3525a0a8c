//! Renders YAML metadata and TSV text as sanitized HTML tables.
//!
//! # Types of Input
//!
//! ## `yaml`
//!
//! A YAML document whose root is either a mapping or a sequence of mappings.
//! A root mapping becomes one table with its keys as columns. A root sequence
//! becomes one table per mapping, with one `key | value` row per field; in
//! those rows the values of `slug` and `link` are turned into links
//! (`content/<slug>.md` and `<link>/01.md`). Repeated keys are kept as
//! separate columns or rows. Nested mappings are rendered as
//! column tables and nested sequences of mappings as row tables.
//!
//! ## `front-matter`
//!
//! A markdown-like text starting with a `---` delimited YAML block. The block
//! is rendered as a single column table.
//!
//! ## `tsv`
//!
//! Tab separated values. The first line is the header row. Fields may be
//! quoted with `"` to hold tabs or line breaks. Cells under a `note`,
//! `question`, `answer` or `response` header are rendered as Markdown.

pub mod cli;
pub mod decoder;
pub mod document;
pub mod error;
pub mod front_matter;
pub mod renderer;
pub mod sanitizer;
pub mod server;
pub mod tsv;

pub use error::YamlTableError;

use clap::ValueEnum;
use log::debug;

use crate::cli::InputType;
use crate::sanitizer::Sanitizer;

pub fn get_input_types() -> Vec<String> {
    InputType::value_variants()
        .iter()
        .filter_map(|t| t.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect()
}

/// Decodes `input` and renders it as an unsanitized HTML fragment.
///
/// Empty input is returned unchanged.
pub fn render(input: &[u8]) -> Result<Vec<u8>, YamlTableError> {
    let Some(document) = decoder::decode(input)? else {
        return Ok(input.to_vec());
    };
    let html = renderer::render_document(&document);
    debug!("rendered {} bytes of YAML into {} bytes of HTML", input.len(), html.len());
    Ok(html.into_bytes())
}

/// Like [`render`], with the output passed through the global [`Sanitizer`].
pub fn render_sanitized(input: &[u8]) -> Result<Vec<u8>, YamlTableError> {
    let html = render(input)?;
    Ok(Sanitizer::global().sanitize_bytes(&html))
}

/// Renders and sanitizes `input`, returning the HTML as a string.
pub fn render_string(input: &[u8]) -> Result<String, YamlTableError> {
    let html = render(input)?;
    Ok(Sanitizer::global().sanitize(&String::from_utf8_lossy(&html)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;
    use markup5ever_rcdom::{Handle, NodeData, RcDom};

    /// Collects the tag names of every element, in document order.
    fn element_names(html: &str) -> Vec<String> {
        fn walk(handle: &Handle, names: &mut Vec<String>) {
            if let NodeData::Element { name, .. } = &handle.data {
                names.push(name.local.as_ref().to_string());
            }
            for child in handle.children.borrow().iter() {
                walk(child, names);
            }
        }

        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .unwrap();
        let mut names = Vec::new();
        walk(&dom.document, &mut names);
        names
    }

    fn count(names: &[String], tag: &str) -> usize {
        names.iter().filter(|n| n.as_str() == tag).count()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render(b"").unwrap(), Vec::<u8>::new());
        assert_eq!(render_sanitized(b"").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(
            render(b"misformatted&"),
            Err(YamlTableError::Decode(_))
        ));
        assert!(render_sanitized(b"misformatted&").is_err());
    }

    #[test]
    fn test_line_endings() {
        let lf = render_string(b"a: 1\nb: 2\n").unwrap();
        let crlf = render_string(b"a: 1\r\nb: 2\r\n").unwrap();
        assert!(lf.ends_with("</table>"));
        assert_eq!(lf, crlf);
    }

    #[test]
    fn test_flat_record_structure() {
        let html = render_string(b"a: 1\nb: 2\n").unwrap();
        assert!(html.contains("<thead><tr><th>a</th><th>b</th></tr></thead>"));
        assert!(html.contains("<tbody><tr><td>1</td><td>2</td></tr></tbody>"));
        let names = element_names(&html);
        assert_eq!(count(&names, "table"), 1);
        assert_eq!(count(&names, "tr"), 2);
    }

    #[test]
    fn test_record_list_renders_separate_tables() {
        let html = render_string(b"- a: 1\n- a: 2\n").unwrap();
        let names = element_names(&html);
        assert_eq!(count(&names, "table"), 2);
        assert_eq!(count(&names, "tr"), 2);
        assert_eq!(count(&names, "td"), 4);
        assert!(html.contains("<tr><td>a</td><td>1</td></tr>"));
        assert!(html.contains("<tr><td>a</td><td>2</td></tr>"));
    }

    #[test]
    fn test_slug_links_only_in_record_lists() {
        let listed = render_string(b"- slug: genesis\n").unwrap();
        assert!(listed.contains(r#"<a href="content/genesis.md" rel="nofollow">genesis</a>"#));

        let single = render_string(b"slug: genesis\n").unwrap();
        assert!(!single.contains("<a "));
        assert!(single.contains("<td>genesis</td>"));
    }

    #[test]
    fn test_shape_error_produces_no_output() {
        let result = render_sanitized(b"- books:\n    - id: gen\n    - plain\n");
        assert!(matches!(result, Err(YamlTableError::Shape { .. })));
    }

    #[test]
    fn test_render_is_stable() {
        let input = b"- id: gen\n  meta:\n    title: Genesis\n  books:\n    - slug: gen\n      link: gen\n";
        assert_eq!(render(input).unwrap(), render(input).unwrap());
    }

    #[test]
    fn test_sanitized_output_is_a_fixed_point() {
        let input = b"- title: <b>Bold</b> & <script>x</script>\n  link: tn\n";
        let once = render_string(input).unwrap();
        assert_eq!(Sanitizer::global().sanitize(&once), once);
    }

    #[test]
    fn test_get_input_types() {
        assert_eq!(get_input_types(), vec!["yaml", "front-matter", "tsv"]);
    }
}
