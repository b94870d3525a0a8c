//! YAML front matter embedded at the top of markdown-like texts.
//!
//! ```text
//! ---
//! title: Genesis
//! slug: gen
//! ---
//! # Body
//! ```

use crate::decoder::RawRecord;
use crate::document::Record;
use crate::error::YamlTableError;
use crate::renderer::render_horizontal;
use crate::sanitizer::Sanitizer;

const DELIMITER: &str = "---";

/// A text split at its front-matter delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    /// The YAML between the delimiter lines, one `\n` terminated line each.
    pub yaml: String,
    /// The lines after the closing delimiter, one `\n` terminated line each.
    pub body: String,
}

/// Splits `text` into front matter and body.
///
/// Returns `None` unless the first line is exactly `---` and a later line is
/// exactly `---` too. Both LF and CRLF line endings are accepted.
pub fn split_front_matter(text: &str) -> Option<FrontMatter> {
    let mut lines = text.lines();
    if lines.next()? != DELIMITER {
        return None;
    }

    let mut yaml = String::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line == DELIMITER {
            closed = true;
            break;
        }
        yaml.push_str(line);
        yaml.push('\n');
    }
    if !closed {
        return None;
    }

    let body = lines.map(|line| format!("{}\n", line)).collect();
    Some(FrontMatter { yaml, body })
}

/// Removes a front-matter block from `input`.
///
/// The input is returned unchanged when it has no front matter or when the
/// block is not a single YAML record.
pub fn strip_front_matter(input: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(input);
    match split_front_matter(&text) {
        Some(front_matter) if serde_yaml::from_str::<RawRecord>(&front_matter.yaml).is_ok() => {
            front_matter.body.into_bytes()
        }
        _ => input.to_vec(),
    }
}

/// Renders the front matter of `input` as a single sanitized column table.
///
/// Texts without front matter render to empty output.
pub fn render_front_matter(input: &[u8]) -> Result<Vec<u8>, YamlTableError> {
    let text = String::from_utf8_lossy(input);
    let Some(front_matter) = split_front_matter(&text) else {
        return Ok(Vec::new());
    };
    let raw: RawRecord =
        serde_yaml::from_str(&front_matter.yaml).map_err(YamlTableError::Decode)?;
    let record = Record::try_from(&raw)?;
    let html = render_horizontal(&record);
    Ok(Sanitizer::global().sanitize(&html).into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "---\ntitle: Genesis\nslug: gen\n---\n# Heading\n\nText\n";

    #[test]
    fn test_split_front_matter() {
        let front_matter = split_front_matter(PAGE).unwrap();
        assert_eq!(front_matter.yaml, "title: Genesis\nslug: gen\n");
        assert_eq!(front_matter.body, "# Heading\n\nText\n");
    }

    #[test]
    fn test_split_front_matter_crlf() {
        let front_matter = split_front_matter("---\r\na: 1\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(front_matter.yaml, "a: 1\n");
        assert_eq!(front_matter.body, "body\n");
    }

    #[test]
    fn test_no_front_matter() {
        assert_eq!(split_front_matter("# Heading\n---\n"), None);
        assert_eq!(split_front_matter("---\na: 1\n"), None);
        assert_eq!(split_front_matter(""), None);
    }

    #[test]
    fn test_strip_front_matter() {
        assert_eq!(strip_front_matter(PAGE.as_bytes()), b"# Heading\n\nText\n".to_vec());
    }

    #[test]
    fn test_strip_keeps_text_without_front_matter() {
        let text = b"# Heading\nno front matter\n";
        assert_eq!(strip_front_matter(text), text.to_vec());
    }

    #[test]
    fn test_strip_keeps_text_with_invalid_front_matter() {
        let text = b"---\n- a\n- b\n---\nbody\n";
        assert_eq!(strip_front_matter(text), text.to_vec());
    }

    #[test]
    fn test_render_front_matter() {
        let html = String::from_utf8(render_front_matter(PAGE.as_bytes()).unwrap()).unwrap();
        assert_eq!(
            html,
            r#"<table data="yaml-metadata"><thead><tr><th>title</th><th>slug</th></tr></thead><tbody><tr><td>Genesis</td><td>gen</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn test_render_front_matter_repeated_keys() {
        let html = String::from_utf8(render_front_matter(b"---\ntag: a\ntag: b\n---\n").unwrap())
            .unwrap();
        assert!(html.contains("<th>tag</th><th>tag</th>"));
        assert!(html.contains("<td>a</td><td>b</td>"));
        assert_eq!(strip_front_matter(b"---\ntag: a\ntag: b\n---\nbody\n"), b"body\n".to_vec());
    }

    #[test]
    fn test_render_without_front_matter() {
        assert!(render_front_matter(b"# Heading\n").unwrap().is_empty());
    }

    #[test]
    fn test_render_invalid_front_matter() {
        let err = render_front_matter(b"---\na: [\n---\n").unwrap_err();
        assert!(matches!(err, YamlTableError::Decode(_)));
    }
}
