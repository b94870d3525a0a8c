use crate::document::Node;

/// Keys whose scalar values are rendered as links to repository content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    /// `slug: V` links to `content/V.md`.
    Slug,
    /// `link: V` links to `V/01.md`.
    Link,
}

impl LinkField {
    /// Matches a key name case-sensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "slug" => Some(LinkField::Slug),
            "link" => Some(LinkField::Link),
            _ => None,
        }
    }

    /// Returns the link target for an already escaped value.
    pub fn href(&self, value: &str) -> String {
        match self {
            LinkField::Slug => format!("content/{}.md", value),
            LinkField::Link => format!("{}/01.md", value),
        }
    }
}

/// Replaces a rendered scalar value with an anchor when its key is a link field.
///
/// `rendered` is returned untouched for non-scalar values and ordinary keys.
pub fn rewrite_link_field(key: &Node, value: &Node, rendered: String) -> String {
    if value.as_scalar().is_none() {
        return rendered;
    }
    let field = key
        .as_scalar()
        .and_then(|k| k.as_str())
        .and_then(LinkField::from_key);
    match field {
        Some(field) => format!(r#"<a href="{}">{}</a>"#, field.href(&rendered), rendered),
        None => rendered,
    }
}
