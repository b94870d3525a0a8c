//! Allow-list HTML sanitizer applied to every rendered fragment.
//!
//! The policy starts from ammonia's defaults (text, list and table tags,
//! `a[href]`) and allows the markers the renderers emit on tables and cells.

use std::sync::LazyLock;

use ammonia::{Builder, UrlRelative};

static GLOBAL: LazyLock<Sanitizer> = LazyLock::new(Sanitizer::new);

/// A read-only sanitizing policy.
pub struct Sanitizer {
    policy: Builder<'static>,
}

impl Sanitizer {
    /// Builds the policy. Most callers want [`Sanitizer::global`].
    pub fn new() -> Self {
        let mut policy = Builder::default();
        policy
            .add_tag_attributes("table", &["data", "class"])
            .add_tag_attributes("th", &["class"])
            .add_tag_attributes("td", &["class"])
            .link_rel(Some("nofollow"))
            .url_relative(UrlRelative::PassThrough);
        Sanitizer { policy }
    }

    /// The process-wide policy, built on first use.
    pub fn global() -> &'static Sanitizer {
        &GLOBAL
    }

    pub fn sanitize(&self, html: &str) -> String {
        self.policy.clean(html).to_string()
    }

    /// Sanitizes raw bytes; invalid UTF-8 sequences are replaced first.
    pub fn sanitize_bytes(&self, html: &[u8]) -> Vec<u8> {
        self.sanitize(&String::from_utf8_lossy(html)).into_bytes()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}
