use std::io::Write;
use std::iter::Peekable;
use std::str::Chars;

use anyhow::Result;
use clap::Args;
use log::debug;
use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;

use crate::renderer::escape_html;
use crate::sanitizer::Sanitizer;

/// Options for configuring the `TsvRenderer`.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct TsvRendererOptions {
    /// Inputs larger than this many bytes are shown as preformatted text (0 = no limit).
    #[arg(long = "max-file-size", default_value_t = 0)]
    pub max_file_size: u64,
}

/// Renders tab separated values as an HTML table.
///
/// Every row starts with a line number cell. The first row is the header row.
/// In data rows, cells under a `note`, `question`, `answer` or `response`
/// header are rendered as Markdown.
pub struct TsvRenderer {
    options: TsvRendererOptions,
}

impl TsvRenderer {
    /// Creates a new `TsvRenderer` with the given options.
    pub fn new(options: TsvRendererOptions) -> Self {
        TsvRenderer { options }
    }

    /// Writes the unsanitized table for `input` to `output`.
    pub fn render(&self, input: &str, output: &mut dyn Write) -> Result<()> {
        if self.options.max_file_size != 0 && self.options.max_file_size < input.len() as u64 {
            debug!(
                "tsv input of {} bytes exceeds the {} byte limit",
                input.len(),
                self.options.max_file_size
            );
            write!(output, "<pre>{}</pre>", escape_html(input))?;
            return Ok(());
        }

        let markdown = MarkdownColumns::new()?;
        let records = read_records(input);
        let headers: &[String] = records.first().map(Vec::as_slice).unwrap_or_default();

        output.write_all(br#"<table class="data-table tsv">"#)?;
        for (index, fields) in records.iter().enumerate() {
            let element = if index == 0 { "th" } else { "td" };
            output.write_all(b"<tr>")?;
            write_field(output, element, Some("line-num"), &(index + 1).to_string())?;
            for (column, field) in fields.iter().enumerate() {
                let is_markdown = index > 0
                    && headers
                        .get(column)
                        .is_some_and(|header| markdown.applies_to(header));
                if is_markdown {
                    write!(output, "<{0}>{1}</{0}>", element, markdown.render(field))?;
                } else {
                    write_field(output, element, None, field)?;
                }
            }
            output.write_all(b"</tr>")?;
        }
        output.write_all(b"</table>")?;
        Ok(())
    }

    /// Renders `input` and passes the result through the global sanitizer.
    pub fn render_sanitized(&self, input: &str) -> Result<String> {
        let mut html = Vec::new();
        self.render(input, &mut html)?;
        Ok(Sanitizer::global().sanitize(&String::from_utf8_lossy(&html)))
    }
}

/// Markdown rendering for free-text columns.
///
/// `<br>` tags and literal `\n` sequences become line breaks. `[[rc://...]]`
/// resource links are kept as written instead of being read as Markdown.
struct MarkdownColumns {
    header: Regex,
    line_break: Regex,
    rc_link: Regex,
    rc_placeholder: Regex,
}

impl MarkdownColumns {
    fn new() -> Result<Self> {
        Ok(MarkdownColumns {
            header: Regex::new(r"(?i)(note|question|answer|response)")?,
            line_break: Regex::new(r"(<br/*>|\\n)")?,
            rc_link: Regex::new(r"\[\[(rc://[^\]]+)\]\]")?,
            rc_placeholder: Regex::new(r"START(rc://.+?)END")?,
        })
    }

    fn applies_to(&self, header: &str) -> bool {
        self.header.is_match(header)
    }

    fn render(&self, field: &str) -> String {
        let text = self.line_break.replace_all(field, "\n");
        let text = self.rc_link.replace_all(&text, "START${1}END");

        // Raw HTML in a cell is shown as text.
        let parser = Parser::new_ext(&text, Options::empty()).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.rc_placeholder
            .replace_all(&html_output, "[[${1}]]")
            .into_owned()
    }
}

type Input<'a> = Peekable<Chars<'a>>;

/// Splits TSV text into records of fields.
///
/// Fields are separated by tabs and records by line breaks (LF or CRLF). A
/// field that starts with `"` is quoted: it may contain tabs and line breaks,
/// and `""` stands for one `"`. A quoted field left open runs to the end of
/// the input, and text after a closing quote is appended to the field. Quotes
/// inside an unquoted field are kept as written. Empty lines are skipped and
/// records may have different lengths.
pub fn read_records(input: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut chars = input.chars().peekable();
    while chars.peek().is_some() {
        if skip_line_break(&mut chars) {
            continue;
        }
        let mut record = Vec::new();
        loop {
            let (field, more) = read_field(&mut chars);
            record.push(field);
            if !more {
                break;
            }
        }
        records.push(record);
    }
    records
}

/// Reads one field and its terminator. Returns the field and whether another
/// field of the same record follows.
fn read_field(chars: &mut Input) -> (String, bool) {
    let mut field = String::new();
    if chars.peek() == Some(&'"') {
        chars.next();
        loop {
            match chars.next() {
                Some('"') if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                Some('"') | None => break,
                Some('\r') if chars.peek() == Some(&'\n') => {}
                Some(c) => field.push(c),
            }
        }
    }
    loop {
        if skip_line_break(chars) {
            return (field, false);
        }
        match chars.next() {
            None => return (field, false),
            Some('\t') => return (field, true),
            Some(c) => field.push(c),
        }
    }
}

/// Consumes an LF or CRLF line break if one comes next.
fn skip_line_break(chars: &mut Input) -> bool {
    match chars.peek() {
        Some('\n') => {
            chars.next();
            true
        }
        Some('\r') => {
            let mut ahead = chars.clone();
            ahead.next();
            if ahead.peek() == Some(&'\n') {
                chars.next();
                chars.next();
                true
            } else {
                false
            }
        }
        _ => false,
    }
}

fn write_field(output: &mut dyn Write, element: &str, class: Option<&str>, field: &str) -> Result<()> {
    match class {
        Some(class) => write!(output, r#"<{} class="{}">"#, element, class)?,
        None => write!(output, "<{}>", element)?,
    }
    write!(output, "{}</{}>", escape_html(field), element)?;
    Ok(())
}
