use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::debug;

use crate::front_matter::{render_front_matter, strip_front_matter};
use crate::tsv::{TsvRenderer, TsvRendererOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputType {
    Yaml,
    FrontMatter,
    Tsv,
}

#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub from_type: InputType,
    /// Pass the rendered HTML through the sanitizer.
    pub sanitize: bool,
    /// Output the text with its front matter removed instead of a table.
    pub strip_front_matter: bool,
    pub tsv: TsvRendererOptions,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        ConversionOptions {
            from_type: InputType::Yaml,
            sanitize: true,
            strip_front_matter: false,
            tsv: TsvRendererOptions::default(),
        }
    }
}

/// Reads the input file (or stdin for `None` / `-`).
pub fn read_input(input_path: &Option<String>) -> Result<Vec<u8>> {
    match input_path {
        Some(path) if path != "-" => {
            fs::read(path).with_context(|| format!("failed to read {}", path))
        }
        _ => {
            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input)?;
            Ok(input)
        }
    }
}

/// Converts the input and writes the result to `output_writer`.
pub fn run_conversion(
    input_path: &Option<String>,
    output_writer: &mut dyn Write,
    options: &ConversionOptions,
) -> Result<()> {
    let input = read_input(input_path)?;
    let output = convert(&input, options)?;
    output_writer.write_all(&output)?;
    output_writer.flush()?;
    Ok(())
}

/// Converts an in-memory input according to `options`.
pub fn convert(input: &[u8], options: &ConversionOptions) -> Result<Vec<u8>> {
    debug!("converting {} bytes as {:?}", input.len(), options.from_type);
    if options.strip_front_matter {
        return Ok(strip_front_matter(input));
    }

    let output = match options.from_type {
        InputType::Yaml if options.sanitize => crate::render_sanitized(input)?,
        InputType::Yaml => crate::render(input)?,
        InputType::FrontMatter => render_front_matter(input)?,
        InputType::Tsv => {
            let renderer = TsvRenderer::new(options.tsv);
            let text = String::from_utf8_lossy(input);
            if options.sanitize {
                renderer.render_sanitized(&text)?.into_bytes()
            } else {
                let mut html = Vec::new();
                renderer.render(&text, &mut html)?;
                html
            }
        }
    };
    Ok(output)
}
