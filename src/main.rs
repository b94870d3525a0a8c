use clap::Parser;
use yaml_table_rs::cli::{run_conversion, ConversionOptions, InputType};
use yaml_table_rs::get_input_types;
use yaml_table_rs::server::{serve, ServerOptions};
use yaml_table_rs::tsv::TsvRendererOptions;

use std::fs::File;
use std::io::{self, Write};
use std::net::SocketAddr;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Type of input (yaml, front-matter, tsv)
    #[arg(short = 'f', long, value_enum, value_name = "TYPE", default_value = "yaml")]
    from_type: InputType,

    /// Write the rendered HTML without sanitizing it.
    #[arg(long = "no-sanitize", default_value_t = false)]
    no_sanitize: bool,

    /// Output the input text with its YAML front matter removed.
    #[arg(long = "strip-front-matter", default_value_t = false)]
    strip_front_matter: bool,

    #[command(flatten)]
    tsv: TsvRendererOptions,

    /// Serve the HTTP API on this address instead of converting a file.
    #[arg(long, value_name = "ADDR")]
    listen: Option<SocketAddr>,

    /// Input file (default: stdin)
    input: Option<String>,

    /// Output file (default: stdout)
    output: Option<String>,

    /// List available input types
    #[arg(short = 'l', long)]
    list_type: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_type {
        println!("type of input:");
        println!("{}", get_input_types().join(" "));
        println!();
        return Ok(());
    }

    if let Some(listen) = cli.listen {
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(serve(ServerOptions {
            listen,
            tsv: cli.tsv,
        }));
    }

    // Prepare output writer
    let mut output_writer: Box<dyn Write> = match cli.output {
        Some(path) if path != "-" => Box::new(File::create(path)?),
        _ => Box::new(io::stdout()),
    };

    let options = ConversionOptions {
        from_type: cli.from_type,
        sanitize: !cli.no_sanitize,
        strip_front_matter: cli.strip_front_matter,
        tsv: cli.tsv,
    };

    run_conversion(&cli.input, &mut output_writer, &options)?;

    Ok(())
}
