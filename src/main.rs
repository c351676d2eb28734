//! @ai:module:intent CLI entry point for annodoc
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on collector, config, output, parser, server

use annodoc::{
    collector::{self, CollectOptions},
    output, parser, server, Config, OutputFormat,
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "annodoc")]
#[command(author, version, about = "Render annotated source files into Markdown notes")]
struct Cli {
    /// Input source file to document
    #[arg(long)]
    input: Option<PathBuf>,

    /// Output Markdown file name, written inside the output directory
    #[arg(long, default_value = "output.md")]
    output: PathBuf,

    /// Recursively document source files under the root directory
    #[arg(short, long)]
    recursive: bool,

    /// Serve documents over HTTP on this address (e.g. :6060)
    #[arg(long)]
    http: Option<String>,

    /// Directory to walk in recursive and serving modes
    #[arg(long)]
    root: Option<PathBuf>,

    /// Directory Markdown files are written to
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Path to configuration file (defaults to ./annodoc.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print each formatted code block while processing
    #[arg(long)]
    preview: bool,

    /// Print the parsed record of --input instead of rendering it
    #[arg(long, value_enum, requires = "input")]
    dump: Option<Format>,

    /// Write the default configuration to this path and exit
    #[arg(long)]
    init_config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("annodoc=info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// @ai:intent Dispatch the requested modes in order: single file, batch, serve
/// @ai:effects fs:read, fs:write, network
async fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(path) = &cli.init_config {
        Config::default()
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Configuration saved to {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.input.is_none() && !cli.recursive && cli.http.is_none() {
        eprintln!(
            "Error: either an input file must be specified, the -r flag must be used for \
             recursive processing, or the --http flag must be used to start the HTTP server"
        );
        return Ok(ExitCode::from(2));
    }

    let mut config =
        Config::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(root) = cli.root {
        config.root = root;
    }
    if let Some(out_dir) = cli.out_dir {
        config.output_dir = out_dir;
    }
    config.preview |= cli.preview;

    let formatters = config.formatters()?;

    if let Some(input) = &cli.input {
        match cli.dump {
            Some(format) => {
                let record = parser::parse_file(input)?;
                println!("{}", output::format_record(&record, format.into()));
            }
            None => {
                let out_dir = collector::create_output_dir(&config.output_dir)?;
                let target = out_dir.join(&cli.output);

                if let Some(written) =
                    collector::process_file(input, &target, &formatters, config.preview)
                        .with_context(|| format!("failed to document {}", input.display()))?
                {
                    print!("{}", output::format_generated(&[written]));
                }
            }
        }
    }

    if cli.recursive || cli.http.is_some() {
        let options = CollectOptions {
            languages: config.languages.clone(),
            preview: config.preview,
        };
        let index = collector::collect_documents(&config.root, &options, &formatters)
            .with_context(|| format!("failed to process {}", config.root.display()))?;

        if cli.recursive {
            let out_dir = collector::create_output_dir(&config.output_dir)?;
            let written = collector::write_documents(&index, &out_dir)?;
            print!("{}", output::format_generated(&written));
        }

        if let Some(addr) = &cli.http {
            server::serve(addr, index).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
