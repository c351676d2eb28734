//! @ai:module:intent annodoc library for turning annotated source files into Markdown notes
//! @ai:module:layer infrastructure
//! @ai:module:public_api record, parser, renderer, formatter, collector, server, language, config, output, error
//! @ai:module:stateless true
//!
//! # annodoc
//!
//! Extracts the leading annotation block of a source file (author, date,
//! problem, solution, complexity, note) and renders it with the formatted
//! source body into a fixed Markdown template.
//!
//! ## Example
//!
//! ```rust,no_run
//! use annodoc::{collector, formatter::Formatters, server};
//! use std::path::Path;
//!
//! # async fn run() -> annodoc::Result<()> {
//! let index = collector::collect_documents(
//!     Path::new("."),
//!     &collector::CollectOptions::default(),
//!     &Formatters::standard(),
//! )?;
//! server::serve(":6060", index).await?;
//! # Ok(())
//! # }
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod formatter;
pub mod language;
pub mod output;
pub mod parser;
pub mod record;
pub mod renderer;
pub mod server;

pub use collector::{collect_documents, create_output_dir, process_file, write_documents, CollectOptions};
pub use config::Config;
pub use error::{Error, Result};
pub use formatter::{CommandFormatter, Formatters, Passthrough, SourceFormatter};
pub use language::{detect_language, is_collectable, Language};
pub use output::{format_generated, format_record, OutputFormat};
pub use parser::{parse_file, parse_source, FieldKind};
pub use record::{DocIndex, Document, Record};
pub use renderer::{extract_code_block, render_document, Rendered};
