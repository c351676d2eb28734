//! @ai:module:intent Run the parse-and-render pipeline over one file or a whole directory tree
//! @ai:module:layer application
//! @ai:module:public_api collect_documents, process_file, write_documents, create_output_dir, CollectOptions
//! @ai:module:depends_on parser, renderer, formatter, language, record, error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use crate::formatter::Formatters;
use crate::language::{detect_language, is_collectable, Language};
use crate::parser::parse_file;
use crate::record::{DocIndex, Document};
use crate::renderer::render_document;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Options for a batch collection run
#[derive(Debug, Clone)]
pub struct CollectOptions {
    pub languages: Vec<Language>,
    /// Print each formatted code block to stdout as it is rendered.
    pub preview: bool,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            languages: Language::ALL.to_vec(),
            preview: false,
        }
    }
}

/// @ai:intent Parse and render every collectable file under root into an index
/// @ai:pre root is a readable directory
/// @ai:post the index holds one document per documentable file, keyed by walked path
/// @ai:post any walk, read or format error aborts the whole batch
/// @ai:effects fs:read, io
pub fn collect_documents(
    root: &Path,
    options: &CollectOptions,
    formatters: &Formatters,
) -> Result<DocIndex> {
    let mut index = DocIndex::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(language) = is_collectable(path, &options.languages) else {
            continue;
        };

        if let Some(document) = render_path(path, language, formatters, options.preview)? {
            tracing::info!("Markdown for file {}", path.display());
            index.insert(document);
        }
    }

    Ok(index)
}

/// @ai:intent Parse and render a single file and write the document to output
/// @ai:post result is None when the file lacks author or file label; nothing is written then
/// @ai:effects fs:read, fs:write, io
pub fn process_file(
    input: &Path,
    output: &Path,
    formatters: &Formatters,
    preview: bool,
) -> Result<Option<PathBuf>> {
    let language = detect_language(input)
        .ok_or_else(|| Error::UnsupportedFileType(input.display().to_string()))?;

    let Some(document) = render_path(input, language, formatters, preview)? else {
        tracing::warn!(
            "Skipped generating markdown for {}: Author or File is empty",
            input.display()
        );
        return Ok(None);
    };

    write_file(output, &document.content)?;
    Ok(Some(output.to_path_buf()))
}

/// @ai:intent Write every document in the index as <file stem>.md under out_dir
/// @ai:post returns the written paths in index order; the first failure aborts
/// @ai:effects fs:write
pub fn write_documents(index: &DocIndex, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(index.len());

    for document in index.iter() {
        let target = out_dir.join(output_file_name(&document.path));
        write_file(&target, &document.content)?;
        written.push(target);
    }

    Ok(written)
}

/// @ai:intent Ensure the output directory exists
/// @ai:effects fs:write
pub fn create_output_dir(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| Error::FileWrite {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(dir.to_path_buf())
}

/// @ai:intent Parse one file and render it when it is documentable
/// @ai:effects fs:read, io
fn render_path(
    path: &Path,
    language: Language,
    formatters: &Formatters,
    preview: bool,
) -> Result<Option<Document>> {
    let record = parse_file(path)?;

    if !record.is_documentable() {
        tracing::debug!("Skipping {}: Author or File is empty", path.display());
        return Ok(None);
    }

    let rendered = render_document(&record, language, formatters)?;

    if preview {
        println!("{}", rendered.code_block);
    }

    Ok(Some(Document {
        path: path.display().to_string(),
        content: rendered.document,
    }))
}

/// @ai:intent Derive the Markdown file name for a source path
/// @ai:example ("pkg/two_sum.go") -> "two_sum.md"
/// @ai:effects pure
fn output_file_name(source: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string());
    format!("{}.md", stem)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
