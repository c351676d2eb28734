//! @ai:module:intent Define the source languages whose annotation blocks can be documented
//! @ai:module:layer domain
//! @ai:module:public_api Language, detect_language, is_collectable
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::Path;

/// @ai:intent Represents a supported source language with block-comment syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Rust,
    C,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Go, Language::Rust, Language::C, Language::Cpp];

    /// @ai:intent Get file extensions for this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Go => &["go"],
            Language::Rust => &["rs"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
        }
    }

    /// @ai:intent Get file name suffixes that mark test files, which are never collected
    /// @ai:effects pure
    pub fn test_suffixes(&self) -> &'static [&'static str] {
        match self {
            Language::Go => &["_test.go"],
            Language::Rust => &["_test.rs", "_tests.rs"],
            Language::C => &["_test.c"],
            Language::Cpp => &["_test.cpp", "_test.cc"],
        }
    }

    /// @ai:intent Get the info string used on the fenced code block
    /// @ai:effects pure
    pub fn fence_tag(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }

    /// @ai:intent Get the standard formatter invocation that reads stdin and writes stdout
    /// @ai:effects pure
    pub fn default_formatter(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Language::Go => ("gofmt", &[]),
            Language::Rust => ("rustfmt", &["--edition", "2021", "--emit", "stdout"]),
            Language::C => ("clang-format", &["--assume-filename=stdin.c"]),
            Language::Cpp => ("clang-format", &["--assume-filename=stdin.cpp"]),
        }
    }

    /// @ai:intent Get language name as string
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
            Language::C => "c",
            Language::Cpp => "cpp",
        }
    }

    /// @ai:intent Look up a language by its name
    /// @ai:example ("rust") -> Some(Rust)
    /// @ai:example ("cobol") -> None
    /// @ai:effects pure
    pub fn from_name(name: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(name))
    }

    /// @ai:intent Check if a file name is a test file for this language
    /// @ai:effects pure
    pub fn is_test_file(&self, file_name: &str) -> bool {
        self.test_suffixes()
            .iter()
            .any(|suffix| file_name.ends_with(suffix))
    }
}

/// @ai:intent Detect the source language from a file path
/// @ai:pre path is a valid file path
/// @ai:post result is Some if extension is recognized
/// @ai:example ("two_sum.go") -> Some(Go)
/// @ai:example ("lib.rs") -> Some(Rust)
/// @ai:example ("notes.txt") -> None
/// @ai:effects pure
pub fn detect_language(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;

    Language::ALL
        .into_iter()
        .find(|lang| lang.extensions().contains(&ext))
}

/// @ai:intent Check if a file should be collected in batch mode
/// @ai:post result is Some iff the path has a source suffix of an enabled language and no test suffix
/// @ai:effects pure
pub fn is_collectable(path: &Path, enabled: &[Language]) -> Option<Language> {
    let language = detect_language(path)?;
    if !enabled.contains(&language) {
        return None;
    }

    let file_name = path.file_name()?.to_str()?;
    if language.is_test_file(file_name) {
        return None;
    }

    Some(language)
}
