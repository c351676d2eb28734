//! @ai:module:intent Format source bodies with each language's standard formatter
//! @ai:module:layer infrastructure
//! @ai:module:public_api SourceFormatter, CommandFormatter, Passthrough, Formatters
//! @ai:module:depends_on language, error
//! @ai:module:thread_safe true

use crate::error::{Error, Result};
use crate::language::Language;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::process::{Command, Stdio};

/// @ai:intent Trait for turning raw source text into its canonical formatted form
pub trait SourceFormatter: Send + Sync {
    /// @ai:intent Format source text
    /// @ai:post an error means the source could not be formatted; no partial output is returned
    fn format(&self, source: &str) -> Result<String>;
}

impl<F> SourceFormatter for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn format(&self, source: &str) -> Result<String> {
        self(source)
    }
}

/// @ai:intent Returns source unchanged; used when formatting is disabled for a language
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// @ai:intent Runs an external formatter that reads stdin and writes stdout
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// @ai:intent Create a formatter for a program and its arguments
    /// @ai:effects pure
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// @ai:intent Create the standard formatter for a language
    /// @ai:effects pure
    pub fn for_language(language: Language) -> Self {
        let (program, args) = language.default_formatter();
        Self::new(program, args.iter().copied())
    }
}

impl SourceFormatter for CommandFormatter {
    /// @ai:effects io
    fn format(&self, source: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::FormatterUnavailable {
                program: self.program.clone(),
                source: e,
            })?;

        // Feed stdin from a second thread so a large body cannot deadlock
        // against a full stdout pipe.
        let output = std::thread::scope(|scope| {
            if let Some(mut stdin) = child.stdin.take() {
                scope.spawn(move || stdin.write_all(source.as_bytes()));
            }
            child.wait_with_output()
        })?;

        if !output.status.success() {
            return Err(Error::Format {
                program: self.program.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| Error::Format {
            program: self.program.clone(),
            message: format!("output is not valid UTF-8: {}", e),
        })
    }
}

/// @ai:intent Per-language formatter registry
pub struct Formatters {
    by_language: HashMap<Language, Box<dyn SourceFormatter>>,
}

impl Formatters {
    /// @ai:intent Create a registry that uses each language's standard formatter
    /// @ai:effects pure
    pub fn standard() -> Self {
        Self {
            by_language: HashMap::new(),
        }
    }

    /// @ai:intent Build a registry from configured command lines keyed by language name
    /// @ai:pre keys name a supported language; an empty command disables formatting
    /// @ai:effects pure
    pub fn from_commands(commands: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut formatters = Self::standard();

        for (name, command) in commands {
            let language = Language::from_name(name)
                .ok_or_else(|| Error::UnknownLanguage(name.clone()))?;

            formatters = match command.split_first() {
                Some((program, args)) => {
                    formatters.with(language, CommandFormatter::new(program, args))
                }
                None => formatters.with(language, Passthrough),
            };
        }

        Ok(formatters)
    }

    /// @ai:intent Use every language without formatting
    /// @ai:effects pure
    pub fn passthrough() -> Self {
        Language::ALL
            .into_iter()
            .fold(Self::standard(), |f, lang| f.with(lang, Passthrough))
    }

    /// @ai:intent Override the formatter for one language
    pub fn with(mut self, language: Language, formatter: impl SourceFormatter + 'static) -> Self {
        self.by_language.insert(language, Box::new(formatter));
        self
    }

    /// @ai:intent Format source for a language, falling back to its standard formatter
    /// @ai:effects io
    pub fn format(&self, language: Language, source: &str) -> Result<String> {
        match self.by_language.get(&language) {
            Some(formatter) => formatter.format(source),
            None => CommandFormatter::for_language(language).format(source),
        }
    }
}

impl Default for Formatters {
    fn default() -> Self {
        Self::standard()
    }
}
