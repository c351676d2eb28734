//! @ai:module:intent Configuration for batch collection, output and formatting
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, DEFAULT_CONFIG_FILE
//! @ai:module:stateless true

use crate::error::Result;
use crate::formatter::Formatters;
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "annodoc.toml";

/// @ai:intent Main configuration for annodoc
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory walked in batch mode.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_languages")]
    pub languages: Vec<Language>,
    /// Print each formatted code block to stdout while processing.
    #[serde(default)]
    pub preview: bool,
    /// Formatter command per language name; an empty list disables formatting.
    #[serde(default)]
    pub formatters: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            output_dir: default_output_dir(),
            languages: default_languages(),
            preview: false,
            formatters: BTreeMap::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("annodoc_out")
}

fn default_languages() -> Vec<Language> {
    Language::ALL.to_vec()
}

impl Config {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Load the given file, else the default file if present, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Build the formatter registry described by this configuration
    /// @ai:effects pure
    pub fn formatters(&self) -> Result<Formatters> {
        Formatters::from_commands(&self.formatters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output_dir, PathBuf::from("annodoc_out"));
        assert_eq!(config.languages.len(), 4);
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
output_dir = "notes"
languages = ["go"]
preview = true

[formatters]
go = []
rust = ["rustfmt", "--edition", "2024"]
"#,
        )
        .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("notes"));
        assert_eq!(config.languages, vec![Language::Go]);
        assert!(config.preview);
        assert_eq!(config.formatters["go"], Vec::<String>::new());
        assert_eq!(config.root, PathBuf::from("."));
        assert!(config.formatters().is_ok());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("annodoc.toml");

        let config = Config {
            preview: true,
            languages: vec![Language::Rust, Language::Cpp],
            ..Default::default()
        };
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_unknown_language_is_config_error() {
        let result: std::result::Result<Config, _> = toml::from_str(r#"languages = ["cobol"]"#);
        assert!(result.is_err());
    }
}
