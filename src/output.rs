//! @ai:module:intent Format records and run summaries for the console
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_record, format_generated
//! @ai:module:depends_on record
//! @ai:module:stateless true

use crate::record::Record;
use colored::Colorize;
use std::path::PathBuf;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a parsed record as a string
/// @ai:effects pure
pub fn format_record(record: &Record, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(record).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(record).unwrap_or_default(),
        OutputFormat::Text => format_record_text(record),
    }
}

/// @ai:intent Format a parsed record as human-readable text
/// @ai:effects pure
fn format_record_text(record: &Record) -> String {
    let mut output = String::new();

    for (label, value) in record.fields() {
        if value.contains('\n') {
            output.push_str(&format!("{}:\n", label.bold()));
            for line in value.lines() {
                output.push_str(&format!("  {}\n", line));
            }
        } else {
            output.push_str(&format!("{}: {}\n", label.bold(), value));
        }
    }

    output.push_str(&format!(
        "{}: {} lines\n",
        "Body".bold(),
        record.body.lines().count()
    ));

    if !record.is_documentable() {
        output.push_str(&format!(
            "{} Author or File is empty; no document would be rendered\n",
            "WARN".yellow().bold()
        ));
    }

    output
}

/// @ai:intent Format the list of generated Markdown files
/// @ai:effects pure
pub fn format_generated(paths: &[PathBuf]) -> String {
    let mut output = String::new();

    for path in paths {
        output.push_str(&format!(
            "{} {}\n",
            "Markdown file generated:".green(),
            path.display()
        ));
    }

    if paths.is_empty() {
        output.push_str(&format!("{} No documentable files found\n", "OK".green().bold()));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            author: "Ana".to_string(),
            file_label: "sum.go".to_string(),
            solution: "one\ntwo".to_string(),
            body: "package main\n\nfunc main() {}\n".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_json_output_uses_field_names() {
        let json = format_record(&record(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["author"], "Ana");
        assert_eq!(value["file_label"], "sum.go");
        assert_eq!(value["solution"], "one\ntwo");
    }

    #[test]
    fn test_text_output_lists_fields() {
        colored::control::set_override(false);
        let text = format_record(&record(), OutputFormat::Text);

        assert!(text.contains("Author: Ana\n"));
        assert!(text.contains("Solution:\n  one\n  two\n"));
        assert!(text.contains("Body: 3 lines\n"));
        assert!(!text.contains("WARN"));
    }

    #[test]
    fn test_text_output_warns_when_not_documentable() {
        colored::control::set_override(false);
        let text = format_record(&Record::default(), OutputFormat::Text);
        assert!(text.contains("WARN Author or File is empty"));
    }

    #[test]
    fn test_generated_summary() {
        colored::control::set_override(false);
        let text = format_generated(&[PathBuf::from("annodoc_out/sum.md")]);
        assert_eq!(text, "Markdown file generated: annodoc_out/sum.md\n");
        assert!(format_generated(&[]).contains("No documentable files found"));
    }
}
