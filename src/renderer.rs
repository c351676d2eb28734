//! @ai:module:intent Render a parsed Record into the fixed Markdown notes template
//! @ai:module:layer application
//! @ai:module:public_api render_document, extract_code_block, Rendered
//! @ai:module:depends_on record, language, formatter, error
//! @ai:module:stateless true

use crate::error::Result;
use crate::formatter::Formatters;
use crate::language::Language;
use crate::record::Record;
use std::fmt::Write as FmtWrite;

const FENCE: &str = "```";

/// @ai:intent A rendered document plus the fenced code block it embeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub document: String,
    /// The fenced block exactly as embedded, for console preview.
    pub code_block: String,
}

/// @ai:intent Render a record into a Markdown document
/// @ai:pre callers have checked record.is_documentable(); this function does not
/// @ai:post the code section holds the formatted body inside a fence tagged with the language
/// @ai:effects io
pub fn render_document(
    record: &Record,
    language: Language,
    formatters: &Formatters,
) -> Result<Rendered> {
    let formatted = formatters.format(language, &record.body)?;
    let code_block = format!("{FENCE}{}\n{}\n{FENCE}", language.fence_tag(), formatted);

    let mut document = String::new();

    writeln!(document, "# Notes").unwrap();
    writeln!(document).unwrap();
    writeln!(document, "**Author**: {}", record.author).unwrap();
    writeln!(document, "**Date**: {}", record.date).unwrap();
    writeln!(document, "**File**: {}", record.file_label).unwrap();
    writeln!(document).unwrap();
    writeln!(document, "## Problem").unwrap();
    writeln!(document, "{}", record.problem).unwrap();
    writeln!(document).unwrap();
    writeln!(document, "## Solution").unwrap();
    writeln!(document, "{}", record.solution).unwrap();
    writeln!(document).unwrap();
    writeln!(document, "**Time Complexity**: {}", record.time_complexity).unwrap();
    writeln!(document, "**Space Complexity**: {}", record.space_complexity).unwrap();
    writeln!(document).unwrap();
    writeln!(document, "## Note").unwrap();
    writeln!(document, "{}", record.note).unwrap();
    writeln!(document).unwrap();
    writeln!(document, "## Code").unwrap();
    writeln!(document, "{}", code_block).unwrap();

    Ok(Rendered {
        document,
        code_block,
    })
}

/// @ai:intent Recover the formatted body from a rendered document
/// @ai:post for any output of render_document, returns the formatter's output byte for byte
/// @ai:effects pure
pub fn extract_code_block(document: &str) -> Option<&str> {
    let opening = format!("\n## Code\n{FENCE}");
    let code_section = document.rfind(&opening)? + opening.len();
    let rest = &document[code_section..];

    let body_start = rest.find('\n')? + 1;
    let body_end = rest.rfind(&format!("\n{FENCE}"))?;

    (body_start <= body_end).then(|| &rest[body_start..body_end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::formatter::Passthrough;
    use pretty_assertions::assert_eq;

    fn sample_record() -> Record {
        Record {
            author: "Ana Lima".to_string(),
            date: "2024-03-01".to_string(),
            file_label: "two_sum.go".to_string(),
            problem: "Find two indices".to_string(),
            solution: "Use a map.".to_string(),
            note: "One answer.".to_string(),
            time_complexity: "O(n)".to_string(),
            space_complexity: "O(n)".to_string(),
            body: "package main\n\nfunc main() {}\n".to_string(),
        }
    }

    #[test]
    fn test_render_fixed_template() {
        let formatters = Formatters::passthrough();
        let rendered = render_document(&sample_record(), Language::Go, &formatters).unwrap();

        let expected = "# Notes

**Author**: Ana Lima
**Date**: 2024-03-01
**File**: two_sum.go

## Problem
Find two indices

## Solution
Use a map.

**Time Complexity**: O(n)
**Space Complexity**: O(n)

## Note
One answer.

## Code
```go
package main

func main() {}

```
";
        assert_eq!(rendered.document, expected);
        assert_eq!(
            rendered.code_block,
            "```go\npackage main\n\nfunc main() {}\n\n```"
        );
    }

    #[test]
    fn test_code_block_round_trip() {
        let formatters = Formatters::standard().with(Language::Rust, |s: &str| -> Result<String> {
            Ok(s.replace("fn  main", "fn main"))
        });
        let record = Record {
            body: "fn  main() {\n    let s = \"```\";\n}\n".to_string(),
            ..sample_record()
        };

        let rendered = render_document(&record, Language::Rust, &formatters).unwrap();
        let formatted = formatters.format(Language::Rust, &record.body).unwrap();

        assert_eq!(extract_code_block(&rendered.document), Some(formatted.as_str()));
    }

    #[test]
    fn test_round_trip_with_code_heading_in_note() {
        let record = Record {
            note: "see below\n## Code\nnothing".to_string(),
            body: "package main\n".to_string(),
            ..sample_record()
        };
        let rendered = render_document(&record, Language::Go, &Formatters::passthrough()).unwrap();

        assert_eq!(extract_code_block(&rendered.document), Some("package main\n"));
    }

    #[test]
    fn test_round_trip_with_empty_body() {
        let record = Record {
            body: String::new(),
            ..sample_record()
        };
        let rendered = render_document(&record, Language::Go, &Formatters::passthrough()).unwrap();
        assert_eq!(extract_code_block(&rendered.document), Some(""));
    }

    #[test]
    fn test_format_failure_propagates() {
        let formatters = Formatters::standard().with(Language::Go, |_: &str| -> Result<String> {
            Err(Error::Format {
                program: "gofmt".to_string(),
                message: "expected 'package', found 'EOF'".to_string(),
            })
        });

        let err = render_document(&sample_record(), Language::Go, &formatters).unwrap_err();
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn test_renderer_does_not_check_required_fields() {
        let record = Record {
            author: String::new(),
            ..sample_record()
        };
        let formatters = Formatters::standard().with(Language::Go, Passthrough);

        let rendered = render_document(&record, Language::Go, &formatters).unwrap();
        assert!(rendered.document.contains("**Author**: \n"));
    }

    #[test]
    fn test_extract_from_unrelated_text() {
        assert_eq!(extract_code_block("# Just a heading\n"), None);
    }
}
