//! @ai:module:intent Scan the leading comment block of a source file into a Record
//! @ai:module:layer application
//! @ai:module:public_api parse_file, parse_source, match_field, FieldKind, FieldMatch
//! @ai:module:depends_on record, language, error
//! @ai:module:stateless true
//!
//! The scan is a single pass over the lines of the file. Lines before the
//! first block comment and every line after it closes form the body. Inside
//! the comment each trimmed line is tested against [`FIELD_PATTERNS`] in
//! order and the first hit wins.
//!
//! Multi-line fields (`Solution: {` / `Note: {`) end at the first line that
//! contains a `}`. Braces are not counted, so a nested `}` ends the field early.

use crate::error::{Error, Result};
use crate::record::Record;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// @ai:intent Kind of annotation recognized on a comment line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Author,
    Date,
    FileLabel,
    Problem,
    SolutionStart,
    SolutionEnd,
    NoteStart,
    NoteEnd,
    TimeComplexity,
    SpaceComplexity,
}

/// @ai:intent Result of matching one comment line against the field patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch<'a> {
    pub kind: FieldKind,
    /// Captured value for scalar fields, trimmed. `None` for block markers.
    pub value: Option<&'a str>,
}

/// Field patterns in match priority order.
pub static FIELD_PATTERNS: LazyLock<Vec<(FieldKind, Regex)>> = LazyLock::new(|| {
    [
        (FieldKind::Author, r"(?i)Author:\s*(.+)"),
        (FieldKind::Date, r"(?i)Date:\s*(.+)"),
        (FieldKind::FileLabel, r"(?i)File:\s*(.+)"),
        (FieldKind::Problem, r"(?i)Problem:\s*(.+)"),
        (FieldKind::SolutionStart, r"(?i)Solution:\s*\{"),
        (FieldKind::SolutionEnd, r"\}"),
        (FieldKind::NoteStart, r"(?i)Note:\s*\{"),
        (FieldKind::NoteEnd, r"\}"),
        (FieldKind::TimeComplexity, r"(?i)Time Complexity:\s*(.+)"),
        (FieldKind::SpaceComplexity, r"(?i)Space Complexity:\s*(.+)"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("Invalid regex")))
    .collect()
});

const BLOCK_START: &str = "/*";
const BLOCK_END: &str = "*/";

static SOLUTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Solution:\s*\{").expect("Invalid regex"));

static NOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Note:\s*\{").expect("Invalid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BeforeComment,
    InComment,
    AfterComment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MultiLineField {
    Solution,
    Note,
}

/// @ai:intent Read a source file and extract its annotation record
/// @ai:pre path exists and is readable
/// @ai:post malformed or missing annotations yield empty fields, never an error
/// @ai:post invalid UTF-8 is replaced, not rejected
/// @ai:effects fs:read
pub fn parse_file(path: &Path) -> Result<Record> {
    let bytes = std::fs::read(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(parse_source(&String::from_utf8_lossy(&bytes)))
}

/// @ai:intent Match a trimmed comment line against the field patterns in priority order
/// @ai:post result is the first matching pattern, if any
/// @ai:example ("Author: Ana") -> Some(Author, "Ana")
/// @ai:example ("}") -> Some(SolutionEnd, None)
/// @ai:effects pure
pub fn match_field(line: &str) -> Option<FieldMatch<'_>> {
    FIELD_PATTERNS.iter().find_map(|(kind, re)| {
        re.captures(line).map(|captures| FieldMatch {
            kind: *kind,
            value: captures.get(1).map(|m| m.as_str().trim()),
        })
    })
}

/// @ai:intent Extract the annotation record from source text
/// @ai:post only the first block comment is inspected for fields
/// @ai:effects pure
pub fn parse_source(content: &str) -> Record {
    let mut record = Record::default();
    let mut state = ScanState::BeforeComment;
    let mut active: Option<MultiLineField> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim();

        match state {
            ScanState::BeforeComment if line.starts_with(BLOCK_START) => {
                state = ScanState::InComment;
            }
            ScanState::InComment if line.starts_with(BLOCK_END) => {
                state = ScanState::AfterComment;
                active = None;
            }
            ScanState::InComment => {
                if let Some(field) = match_field(line) {
                    apply_field(&mut record, &mut active, field);
                }

                // Accumulation is independent of the match above: a scalar
                // line inside an open block lands in both places.
                if let Some(target) = active {
                    let accumulator = match target {
                        MultiLineField::Solution => &mut record.solution,
                        MultiLineField::Note => &mut record.note,
                    };
                    accumulator.push_str(line);
                    accumulator.push('\n');
                }
            }
            ScanState::BeforeComment | ScanState::AfterComment => {
                record.body.push_str(raw_line);
                record.body.push('\n');
            }
        }
    }

    record.solution = finish_multiline(&record.solution, &SOLUTION_MARKER);
    record.note = finish_multiline(&record.note, &NOTE_MARKER);

    record
}

/// @ai:intent Apply one recognized field to the record or the multi-line state
/// @ai:effects pure
fn apply_field(record: &mut Record, active: &mut Option<MultiLineField>, field: FieldMatch<'_>) {
    let value = field.value.unwrap_or_default().to_string();

    match field.kind {
        FieldKind::Author => record.author = value,
        FieldKind::Date => record.date = value,
        FieldKind::FileLabel => record.file_label = value,
        FieldKind::Problem => record.problem = value,
        FieldKind::TimeComplexity => record.time_complexity = value,
        FieldKind::SpaceComplexity => record.space_complexity = value,
        FieldKind::SolutionStart => *active = Some(MultiLineField::Solution),
        FieldKind::NoteStart => *active = Some(MultiLineField::Note),
        FieldKind::SolutionEnd | FieldKind::NoteEnd => *active = None,
    }
}

/// @ai:intent Strip the closing brace and the opening marker from an accumulated block
/// @ai:pre when non-empty, the first accumulated line is the line that opened the block
/// @ai:effects pure
fn finish_multiline(accumulated: &str, marker: &Regex) -> String {
    let text = accumulated.trim();
    let text = text.strip_suffix('}').unwrap_or(text).trim();

    let text = match marker.find(text) {
        Some(m) if !text[..m.start()].contains('\n') => &text[m.end()..],
        _ => text,
    };

    text.trim().to_string()
}
