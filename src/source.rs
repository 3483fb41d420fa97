//! @ai:module:intent Split document text into numbered lines with dialect prefixes stripped
//! @ai:module:layer application
//! @ai:module:public_api SourceLine, normalize
//! @ai:module:depends_on dialect
//! @ai:module:stateless true

use crate::dialect::Dialect;

/// @ai:intent A single line of the validated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub raw_text: String,
    pub normalized_text: String,
}

/// @ai:intent Split text into 1-indexed lines and compute canonical directive text
/// @ai:post result is never empty, numbers are 1..=len with no gaps
/// @ai:example ("", CStyle) -> [SourceLine { number: 1, raw_text: "", .. }]
/// @ai:example (" * @apiName X", CStyle) -> normalized "@apiName X"
/// @ai:effects pure
pub fn normalize(text: &str, dialect: Dialect) -> Vec<SourceLine> {
    let prefix = dialect.envelope().line_prefix;

    let mut lines: Vec<SourceLine> = text
        .lines()
        .enumerate()
        .map(|(idx, raw)| SourceLine {
            number: idx + 1,
            raw_text: raw.to_string(),
            normalized_text: normalize_line(raw, prefix),
        })
        .collect();

    if lines.is_empty() {
        lines.push(SourceLine {
            number: 1,
            raw_text: String::new(),
            normalized_text: String::new(),
        });
    }

    lines
}

/// @ai:intent Trim a line and drop the dialect's per-line marker if present
/// @ai:edge_cases marker followed by two spaces -> only one space is removed
/// @ai:effects pure
fn normalize_line(raw: &str, prefix: Option<&str>) -> String {
    let trimmed = raw.trim();

    let Some(rest) = prefix.and_then(|p| trimmed.strip_prefix(p)) else {
        return trimmed.to_string();
    };

    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => chars.as_str().to_string(),
        _ => rest.to_string(),
    }
}
