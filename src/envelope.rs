//! @ai:module:intent Check that the document is bounded by the dialect's delimiters
//! @ai:module:layer application
//! @ai:module:public_api check_envelope
//! @ai:module:depends_on dialect, source, diagnostic
//! @ai:module:stateless true

use crate::diagnostic::{Diagnostic, Violation};
use crate::dialect::Dialect;
use crate::source::SourceLine;

/// @ai:intent Verify the first and last lines carry the start and end tokens
/// @ai:pre lines is non-empty, as produced by normalize
/// @ai:post at most two diagnostics, start finding before end finding
/// @ai:context Raw text is used so a prefix marker never eats part of the token
/// @ai:edge_cases single-line document -> both checks run on the same line
/// @ai:effects pure
pub fn check_envelope(lines: &[SourceLine], dialect: Dialect) -> Vec<Diagnostic> {
    let envelope = dialect.envelope();
    let mut diagnostics = Vec::new();

    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return diagnostics;
    };

    if !first.raw_text.trim_start().starts_with(envelope.start) {
        diagnostics.push(Diagnostic::new(
            first.number,
            Violation::EnvelopeStart(envelope.start),
        ));
    }

    if !last.raw_text.trim_end().ends_with(envelope.end) {
        diagnostics.push(Diagnostic::new(
            last.number,
            Violation::EnvelopeEnd(envelope.end),
        ));
    }

    diagnostics
}
