//! @ai:module:intent Line-numbered validation findings and their fixed ordering
//! @ai:module:layer domain
//! @ai:module:public_api Diagnostic, Violation, report
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// @ai:intent Kinds of document problems, rendered into diagnostic messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("unsupported dialect `{0}`, expected one of c-style, triple-quote, hash-block, begin-end")]
    UnsupportedDialect(String),

    #[error("expected comment to start with `{0}`")]
    EnvelopeStart(&'static str),

    #[error("expected comment to end with `{0}`")]
    EnvelopeEnd(&'static str),

    #[error("missing required `@api` block inside the comment")]
    MissingPrimaryDirective,

    #[error("invalid `{key}` directive, expected `{expected}`")]
    DirectiveFormat {
        key: &'static str,
        expected: &'static str,
    },
}

/// @ai:intent A single finding bound to a source line
/// @ai:invariant line is 0 only for document-level findings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: usize,
    pub message: String,
}

impl Diagnostic {
    /// @ai:intent Build a diagnostic from a violation at a given line
    pub fn new(line: usize, violation: Violation) -> Self {
        Self {
            line,
            message: violation.to_string(),
        }
    }
}

/// @ai:intent Concatenate envelope and rule findings in reporting order
/// @ai:pre rule findings are already ordered primary first, then secondary by declaration
/// @ai:post empty result is the only success signal
/// @ai:effects pure
pub fn report(envelope: Vec<Diagnostic>, rules: Vec<Diagnostic>) -> Vec<Diagnostic> {
    let mut diagnostics = envelope;
    diagnostics.extend(rules);
    diagnostics
}
