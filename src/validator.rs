//! @ai:module:intent Run the full validation pipeline over one annotation document
//! @ai:module:layer application
//! @ai:module:public_api validate, validate_dialect, validate_with
//! @ai:module:depends_on dialect, source, envelope, extractor, rules, diagnostic
//! @ai:module:stateless true
//! @ai:module:thread_safe true

use crate::diagnostic::{report, Diagnostic, Violation};
use crate::dialect::{lookup, Dialect};
use crate::envelope::check_envelope;
use crate::extractor::extract;
use crate::rules::RuleSet;
use crate::source::normalize;
use tracing::debug;

/// @ai:intent Validate a document written in the dialect named by `dialect_id`
/// @ai:post empty result means the document is valid
/// @ai:example ("/**\n * @api {get} /x t\n */", "c-style") -> []
/// @ai:example ("...", "cobol") -> [Diagnostic { line: 0, .. }]
/// @ai:edge_cases unknown dialect -> single line-0 finding, nothing else is checked
/// @ai:idempotent true
/// @ai:effects pure
pub fn validate(text: &str, dialect_id: &str) -> Vec<Diagnostic> {
    match lookup(dialect_id) {
        Ok(dialect) => validate_dialect(text, dialect),
        Err(_) => {
            debug!(dialect = dialect_id, "rejecting unsupported dialect");
            vec![Diagnostic::new(
                0,
                Violation::UnsupportedDialect(dialect_id.to_string()),
            )]
        }
    }
}

/// @ai:intent Validate a document against the standard apiDoc rule set
/// @ai:effects pure
pub fn validate_dialect(text: &str, dialect: Dialect) -> Vec<Diagnostic> {
    validate_with(text, dialect, RuleSet::standard())
}

/// @ai:intent Validate a document against a caller-provided rule set
/// @ai:post envelope findings first, then primary, then secondary in declaration order
/// @ai:effects pure
pub fn validate_with(text: &str, dialect: Dialect, rules: &RuleSet) -> Vec<Diagnostic> {
    let lines = normalize(text, dialect);
    let envelope = check_envelope(&lines, dialect);
    let extraction = extract(&lines, rules);
    let findings = rules.validate(&extraction, &lines);

    debug!(
        %dialect,
        lines = lines.len(),
        directives = extraction.len(),
        envelope = envelope.len(),
        findings = findings.len(),
        "validated annotation block"
    );

    report(envelope, findings)
}
