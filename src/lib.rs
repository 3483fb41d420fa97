//! @ai:module:intent apiDoc annotation validator library
//! @ai:module:layer infrastructure
//! @ai:module:public_api config, diagnostic, dialect, envelope, error, extractor, linter, output, publish, rules, source, validator
//! @ai:module:stateless true
//!
//! # apidoc-check
//!
//! Validates apiDoc annotation blocks (`@api {method} /path title`, `@apiName`,
//! `@apiGroup`, ...) embedded in C-style, triple-quoted, Perl `#**` and Ruby
//! `=begin` comments, reporting line-numbered diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use apidoc_check::validate;
//!
//! let text = "/**\n * @api {get} /users Get users\n * @apiName\n */";
//! let diagnostics = validate(text, "javascript");
//!
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].line, 3);
//! ```

pub mod config;
pub mod diagnostic;
pub mod dialect;
pub mod envelope;
pub mod error;
pub mod extractor;
pub mod linter;
pub mod output;
pub mod publish;
pub mod rules;
pub mod source;
pub mod validator;

pub use config::Config;
pub use diagnostic::{report, Diagnostic, Violation};
pub use dialect::{detect_dialect, lookup, Dialect, Envelope};
pub use error::{Error, Result};
pub use linter::{check_file, lint_directory, FileReport, LintResult};
pub use output::{format_diagnostics, format_file_report, format_lint_result, OutputFormat};
pub use publish::{DiagnosticSource, DocsGenerator, PublishOutcome, Publisher, SourceStore};
pub use rules::{DirectiveSpec, RuleSet};
pub use source::{normalize, SourceLine};
pub use validator::{validate, validate_dialect, validate_with};
