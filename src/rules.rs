//! @ai:module:intent Declarative grammar for apiDoc directives and the engine applying it
//! @ai:module:layer domain
//! @ai:module:public_api DirectiveSpec, RuleSet
//! @ai:module:depends_on extractor, diagnostic, error
//! @ai:module:stateless true

use crate::diagnostic::{Diagnostic, Violation};
use crate::error::{Error, Result};
use crate::extractor::Extraction;
use crate::source::SourceLine;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// `[(group)] [{type}] field [description]`, where field may be `[optional=default]`.
const FIELD_ARGS: &str =
    r"(\s+\([^)]+\))?(\s+\{[^}]+\})?\s+(\[[^\]\s][^\]]*\]|[^\s\[\]{}()]+)(\s+.*)?";

/// `[{type}] title`
const EXAMPLE_ARGS: &str = r"(\s+\{[^}]+\})?\s+\S.*";

/// Key, required, argument pattern (matched right after the key), expected format.
const STANDARD_DIRECTIVES: &[(&str, bool, &str, &str)] = &[
    (
        "@api",
        true,
        r"\s+\{(?i:get|post|put|delete|patch|options|head)\}\s+/\S*\s+\S.*",
        "@api {get|post|put|delete|patch|options|head} /path title",
    ),
    ("@apiName", false, r"\s+\S+", "@apiName <name>"),
    ("@apiGroup", false, r"\s+\S.*", "@apiGroup <group>"),
    ("@apiVersion", false, r"\s+\d+\.\d+\.\d+", "@apiVersion <major.minor.patch>"),
    ("@apiDescription", false, r"(\s.*)?", "@apiDescription [text]"),
    ("@apiPermission", false, r"\s+\S+", "@apiPermission <name>"),
    ("@apiHeader", false, FIELD_ARGS, "@apiHeader [(group)] [{type}] field [description]"),
    ("@apiParam", false, FIELD_ARGS, "@apiParam [(group)] [{type}] field [description]"),
    ("@apiQuery", false, FIELD_ARGS, "@apiQuery [(group)] [{type}] field [description]"),
    ("@apiBody", false, FIELD_ARGS, "@apiBody [(group)] [{type}] field [description]"),
    ("@apiSuccess", false, FIELD_ARGS, "@apiSuccess [(group)] [{type}] field [description]"),
    ("@apiError", false, FIELD_ARGS, "@apiError [(group)] [{type}] field [description]"),
    ("@apiExample", false, EXAMPLE_ARGS, "@apiExample [{type}] title"),
    ("@apiHeaderExample", false, EXAMPLE_ARGS, "@apiHeaderExample [{type}] title"),
    ("@apiParamExample", false, EXAMPLE_ARGS, "@apiParamExample [{type}] title"),
    ("@apiSuccessExample", false, EXAMPLE_ARGS, "@apiSuccessExample [{type}] title"),
    ("@apiErrorExample", false, EXAMPLE_ARGS, "@apiErrorExample [{type}] title"),
    ("@apiSampleRequest", false, r"\s+\S+", "@apiSampleRequest <url|off>"),
    ("@apiUse", false, r"\s+\S+", "@apiUse <name>"),
];

static STANDARD: LazyLock<RuleSet> = LazyLock::new(|| {
    let specs = STANDARD_DIRECTIVES
        .iter()
        .map(|&(key, required, args, expected)| DirectiveSpec::new(key, required, args, expected))
        .collect::<Result<Vec<_>>>()
        .expect("standard directive patterns compile");

    RuleSet::new(specs).expect("standard directive table is well-formed")
});

/// @ai:intent Grammar of a single directive
#[derive(Debug, Clone)]
pub struct DirectiveSpec {
    pub key: &'static str,
    pub required: bool,
    pub pattern: Regex,
    pub expected: &'static str,
}

impl DirectiveSpec {
    /// @ai:intent Compile a directive whose argument pattern follows the literal key
    /// @ai:pre key starts with '@' and contains no whitespace
    /// @ai:post pattern is anchored to the whole normalized line
    /// @ai:effects pure
    pub fn new(
        key: &'static str,
        required: bool,
        args: &str,
        expected: &'static str,
    ) -> Result<Self> {
        let pattern = Regex::new(&format!("^{}{}$", regex::escape(key), args)).map_err(|e| {
            Error::InvalidPattern {
                key: key.to_string(),
                source: e,
            }
        })?;

        Ok(Self {
            key,
            required,
            pattern,
            expected,
        })
    }

    /// @ai:intent Check a normalized line against this directive's grammar
    /// @ai:effects pure
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    fn violation(&self) -> Violation {
        Violation::DirectiveFormat {
            key: self.key,
            expected: self.expected,
        }
    }
}

/// @ai:intent One required primary directive plus optional secondary directives
/// @ai:invariant secondary keys are unique and differ from the primary key
#[derive(Debug, Clone)]
pub struct RuleSet {
    primary: DirectiveSpec,
    secondary: Vec<DirectiveSpec>,
    keys: HashSet<&'static str>,
}

impl RuleSet {
    /// @ai:intent Build a rule set from a directive table
    /// @ai:pre exactly one spec is required and keys are unique
    /// @ai:post secondary directives keep table order
    /// @ai:effects pure
    pub fn new(specs: Vec<DirectiveSpec>) -> Result<Self> {
        let mut keys = HashSet::new();
        let mut primary: Option<DirectiveSpec> = None;
        let mut secondary = Vec::new();

        for spec in specs {
            if !keys.insert(spec.key) {
                return Err(Error::InvalidRuleSet(format!(
                    "directive `{}` declared twice",
                    spec.key
                )));
            }

            if !spec.required {
                secondary.push(spec);
            } else if let Some(existing) = &primary {
                return Err(Error::InvalidRuleSet(format!(
                    "both `{}` and `{}` are required, only one primary directive is allowed",
                    existing.key, spec.key
                )));
            } else {
                primary = Some(spec);
            }
        }

        let primary = primary
            .ok_or_else(|| Error::InvalidRuleSet("no required primary directive".to_string()))?;

        Ok(Self {
            primary,
            secondary,
            keys,
        })
    }

    /// @ai:intent Shared apiDoc rule set, compiled once
    /// @ai:effects pure
    pub fn standard() -> &'static RuleSet {
        &STANDARD
    }

    pub fn primary(&self) -> &DirectiveSpec {
        &self.primary
    }

    pub fn secondary(&self) -> &[DirectiveSpec] {
        &self.secondary
    }

    /// @ai:intent Check whether a token names a directive of this rule set
    /// @ai:effects pure
    pub fn is_directive(&self, token: &str) -> bool {
        self.keys.contains(token)
    }

    /// @ai:intent Apply the grammar to extracted directive lines
    /// @ai:pre extraction was produced from lines with this rule set
    /// @ai:post primary findings precede secondary findings, secondary follow table order
    /// @ai:edge_cases no @api line -> one finding at line 2, or the last line if shorter
    /// @ai:edge_cases several @api lines -> only the first is checked
    /// @ai:effects pure
    pub fn validate(&self, extraction: &Extraction<'_>, lines: &[SourceLine]) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        match extraction.lines(self.primary.key).first() {
            None => {
                let line = lines.get(1).or(lines.last()).map_or(0, |l| l.number);
                diagnostics.push(Diagnostic::new(line, Violation::MissingPrimaryDirective));
            }
            Some(line) if !self.primary.matches(&line.normalized_text) => {
                diagnostics.push(Diagnostic::new(line.number, self.primary.violation()));
            }
            Some(_) => {}
        }

        for spec in &self.secondary {
            for line in extraction.lines(spec.key) {
                if !spec.matches(&line.normalized_text) {
                    diagnostics.push(Diagnostic::new(line.number, spec.violation()));
                }
            }
        }

        diagnostics
    }
}
