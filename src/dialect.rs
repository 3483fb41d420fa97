//! @ai:module:intent Registry of comment dialects that can carry apiDoc blocks
//! @ai:module:layer domain
//! @ai:module:public_api Dialect, Envelope, lookup, detect_dialect
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// @ai:intent Closed set of comment envelope conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    CStyle,
    TripleQuote,
    HashBlock,
    BeginEnd,
}

/// @ai:intent Opening/closing delimiters and optional per-line marker of a dialect
/// @ai:invariant start and end are never empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    pub start: &'static str,
    pub end: &'static str,
    pub line_prefix: Option<&'static str>,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::CStyle,
        Dialect::TripleQuote,
        Dialect::HashBlock,
        Dialect::BeginEnd,
    ];

    /// @ai:intent Get the envelope rules for this dialect
    /// @ai:effects pure
    pub fn envelope(&self) -> Envelope {
        match self {
            Dialect::CStyle => Envelope {
                start: "/**",
                end: "*/",
                line_prefix: Some("*"),
            },
            Dialect::TripleQuote => Envelope {
                start: "\"\"\"",
                end: "\"\"\"",
                line_prefix: None,
            },
            Dialect::HashBlock => Envelope {
                start: "#**",
                end: "#*",
                line_prefix: Some("#"),
            },
            Dialect::BeginEnd => Envelope {
                start: "=begin",
                end: "=end",
                line_prefix: None,
            },
        }
    }

    /// @ai:intent Canonical identifier of the dialect
    /// @ai:effects pure
    pub fn id(&self) -> &'static str {
        match self {
            Dialect::CStyle => "c-style",
            Dialect::TripleQuote => "triple-quote",
            Dialect::HashBlock => "hash-block",
            Dialect::BeginEnd => "begin-end",
        }
    }

    /// @ai:intent External language name the editor uses for this dialect
    /// @ai:effects pure
    pub fn alias(&self) -> &'static str {
        match self {
            Dialect::CStyle => "javascript",
            Dialect::TripleQuote => "python",
            Dialect::HashBlock => "perl",
            Dialect::BeginEnd => "ruby",
        }
    }

    /// @ai:intent Name of the source file an annotation block of this dialect is stored in
    /// @ai:effects pure
    pub fn file_name(&self) -> &'static str {
        match self {
            Dialect::CStyle => "api.js",
            Dialect::TripleQuote => "api.py",
            Dialect::HashBlock => "api.pl",
            Dialect::BeginEnd => "api.rb",
        }
    }

    /// @ai:intent Get file extensions whose comments use this dialect
    /// @ai:effects pure
    pub fn extensions(&self) -> &[&str] {
        match self {
            Dialect::CStyle => &[
                "js", "mjs", "cjs", "jsx", "ts", "tsx", "c", "h", "cpp", "java", "go",
            ],
            Dialect::TripleQuote => &["py", "pyi"],
            Dialect::HashBlock => &["pl", "pm"],
            Dialect::BeginEnd => &["rb"],
        }
    }

    /// @ai:intent Starter annotation block seeded into the editor for this dialect
    /// @ai:post result validates without diagnostics
    /// @ai:effects pure
    pub fn template(&self) -> &'static str {
        match self {
            Dialect::CStyle => concat!(
                "/**\n",
                " * @api {get} /users Get users\n",
                " * @apiName GetUsers\n",
                " * @apiGroup Users\n",
                " */\n",
            ),
            Dialect::TripleQuote => concat!(
                "\"\"\"\n",
                "@api {get} /users Get users\n",
                "@apiName GetUsers\n",
                "@apiGroup Users\n",
                "\"\"\"\n",
            ),
            Dialect::HashBlock => concat!(
                "#**\n",
                "# @api {get} /users Get users\n",
                "# @apiName GetUsers\n",
                "# @apiGroup Users\n",
                "#*\n",
            ),
            Dialect::BeginEnd => concat!(
                "=begin\n",
                "@api {get} /users Get users\n",
                "@apiName GetUsers\n",
                "@apiGroup Users\n",
                "=end\n",
            ),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        lookup(s)
    }
}

/// @ai:intent Resolve a dialect id or external language alias
/// @ai:example ("c-style") -> Ok(CStyle)
/// @ai:example ("Ruby") -> Ok(BeginEnd)
/// @ai:example ("cobol") -> Err(UnsupportedDialect)
/// @ai:effects pure
pub fn lookup(id: &str) -> Result<Dialect> {
    let wanted = id.trim().to_ascii_lowercase();

    Dialect::ALL
        .into_iter()
        .find(|d| d.id() == wanted || d.alias() == wanted)
        .ok_or_else(|| Error::UnsupportedDialect(id.to_string()))
}

/// @ai:intent Detect the comment dialect from a file path
/// @ai:post result is Some if extension is recognized
/// @ai:example ("api.py") -> Some(TripleQuote)
/// @ai:example ("notes.txt") -> None
/// @ai:effects pure
pub fn detect_dialect(path: &Path) -> Option<Dialect> {
    let ext = path.extension()?.to_str()?;

    Dialect::ALL
        .into_iter()
        .find(|d| d.extensions().contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ids() {
        for dialect in Dialect::ALL {
            assert_eq!(lookup(dialect.id()).unwrap(), dialect);
        }
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(lookup("javascript").unwrap(), Dialect::CStyle);
        assert_eq!(lookup("python").unwrap(), Dialect::TripleQuote);
        assert_eq!(lookup(" Perl ").unwrap(), Dialect::HashBlock);
        assert_eq!(lookup("RUBY").unwrap(), Dialect::BeginEnd);
    }

    #[test]
    fn test_lookup_unknown() {
        let err = lookup("cobol").unwrap_err();
        assert!(matches!(err, Error::UnsupportedDialect(ref id) if id == "cobol"));
    }

    #[test]
    fn test_envelopes_are_never_empty() {
        for dialect in Dialect::ALL {
            let envelope = dialect.envelope();
            assert!(!envelope.start.is_empty());
            assert!(!envelope.end.is_empty());
        }
    }

    #[test]
    fn test_detect_dialect() {
        assert_eq!(detect_dialect(Path::new("api/api.js")), Some(Dialect::CStyle));
        assert_eq!(detect_dialect(Path::new("api.pl")), Some(Dialect::HashBlock));
        assert_eq!(detect_dialect(Path::new("api.rb")), Some(Dialect::BeginEnd));
        assert_eq!(detect_dialect(Path::new("notes.txt")), None);
        assert_eq!(detect_dialect(Path::new("Makefile")), None);
    }

    #[test]
    fn test_serde_uses_ids() {
        let json = serde_json::to_string(&Dialect::TripleQuote).unwrap();
        assert_eq!(json, "\"triple-quote\"");
    }
}
