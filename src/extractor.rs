//! @ai:module:intent Locate directive lines inside a normalized annotation block
//! @ai:module:layer application
//! @ai:module:public_api Extraction, extract
//! @ai:module:depends_on source, rules
//! @ai:module:stateless true

use crate::rules::RuleSet;
use crate::source::SourceLine;
use std::collections::HashMap;

/// @ai:intent Directive key to the lines carrying it, in document order
#[derive(Debug, Default)]
pub struct Extraction<'a> {
    matches: HashMap<&'a str, Vec<&'a SourceLine>>,
}

impl<'a> Extraction<'a> {
    /// @ai:intent Get every line carrying the given directive
    /// @ai:post lines are in ascending line-number order
    /// @ai:effects pure
    pub fn lines(&self, key: &str) -> &[&'a SourceLine] {
        self.matches.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// @ai:intent Number of lines recognized as any known directive
    pub fn len(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// @ai:intent Group lines by the directive their normalized text opens with
/// @ai:pre lines are in document order
/// @ai:post a line matches a key only when the key is followed by whitespace or end of line
/// @ai:example ("@apiName X") -> matched as @apiName, never as @api
/// @ai:edge_cases duplicate directives -> all kept, uniqueness is not enforced here
/// @ai:effects pure
pub fn extract<'a>(lines: &'a [SourceLine], rules: &RuleSet) -> Extraction<'a> {
    let mut extraction = Extraction::default();

    for line in lines {
        // The first whitespace-delimited token is the key; an indented line yields "".
        let Some(token) = line.normalized_text.split(char::is_whitespace).next() else {
            continue;
        };

        if rules.is_directive(token) {
            extraction.matches.entry(token).or_default().push(line);
        }
    }

    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::source::normalize;

    #[test]
    fn test_primary_not_matched_by_longer_keys() {
        let lines = normalize(
            "/**\n * @apiName GetUsers\n * @api {get} /users Get\n * @apiGroup Users\n */",
            Dialect::CStyle,
        );
        let extraction = extract(&lines, RuleSet::standard());

        let primary: Vec<_> = extraction.lines("@api").iter().map(|l| l.number).collect();
        assert_eq!(primary, vec![3]);
        assert_eq!(extraction.lines("@apiName")[0].number, 2);
        assert_eq!(extraction.lines("@apiGroup")[0].number, 4);
        assert_eq!(extraction.len(), 3);
    }

    #[test]
    fn test_bare_key_matches() {
        let lines = normalize("\"\"\"\n@apiName\n\"\"\"", Dialect::TripleQuote);
        let extraction = extract(&lines, RuleSet::standard());
        assert_eq!(extraction.lines("@apiName").len(), 1);
    }

    #[test]
    fn test_glued_suffix_is_not_a_directive() {
        let lines = normalize("=begin\n@api{get} /x t\n@apiSuccessExample {json} OK\n=end", Dialect::BeginEnd);
        let extraction = extract(&lines, RuleSet::standard());
        assert!(extraction.lines("@api").is_empty());
        assert!(extraction.lines("@apiSuccess").is_empty());
        assert_eq!(extraction.lines("@apiSuccessExample").len(), 1);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let lines = normalize(
            "#**\n# @apiGroup A\n# text\n# @apiGroup B\n#*",
            Dialect::HashBlock,
        );
        let extraction = extract(&lines, RuleSet::standard());
        let numbers: Vec<_> = extraction.lines("@apiGroup").iter().map(|l| l.number).collect();
        assert_eq!(numbers, vec![2, 4]);
    }

    #[test]
    fn test_unknown_tags_ignored() {
        let lines = normalize("/**\n * @param x\n * @apiFoo bar\n */", Dialect::CStyle);
        assert!(extract(&lines, RuleSet::standard()).is_empty());
    }
}
