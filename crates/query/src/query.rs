use crate::error::{ErrorKind, Result};
use crate::matcher::Matcher;
use crate::wildcard;
use exn::ResultExt;
use regex::RegexBuilder;
use tracing::instrument;

/// What to search for, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchQuery {
    pub text: String,
    pub case_insensitive: bool,
    /// Treat `*` as "any run of characters", with optional `^`/`$` anchors.
    pub wildcard: bool,
}
impl SearchQuery {
    /// A case-sensitive substring query.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case_insensitive: false,
            wildcard: false,
        }
    }

    /// A case-sensitive wildcard query.
    pub fn wildcard(text: impl Into<String>) -> Self {
        Self {
            wildcard: true,
            ..Self::literal(text)
        }
    }

    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    /// Compiles the query into a [`Matcher`].
    ///
    /// # Errors
    /// - [`ErrorKind::EmptyQuery`] if the text is empty or whitespace.
    /// - [`ErrorKind::InvalidPattern`] if the pattern derived from a wildcard
    ///   query is rejected by the regex engine.
    #[instrument(skip_all, fields(text = %self.text, wildcard = self.wildcard, case_insensitive = self.case_insensitive))]
    pub fn compile(&self) -> Result<Matcher> {
        if self.text.trim().is_empty() {
            exn::bail!(ErrorKind::EmptyQuery);
        }
        if !self.wildcard {
            return Ok(Matcher::literal(&self.text, self.case_insensitive));
        }
        let pattern = wildcard::translate(&self.text);
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(self.case_insensitive)
            .build()
            .or_raise(|| ErrorKind::InvalidPattern(pattern.clone()))?;
        tracing::debug!(pattern = %pattern, "Compiled wildcard query");
        Ok(Matcher::pattern(regex))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("\t\n")]
    fn test_empty_text_is_rejected(#[case] text: &str) {
        for query in [SearchQuery::literal(text), SearchQuery::wildcard(text)] {
            let err = query.compile().unwrap_err();
            assert_eq!(*err, ErrorKind::EmptyQuery);
        }
    }

    #[test]
    fn test_builders() {
        let query = SearchQuery::wildcard("MILK*").case_insensitive(true);
        assert_eq!(
            query,
            SearchQuery {
                text: "MILK*".to_string(),
                case_insensitive: true,
                wildcard: true,
            }
        );
        assert!(!SearchQuery::literal("MILK").wildcard);
    }

    #[rstest]
    #[case::literal_case_sensitive("abc", false, false, "xxABCxx", false)]
    #[case::literal_case_insensitive("abc", true, false, "xxABCxx", true)]
    #[case::wildcard_case_sensitive("a*c", false, true, "ABC", false)]
    #[case::wildcard_case_insensitive("a*c", true, true, "ABC", true)]
    fn test_case_sensitivity(
        #[case] text: &str,
        #[case] case_insensitive: bool,
        #[case] wildcard: bool,
        #[case] line: &str,
        #[case] expected: bool,
    ) {
        let query = SearchQuery {
            text: text.to_string(),
            case_insensitive,
            wildcard,
        };
        assert_eq!(query.compile().unwrap().is_match(line), expected);
    }

    #[rstest]
    #[case("ABC*", "ABC", true)]
    #[case("ABC*", "ABCDEF", true)]
    #[case("*ABC", "ABC", true)]
    #[case("*ABC", "XYZABC", true)]
    #[case("A*C", "ABC", true)]
    #[case("A*C", "AxyzC", true)]
    #[case("A*C", "AB", false)]
    #[case("*.99", "MILK 2% GAL $4.99", true)]
    #[case("*.99", "EGGS DOZEN $3.49", false)]
    #[case("*.99", "MILK 2% GAL $4x99", false)]
    fn test_wildcards(#[case] text: &str, #[case] line: &str, #[case] expected: bool) {
        let matcher = SearchQuery::wildcard(text).compile().unwrap();
        assert_eq!(matcher.is_match(line), expected, "{text:?} against {line:?}");
    }

    #[rstest]
    #[case("^ABC", "ABCDEF", true)]
    #[case("^ABC", "xABC", false)]
    #[case("ABC$", "xxABC", true)]
    #[case("ABC$", "ABCx", false)]
    #[case("^A*C$", "AxyzC", true)]
    #[case("^A*C$", "AxyzCx", false)]
    #[case("^$4.99", "$4.99 MILK", true)]
    #[case("^$4.99", "MILK $4.99", false)]
    #[case("TOTAL $*", "TOTAL $12.99", true)]
    #[case("a^b", "xa^by", true)]
    #[case("^^A", "^A", true)]
    #[case("^^A", "A", false)]
    fn test_anchored_wildcards(#[case] text: &str, #[case] line: &str, #[case] expected: bool) {
        let matcher = SearchQuery::wildcard(text).compile().unwrap();
        assert_eq!(matcher.is_match(line), expected, "{text:?} against {line:?}");
    }

    #[rstest]
    #[case("$4.99", "MILK 2% GAL $4.99", true)]
    #[case("*", "no stars here", false)]
    #[case("*", "a * b", true)]
    #[case("^MILK", "MILK", false)]
    fn test_literal_mode_has_no_special_characters(#[case] text: &str, #[case] line: &str, #[case] expected: bool) {
        let matcher = SearchQuery::literal(text).compile().unwrap();
        assert_eq!(matcher.is_match(line), expected);
    }
}
