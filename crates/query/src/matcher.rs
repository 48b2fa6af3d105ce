use memchr::memmem::Finder;
use regex::Regex;

#[derive(Debug, Clone)]
enum Strategy {
    /// Substring search. When case-insensitive, the needle is stored
    /// lowercased and each line is lowercased before searching.
    Literal { finder: Finder<'static>, lowercase: bool },
    Pattern(Regex),
}

/// A compiled search query, tested line by line.
///
/// Built by [`SearchQuery::compile`](crate::SearchQuery::compile) and
/// immutable afterwards, so one matcher can be shared by every worker of a
/// scan.
#[derive(Debug, Clone)]
pub struct Matcher {
    strategy: Strategy,
}
impl Matcher {
    pub(crate) fn literal(needle: &str, case_insensitive: bool) -> Self {
        let finder = if case_insensitive {
            Finder::new(needle.to_lowercase().as_bytes()).into_owned()
        } else {
            Finder::new(needle.as_bytes()).into_owned()
        };
        Self {
            strategy: Strategy::Literal { finder, lowercase: case_insensitive },
        }
    }

    pub(crate) fn pattern(regex: Regex) -> Self {
        Self { strategy: Strategy::Pattern(regex) }
    }

    /// Returns `true` if a single line satisfies the query.
    pub fn is_match(&self, line: &str) -> bool {
        match &self.strategy {
            Strategy::Literal { finder, lowercase: true } => finder.find(line.to_lowercase().as_bytes()).is_some(),
            Strategy::Literal { finder, lowercase: false } => finder.find(line.as_bytes()).is_some(),
            Strategy::Pattern(regex) => regex.is_match(line),
        }
    }

    /// Index of the first line satisfying the query.
    ///
    /// Lines are tested independently; the query is never matched across a
    /// line break.
    pub fn find<S: AsRef<str>>(&self, lines: &[S]) -> Option<usize> {
        lines.iter().position(|line| self.is_match(line.as_ref()))
    }

    /// Returns `true` if any line satisfies the query.
    pub fn matches<S: AsRef<str>>(&self, lines: &[S]) -> bool {
        self.find(lines).is_some()
    }

    /// Source of the regular expression behind a wildcard query, if any.
    pub fn pattern_source(&self) -> Option<&str> {
        match &self.strategy {
            Strategy::Literal { .. } => None,
            Strategy::Pattern(regex) => Some(regex.as_str()),
        }
    }
}
