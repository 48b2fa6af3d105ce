//! Wildcard to regular expression translation.

/// Matches any run of characters (including none).
const ANY: &str = ".*";

/// Translates wildcard search text into regular expression source.
///
/// - A leading `^` becomes a start-of-line anchor instead of a leading `.*`.
/// - A trailing `$` becomes an end-of-line anchor instead of a trailing `.*`.
/// - Each `*` becomes `.*`.
/// - Everything else is escaped and matched literally, including any `^` or
///   `$` that isn't in an anchoring position.
///
/// ```
/// use sift_query::wildcard_to_regex;
///
/// assert_eq!(wildcard_to_regex("ABC*"), r".*ABC.*.*");
/// assert_eq!(wildcard_to_regex("^$4.99$"), r"^\$4\.99$");
/// ```
pub fn translate(text: &str) -> String {
    // The anchor characters are consumed before escaping, so `^ABC` only
    // matches lines starting with `ABC`, never lines starting with `^ABC`.
    let (start, body) = match text.strip_prefix('^') {
        Some(rest) => ("^", rest),
        None => (ANY, text),
    };
    let (body, end) = match body.strip_suffix('$') {
        Some(rest) => (rest, "$"),
        None => (body, ANY),
    };
    let body = body.split('*').map(regex::escape).collect::<Vec<_>>().join(ANY);
    format!("{start}{body}{end}")
}
