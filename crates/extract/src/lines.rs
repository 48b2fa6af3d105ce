//! Line splitting shared by every extractor.

/// Splits extracted text into the ordered, non-empty lines that get searched.
///
/// Both `\n` and `\r\n` terminate a line. Empty lines carry nothing worth
/// matching and are dropped; lines made of whitespace are kept as-is.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().filter(|line| !line.is_empty()).map(str::to_owned).collect()
}
