//! Search queries and the line matchers they compile into.
//!
//! A [`SearchQuery`] is what a person typed plus two switches: case
//! sensitivity and wildcard mode. Compiling it produces a [`Matcher`] that is
//! built once per scan and then tested against every line of every document.
//!
//! # Literal queries
//! The text is searched for as-is (ordinal substring containment).
//!
//! # Wildcard queries
//! `*` stands for "any run of characters" and every other character is
//! literal. A leading `^` pins the match to the start of the line, a trailing
//! `$` pins it to the end; without them the pattern may match anywhere within
//! the line.
//!
//! ```
//! use sift_query::SearchQuery;
//!
//! let matcher = SearchQuery::wildcard("A*C").compile().unwrap();
//! assert!(matcher.is_match("ABC"));
//! assert!(matcher.is_match("AxyzC"));
//! assert!(!matcher.is_match("AB"));
//! ```

pub mod error;
mod matcher;
mod query;
mod wildcard;

pub use crate::matcher::Matcher;
pub use crate::query::SearchQuery;
pub use crate::wildcard::translate as wildcard_to_regex;
