// Resume analysis: readability scoring, the fixed check table, and the analyzer
// that runs the checks and maps failures onto a percentage score.

pub mod analyzer;
pub mod checks;
pub mod handlers;
pub mod readability;

use once_cell::sync::Lazy;
use regex::Regex;

/// Word tokens, as counted for both the length check and the fallback readability formula.
pub(crate) static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());
