//! Readability scoring with pluggable Flesch Reading Ease backends.
//!
//! Default: `FleschScorer` (lexicon tokens, sentence segmentation, vowel-group
//! syllable counting). Alternative: `FallbackScorer`, the cheap regex approximation
//! (punctuation count for sentences, raw vowel count for syllables).
//!
//! `AppState` holds the chosen backend inside `ResumeAnalyzer` as an
//! `Arc<dyn ReadabilityScorer>`, selected once at startup via `READABILITY_BACKEND`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::WORD_RE;

const FLESCH_BASE: f64 = 206.835;
const SENTENCE_LENGTH_WEIGHT: f64 = 1.015;
const SYLLABLE_WEIGHT: f64 = 84.6;

/// Scores text on the Flesch Reading Ease scale. Higher is easier to read.
///
/// Results are not clamped: values below 0 or above 100 are valid output.
pub trait ReadabilityScorer: Send + Sync {
    /// Short identifier reported alongside results ("flesch" | "fallback").
    fn name(&self) -> &'static str;

    fn score(&self, text: &str) -> f64;
}

fn flesch_reading_ease(words: f64, sentences: f64, syllables: f64) -> f64 {
    FLESCH_BASE
        - SENTENCE_LENGTH_WEIGHT * (words / sentences)
        - SYLLABLE_WEIGHT * (syllables / words)
}

/// Rounds on the exact binary value, so `1.15` (stored just below) becomes `1.1`.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

// ────────────────────────────────────────────────────────────────────────────
// FleschScorer (default backend)
// ────────────────────────────────────────────────────────────────────────────

static LEXICON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\w']+").unwrap());
static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]*").unwrap());

/// Textbook Flesch Reading Ease, rounded to two decimals.
///
/// - words: runs of word characters and apostrophes
/// - sentences: text up to a run of `.`, `!` or `?`; fragments of two words or
///   fewer (initials, "Jane Doe.", bare headings) are not counted; at least 1
/// - syllables: per word, see `count_syllables`
///
/// Text without any words scores 0.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleschScorer;

impl ReadabilityScorer for FleschScorer {
    fn name(&self) -> &'static str {
        "flesch"
    }

    fn score(&self, text: &str) -> f64 {
        let words: Vec<&str> = LEXICON_RE.find_iter(text).map(|m| m.as_str()).collect();
        if words.is_empty() {
            return 0.0;
        }

        let sentences = count_sentences(text);
        let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

        round_to(
            flesch_reading_ease(words.len() as f64, sentences as f64, syllables as f64),
            2,
        )
    }
}

fn count_sentences(text: &str) -> usize {
    SENTENCE_RE
        .find_iter(text)
        .filter(|m| LEXICON_RE.find_iter(m.as_str()).count() > 2)
        .count()
        .max(1)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Heuristic English syllable count: vowel groups, minus a silent trailing `e`
/// (but not `-le`, as in "table"). Every word counts at least one syllable,
/// including numbers.
pub fn count_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();

    let mut groups = 0usize;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let n = letters.len();
    if n > 2 && groups > 1 && letters[n - 1] == 'e' {
        let before = letters[n - 2];
        if !is_vowel(before) && before != 'l' {
            groups -= 1;
        }
    }

    groups.max(1)
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackScorer (regex approximation)
// ────────────────────────────────────────────────────────────────────────────

static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]").unwrap());
const FALLBACK_VOWELS: &str = "aeiouyAEIOUY";

/// Regex-derived approximation, rounded to one decimal:
/// sentences = count of `.`/`!`/`?`, words = `\w+` matches, syllables = vowel
/// characters (`aeiouy`, either case) across whitespace-split tokens. Each count
/// is at least 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackScorer;

impl ReadabilityScorer for FallbackScorer {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn score(&self, text: &str) -> f64 {
        let sentences = SENTENCE_END_RE.find_iter(text).count().max(1);
        let words = WORD_RE.find_iter(text).count().max(1);
        let syllables = text
            .split_whitespace()
            .map(|token| {
                token
                    .chars()
                    .filter(|c| FALLBACK_VOWELS.contains(*c))
                    .count()
            })
            .sum::<usize>()
            .max(1);

        round_to(
            flesch_reading_ease(words as f64, sentences as f64, syllables as f64),
            1,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Backend selection
// ────────────────────────────────────────────────────────────────────────────

/// Which readability implementation to install at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadabilityBackend {
    #[default]
    Flesch,
    Fallback,
}

#[derive(Debug, Error)]
#[error("unknown readability backend '{0}' (expected 'flesch' or 'fallback')")]
pub struct UnknownBackend(pub String);

impl FromStr for ReadabilityBackend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flesch" => Ok(ReadabilityBackend::Flesch),
            "fallback" => Ok(ReadabilityBackend::Fallback),
            _ => Err(UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for ReadabilityBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadabilityBackend::Flesch => f.write_str("flesch"),
            ReadabilityBackend::Fallback => f.write_str("fallback"),
        }
    }
}

impl ReadabilityBackend {
    pub fn build(self) -> Arc<dyn ReadabilityScorer> {
        match self {
            ReadabilityBackend::Flesch => Arc::new(FleschScorer),
            ReadabilityBackend::Fallback => Arc::new(FallbackScorer),
        }
    }
}
