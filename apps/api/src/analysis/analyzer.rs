//! Resume analyzer: runs every check in `Check::ALL` and turns the failures into a score.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::analysis::checks::{Check, CheckInput, Suggestion, TOTAL_CHECKS};
use crate::analysis::readability::ReadabilityScorer;
use crate::analysis::WORD_RE;

pub const EXCELLENT_VERDICT: &str =
    "Excellent! Your resume looks professional and well-structured!";

/// Output of one analysis. Recomputed from scratch on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// In check order; not deduplicated.
    pub suggestions: Vec<Suggestion>,
    pub word_count: usize,
    /// Flesch Reading Ease; unclamped.
    pub readability: f64,
    /// 0 – 100
    pub score: u8,
    pub readability_backend: &'static str,
}

impl AnalysisResult {
    pub fn verdict(&self) -> String {
        match self.suggestions.len() {
            0 => EXCELLENT_VERDICT.to_string(),
            1 => "1 suggestion for improvement".to_string(),
            n => format!("{n} suggestions for improvement"),
        }
    }
}

/// Number of `\w+` tokens in the text.
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Maps the number of suggestion strings onto a 0–100 score.
///
/// Every suggestion consumes one of the `TOTAL_CHECKS` slots, so a résumé missing
/// all four sections loses four slots for what is a single rule. The fraction is
/// truncated, not rounded, and negative results clamp to 0.
pub fn compute_score(suggestion_count: usize) -> u8 {
    let total = TOTAL_CHECKS as i64;
    let passed = total - suggestion_count as i64;
    (passed * 100 / total).clamp(0, 100) as u8
}

/// Analyzes résumé text with the given readability backend. Pure: the same text
/// and backend always give the same result.
pub fn analyze(text: &str, scorer: &dyn ReadabilityScorer) -> AnalysisResult {
    let lower = text.to_lowercase();
    let input = CheckInput {
        text,
        lower: &lower,
        word_count: word_count(text),
        readability: scorer.score(text),
    };

    let suggestions: Vec<Suggestion> = Check::ALL
        .iter()
        .flat_map(|check| check.evaluate(&input))
        .collect();
    let score = compute_score(suggestions.len());

    info!(
        word_count = input.word_count,
        readability = input.readability,
        backend = scorer.name(),
        suggestions = suggestions.len(),
        score,
        "Resume analyzed"
    );

    AnalysisResult {
        suggestions,
        word_count: input.word_count,
        readability: input.readability,
        score,
        readability_backend: scorer.name(),
    }
}

/// An analyzer bound to the readability backend chosen at startup.
#[derive(Clone)]
pub struct ResumeAnalyzer {
    scorer: Arc<dyn ReadabilityScorer>,
}

impl ResumeAnalyzer {
    pub fn new(scorer: Arc<dyn ReadabilityScorer>) -> Self {
        ResumeAnalyzer { scorer }
    }

    pub fn backend(&self) -> &'static str {
        self.scorer.name()
    }

    pub fn analyze(&self, text: &str) -> AnalysisResult {
        analyze(text, self.scorer.as_ref())
    }
}
