//! The fixed table of résumé checks.
//!
//! Each `Check` is an independent predicate over the text that yields zero or more
//! suggestions. All checks always run, in `Check::ALL` order; adding a check means
//! adding a variant and its arm in `evaluate`, scoring is untouched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const REQUIRED_SECTIONS: &[&str] = &["education", "experience", "projects", "skills"];

pub const ACTION_VERBS: &[&str] = &[
    "developed",
    "led",
    "created",
    "designed",
    "managed",
    "implemented",
    "analyzed",
    "organized",
];

pub const TECH_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "sql",
    "flask",
    "spring",
    "react",
    "docker",
    "aws",
    "html",
    "css",
    "javascript",
];

pub const MIN_WORDS: usize = 300;
pub const MAX_WORDS: usize = 900;
pub const MIN_READABILITY: f64 = 50.0;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+?\d[\d\s-]{8,}\d").unwrap());

/// One heuristic rule. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    Sections,
    Length,
    ActionVerbs,
    TechKeywords,
    Email,
    Phone,
    Readability,
}

/// Missing structure or contact details are warnings; wording advice is a tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Tip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub check: Check,
    pub severity: Severity,
    pub message: String,
}

/// Everything a check may look at, computed once per analysis.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub text: &'a str,
    /// `text` lowercased, for case-insensitive substring checks.
    pub lower: &'a str,
    pub word_count: usize,
    pub readability: f64,
}

/// Number of checks in the score denominator.
pub const TOTAL_CHECKS: usize = Check::ALL.len();

impl Check {
    pub const ALL: [Check; 7] = [
        Check::Sections,
        Check::Length,
        Check::ActionVerbs,
        Check::TechKeywords,
        Check::Email,
        Check::Phone,
        Check::Readability,
    ];

    pub fn severity(self) -> Severity {
        match self {
            Check::Sections | Check::Length | Check::Email | Check::Phone => Severity::Warning,
            Check::ActionVerbs | Check::TechKeywords | Check::Readability => Severity::Tip,
        }
    }

    /// Runs the check. `Sections` yields one suggestion per missing section;
    /// every other check yields at most one.
    pub fn evaluate(self, input: &CheckInput<'_>) -> Vec<Suggestion> {
        let messages: Vec<String> = match self {
            Check::Sections => REQUIRED_SECTIONS
                .iter()
                .filter(|section| !input.lower.contains(*section))
                .map(|section| format!("Missing section: {}", capitalize(section)))
                .collect(),
            Check::Length => {
                if input.word_count < MIN_WORDS {
                    vec!["Resume is too short. Aim for at least 300 words.".to_string()]
                } else if input.word_count > MAX_WORDS {
                    vec!["Resume might be too long. Keep it concise (1–2 pages).".to_string()]
                } else {
                    vec![]
                }
            }
            Check::ActionVerbs => fails(
                !contains_any(input.lower, ACTION_VERBS),
                "Add action verbs like developed, implemented, or designed to describe achievements.",
            ),
            Check::TechKeywords => fails(
                !contains_any(input.lower, TECH_KEYWORDS),
                "Consider mentioning technical skills (e.g., Python, SQL, React).",
            ),
            Check::Email => fails(
                !has_email(input.text),
                "Email not found. Add your contact email.",
            ),
            Check::Phone => fails(
                !has_phone(input.text),
                "Contact number not found. Include your phone number.",
            ),
            Check::Readability => fails(
                input.readability < MIN_READABILITY,
                "The language seems complex. Use simpler, more readable wording.",
            ),
        };

        messages
            .into_iter()
            .map(|message| Suggestion {
                check: self,
                severity: self.severity(),
                message,
            })
            .collect()
    }
}

fn fails(failed: bool, message: &str) -> Vec<String> {
    if failed {
        vec![message.to_string()]
    } else {
        vec![]
    }
}

/// Plain substring match: "led" is found inside "skilled" too.
fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn has_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

pub fn has_phone(text: &str) -> bool {
    PHONE_RE.is_match(text)
}
