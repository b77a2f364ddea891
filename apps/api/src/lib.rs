//! Résumé analysis: plain-text extraction from PDF/DOCX uploads and a fixed battery
//! of heuristic checks (sections, length, action verbs, technical keywords, contact
//! details, readability) that produce suggestions and a 0–100 score.
//!
//! The library boundary is [`extract`] and [`analyze`]; the binary serves both over HTTP.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod routes;
pub mod state;

pub use analysis::analyzer::{analyze, AnalysisResult, ResumeAnalyzer};
pub use analysis::readability::{ReadabilityBackend, ReadabilityScorer};
pub use extraction::{extract, Document, DocumentKind, ExtractError};
