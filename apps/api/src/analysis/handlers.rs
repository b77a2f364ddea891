use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::analysis::analyzer::AnalysisResult;
use crate::errors::AppError;
use crate::extraction::{extract, has_text, Document, DocumentKind};
use crate::state::AppState;

/// Multipart field names accepted for the uploaded file.
const UPLOAD_FIELDS: &[&str] = &["resume", "file"];

pub const ATS_TIP: &str = "Tailor your resume for each job by adding keywords from the job description for better ATS results.";

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub filename: Option<String>,
    pub document_kind: Option<DocumentKind>,
    pub extracted_text: String,
    pub verdict: String,
    pub tip: &'static str,
    pub result: AnalysisResult,
}

impl AnalysisResponse {
    fn new(document: Option<(String, DocumentKind)>, text: String, result: AnalysisResult) -> Self {
        let (filename, document_kind) = document.unzip();
        AnalysisResponse {
            analysis_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            filename,
            document_kind,
            extracted_text: text,
            verdict: result.verdict(),
            tip: ATS_TIP,
            result,
        }
    }
}

/// POST /api/v1/analyze
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let document = read_upload(multipart).await?;
    if document.kind == DocumentKind::Unsupported {
        return Err(AppError::UnsupportedFormat(document.filename));
    }

    let _permit = state
        .admission
        .acquire()
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let filename = document.filename.clone();
    let kind = document.kind;
    let text = tokio::task::spawn_blocking(move || extract(&document))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    if !has_text(&text) {
        return Err(AppError::EmptyExtraction(filename));
    }

    let result = state.analyzer.analyze(&text);
    Ok(Json(AnalysisResponse::new(Some((filename, kind)), text, result)))
}

/// POST /api/v1/analyze/text
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    if !has_text(&req.text) {
        return Err(AppError::Validation("text must not be empty".to_string()));
    }

    let _permit = state
        .admission
        .acquire()
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    let result = state.analyzer.analyze(&req.text);
    Ok(Json(AnalysisResponse::new(None, req.text, result)))
}

/// Pulls the first file field out of the form. Other fields are drained and ignored.
async fn read_upload(mut multipart: Multipart) -> Result<Document, AppError> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if !UPLOAD_FIELDS.contains(&name.as_str()) {
            debug!(field = %name, "Ignoring unknown form field");
            field.bytes().await?;
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(format!("Field '{name}' is not a file")))?;
        let bytes = field.bytes().await?;

        return Ok(Document::from_upload(filename, bytes));
    }

    Err(AppError::Validation(
        "No resume uploaded: expected a 'resume' or 'file' field".to_string(),
    ))
}
