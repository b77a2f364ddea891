pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(handlers::handle_analyze_upload))
        .route("/api/v1/analyze/text", post(handlers::handle_analyze_text))
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::fixtures::{strong_resume, weak_resume};
    use crate::config::Config;
    use crate::extraction::test_support::{build_docx, build_pdf};

    const BOUNDARY: &str = "resume-analyzer-test-boundary";

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload(field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field, filename, bytes)))
            .unwrap()
    }

    fn analyze_text(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/analyze/text")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-analyzer");
    }

    #[tokio::test]
    async fn test_analyze_text_strong_resume() {
        let response = app()
            .oneshot(analyze_text(json!({ "text": strong_resume() })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["result"]["score"], 100);
        assert_eq!(body["result"]["suggestions"], json!([]));
        assert_eq!(body["result"]["readability_backend"], "flesch");
        assert_eq!(
            body["verdict"],
            "Excellent! Your resume looks professional and well-structured!"
        );
        assert!(body["filename"].is_null());
        assert!(body["analysis_id"].is_string());
    }

    #[tokio::test]
    async fn test_analyze_text_weak_resume() {
        let response = app()
            .oneshot(analyze_text(json!({ "text": weak_resume() })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["result"]["score"], 0);
        let suggestions = body["result"]["suggestions"].as_array().unwrap();
        assert_eq!(suggestions.len(), 10);
        assert_eq!(suggestions[0]["check"], "sections");
        assert_eq!(suggestions[0]["severity"], "warning");
        assert_eq!(suggestions[0]["message"], "Missing section: Education");
    }

    #[tokio::test]
    async fn test_analyze_text_rejects_blank() {
        let response = app()
            .oneshot(analyze_text(json!({ "text": "   " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_docx() {
        let text = strong_resume();
        let paragraphs: Vec<&str> = text.lines().collect();
        let response = app()
            .oneshot(upload("resume", "jane.docx", &build_docx(&paragraphs)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["filename"], "jane.docx");
        assert_eq!(body["document_kind"], "docx");
        assert_eq!(body["result"]["score"], 100);
        assert!(body["extracted_text"]
            .as_str()
            .unwrap()
            .contains("jane.doe@example.com"));
        assert_eq!(
            body["tip"],
            "Tailor your resume for each job by adding keywords from the job description for better ATS results."
        );
    }

    #[tokio::test]
    async fn test_upload_pdf_under_file_field() {
        let bytes = build_pdf(&[Some("Education Experience Projects Skills")]);
        let response = app()
            .oneshot(upload("file", "Resume.PDF", &bytes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["document_kind"], "pdf");
        let suggestions = body["result"]["suggestions"].as_array().unwrap();
        assert!(suggestions.iter().all(|s| s["check"] != "sections"));
    }

    #[tokio::test]
    async fn test_upload_unsupported_format() {
        let response = app()
            .oneshot(upload("resume", "resume.txt", b"Education and skills"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_FORMAT");
        assert_eq!(
            body["error"]["message"],
            "Could not extract text. Try another file."
        );
    }

    #[tokio::test]
    async fn test_upload_pdf_without_text() {
        let bytes = build_pdf(&[None]);
        let response = app()
            .oneshot(upload("resume", "scan.pdf", &bytes))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "EMPTY_EXTRACTION");
    }

    #[tokio::test]
    async fn test_upload_corrupt_document() {
        let response = app()
            .oneshot(upload("resume", "broken.docx", b"not a zip archive"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["error"]["code"], "PARSE_FAILURE");
    }

    #[tokio::test]
    async fn test_upload_missing_file_field() {
        let response = app()
            .oneshot(upload("avatar", "me.pdf", b"%PDF-1.5"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_over_body_limit() {
        let config = Config {
            max_upload_bytes: 1024,
            ..Config::default()
        };
        let response = build_router(AppState::new(config))
            .oneshot(upload("resume", "big.pdf", &vec![b'a'; 4096]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_body_limit_hit_while_skipping_unknown_field() {
        let config = Config {
            max_upload_bytes: 1024,
            ..Config::default()
        };
        // Streamed without a length so the limit trips mid-field rather than up front.
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> = vec![
            Ok(format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"notes\"\r\n\r\n"
            )
            .into_bytes()),
            Ok(vec![b'a'; 4096]),
            Ok([
                b"\r\n".to_vec(),
                multipart_body("resume", "cv.docx", &build_docx(&["Experience"])),
            ]
            .concat()),
        ];
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/analyze")
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from_stream(futures_util::stream::iter(chunks)))
            .unwrap();

        let response = build_router(AppState::new(config))
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_fallback_backend_reported() {
        let config = Config {
            readability_backend: crate::analysis::readability::ReadabilityBackend::Fallback,
            ..Config::default()
        };
        let response = build_router(AppState::new(config))
            .oneshot(analyze_text(json!({ "text": strong_resume() })))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["result"]["readability_backend"], "fallback");
        assert_eq!(body["result"]["score"], 100);
    }
}
