//! Axum route handlers for the JSON analysis API.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::analysis::input::{read_analysis_form, require_text, InputError, TextField};
use crate::analysis::models::{
    AnalysisRequest, AnalysisResult, ImageAnalysisRequest, TextAnalysisRequest,
};
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/analyze/text
///
/// Analyzes a pasted resume against a job description.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<TextAnalysisRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    require_text(TextField::Resume, &request.resume_text)?;
    require_text(TextField::JobDescription, &request.job_description_text)?;

    let result = state
        .analyzer
        .analyze(&AnalysisRequest::Text(request))
        .await?;

    Ok(Json(result))
}

/// POST /api/v1/analyze/image
///
/// Multipart body with `resume_file` (PNG/JPEG, at most 4 MiB) and `job_description`.
pub async fn handle_analyze_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let form = read_analysis_form(multipart).await?;

    let upload = form.resume_file.ok_or(InputError::EmptyResume)?;
    upload.validate()?;
    require_text(TextField::JobDescription, &form.job_description)?;

    let request = AnalysisRequest::Image(ImageAnalysisRequest {
        resume_data_uri: upload.to_data_uri().to_string(),
        job_description: form.job_description,
    });
    let result = state.analyzer.analyze(&request).await?;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::analysis::models::{AnalysisError, AnalysisRequest};
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::test_support::{multipart_body, MultipartPart, StubAnalyzer, BOUNDARY};

    async fn send(stub: Arc<StubAnalyzer>, request: Request<Body>) -> (StatusCode, Value) {
        let app = build_router(AppState { analyzer: stub });
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(uri: &str, parts: &[MultipartPart<'_>]) -> Request<Body> {
        Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_text_analysis_returns_model_values() {
        let stub = StubAnalyzer::replying(82.0, None, "Solid fit.");
        let (status, body) = send(
            stub.clone(),
            json_request(
                "/api/v1/analyze/text",
                json!({
                    "resumeText": "Java developer, 5 years",
                    "jobDescriptionText": "Seeking Java developer"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywordMatchScore"], 82.0);
        assert_eq!(body["feedback"], "Solid fit.");

        let seen = stub.requests();
        assert_eq!(seen.len(), 1);
        match &seen[0] {
            AnalysisRequest::Text(r) => {
                assert_eq!(r.resume_text, "Java developer, 5 years");
                assert_eq!(r.job_description_text, "Seeking Java developer");
            }
            other => panic!("expected text request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_job_description_is_rejected_before_model_call() {
        let stub = StubAnalyzer::replying(10.0, None, "unused");
        let (status, body) = send(
            stub.clone(),
            json_request(
                "/api/v1/analyze/text",
                json!({"resumeText": "Resume", "jobDescriptionText": "   "}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_model_reply_maps_to_bad_gateway() {
        let stub = StubAnalyzer::failing(|| {
            AnalysisError::InvalidResponse("missing keywordMatchScore".to_string())
        });
        let (status, body) = send(
            stub,
            json_request(
                "/api/v1/analyze/text",
                json!({"resumeText": "Resume", "jobDescriptionText": "JD"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "INVALID_MODEL_RESPONSE");
    }

    #[tokio::test]
    async fn test_image_analysis_builds_data_uri() {
        let stub = StubAnalyzer::replying(40.0, Some(55.0), "Add a summary.");
        let (status, body) = send(
            stub.clone(),
            multipart_request(
                "/api/v1/analyze/image",
                &[
                    MultipartPart::file("resume_file", "cv.png", "image/png", b"hi"),
                    MultipartPart::text("job_description", "Rust engineer"),
                ],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["completenessScore"], 55.0);

        match &stub.requests()[0] {
            AnalysisRequest::Image(r) => {
                assert_eq!(r.resume_data_uri, "data:image/png;base64,aGk=");
                assert_eq!(r.job_description, "Rust engineer");
            }
            other => panic!("expected image request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_pdf_upload_is_unsupported_media_type() {
        let stub = StubAnalyzer::replying(1.0, None, "unused");
        let (status, body) = send(
            stub.clone(),
            multipart_request(
                "/api/v1/analyze/image",
                &[
                    MultipartPart::file("resume_file", "cv.pdf", "application/pdf", b"%PDF-1.7"),
                    MultipartPart::text("job_description", "Rust engineer"),
                ],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_oversized_upload_is_payload_too_large() {
        let big = vec![0u8; crate::analysis::input::MAX_RESUME_IMAGE_BYTES + 1];
        let stub = StubAnalyzer::replying(1.0, None, "unused");
        let (status, body) = send(
            stub.clone(),
            multipart_request(
                "/api/v1/analyze/image",
                &[
                    MultipartPart::file("resume_file", "cv.jpg", "image/jpeg", &big),
                    MultipartPart::text("job_description", "Rust engineer"),
                ],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_body_over_request_limit_is_payload_too_large() {
        let big = vec![0u8; 9 * 1024 * 1024];
        let stub = StubAnalyzer::replying(1.0, None, "unused");
        let (status, body) = send(
            stub.clone(),
            multipart_request(
                "/api/v1/analyze/image",
                &[
                    MultipartPart::text("job_description", "Rust engineer"),
                    MultipartPart::file("resume_file", "cv.jpg", "image/jpeg", &big),
                ],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert!(stub.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_validation_error() {
        let stub = StubAnalyzer::replying(1.0, None, "unused");
        let (status, _) = send(
            stub.clone(),
            multipart_request(
                "/api/v1/analyze/image",
                &[MultipartPart::text("job_description", "Rust engineer")],
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(stub.requests().is_empty());
    }
}
