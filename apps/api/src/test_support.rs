//! Helpers shared by handler and state tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::analysis::models::{AnalysisError, AnalysisRequest, AnalysisResult};

type Outcome = Box<dyn Fn() -> Result<AnalysisResult, AnalysisError> + Send + Sync>;

/// Analyzer that records every request and answers with a fixed outcome.
pub struct StubAnalyzer {
    seen: Mutex<Vec<AnalysisRequest>>,
    outcome: Outcome,
}

impl StubAnalyzer {
    pub fn replying(keyword: f64, completeness: Option<f64>, feedback: &str) -> Arc<Self> {
        let result = AnalysisResult {
            keyword_match_score: keyword,
            completeness_score: completeness,
            feedback: feedback.to_string(),
        };
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            outcome: Box::new(move || Ok(result.clone())),
        })
    }

    pub fn failing(error: impl Fn() -> AnalysisError + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            outcome: Box::new(move || Err(error())),
        })
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeAnalyzer for StubAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.seen.lock().unwrap().push(request.clone());
        (self.outcome)()
    }
}

pub const BOUNDARY: &str = "resume-refine-test-boundary";

pub enum MultipartPart<'a> {
    Text {
        name: &'a str,
        value: &'a str,
    },
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

impl<'a> MultipartPart<'a> {
    pub fn text(name: &'a str, value: &'a str) -> Self {
        MultipartPart::Text { name, value }
    }

    pub fn file(name: &'a str, file_name: &'a str, content_type: &'a str, bytes: &'a [u8]) -> Self {
        MultipartPart::File {
            name,
            file_name,
            content_type,
            bytes,
        }
    }
}

/// Encodes `parts` as a `multipart/form-data` body delimited by `BOUNDARY`.
pub fn multipart_body(parts: &[MultipartPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            MultipartPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            MultipartPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
