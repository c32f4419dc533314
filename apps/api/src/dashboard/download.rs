use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    Resume,
    Feedback,
}

impl DownloadKind {
    pub fn file_name(self) -> &'static str {
        match self {
            DownloadKind::Resume => "refined_resume.txt",
            DownloadKind::Feedback => "resume_feedback.txt",
        }
    }
}

/// A plain-text file handed straight back to the browser. Nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: &'static str,
    pub body: String,
}

impl DownloadArtifact {
    pub const CONTENT_TYPE: &'static str = "text/plain; charset=utf-8";

    pub fn new(kind: DownloadKind, text: impl Into<String>) -> Self {
        Self {
            file_name: kind.file_name(),
            body: text.into(),
        }
    }
}

impl IntoResponse for DownloadArtifact {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, Self::CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.file_name),
                ),
            ],
            self.body,
        )
            .into_response()
    }
}
