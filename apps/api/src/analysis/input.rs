//! Input validation and upload handling for resume analysis.
//!
//! Everything here runs before the model is called. A rejected input never
//! reaches the analyzer.

use std::fmt;

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use thiserror::Error;

/// Largest accepted resume image, inclusive.
pub const MAX_RESUME_IMAGE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("resume cannot be empty")]
    EmptyResume,

    #[error("job description cannot be empty")]
    EmptyJobDescription,

    #[error("'{content_type}' is not an image")]
    NotAnImage { content_type: String },

    #[error("image is {size} bytes, the limit is {limit} bytes")]
    FileTooLarge { size: usize, limit: usize },

    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("resume image must be a base64 data URI")]
    MalformedDataUri,

    #[error("request body exceeds the upload limit")]
    RequestTooLarge,

    #[error("malformed form data: {0}")]
    MalformedForm(String),
}

/// Which text field a presence check applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Resume,
    JobDescription,
}

/// Rejects empty and whitespace-only text. The value itself is passed on untouched.
pub fn require_text(field: TextField, value: &str) -> Result<(), InputError> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    Err(match field {
        TextField::Resume => InputError::EmptyResume,
        TextField::JobDescription => InputError::EmptyJobDescription,
    })
}

/// A resume image as received from the browser.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ResumeUpload {
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Checks type first, then emptiness, then size.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.content_type.to_ascii_lowercase().starts_with("image/") {
            return Err(InputError::NotAnImage {
                content_type: self.content_type.clone(),
            });
        }
        if self.bytes.is_empty() {
            return Err(InputError::EmptyFile);
        }
        if self.bytes.len() > MAX_RESUME_IMAGE_BYTES {
            return Err(InputError::FileTooLarge {
                size: self.bytes.len(),
                limit: MAX_RESUME_IMAGE_BYTES,
            });
        }
        Ok(())
    }

    pub fn to_data_uri(&self) -> DataUri {
        DataUri::encode(&self.content_type, &self.bytes)
    }
}

/// A self-describing `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime_type: String,
    data: String,
}

impl DataUri {
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_ascii_lowercase(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn parse(uri: &str) -> Result<Self, InputError> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or(InputError::MalformedDataUri)?;
        let (mime_type, data) = rest
            .split_once(";base64,")
            .ok_or(InputError::MalformedDataUri)?;
        if mime_type.is_empty() || mime_type.contains(',') || data.is_empty() {
            return Err(InputError::MalformedDataUri);
        }
        STANDARD
            .decode(data)
            .map_err(|_| InputError::MalformedDataUri)?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Raw fields of the analysis form, before validation.
#[derive(Debug, Default)]
pub struct AnalysisForm {
    pub resume_text: String,
    pub resume_file: Option<ResumeUpload>,
    pub job_description: String,
}

/// Reads `resume_text`, `resume_file` and `job_description` from a multipart body.
/// Unknown fields are skipped. A file part with no name and no bytes (an
/// untouched file input) counts as absent.
pub async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisForm, InputError> {
    let mut form = AnalysisForm::default();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume_text" => form.resume_text = read_text(field).await?,
            "job_description" => form.job_description = read_text(field).await?,
            "resume_file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(form_error)?;

                let untouched = bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty();
                if !untouched {
                    let mut upload = ResumeUpload::new(content_type, bytes);
                    upload.file_name = file_name;
                    form.resume_file = Some(upload);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, InputError> {
    field.text().await.map_err(form_error)
}

/// A body cut off by the request size limit is reported as too large, not malformed.
fn form_error(error: MultipartError) -> InputError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        InputError::RequestTooLarge
    } else {
        InputError::MalformedForm(error.body_text())
    }
}
