use serde::Serialize;

use crate::analysis::input::{InputError, MAX_RESUME_IMAGE_BYTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

/// A toast shown above the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    fn new(title: &str, description: impl Into<String>, variant: Variant) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            variant,
        }
    }

    pub fn missing_information() -> Self {
        Self::new(
            "Missing Information",
            "Please provide both your resume and the job description.",
            Variant::Destructive,
        )
    }

    pub fn analysis_complete() -> Self {
        Self::new(
            "Analysis Complete!",
            "Your resume feedback is ready.",
            Variant::Default,
        )
    }

    pub fn analysis_failed() -> Self {
        Self::new(
            "Analysis Failed",
            "Something went wrong. Please try again later.",
            Variant::Destructive,
        )
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

impl From<&InputError> for Notification {
    fn from(error: &InputError) -> Self {
        match error {
            InputError::EmptyResume | InputError::EmptyJobDescription => {
                Notification::missing_information()
            }
            InputError::NotAnImage { .. } => Self::new(
                "Invalid File Type",
                "Please upload an image file (PNG or JPEG).",
                Variant::Destructive,
            ),
            InputError::FileTooLarge { .. } | InputError::RequestTooLarge => Self::new(
                "File Too Large",
                format!(
                    "Please upload an image smaller than {} MB.",
                    MAX_RESUME_IMAGE_BYTES / (1024 * 1024)
                ),
                Variant::Destructive,
            ),
            InputError::EmptyFile
            | InputError::MalformedDataUri
            | InputError::MalformedForm(_) => Self::new(
                "Unreadable File",
                "The uploaded file could not be read. Please try another image.",
                Variant::Destructive,
            ),
        }
    }
}
