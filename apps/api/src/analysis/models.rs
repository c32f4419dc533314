//! Request and response contracts for the model boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::input::InputError;
use crate::llm_client::LlmError;

/// Plain-text resume variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisRequest {
    pub resume_text: String,
    pub job_description_text: String,
}

/// Image resume variant. `resume_data_uri` is `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysisRequest {
    pub resume_data_uri: String,
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Text(TextAnalysisRequest),
    Image(ImageAnalysisRequest),
}

impl AnalysisRequest {
    pub fn variant(&self) -> &'static str {
        match self {
            AnalysisRequest::Text(_) => "text",
            AnalysisRequest::Image(_) => "image",
        }
    }

    pub fn job_description(&self) -> &str {
        match self {
            AnalysisRequest::Text(r) => &r.job_description_text,
            AnalysisRequest::Image(r) => &r.job_description,
        }
    }
}

/// Canonical analysis result, identical for both request variants.
///
/// Scores are expected in 0–100 but are passed through as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub keyword_match_score: f64,
    pub completeness_score: Option<f64>,
    pub feedback: String,
}

impl AnalysisResult {
    /// Scores that fall outside 0–100, by name.
    pub fn out_of_range_scores(&self) -> Vec<(&'static str, f64)> {
        let mut scores = vec![("keywordMatchScore", self.keyword_match_score)];
        if let Some(completeness) = self.completeness_score {
            scores.push(("completenessScore", completeness));
        }
        scores
            .into_iter()
            .filter(|(_, score)| !(0.0..=100.0).contains(score))
            .collect()
    }
}

/// What the model actually sends back. Every field is optional here so that
/// missing fields surface as a schema violation instead of a parse error.
/// `completenessAssessment` is the older name for the free-text field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReply {
    #[serde(alias = "keyword_match_score")]
    pub keyword_match_score: Option<f64>,
    #[serde(alias = "completeness_score")]
    pub completeness_score: Option<f64>,
    pub feedback: Option<String>,
    #[serde(alias = "completeness_assessment")]
    pub completeness_assessment: Option<String>,
}

impl TryFrom<ModelReply> for AnalysisResult {
    type Error = AnalysisError;

    fn try_from(reply: ModelReply) -> Result<Self, Self::Error> {
        let keyword_match_score = reply.keyword_match_score.ok_or_else(|| {
            AnalysisError::InvalidResponse("missing keywordMatchScore".to_string())
        })?;
        if !keyword_match_score.is_finite() {
            return Err(AnalysisError::InvalidResponse(
                "keywordMatchScore is not a finite number".to_string(),
            ));
        }
        if reply.completeness_score.is_some_and(|s| !s.is_finite()) {
            return Err(AnalysisError::InvalidResponse(
                "completenessScore is not a finite number".to_string(),
            ));
        }

        let feedback = reply
            .feedback
            .filter(|f| !f.trim().is_empty())
            .or(reply.completeness_assessment)
            .filter(|f| !f.trim().is_empty())
            .ok_or_else(|| AnalysisError::InvalidResponse("missing feedback".to_string()))?;

        Ok(AnalysisResult {
            keyword_match_score,
            completeness_score: reply.completeness_score,
            feedback,
        })
    }
}

/// Why an analysis produced no result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The call to the provider failed (network, HTTP status, retries exhausted).
    #[error("model call failed: {0}")]
    Transport(LlmError),

    /// The provider answered with something that does not fit the declared schema.
    #[error("invalid model response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Input(#[from] InputError),
}

impl From<LlmError> for AnalysisError {
    fn from(error: LlmError) -> Self {
        if error.is_invalid_output() {
            AnalysisError::InvalidResponse(error.to_string())
        } else {
            AnalysisError::Transport(error)
        }
    }
}
