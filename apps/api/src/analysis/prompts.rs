// Prompt text for resume analysis. Inputs are interpolated with format!
// rather than placeholder replacement so user text is never re-scanned.

use crate::analysis::models::{ImageAnalysisRequest, TextAnalysisRequest};
use crate::llm_client::prompts::json_system;

const ANALYST_ROLE: &str = "You are a professional resume analyst who helps job seekers \
    tailor their resume to a specific job description.";

/// Output contract shared by both variants. Field descriptions double as instructions.
pub const OUTPUT_SCHEMA: &str = r#"Return a JSON object with this EXACT schema (no extra fields):
{
  "keywordMatchScore": 0,
  "completenessScore": 0,
  "feedback": ""
}

Field descriptions:
- keywordMatchScore: a number from 0 to 100 representing the keyword match between the resume and the job description.
- completenessScore: a number from 0 to 100 indicating how complete and detailed the resume is for this job.
- feedback: actionable feedback and suggestions for improving the resume based on the job description. Be specific and give concrete examples."#;

const TEXT_INSTRUCTIONS: &str = "Analyze the provided resume and job description to determine \
    the keyword match score (0-100), assess how complete the resume is (0-100), and write \
    actionable feedback for improvement.";

const IMAGE_INSTRUCTIONS: &str = "Analyze the resume in the attached image against the job \
    description below to determine a keyword match score (0-100), how complete the resume is \
    (0-100), and generate actionable feedback for improvement.";

const CLOSING: &str = "Focus on tailoring the resume to the job description effectively.";

pub fn analysis_system() -> String {
    json_system(ANALYST_ROLE)
}

pub fn build_text_prompt(request: &TextAnalysisRequest) -> String {
    format!(
        "{TEXT_INSTRUCTIONS}\n\nResume:\n{}\n\nJob Description:\n{}\n\n{OUTPUT_SCHEMA}\n\n{CLOSING}",
        request.resume_text, request.job_description_text
    )
}

/// The image itself travels as a separate content block ahead of this text.
pub fn build_image_prompt(request: &ImageAnalysisRequest) -> String {
    format!(
        "{IMAGE_INSTRUCTIONS}\n\nResume:\n(see attached image)\n\nJob Description:\n{}\n\n{OUTPUT_SCHEMA}\n\n{CLOSING}",
        request.job_description
    )
}
