//! Resume analyzer: trait-based front for the model call.
//!
//! Default: `LlmAnalyzer`, which sends one request per analysis through
//! `LlmClient`. `AppState` holds an `Arc<dyn ResumeAnalyzer>` so handlers and
//! tests can swap the backend.

use async_trait::async_trait;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::analysis::input::DataUri;
use crate::analysis::models::{AnalysisError, AnalysisRequest, AnalysisResult, ModelReply};
use crate::analysis::prompts::{analysis_system, build_image_prompt, build_text_prompt};
use crate::llm_client::{ContentPart, LlmClient};

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

pub struct LlmAnalyzer {
    llm: LlmClient,
    system: String,
}

impl LlmAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: analysis_system(),
        }
    }

    async fn call_model(&self, request: &AnalysisRequest) -> Result<ModelReply, AnalysisError> {
        match request {
            AnalysisRequest::Text(text) => {
                let prompt = build_text_prompt(text);
                let content = [ContentPart::text(&prompt)];
                Ok(self.llm.call_json::<ModelReply>(&content, &self.system).await?)
            }
            AnalysisRequest::Image(image) => {
                let uri = DataUri::parse(&image.resume_data_uri)?;
                let prompt = build_image_prompt(image);
                let content = [
                    ContentPart::base64_image(uri.mime_type(), uri.data()),
                    ContentPart::text(&prompt),
                ];
                Ok(self.llm.call_json::<ModelReply>(&content, &self.system).await?)
            }
        }
    }
}

#[async_trait]
impl ResumeAnalyzer for LlmAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let analysis_id = Uuid::new_v4();
        let span = info_span!(
            "analysis",
            %analysis_id,
            variant = request.variant(),
            job_description_chars = request.job_description().chars().count()
        );

        async move {
            let reply = self.call_model(request).await?;
            let result = AnalysisResult::try_from(reply)?;

            for (field, score) in result.out_of_range_scores() {
                warn!("Model returned {field}={score}, outside 0-100; passing through");
            }
            info!(
                keyword_match_score = result.keyword_match_score,
                completeness_score = ?result.completeness_score,
                "Analysis complete"
            );
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
