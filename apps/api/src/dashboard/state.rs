//! Dashboard UI state.
//!
//! One `DashboardState` per page view. Handlers build it from the submitted
//! form, drive it through `Idle → Loading → Success | Failure`, and render it.

use tracing::{error, warn};

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::analysis::input::{require_text, InputError, ResumeUpload, TextField};
use crate::analysis::models::{
    AnalysisError, AnalysisRequest, AnalysisResult, ImageAnalysisRequest, TextAnalysisRequest,
};
use crate::dashboard::notification::Notification;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success(AnalysisResult),
    Failure,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    resume_text: String,
    resume_image: Option<ResumeUpload>,
    job_description: String,
    phase: Phase,
    notifications: Vec<Notification>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_resume_text(&mut self, text: impl Into<String>) {
        self.resume_text = text.into();
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    /// Accepts the image if it passes validation. A rejected file leaves any
    /// previously attached image in place and raises a notification.
    pub fn attach_image(&mut self, upload: ResumeUpload) -> bool {
        match upload.validate() {
            Ok(()) => {
                self.resume_image = Some(upload);
                true
            }
            Err(e) => {
                self.reject_input(&e);
                false
            }
        }
    }

    /// Raises the notification for input that never made it into the form.
    pub fn reject_input(&mut self, error: &InputError) {
        warn!("Rejected resume input: {error}");
        self.notifications.push(Notification::from(error));
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn resume_image(&self) -> Option<&ResumeUpload> {
        self.resume_image.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// The current result. Only present after a successful analysis.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    fn has_resume(&self) -> bool {
        self.resume_image.is_some() || require_text(TextField::Resume, &self.resume_text).is_ok()
    }

    /// Whether the analyze button is enabled.
    pub fn can_analyze(&self) -> bool {
        !self.is_loading()
            && self.has_resume()
            && require_text(TextField::JobDescription, &self.job_description).is_ok()
    }

    /// Moves to `Loading` and returns the request to send, or `None` when the
    /// inputs are incomplete or an analysis is already in flight. An attached
    /// image takes precedence over pasted text.
    pub fn begin_analysis(&mut self) -> Option<AnalysisRequest> {
        if self.is_loading() {
            warn!("Analysis already in flight; ignoring submission");
            return None;
        }
        if !self.can_analyze() {
            self.notifications.push(Notification::missing_information());
            return None;
        }

        let request = match &self.resume_image {
            Some(upload) => AnalysisRequest::Image(ImageAnalysisRequest {
                resume_data_uri: upload.to_data_uri().to_string(),
                job_description: self.job_description.clone(),
            }),
            None => AnalysisRequest::Text(TextAnalysisRequest {
                resume_text: self.resume_text.clone(),
                job_description_text: self.job_description.clone(),
            }),
        };

        self.phase = Phase::Loading;
        Some(request)
    }

    /// Records the outcome of the request returned by `begin_analysis`.
    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        if !self.is_loading() {
            warn!("Analysis outcome arrived while not loading; dropping it");
            return;
        }
        match outcome {
            Ok(result) => {
                self.phase = Phase::Success(result);
                self.notifications.push(Notification::analysis_complete());
            }
            Err(e) => {
                error!("Analysis failed: {e}");
                self.phase = Phase::Failure;
                self.notifications.push(Notification::analysis_failed());
            }
        }
    }

    /// Runs one full analysis against `analyzer`. Does nothing beyond raising
    /// a notification when the inputs are incomplete.
    pub async fn run_analysis(&mut self, analyzer: &dyn ResumeAnalyzer) {
        let Some(request) = self.begin_analysis() else {
            return;
        };
        let outcome = analyzer.analyze(&request).await;
        self.finish_analysis(outcome);
    }
}
