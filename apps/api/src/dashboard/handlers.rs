//! Axum route handlers for the dashboard page.

use axum::{
    extract::{Multipart, State},
    response::Html,
    Form,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::input::read_analysis_form;
use crate::dashboard::download::{DownloadArtifact, DownloadKind};
use crate::dashboard::render::render_page;
use crate::dashboard::state::DashboardState;
use crate::errors::AppError;
use crate::state::AppState;

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render_page(&DashboardState::new()))
}

/// POST /
///
/// Runs one analysis from the submitted form and renders the page with the
/// outcome. Input problems come back as notifications on the page.
pub async fn handle_analyze(State(state): State<AppState>, multipart: Multipart) -> Html<String> {
    let mut dashboard = DashboardState::new();

    let form = match read_analysis_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            dashboard.reject_input(&e);
            return Html(render_page(&dashboard));
        }
    };

    dashboard.set_resume_text(form.resume_text);
    dashboard.set_job_description(form.job_description);

    let upload_ok = match form.resume_file {
        Some(upload) => {
            info!(
                "Resume image received: {} ({} bytes)",
                upload.file_name.as_deref().unwrap_or("unnamed"),
                upload.bytes.len()
            );
            dashboard.attach_image(upload)
        }
        None => true,
    };

    if upload_ok {
        dashboard.run_analysis(state.analyzer.as_ref()).await;
    }

    Html(render_page(&dashboard))
}

/// Fields posted by either download button. The resume button submits the
/// whole analysis form, so unrelated fields are ignored.
#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub kind: DownloadKind,
    pub resume_text: Option<String>,
    pub feedback: Option<String>,
}

/// POST /download
///
/// Echoes the posted text back as a `.txt` attachment. Used when the page
/// script is unavailable; otherwise the browser saves the file itself.
pub async fn handle_download(
    Form(request): Form<DownloadRequest>,
) -> Result<DownloadArtifact, AppError> {
    let text = match request.kind {
        DownloadKind::Resume => request.resume_text,
        DownloadKind::Feedback => request.feedback,
    }
    .ok_or_else(|| AppError::Validation("Nothing to download".to_string()))?;

    // Browsers submit textarea line breaks as CRLF.
    Ok(DownloadArtifact::new(request.kind, text.replace("\r\n", "\n")))
}
