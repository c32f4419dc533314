//! Server-side HTML for the dashboard page.

use std::fmt::Write;

use chrono::{Datelike, Utc};

use crate::analysis::input::MAX_RESUME_IMAGE_BYTES;
use crate::analysis::models::AnalysisResult;
use crate::dashboard::download::DownloadKind;
use crate::dashboard::notification::Notification;
use crate::dashboard::score::{
    circumference, dash_offset, format_score, ScoreAnimation, ANIMATION_DURATION, RING_RADIUS,
};
use crate::dashboard::state::{DashboardState, Phase};

const ANIMATION_STEPS: u32 = 10;

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f7f7fb; color: #1d1d2c; }
header, footer { padding: 1rem 2rem; border-bottom: 1px solid #e3e3ec; background: #fff; }
footer { border-top: 1px solid #e3e3ec; border-bottom: none; text-align: center; color: #6b6b80; font-size: .875rem; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem; }
.grid { display: grid; gap: 2rem; grid-template-columns: repeat(auto-fit, minmax(18rem, 1fr)); }
.card { background: #fff; border-radius: .75rem; padding: 1.5rem; box-shadow: 0 4px 12px rgba(0,0,0,.06); }
.card.center { text-align: center; }
textarea { width: 100%; min-height: 300px; box-sizing: border-box; font: inherit; font-size: .875rem; }
.actions { margin-top: 2rem; text-align: center; }
button { font: inherit; padding: .75rem 1.5rem; border-radius: .5rem; border: none; background: #5b4cdb; color: #fff; cursor: pointer; }
button.outline { background: #fff; color: #5b4cdb; border: 1px solid #5b4cdb; }
button[disabled] { opacity: .5; cursor: not-allowed; }
.toast { margin-bottom: 1rem; padding: 1rem; border-radius: .5rem; background: #eef; }
.toast.destructive { background: #fde8e8; color: #8a1c1c; }
.ring { position: relative; width: 8rem; height: 8rem; margin: 0 auto; }
.ring svg { position: absolute; inset: 0; }
.ring span { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; font-size: 1.875rem; font-weight: 700; }
.feedback { white-space: pre-line; }
.skeleton { display: none; margin-top: 3rem; }
.skeleton div { background: #e6e6ef; border-radius: .75rem; height: 12rem; }
form.loading + .skeleton { display: grid; }
form.loading ~ .results { display: none; }
"#;

/// Disables the button while inputs are blank and while a submission is in
/// flight, saves downloads in the browser and counts the score rings up.
const SCRIPT: &str = r#"
(function () {
  function save(fileName, text) {
    var link = document.createElement('a');
    link.href = URL.createObjectURL(new Blob([text], { type: 'text/plain;charset=utf-8' }));
    link.download = fileName;
    document.body.appendChild(link);
    link.click();
    document.body.removeChild(link);
    URL.revokeObjectURL(link.href);
  }
  document.querySelectorAll('.ring[data-target]').forEach(function (ring) {
    var target = parseFloat(ring.getAttribute('data-target'));
    var duration = parseFloat(ring.getAttribute('data-duration'));
    var label = ring.querySelector('span');
    var start = null;
    function step(now) {
      if (start === null) { start = now; }
      var elapsed = now - start;
      if (elapsed >= duration) { label.textContent = ring.getAttribute('data-target'); return; }
      label.textContent = String(Math.max(0, Math.min(target, Math.floor(elapsed / duration * target))));
      requestAnimationFrame(step);
    }
    label.textContent = '0';
    requestAnimationFrame(step);
  });
  var feedbackForm = document.getElementById('feedback-download');
  if (feedbackForm) {
    feedbackForm.addEventListener('submit', function (event) {
      event.preventDefault();
      save(feedbackForm.getAttribute('data-file-name'), feedbackForm.elements['feedback'].value);
    });
  }
  var form = document.getElementById('analyze-form');
  var button = document.getElementById('analyze-button');
  var resume = form.elements['resume_text'];
  var file = form.elements['resume_file'];
  var jd = form.elements['job_description'];
  function ready() {
    var hasResume = resume.value.trim() !== '' || file.files.length > 0;
    return hasResume && jd.value.trim() !== '';
  }
  function sync() { if (!form.classList.contains('loading')) { button.disabled = !ready(); } }
  [resume, file, jd].forEach(function (el) { el.addEventListener('input', sync); el.addEventListener('change', sync); });
  form.addEventListener('submit', function (event) {
    var submitter = event.submitter;
    if (submitter && submitter.hasAttribute('data-file-name')) {
      event.preventDefault();
      save(submitter.getAttribute('data-file-name'), resume.value);
      return;
    }
    if (form.classList.contains('loading') || !ready()) { event.preventDefault(); return; }
    form.classList.add('loading');
    button.disabled = true;
    button.textContent = 'Analyzing...';
  });
  sync();
})();
"#;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(state: &DashboardState) -> String {
    let mut html = String::with_capacity(16 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>ResumeRefine</title>\n<style>{STYLES}</style>\n</head>\n<body>\n\
         <header><strong>ResumeRefine</strong></header>\n<main>\n"
    );

    render_notifications(&mut html, state.notifications());

    html.push_str(
        "<section class=\"actions\" style=\"margin-top:0\">\n\
         <h2>Optimize Your Resume in Seconds</h2>\n\
         <p>Paste your resume or upload an image of it, add a job description, and get \
         AI-powered feedback, a keyword match score, and tailored suggestions for improvement.</p>\n\
         </section>\n",
    );

    render_form(&mut html, state);

    html.push_str(
        "<div class=\"skeleton grid\"><div></div><div></div><div></div></div>\n",
    );

    if let Some(result) = state.result() {
        render_results(&mut html, state, result);
    }

    let _ = write!(
        html,
        "</main>\n<footer><p>&copy; {} ResumeRefine. All rights reserved.</p></footer>\n\
         <script>{SCRIPT}</script>\n</body>\n</html>\n",
        Utc::now().year()
    );
    html
}

fn render_notifications(html: &mut String, notifications: &[Notification]) {
    for n in notifications {
        let class = if n.is_destructive() {
            "toast destructive"
        } else {
            "toast"
        };
        let _ = writeln!(
            html,
            "<div class=\"{class}\" role=\"status\"><strong>{}</strong><div>{}</div></div>",
            escape_html(&n.title),
            escape_html(&n.description)
        );
    }
}

fn render_form(html: &mut String, state: &DashboardState) {
    let disabled = if state.can_analyze() { "" } else { " disabled" };
    let button_label = if matches!(state.phase(), Phase::Loading) {
        "Analyzing..."
    } else {
        "Analyze Resume"
    };
    let max_mb = MAX_RESUME_IMAGE_BYTES / (1024 * 1024);

    let _ = write!(
        html,
        "<form id=\"analyze-form\" method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n\
         <div class=\"grid\">\n\
         <div class=\"card\">\n<h3>Your Resume</h3>\n\
         <p>Paste the full text of your resume below, or upload an image of it (PNG or JPEG, up to {max_mb} MB). \
         You can edit the text here after receiving feedback.</p>\n\
         <textarea name=\"resume_text\" aria-label=\"Your Resume\" placeholder=\"Paste your resume here...\">\n{}</textarea>\n\
         <p><input type=\"file\" name=\"resume_file\" accept=\"image/png,image/jpeg\" aria-label=\"Resume image\"></p>\n\
         </div>\n\
         <div class=\"card\">\n<h3>Job Description</h3>\n\
         <p>Paste the job description you're applying for to get a tailored analysis.</p>\n\
         <textarea name=\"job_description\" aria-label=\"Job Description\" placeholder=\"Paste the job description here...\">\n{}</textarea>\n\
         </div>\n</div>\n\
         <div class=\"actions\">\n\
         <button id=\"analyze-button\" type=\"submit\"{disabled}>{button_label}</button>\n",
        escape_html(state.resume_text()),
        escape_html(state.job_description()),
    );

    if state.result().is_some() && !state.resume_text().is_empty() {
        // Shares the form so the download carries the textarea as edited.
        let _ = writeln!(
            html,
            " <button class=\"outline\" type=\"submit\" name=\"kind\" value=\"resume\" \
             data-file-name=\"{}\" formaction=\"/download\" \
             formenctype=\"application/x-www-form-urlencoded\">Download .txt</button>",
            DownloadKind::Resume.file_name()
        );
    }

    html.push_str("</div>\n</form>\n");
}

fn render_results(html: &mut String, state: &DashboardState, result: &AnalysisResult) {
    html.push_str(
        "<section class=\"results\" style=\"margin-top:3rem\">\n<h2 class=\"actions\">Analysis Results</h2>\n<div class=\"grid\">\n",
    );

    render_score_card(
        html,
        "keyword",
        "Keyword Match",
        "How well your resume keywords align with the job description.",
        Some(result.keyword_match_score),
    );
    render_score_card(
        html,
        "completeness",
        "Resume Completeness",
        "How detailed and complete your resume is for this role.",
        result.completeness_score,
    );

    let resume_note = if state.resume_image().is_some() {
        "Your resume was analyzed from an image. Download the feedback below to keep it."
    } else {
        "Edit your resume above and use Download .txt to save the refined text file."
    };
    let _ = write!(
        html,
        "<div class=\"card center\">\n<h3>Download</h3>\n<p>{resume_note}</p>\n\
         <form id=\"feedback-download\" method=\"post\" action=\"/download\" data-file-name=\"{}\">\n\
         <input type=\"hidden\" name=\"kind\" value=\"feedback\">\n\
         <textarea name=\"feedback\" hidden>\n{}</textarea>\n\
         <button class=\"outline\" type=\"submit\">Download feedback .txt</button>\n\
         </form>\n</div>\n</div>\n",
        DownloadKind::Feedback.file_name(),
        escape_html(&result.feedback)
    );

    let _ = write!(
        html,
        "<div class=\"card\" style=\"margin-top:2rem\">\n<h3>AI-Powered Feedback</h3>\n\
         <p>Actionable suggestions to improve your resume for this specific job.</p>\n\
         <div class=\"feedback\">{}</div>\n</div>\n</section>\n",
        escape_html(&result.feedback)
    );
}

fn render_score_card(
    html: &mut String,
    id: &str,
    title: &str,
    description: &str,
    score: Option<f64>,
) {
    let _ = write!(
        html,
        "<div class=\"card center\">\n<h3>{title}</h3>\n<p>{description}</p>\n"
    );
    match score {
        Some(score) => render_score_ring(html, id, score),
        None => html.push_str("<div class=\"ring\"><span>&ndash;</span></div>\n"),
    }
    html.push_str("</div>\n");
}

/// Ring that fills from empty to `score` with stepped keyframes taken from
/// `ScoreAnimation`. The page script counts the number up on the same curve;
/// the rendered text is the final value.
fn render_score_ring(html: &mut String, id: &str, score: f64) {
    let animation = ScoreAnimation::new(score);
    let circumference = circumference();
    let final_offset = dash_offset(animation.target());
    let text = format_score(animation.target());
    let duration = ANIMATION_DURATION.as_millis();

    let mut keyframes = String::new();
    for (fraction, value) in animation.frames(ANIMATION_STEPS) {
        let _ = write!(
            keyframes,
            "{:.0}% {{ stroke-dashoffset: {:.2}; }} ",
            fraction * 100.0,
            dash_offset(value)
        );
    }

    let _ = write!(
        html,
        "<style>@keyframes ring-{id} {{ {keyframes}}}</style>\n\
         <div class=\"ring\" role=\"progressbar\" aria-valuenow=\"{text}\" aria-valuemin=\"0\" aria-valuemax=\"100\" \
         data-target=\"{text}\" data-duration=\"{duration}\">\n\
         <svg viewBox=\"0 0 100 100\">\n\
         <circle stroke=\"#e6e6ef\" stroke-width=\"10\" cx=\"50\" cy=\"50\" r=\"{RING_RADIUS}\" fill=\"transparent\"/>\n\
         <circle stroke=\"#5b4cdb\" stroke-width=\"10\" stroke-linecap=\"round\" cx=\"50\" cy=\"50\" r=\"{RING_RADIUS}\" \
         fill=\"transparent\" stroke-dasharray=\"{circumference:.2}\" stroke-dashoffset=\"{final_offset:.2}\" \
         transform=\"rotate(-90 50 50)\" style=\"animation: ring-{id} {duration}ms linear\"/>\n\
         </svg>\n<span>{text}</span>\n</div>\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::input::ResumeUpload;

    fn succeeded(result: AnalysisResult) -> DashboardState {
        let mut state = DashboardState::new();
        state.set_resume_text("Java developer, 5 years");
        state.set_job_description("Seeking Java developer");
        state.begin_analysis();
        state.finish_analysis(Ok(result));
        state
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_idle_page_has_disabled_button_and_no_results() {
        let html = render_page(&DashboardState::new());
        assert!(html.contains("id=\"analyze-button\" type=\"submit\" disabled>Analyze Resume"));
        assert!(!html.contains("Analysis Results"));
    }

    #[test]
    fn test_filled_page_enables_button() {
        let mut state = DashboardState::new();
        state.set_resume_text("Resume");
        state.set_job_description("JD");
        let html = render_page(&state);
        assert!(html.contains("id=\"analyze-button\" type=\"submit\">Analyze Resume"));
    }

    #[test]
    fn test_results_show_score_and_feedback_verbatim() {
        let html = render_page(&succeeded(AnalysisResult {
            keyword_match_score: 82.0,
            completeness_score: None,
            feedback: "Solid fit.".to_string(),
        }));

        assert!(html.contains("<span>82</span>"));
        assert!(html.contains("aria-valuenow=\"82\""));
        assert!(html.contains("<div class=\"feedback\">Solid fit.</div>"));
        assert!(html.contains("Analysis Complete!"));
        assert!(html.contains("<span>&ndash;</span>"));
    }

    #[test]
    fn test_feedback_markup_is_escaped() {
        let html = render_page(&succeeded(AnalysisResult {
            keyword_match_score: 10.0,
            completeness_score: Some(20.0),
            feedback: "<script>alert(1)</script>".to_string(),
        }));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_ring_keyframes_end_on_final_offset() {
        let mut html = String::new();
        render_score_ring(&mut html, "keyword", 50.0);
        let final_offset = format!("{:.2}", dash_offset(50.0));
        assert!(html.contains(&format!("100% {{ stroke-dashoffset: {final_offset}; }}")));
        assert!(html.contains(&format!("stroke-dashoffset=\"{final_offset}\"")));
    }

    #[test]
    fn test_textareas_keep_leading_newline() {
        let mut state = succeeded(AnalysisResult {
            keyword_match_score: 10.0,
            completeness_score: None,
            feedback: "\nTip".to_string(),
        });
        state.set_resume_text("\nJava developer");
        let html = render_page(&state);

        assert!(html.contains("<textarea name=\"feedback\" hidden>\n\nTip</textarea>"));
        assert!(html.contains("placeholder=\"Paste your resume here...\">\n\nJava developer</textarea>"));
    }

    #[test]
    fn test_ring_carries_exact_count_up_target() {
        let mut html = String::new();
        render_score_ring(&mut html, "keyword", 82.25);
        assert!(html.contains("data-target=\"82.25\" data-duration=\"1000\""));
        assert!(html.contains("aria-valuenow=\"82.25\""));
        assert!(html.contains("<span>82.25</span>"));
    }

    #[test]
    fn test_results_hide_while_loading() {
        let html = render_page(&succeeded(AnalysisResult {
            keyword_match_score: 10.0,
            completeness_score: None,
            feedback: "f".to_string(),
        }));
        assert!(html.contains("<section class=\"results\""));
        assert!(STYLES.contains("form.loading ~ .results { display: none; }"));
    }

    #[test]
    fn test_download_buttons_name_their_files() {
        let html = render_page(&succeeded(AnalysisResult {
            keyword_match_score: 10.0,
            completeness_score: None,
            feedback: "f".to_string(),
        }));
        assert!(html.contains("data-file-name=\"refined_resume.txt\""));
        assert!(html.contains("id=\"feedback-download\" method=\"post\" action=\"/download\" data-file-name=\"resume_feedback.txt\""));
    }

    #[test]
    fn test_resume_download_button_only_for_text_resumes() {
        let html = render_page(&succeeded(AnalysisResult {
            keyword_match_score: 10.0,
            completeness_score: Some(20.0),
            feedback: "f".to_string(),
        }));
        assert!(html.contains("value=\"resume\""));

        let mut image_state = DashboardState::new();
        image_state.set_job_description("JD");
        image_state.attach_image(ResumeUpload::new("image/png", b"hi".to_vec()));
        image_state.begin_analysis();
        image_state.finish_analysis(Ok(AnalysisResult {
            keyword_match_score: 10.0,
            completeness_score: Some(20.0),
            feedback: "f".to_string(),
        }));
        let html = render_page(&image_state);
        assert!(!html.contains("value=\"resume\""));
        assert!(html.contains("value=\"feedback\""));
    }
}
