//! The console page served at `/` and the script that drives it.

use crate::agents::{email, interview, ranking, recommendation, scheduling, sentiment};
use crate::backend::MODEL_LABEL;
use crate::ui::markup::esc;

pub const CONSOLE_JS: &str = include_str!("../../assets/console.js");

const CONSOLE_CSS: &str = r#"
#loading-overlay { position: fixed; inset: 0; display: none; align-items: center; justify-content: center; background: rgba(255, 255, 255, 0.8); z-index: 2000; }
#loading-overlay.active { display: flex; }
.loading-content { text-align: center; }
.model-status { display: flex; align-items: center; gap: 0.4rem; color: #fff; margin-left: 1rem; }
.model-status .status-dot { width: 0.6rem; height: 0.6rem; border-radius: 50%; background: #dc3545; }
.model-status.online .status-dot { background: #28a745; }
.file-upload { border: 2px dashed #ced4da; border-radius: 0.5rem; padding: 1rem; }
.sentiment-moments { list-style: none; padding-left: 0; }
.sentiment-moments .timestamp { font-family: monospace; color: #6c757d; }
"#;

/// Model capabilities listed in the sidebar, as `(name, description)`.
pub const CAPABILITIES: [(&str, &str); 5] = [
    (
        "Resume Analysis",
        "Extract and match skills from resumes to job requirements",
    ),
    (
        "Email Generation",
        "Create personalized email templates for candidates",
    ),
    (
        "Interview Q&A",
        "Generate adaptive interview questions based on candidate responses",
    ),
    (
        "Decision Making",
        "Provide hire/no-hire recommendations with confidence scores",
    ),
    (
        "Sentiment Analysis",
        "Analyze emotional signals in interview transcripts",
    ),
];

pub fn render_capabilities() -> String {
    let items: String = CAPABILITIES
        .iter()
        .map(|(name, description)| {
            format!(
                r#"<div class="list-group-item"><h6 class="mb-1">{}</h6><p class="mb-1 text-muted small">{}</p></div>"#,
                esc(name),
                esc(description)
            )
        })
        .collect();

    format!(r#"<div class="list-group">{items}</div>"#)
}

fn model_status() -> String {
    format!(
        r#"<div class="model-status online" data-bs-toggle="tooltip" title="Backend model"><span class="status-dot"></span> {} Online</div>"#,
        esc(MODEL_LABEL)
    )
}

/// Renders the full console page.
pub fn render_page() -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Recruiting Console</title>
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css" rel="stylesheet">
    <style>{css}</style>
</head>
<body>
<nav class="navbar navbar-expand-lg navbar-dark bg-dark">
    <div class="container-fluid">
        <span class="navbar-brand">Recruiting Console</span>
        <div class="navbar-nav ms-auto align-items-center">
            <span class="navbar-text">Model: <span id="llama-version">{model}</span></span>
            {status}
        </div>
    </div>
</nav>

<div class="container-fluid my-4">
<div class="row">
<main class="col-lg-9">

<section class="card mb-4">
    <div class="card-header"><h5 class="mb-0">Resume Ranking</h5></div>
    <div class="card-body">
        <form id="resume-ranking-form" class="needs-validation" novalidate data-action="/ui/rank-resumes" data-loading="{rank_text}" data-loading-upload="{rank_upload}" enctype="multipart/form-data">
            <input id="ranking-session" name="ranking_id" type="hidden">
            <div class="mb-3">
                <label for="job-description" class="form-label">Job Description</label>
                <textarea id="job-description" name="job_description" class="form-control" rows="5" required></textarea>
                <div class="invalid-feedback">A job description is required.</div>
            </div>
            <div class="mb-3 file-upload">
                <label for="resume-files" class="form-label file-label" data-bs-toggle="tooltip" title="PDF, DOCX or TXT">Choose resume files</label>
                <input id="resume-files" name="resumes" type="file" class="form-control" accept=".pdf,.docx,.txt" multiple>
                <div class="file-preview mt-2"></div>
            </div>
            <div class="mb-3">
                <label for="resume-text" class="form-label">Or paste a resume</label>
                <textarea id="resume-text" name="resume_text" class="form-control" rows="4"></textarea>
            </div>
            <button type="submit" class="btn btn-primary">Rank Resumes</button>
        </form>
        <div id="ranking-results" class="mt-4"></div>
    </div>
</section>

<section class="card mb-4">
    <div class="card-header"><h5 class="mb-0">Interview Scheduling</h5></div>
    <div class="card-body">
        <form id="availability-form" class="needs-validation row g-2 mb-3" novalidate data-action="/ui/schedule/availability" data-loading="{availability}">
            <div class="col-md-5">
                <label for="availability-start" class="form-label">From</label>
                <input id="availability-start" name="start_date" type="date" class="form-control" required>
            </div>
            <div class="col-md-5">
                <label for="availability-end" class="form-label">To</label>
                <input id="availability-end" name="end_date" type="date" class="form-control" required>
            </div>
            <div class="col-md-2 d-flex align-items-end">
                <button type="submit" class="btn btn-outline-primary w-100">Check</button>
            </div>
        </form>
        <div id="availability-results" class="mb-4"></div>

        <form id="scheduler-form" class="needs-validation" novalidate data-action="/ui/schedule" data-loading="{schedule}">
            <div class="row g-2">
                <div class="col-md-6">
                    <label for="candidate-email" class="form-label">Candidate Email</label>
                    <input id="candidate-email" name="candidate_email" type="email" class="form-control" required>
                </div>
                <div class="col-md-3">
                    <label for="interview-date" class="form-label">Date</label>
                    <input id="interview-date" name="interview_date" type="date" class="form-control" required>
                </div>
                <div class="col-md-3">
                    <label for="interview-time" class="form-label">Time</label>
                    <input id="interview-time" name="interview_time" type="time" class="form-control" required>
                </div>
                <div class="col-md-4">
                    <label for="interview-duration" class="form-label">Duration</label>
                    <select id="interview-duration" name="duration" class="form-select" required>
                        <option value="30">30 minutes</option>
                        <option value="45">45 minutes</option>
                        <option value="60" selected>60 minutes</option>
                        <option value="90">90 minutes</option>
                    </select>
                </div>
                <div class="col-md-8">
                    <label for="interviewers" class="form-label">Interviewers</label>
                    <select id="interviewers" name="interviewers" class="form-select" multiple>
                        <option value="hiring-manager@company.com">Hiring Manager</option>
                        <option value="tech-lead@company.com">Tech Lead</option>
                        <option value="hr@company.com">HR Partner</option>
                    </select>
                </div>
            </div>
            <button type="submit" class="btn btn-primary mt-3">Schedule Interview</button>
        </form>
    </div>
</section>

<section class="card mb-4">
    <div class="card-header"><h5 class="mb-0">Interview</h5></div>
    <div class="card-body">
        <form id="interview-start-form" class="needs-validation row g-2" novalidate data-action="/ui/interview/start" data-loading="{preparing}" data-include="interview-session">
            <div class="col-md-5">
                <label for="job-title" class="form-label">Job Title</label>
                <input id="job-title" name="job_title" class="form-control" required>
            </div>
            <div class="col-md-5">
                <label for="candidate-name" class="form-label">Candidate Name</label>
                <input id="candidate-name" name="candidate_name" class="form-control" required>
            </div>
            <div class="col-md-2 d-flex align-items-end">
                <button type="submit" class="btn btn-primary w-100">Start</button>
            </div>
        </form>

        <div id="interview-container" class="mt-4 d-none">
            <div class="progress mb-3">
                <div id="interview-progress" class="progress-bar" role="progressbar" style="width: 0%"></div>
            </div>
            <h5 id="interview-question"></h5>
            <form id="interview-answer-form" class="needs-validation" novalidate data-action="/ui/interview/answer">
                <input id="interview-session" name="session_id" type="hidden">
                <textarea id="interview-answer" name="answer" class="form-control mb-2" rows="4" required></textarea>
                <div class="invalid-feedback">Please provide an answer.</div>
                <button type="submit" class="btn btn-primary">Submit Answer</button>
                <button type="submit" class="btn btn-outline-secondary" formnovalidate data-action="/ui/interview/follow-up" data-loading="{follow_up}" data-bs-toggle="tooltip" title="Ask a question based on the answers so far">Suggest Follow-up</button>
            </form>
            <p id="follow-up-question" class="mt-3 fst-italic"></p>
        </div>

        <div id="interview-completion" class="mt-4 d-none">
            <div class="alert alert-success mb-0">Interview complete. Thank you!</div>
        </div>
    </div>
</section>

<section class="card mb-4">
    <div class="card-header"><h5 class="mb-0">Hiring Recommendation</h5></div>
    <div class="card-body">
        <form id="recommendation-form" class="needs-validation" novalidate data-action="/ui/recommendation" data-loading="{analyze_interview}">
            <textarea id="interview-transcript" name="transcript" class="form-control mb-2" rows="6" required></textarea>
            <button type="submit" class="btn btn-primary">Analyze Interview</button>
        </form>
        <div id="recommendation-results" class="mt-4"></div>
    </div>
</section>

<section class="card mb-4">
    <div class="card-header"><h5 class="mb-0">Sentiment Analysis</h5></div>
    <div class="card-body">
        <form id="sentiment-form" class="needs-validation" novalidate data-action="/ui/sentiment" data-loading="{analyze_sentiment}">
            <textarea id="sentiment-transcript" name="transcript" class="form-control mb-2" rows="6" required></textarea>
            <button type="submit" class="btn btn-primary">Analyze Sentiment</button>
        </form>
        <div id="sentiment-results" class="mt-4"></div>
    </div>
</section>

</main>
<aside class="col-lg-3">
    <div class="card">
        <div class="card-header"><h6 class="mb-0">Model Capabilities</h6></div>
        <div id="model-capabilities" class="card-body p-0">{capabilities}</div>
    </div>
</aside>
</div>
</div>

<div id="emailModal" class="modal fade" tabindex="-1" aria-hidden="true">
    <div class="modal-dialog modal-lg">
        <div class="modal-content">
            <form id="emailForm" class="needs-validation" novalidate data-action="/ui/email/send" data-loading="{send_email}">
                <div class="modal-header">
                    <h5 class="modal-title">Send Email</h5>
                    <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button>
                </div>
                <div class="modal-body">
                    <div class="mb-3">
                        <label for="emailRecipient" class="form-label">To</label>
                        <input id="emailRecipient" name="recipient" type="email" class="form-control" required>
                    </div>
                    <div class="mb-3">
                        <label for="emailSubject" class="form-label">Subject</label>
                        <input id="emailSubject" name="subject" class="form-control" required>
                    </div>
                    <div class="mb-3">
                        <label for="emailBody" class="form-label">Message</label>
                        <textarea id="emailBody" name="body" class="form-control" rows="10" required></textarea>
                    </div>
                </div>
                <div class="modal-footer">
                    <button type="button" class="btn btn-secondary" data-bs-dismiss="modal">Cancel</button>
                    <button type="submit" class="btn btn-primary">Send</button>
                </div>
            </form>
        </div>
    </div>
</div>

<div id="candidateDetailModal" class="modal fade" tabindex="-1" aria-hidden="true">
    <div class="modal-dialog modal-lg">
        <div class="modal-content">
            <div class="modal-header">
                <h5 class="modal-title">Candidate Details</h5>
                <button type="button" class="btn-close" data-bs-dismiss="modal" aria-label="Close"></button>
            </div>
            <div id="candidate-detail-body" class="modal-body"></div>
        </div>
    </div>
</div>

<div id="loading-overlay">
    <div class="loading-content">
        <div class="spinner-border text-primary" role="status"><span class="visually-hidden">Loading...</span></div>
        <p id="loading-message"></p>
    </div>
</div>

<div class="toast-container position-fixed bottom-0 end-0 p-3"></div>

<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js"></script>
<script src="/assets/console.js"></script>
</body>
</html>
"##,
        css = CONSOLE_CSS,
        model = esc(MODEL_LABEL),
        status = model_status(),
        capabilities = render_capabilities(),
        rank_text = esc(ranking::RANK_TEXT.loading),
        rank_upload = esc(ranking::RANK_UPLOAD.loading),
        availability = esc(scheduling::AVAILABILITY.loading),
        schedule = esc(scheduling::SCHEDULE.loading),
        preparing = esc(interview::PREPARING_MESSAGE),
        follow_up = esc(interview::FOLLOW_UP.loading),
        analyze_interview = esc(recommendation::ANALYZE.loading),
        analyze_sentiment = esc(sentiment::ANALYZE.loading),
        send_email = esc(email::SEND.loading),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT_IDS: [&str; 23] = [
        "ranking-results",
        "emailModal",
        "emailForm",
        "emailRecipient",
        "emailSubject",
        "emailBody",
        "scheduler-form",
        "availability-results",
        "interview-container",
        "interview-completion",
        "interview-question",
        "interview-progress",
        "interview-session",
        "ranking-session",
        "follow-up-question",
        "recommendation-results",
        "sentiment-results",
        "candidateDetailModal",
        "candidate-detail-body",
        "loading-overlay",
        "loading-message",
        "llama-version",
        "model-capabilities",
    ];

    #[test]
    fn test_page_carries_every_contract_id_once() {
        let page = render_page();
        for id in CONTRACT_IDS {
            let needle = format!(r#"id="{id}""#);
            assert_eq!(page.matches(&needle).count(), 1, "id {id}");
        }
    }

    #[test]
    fn test_model_status_and_version() {
        let page = render_page();
        assert!(page.contains("Llama 3.x Online"));
        assert!(page.contains(r#"<span id="llama-version">Llama 3.x</span>"#));
    }

    #[test]
    fn test_capabilities_listed_in_order() {
        let html = render_capabilities();
        assert_eq!(html.matches("list-group-item").count(), CAPABILITIES.len());
        let first = html.find("Resume Analysis").unwrap();
        let last = html.find("Sentiment Analysis").unwrap();
        assert!(first < last);
        // "Q&A" is escaped
        assert!(html.contains("Interview Q&amp;A"));
    }

    #[test]
    fn test_every_form_posts_to_console_route() {
        let page = render_page();
        for action in [
            "/ui/rank-resumes",
            "/ui/schedule/availability",
            "/ui/schedule",
            "/ui/interview/start",
            "/ui/interview/answer",
            "/ui/interview/follow-up",
            "/ui/recommendation",
            "/ui/sentiment",
            "/ui/email/send",
        ] {
            assert!(page.contains(&format!(r#"data-action="{action}""#)), "{action}");
        }
    }

    #[test]
    fn test_forms_announce_their_loading_text() {
        let page = render_page();
        for (action, loading) in [
            ("/ui/rank-resumes", ranking::RANK_TEXT.loading),
            ("/ui/schedule/availability", scheduling::AVAILABILITY.loading),
            ("/ui/schedule", scheduling::SCHEDULE.loading),
            ("/ui/interview/start", interview::PREPARING_MESSAGE),
            ("/ui/interview/follow-up", interview::FOLLOW_UP.loading),
            ("/ui/recommendation", recommendation::ANALYZE.loading),
            ("/ui/sentiment", sentiment::ANALYZE.loading),
            ("/ui/email/send", email::SEND.loading),
        ] {
            let needle = format!(r#"data-action="{action}" data-loading="{loading}""#);
            assert!(page.contains(&needle), "{action}");
        }
        assert!(page.contains(&format!(
            r#"data-loading-upload="{}""#,
            ranking::RANK_UPLOAD.loading
        )));
    }

    #[test]
    fn test_interviewers_are_optional() {
        let page = render_page();
        assert!(page.contains(r#"name="interviewers" class="form-select" multiple>"#));
    }

    #[test]
    fn test_script_embedded() {
        assert!(CONSOLE_JS.contains("data-action"));
        assert!(CONSOLE_JS.contains("open_modal"));
        assert!(CONSOLE_JS.contains("dataset.loading"));
        assert!(CONSOLE_JS.contains("dataset.include"));
    }
}
