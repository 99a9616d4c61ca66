//! Resume ranking: forwards a job description plus resumes to the ranking
//! endpoint and renders the ranked candidates as cards.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::agents::RemoteAction;
use crate::backend::contracts::{Candidate, RankResumesRequest, RankingResponse, RANK_RESUMES};
use crate::backend::BackendClient;
use crate::ui::markup::{esc, list_items, Tone};
use crate::ui::UiPatch;

pub const RESULTS_CONTAINER: &str = "ranking-results";
pub const DETAIL_MODAL: &str = "candidateDetailModal";
pub const DETAIL_BODY: &str = "candidate-detail-body";
pub const RANKING_FIELD: &str = "ranking-session";

pub const RANK_TEXT: RemoteAction = RemoteAction {
    endpoint: RANK_RESUMES,
    loading: "Analyzing resumes with Llama 3.x...",
    error_context: "Error ranking resumes",
    failure_context: "Error ranking resumes",
};

pub const RANK_UPLOAD: RemoteAction = RemoteAction {
    endpoint: RANK_RESUMES,
    loading: "Uploading and processing resumes...",
    error_context: "Error",
    failure_context: "Error",
};

/// One resume file received from the ranking form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Ranks pasted resume texts. Resolves to an empty list on any failure.
pub async fn rank_resumes(
    client: &BackendClient,
    ui: &mut UiPatch,
    job_description: &str,
    resumes: &[String],
) -> Vec<Candidate> {
    let request = RankResumesRequest {
        job_description,
        resumes,
    };

    RANK_TEXT
        .call_acknowledged::<_, RankingResponse>(client, ui, &request)
        .await
        .map(|response| response.rankings)
        .unwrap_or_default()
}

/// Ranks uploaded resume files via a multipart submission.
pub async fn rank_uploads(
    client: &BackendClient,
    ui: &mut UiPatch,
    job_description: &str,
    uploads: Vec<ResumeUpload>,
) -> Option<Vec<Candidate>> {
    let mut form = Form::new().text("job_description", job_description.to_string());
    for upload in uploads {
        debug!("attaching resume {} ({} bytes)", upload.file_name, upload.bytes.len());
        form = form.part("resumes", resume_part(upload));
    }

    let response = RANK_UPLOAD
        .run(ui, client.post_multipart::<RankingResponse>(RANK_RESUMES, form))
        .await?;

    RANK_UPLOAD.check(ui, response).map(|response| response.rankings)
}

fn resume_part(upload: ResumeUpload) -> Part {
    let ResumeUpload {
        file_name,
        content_type,
        bytes,
    } = upload;
    let untyped = || Part::bytes(bytes.to_vec()).file_name(file_name.clone());

    match content_type {
        // An unparseable content type still uploads, just untyped
        Some(mime) => untyped().mime_str(&mime).unwrap_or_else(|_| untyped()),
        None => untyped(),
    }
}

/// Match percentage shown on a card: `round(score * 100)`.
pub fn match_percent(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}

/// Card/badge color for a match percentage: >80 success, >60 warning, else danger.
pub fn score_tone(percent: u32) -> Tone {
    if percent > 80 {
        Tone::Success
    } else if percent > 60 {
        Tone::Warning
    } else {
        Tone::Danger
    }
}

/// One card per candidate, in the order received, numbered from 1.
pub fn render_rankings(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| render_card(index + 1, candidate))
        .collect()
}

fn render_card(position: usize, candidate: &Candidate) -> String {
    let percent = match_percent(candidate.score);
    let tone = score_tone(percent).as_str();

    format!(
        r#"<div class="card mb-3 border-{tone}">
    <div class="card-header d-flex justify-content-between align-items-center">
        <h5 class="mb-0">{position}. {name}</h5>
        <span class="badge bg-{tone}">{percent}% Match</span>
    </div>
    <div class="card-body">
        <h6>Top Skills Matched:</h6>
        <ul class="skill-list">{matched}</ul>
        <h6>Missing Skills:</h6>
        <ul class="missing-list">{missing}</ul>
        <div class="d-flex justify-content-end gap-2 mt-3">
            <button type="button" class="btn btn-sm btn-primary" data-action="/ui/email/prepare" data-recipient="{email}" data-template="interview">Schedule Interview</button>
            <button type="button" class="btn btn-sm btn-outline-secondary" data-action="/ui/candidates/details" data-include="ranking-session" data-candidate-id="{id}">View Details</button>
        </div>
    </div>
</div>
"#,
        name = esc(&candidate.name),
        matched = list_items(&candidate.matched_skills),
        missing = list_items(&candidate.missing_skills),
        email = esc(&candidate.email),
        id = esc(&candidate.id),
    )
}

/// Each page's most recent successful ranking, keyed by the ranking ID the
/// page holds in its hidden `ranking-session` field.
#[derive(Clone, Default)]
pub struct CandidateCache {
    inner: Arc<RwLock<HashMap<Uuid, HashMap<String, Candidate>>>>,
}

impl CandidateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a ranking and returns its ID. The page's `previous` ranking,
    /// if any, is dropped.
    pub async fn remember(&self, previous: Option<Uuid>, candidates: &[Candidate]) -> Uuid {
        let id = Uuid::new_v4();
        let ranked = candidates
            .iter()
            .map(|candidate| (candidate.id.clone(), candidate.clone()))
            .collect();

        let mut guard = self.inner.write().await;
        if let Some(old) = previous {
            guard.remove(&old);
        }
        guard.insert(id, ranked);
        info!(
            "cached ranking {id} ({} candidates, {} rankings held)",
            candidates.len(),
            guard.len()
        );
        id
    }

    pub async fn get(&self, ranking: Uuid, id: &str) -> Option<Candidate> {
        self.inner.read().await.get(&ranking)?.get(id).cloned()
    }
}

/// Body of the candidate detail modal.
pub fn render_candidate_detail(candidate: &Candidate) -> String {
    let percent = match_percent(candidate.score);
    let tone = score_tone(percent).as_str();

    let requirements: String = candidate
        .matched_skills
        .iter()
        .map(|skill| format!(r#"<li class="matched">{}</li>"#, esc(skill)))
        .chain(
            candidate
                .missing_skills
                .iter()
                .map(|skill| format!(r#"<li class="missing">{}</li>"#, esc(skill))),
        )
        .collect();

    format!(
        r#"<div class="candidate-profile mb-4">
    <h4>{name}</h4>
    <div class="d-flex gap-3 mb-3"><span><i class="bi bi-envelope"></i> {email}</span></div>
</div>
<div class="skill-match">
    <span>Overall match</span>
    <div class="progress"><div class="progress-bar bg-{tone}" style="width: {percent}%">{percent}%</div></div>
</div>
<h5 class="mt-4">Key Requirements</h5>
<ul class="requirement-list">{requirements}</ul>
<div class="modal-footer px-0">
    <button type="button" class="btn btn-primary" data-action="/ui/email/prepare" data-recipient="{email}" data-template="interview">Schedule Interview</button>
</div>
"#,
        name = esc(&candidate.name),
        email = esc(&candidate.email),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubBackend;
    use crate::ui::ToastLevel;
    use serde_json::json;

    fn candidate(id: &str, name: &str, score: f64) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            score,
            matched_skills: vec!["Rust".to_string()],
            missing_skills: vec!["Kubernetes".to_string()],
        }
    }

    #[test]
    fn test_boundary_is_strictly_greater_than() {
        assert_eq!(score_tone(match_percent(0.81)), Tone::Success);
        assert_eq!(score_tone(match_percent(0.80)), Tone::Warning);
        assert_eq!(score_tone(match_percent(0.61)), Tone::Warning);
        assert_eq!(score_tone(match_percent(0.60)), Tone::Danger);
    }

    #[test]
    fn test_match_percent_rounds() {
        assert_eq!(match_percent(0.805), 81);
        assert_eq!(match_percent(0.0), 0);
        assert_eq!(match_percent(1.0), 100);
    }

    #[test]
    fn test_one_card_per_candidate_in_order() {
        let html = render_rankings(&[
            candidate("c1", "Ada", 0.91),
            candidate("c2", "Grace", 0.7),
            candidate("c3", "Linus", 0.2),
        ]);

        assert_eq!(html.matches(r#"<div class="card mb-3"#).count(), 3);
        let ada = html.find("1. Ada").unwrap();
        let grace = html.find("2. Grace").unwrap();
        let linus = html.find("3. Linus").unwrap();
        assert!(ada < grace && grace < linus);

        assert!(html.contains(r#"border-success"#));
        assert!(html.contains(r#"<span class="badge bg-warning">70% Match</span>"#));
        assert!(html.contains(r#"<span class="badge bg-danger">20% Match</span>"#));
    }

    #[test]
    fn test_badge_at_81_is_success() {
        let html = render_rankings(&[candidate("c1", "Ada", 0.81)]);
        assert!(html.contains(r#"<span class="badge bg-success">81% Match</span>"#));
    }

    #[test]
    fn test_badge_at_80_is_warning() {
        let html = render_rankings(&[candidate("c1", "Ada", 0.80)]);
        assert!(html.contains(r#"<span class="badge bg-warning">80% Match</span>"#));
    }

    #[test]
    fn test_candidate_markup_is_escaped() {
        let html = render_rankings(&[candidate("c1", "<script>alert(1)</script>", 0.9)]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_ranking_renders_nothing() {
        assert_eq!(render_rankings(&[]), "");
    }

    #[tokio::test]
    async fn test_rank_resumes_returns_rankings() {
        let stub = StubBackend::start().await;
        stub.respond(
            RANK_RESUMES,
            200,
            json!({"success": true, "rankings": [{"id": "c1", "name": "Ada", "score": 0.9}]}),
        );
        let mut ui = UiPatch::new();

        let ranked = rank_resumes(
            &stub.client(),
            &mut ui,
            "Rust engineer",
            &["resume one".to_string()],
        )
        .await;

        assert_eq!(ranked.len(), 1);
        let seen = stub.requests();
        assert_eq!(seen[0].body["jobDescription"], "Rust engineer");
        assert_eq!(seen[0].body["resumes"][0], "resume one");
    }

    #[tokio::test]
    async fn test_rank_resumes_failure_is_empty() {
        let client = BackendClient::new("http://127.0.0.1:1").unwrap();
        let mut ui = UiPatch::new();

        let ranked = rank_resumes(&client, &mut ui, "jd", &["r".to_string()]).await;

        assert!(ranked.is_empty());
        assert_eq!(ui.toasts(ToastLevel::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_rank_uploads_sends_multipart() {
        let stub = StubBackend::start().await;
        stub.respond(RANK_RESUMES, 200, json!({"success": true, "rankings": []}));
        let mut ui = UiPatch::new();

        let uploads = vec![ResumeUpload {
            file_name: "ada.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        }];
        let ranked = rank_uploads(&stub.client(), &mut ui, "Rust engineer", uploads).await;

        assert_eq!(ranked, Some(vec![]));
        let seen = &stub.requests()[0];
        assert!(seen
            .content_type
            .as_deref()
            .unwrap_or_default()
            .starts_with("multipart/form-data"));
        let raw = String::from_utf8_lossy(&seen.raw);
        assert!(raw.contains(r#"name="job_description""#));
        assert!(raw.contains(r#"filename="ada.pdf""#));
    }

    #[tokio::test]
    async fn test_rank_uploads_reports_backend_message() {
        let stub = StubBackend::start().await;
        stub.respond(
            RANK_RESUMES,
            200,
            json!({"success": false, "message": "unreadable PDF"}),
        );
        let mut ui = UiPatch::new();

        let ranked = rank_uploads(&stub.client(), &mut ui, "jd", vec![]).await;

        assert!(ranked.is_none());
        assert_eq!(ui.toasts(ToastLevel::Error), vec!["Error: unreadable PDF"]);
    }

    #[tokio::test]
    async fn test_cache_replaced_by_latest_ranking() {
        let cache = CandidateCache::new();
        let first = cache.remember(None, &[candidate("c1", "Ada", 0.9)]).await;
        let second = cache
            .remember(Some(first), &[candidate("c2", "Grace", 0.7)])
            .await;

        assert!(cache.get(first, "c1").await.is_none());
        assert_eq!(cache.get(second, "c2").await.unwrap().name, "Grace");
    }

    #[tokio::test]
    async fn test_cache_keeps_pages_apart() {
        let cache = CandidateCache::new();
        let page_a = cache.remember(None, &[candidate("c1", "Ada", 0.9)]).await;
        let page_b = cache.remember(None, &[candidate("c1", "Grace", 0.7)]).await;

        assert_eq!(cache.get(page_a, "c1").await.unwrap().name, "Ada");
        assert_eq!(cache.get(page_b, "c1").await.unwrap().name, "Grace");
        assert!(cache.get(Uuid::new_v4(), "c1").await.is_none());
    }

    #[test]
    fn test_candidate_detail_lists_requirements() {
        let html = render_candidate_detail(&candidate("c1", "Ada", 0.65));
        assert!(html.contains(r#"<li class="matched">Rust</li>"#));
        assert!(html.contains(r#"<li class="missing">Kubernetes</li>"#));
        assert!(html.contains("bg-warning"));
    }
}
