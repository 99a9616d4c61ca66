//! Hire recommendation: transcript analysis and the recommendation card.

use std::time::Duration;

use tracing::info;

use crate::agents::RemoteAction;
use crate::backend::contracts::{Recommendation, TranscriptRequest, ANALYZE_INTERVIEW};
use crate::backend::BackendClient;
use crate::ui::markup::{esc, list_items, Tone};
use crate::ui::UiPatch;

pub const RESULTS_CONTAINER: &str = "recommendation-results";
pub const EXPORTING_MESSAGE: &str = "Generating PDF...";

pub const ANALYZE: RemoteAction = RemoteAction {
    endpoint: ANALYZE_INTERVIEW,
    loading: "Analyzing interview with Llama 3.x...",
    error_context: "Error analyzing interview",
    failure_context: "Error analyzing interview",
};

pub async fn analyze_interview(
    client: &BackendClient,
    ui: &mut UiPatch,
    transcript: &str,
) -> Option<Recommendation> {
    ANALYZE
        .call_enveloped(client, ui, &TranscriptRequest { transcript })
        .await
}

/// Decision headline color: only an exact "Hire" is green.
pub fn decision_tone(decision: &str) -> Tone {
    if decision == "Hire" {
        Tone::Success
    } else {
        Tone::Danger
    }
}

/// Confidence bar color: >75 success, else warning.
pub fn confidence_tone(confidence: f64) -> Tone {
    if confidence > 75.0 {
        Tone::Success
    } else {
        Tone::Warning
    }
}

pub fn render_recommendation(recommendation: &Recommendation) -> String {
    let confidence = recommendation.confidence;

    format!(
        r#"<div class="card">
    <div class="card-header">
        <h5 class="mb-0">Candidate: {name}</h5>
    </div>
    <div class="card-body">
        <div class="row mb-4">
            <div class="col">
                <h6>Strengths:</h6>
                <ul>{strengths}</ul>
            </div>
            <div class="col">
                <h6>Areas for Improvement:</h6>
                <ul>{weaknesses}</ul>
            </div>
        </div>
        <div class="recommendation-summary">
            <h5>Summary:</h5>
            <p>{summary}</p>
        </div>
        <div class="recommendation-decision text-center mt-4">
            <h3 class="text-{decision_tone}">Recommendation: {decision}</h3>
            <div class="progress mt-2">
                <div class="progress-bar bg-{confidence_tone}" role="progressbar" style="width: {confidence}%">Confidence: {confidence}%</div>
            </div>
        </div>
    </div>
    <div class="card-footer d-flex justify-content-end gap-2">
        <button type="button" class="btn btn-outline-secondary" data-action="/ui/recommendation/export" data-loading="{exporting}" data-candidate-id="{id}">Export PDF</button>
        <button type="button" class="btn btn-primary" data-action="/ui/recommendation/share" data-candidate-id="{id}">Share with Team</button>
    </div>
</div>
"#,
        name = esc(&recommendation.candidate_name),
        strengths = list_items(&recommendation.strengths),
        weaknesses = list_items(&recommendation.weaknesses),
        summary = esc(&recommendation.summary),
        decision_tone = decision_tone(&recommendation.decision).as_str(),
        decision = esc(&recommendation.decision),
        confidence_tone = confidence_tone(confidence).as_str(),
        id = esc(&recommendation.candidate_id),
        exporting = EXPORTING_MESSAGE,
    )
}

/// Placeholder PDF export: no document is produced, the pause stands in for generation.
pub async fn export_recommendation(ui: &mut UiPatch, candidate_id: &str, delay: Duration) {
    ui.show_loading(EXPORTING_MESSAGE);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    ui.hide_loading();
    info!("exported recommendation for candidate {candidate_id}");
    ui.success("Recommendation exported to PDF");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubBackend;
    use crate::ui::{ToastLevel, UiOp};
    use serde_json::json;

    fn sample(decision: &str, confidence: f64) -> Recommendation {
        Recommendation {
            candidate_id: "c7".to_string(),
            candidate_name: "Grace Hopper".to_string(),
            strengths: vec!["Compilers".to_string()],
            weaknesses: vec!["Punctuality".to_string()],
            summary: "Exceptional systems thinker.".to_string(),
            decision: decision.to_string(),
            confidence,
        }
    }

    #[test]
    fn test_hire_decision_is_green() {
        let html = render_recommendation(&sample("Hire", 88.0));
        assert!(html.contains(r#"<h3 class="text-success">Recommendation: Hire</h3>"#));
        assert!(html.contains("bg-success"));
        assert!(html.contains("Confidence: 88%"));
        assert!(html.contains(r#"data-loading="Generating PDF...""#));
    }

    #[test]
    fn test_other_decision_is_red() {
        let html = render_recommendation(&sample("No Hire", 75.0));
        assert!(html.contains(r#"<h3 class="text-danger">"#));
        // 75 is not above the threshold
        assert!(html.contains("bg-warning"));
    }

    #[test]
    fn test_decision_match_is_exact() {
        assert_eq!(decision_tone("hire"), Tone::Danger);
        assert_eq!(decision_tone("Hire"), Tone::Success);
    }

    #[test]
    fn test_lists_and_summary_escaped() {
        let mut rec = sample("Hire", 90.0);
        rec.summary = "<b>bold</b>".to_string();
        let html = render_recommendation(&rec);
        assert!(html.contains("<li>Compilers</li>"));
        assert!(html.contains("<li>Punctuality</li>"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[tokio::test]
    async fn test_analyze_interview_parses_payload() {
        let stub = StubBackend::start().await;
        stub.respond(
            ANALYZE_INTERVIEW,
            200,
            json!({
                "candidateId": "c7", "candidateName": "Grace Hopper",
                "strengths": ["Compilers"], "weaknesses": [],
                "summary": "Strong", "decision": "Hire", "confidence": 92
            }),
        );
        let mut ui = UiPatch::new();

        let rec = analyze_interview(&stub.client(), &mut ui, "Q: ... A: ...")
            .await
            .unwrap();

        assert_eq!(rec.candidate_name, "Grace Hopper");
        assert_eq!(stub.requests()[0].body, json!({"transcript": "Q: ... A: ..."}));
    }

    #[tokio::test]
    async fn test_analyze_interview_failure_is_none() {
        let stub = StubBackend::start().await;
        stub.respond(ANALYZE_INTERVIEW, 200, json!({"unexpected": true}));
        let mut ui = UiPatch::new();

        let rec = analyze_interview(&stub.client(), &mut ui, "transcript").await;

        assert!(rec.is_none());
        let errors = ui.toasts(ToastLevel::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("Error analyzing interview: JSON parse error"));
    }

    #[tokio::test]
    async fn test_export_brackets_with_loading() {
        let mut ui = UiPatch::new();
        export_recommendation(&mut ui, "c7", Duration::ZERO).await;

        assert_eq!(
            ui.ops[0],
            UiOp::ShowLoading {
                message: "Generating PDF...".to_string()
            }
        );
        assert_eq!(ui.ops[1], UiOp::HideLoading);
        assert_eq!(
            ui.toasts(ToastLevel::Success),
            vec!["Recommendation exported to PDF"]
        );
    }

    #[tokio::test]
    async fn test_reported_failure_shows_backend_message() {
        let stub = StubBackend::start().await;
        stub.respond(
            ANALYZE_INTERVIEW,
            200,
            json!({"success": false, "message": "model offline"}),
        );
        let mut ui = UiPatch::new();

        let rec = analyze_interview(&stub.client(), &mut ui, "transcript").await;

        assert!(rec.is_none());
        assert_eq!(
            ui.toasts(ToastLevel::Error),
            vec!["Error analyzing interview: model offline"]
        );
        assert!(!ui.has_replace());
    }
}
