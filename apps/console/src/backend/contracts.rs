//! Wire contracts for the recruiting backend endpoints.
//!
//! Shapes are inferred from what the console sends and reads. Fields are
//! lenient (`#[serde(default)]`) because the backend schema is not enforced
//! here; only the fields the console renders are modelled.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const RANK_RESUMES: &str = "/api/rank-resumes";
pub const SEND_EMAIL: &str = "/api/send-email";
pub const CHECK_AVAILABILITY: &str = "/api/check-availability";
pub const SCHEDULE_INTERVIEW: &str = "/api/schedule-interview";
pub const GENERATE_QUESTION: &str = "/api/generate-question";
pub const ANALYZE_INTERVIEW: &str = "/api/analyze-interview";
pub const ANALYZE_SENTIMENT: &str = "/api/analyze-sentiment";

/// Responses that report application-level success in a `success` field.
pub trait Acknowledged {
    /// `None` when the backend reported success, otherwise its message.
    fn failure(&self) -> Option<String>;
}

/// Payloads without their own `success` field may still arrive wrapped in the
/// `{success: false, message}` failure envelope; check the raw JSON first.
impl Acknowledged for Value {
    fn failure(&self) -> Option<String> {
        match self.get("success") {
            Some(Value::Bool(false)) => Some(
                self.get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
            _ => None,
        }
    }
}

fn default_success() -> bool {
    true
}

/// Accepts IDs sent either as strings or as numbers.
fn id_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResumesRequest<'a> {
    pub job_description: &'a str,
    pub resumes: &'a [String],
}

/// A resume/applicant record returned by the ranking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, deserialize_with = "id_text")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// 0.0 to 1.0
    pub score: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub rankings: Vec<Candidate>,
}

impl Acknowledged for RankingResponse {
    fn failure(&self) -> Option<String> {
        (!self.success).then(|| self.message.clone().unwrap_or_default())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Email / scheduling
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SendEmailRequest<'a> {
    pub recipient: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

/// Generic `{success, message}` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl Acknowledged for Ack {
    fn failure(&self) -> Option<String> {
        (!self.success).then(|| self.message.clone().unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest<'a> {
    pub start_date: &'a str,
    pub end_date: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub available_slots: Vec<AvailableSlot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInterviewRequest<'a> {
    pub candidate_email: &'a str,
    pub datetime: &'a str,
    pub duration: &'a str,
    pub interviewers: &'a [String],
}

// ────────────────────────────────────────────────────────────────────────────
// Interview questions
// ────────────────────────────────────────────────────────────────────────────

/// One answered question, in the order it was asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRequest<'a> {
    pub interview_history: &'a [QaPair],
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionResponse {
    pub question: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Analyses
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TranscriptRequest<'a> {
    pub transcript: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(default, deserialize_with = "id_text")]
    pub candidate_id: String,
    pub candidate_name: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub summary: String,
    pub decision: String,
    /// 0 to 100
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyMoment {
    #[serde(default)]
    pub timestamp: String,
    pub text: String,
    #[serde(default)]
    pub sentiment: String,
}

/// Emotion scores are 0 to 100.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    pub confidence: f64,
    pub enthusiasm: f64,
    pub anxiety: f64,
    pub hesitation: f64,
    pub engagement: f64,
    #[serde(default)]
    pub key_moments: Vec<KeyMoment>,
    #[serde(default)]
    pub summary: String,
    pub overall_sentiment: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ranking_response_without_success_field_is_success() {
        let response: RankingResponse = serde_json::from_value(json!({
            "rankings": [{"id": "c1", "name": "Ada", "score": 0.9}]
        }))
        .unwrap();
        assert!(response.failure().is_none());
        assert_eq!(response.rankings[0].matched_skills, Vec::<String>::new());
    }

    #[test]
    fn test_numeric_candidate_id_becomes_text() {
        let response: RankingResponse = serde_json::from_value(json!({
            "success": true,
            "rankings": [{"id": 42, "name": "Ada", "score": 0.5}]
        }))
        .unwrap();
        assert_eq!(response.rankings[0].id, "42");
    }

    #[test]
    fn test_ack_failure_carries_message() {
        let ack: Ack = serde_json::from_value(json!({
            "success": false,
            "message": "mailbox full"
        }))
        .unwrap();
        assert_eq!(ack.failure().as_deref(), Some("mailbox full"));
    }

    #[test]
    fn test_requests_use_camel_case_keys() {
        let interviewers = vec!["ana".to_string()];
        let value = serde_json::to_value(ScheduleInterviewRequest {
            candidate_email: "c@x.io",
            datetime: "2026-10-20T10:00",
            duration: "45",
            interviewers: &interviewers,
        })
        .unwrap();
        assert_eq!(value["candidateEmail"], "c@x.io");
        assert_eq!(value["interviewers"][0], "ana");
    }

    #[test]
    fn test_sentiment_payload_parses_key_moments() {
        let analysis: SentimentAnalysis = serde_json::from_value(json!({
            "confidence": 80, "enthusiasm": 55, "anxiety": 20,
            "hesitation": 30, "engagement": 90,
            "keyMoments": [{"timestamp": "02:10", "text": "Lit up on Rust", "sentiment": "positive"}],
            "summary": "Strong",
            "overallSentiment": "Positive"
        }))
        .unwrap();
        assert_eq!(analysis.key_moments.len(), 1);
        assert_eq!(analysis.overall_sentiment, "Positive");
    }

    #[test]
    fn test_failure_envelope_read_from_raw_json() {
        let failed = json!({"success": false, "message": "model offline"});
        assert_eq!(failed.failure().as_deref(), Some("model offline"));

        let payload = json!({"candidateName": "Ada", "decision": "Hire"});
        assert!(payload.failure().is_none());
    }
}
