use std::sync::Arc;

use crate::agents::interview::{InterviewSessions, QuestionSource};
use crate::agents::ranking::CandidateCache;
use crate::backend::BackendClient;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub config: Config,
    /// Opening interview questions. Default: FixedQuestionBank.
    pub question_source: Arc<dyn QuestionSource>,
    pub interviews: InterviewSessions,
    /// Candidates from the latest ranking, for the detail modal.
    pub candidates: CandidateCache,
}
