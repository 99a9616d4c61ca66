//! Interview agent: question/answer session state and adaptive follow-ups.
//!
//! A session walks `NotStarted → AwaitingAnswer(0) → … → AwaitingAnswer(n-1) → Completed`.
//! There is no backward transition and no skip. Sessions live in memory for
//! the lifetime of the process and are keyed by an ID the page echoes back.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::agents::RemoteAction;
use crate::backend::contracts::{QaPair, QuestionRequest, QuestionResponse, GENERATE_QUESTION};
use crate::backend::BackendClient;
use crate::ui::UiPatch;

pub const SESSION_FIELD: &str = "interview-session";
pub const INTERVIEW_CONTAINER: &str = "interview-container";
pub const COMPLETION_CONTAINER: &str = "interview-completion";
pub const QUESTION_TEXT: &str = "interview-question";
pub const PROGRESS_BAR: &str = "interview-progress";
pub const FOLLOW_UP_TEXT: &str = "follow-up-question";
pub const ANSWER_FIELD: &str = "interview-answer";

pub const PREPARING_MESSAGE: &str = "Preparing interview questions with Llama 3.x...";
pub const FALLBACK_QUESTION: &str = "Could you elaborate more on your previous answer?";

pub const FOLLOW_UP: RemoteAction = RemoteAction {
    endpoint: GENERATE_QUESTION,
    loading: "Generating follow-up question...",
    error_context: "Error generating question",
    failure_context: "Error generating question",
};

const STANDARD_QUESTIONS: [&str; 5] = [
    "Tell me about your background and experience related to this role.",
    "What interests you about this position?",
    "Describe a challenging project you worked on and how you handled it.",
    "How do you stay updated with the latest trends in your field?",
    "Do you have any questions for us?",
];

// ────────────────────────────────────────────────────────────────────────────
// Session state machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterviewPhase {
    NotStarted,
    AwaitingAnswer(usize),
    Completed,
}

/// What the page should show after an answer is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewStep {
    Next {
        index: usize,
        question: String,
        total: usize,
    },
    Completed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterviewError {
    #[error("The interview has not started")]
    NotStarted,

    #[error("The interview is already complete")]
    AlreadyComplete,
}

#[derive(Debug, Clone)]
pub struct InterviewSession {
    questions: Vec<String>,
    answers: Vec<String>,
    history: Vec<QaPair>,
    phase: InterviewPhase,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            questions: Vec::new(),
            answers: Vec::new(),
            history: Vec::new(),
            phase: InterviewPhase::NotStarted,
        }
    }

    /// Resets all progress and begins asking `questions` from the first one.
    pub fn start(&mut self, questions: Vec<String>) {
        self.answers.clear();
        self.history.clear();
        self.phase = if questions.is_empty() {
            InterviewPhase::Completed
        } else {
            InterviewPhase::AwaitingAnswer(0)
        };
        self.questions = questions;
    }

    pub fn history(&self) -> &[QaPair] {
        &self.history
    }

    /// Records `answer` for the current question and advances.
    pub fn submit_answer(&mut self, answer: &str) -> Result<InterviewStep, InterviewError> {
        let index = match self.phase {
            InterviewPhase::NotStarted => return Err(InterviewError::NotStarted),
            InterviewPhase::Completed => return Err(InterviewError::AlreadyComplete),
            InterviewPhase::AwaitingAnswer(index) => index,
        };

        self.answers.push(answer.to_string());
        self.history.push(QaPair {
            question: self.questions[index].clone(),
            answer: answer.to_string(),
        });

        let next = index + 1;
        if next < self.questions.len() {
            self.phase = InterviewPhase::AwaitingAnswer(next);
            Ok(InterviewStep::Next {
                index: next,
                question: self.questions[next].clone(),
                total: self.questions.len(),
            })
        } else {
            self.phase = InterviewPhase::Completed;
            debug!("interview completed with {} answers", self.answers.len());
            Ok(InterviewStep::Completed)
        }
    }
}

#[cfg(test)]
impl InterviewSessions {
    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

#[cfg(test)]
impl InterviewSession {
    pub fn phase(&self) -> InterviewPhase {
        self.phase
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&str> {
        match self.phase {
            InterviewPhase::AwaitingAnswer(index) => self.questions.get(index).map(String::as_str),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Question sources
// ────────────────────────────────────────────────────────────────────────────

/// Supplies the opening question list for a new interview.
///
/// Carried in `AppState` as `Arc<dyn QuestionSource>`.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn opening_questions(&self, job_title: &str, candidate_name: &str) -> Vec<String>;
}

/// Fixed five-question bank, returned after a pause that stands in for generation.
pub struct FixedQuestionBank {
    delay: Duration,
}

impl FixedQuestionBank {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl QuestionSource for FixedQuestionBank {
    async fn opening_questions(&self, job_title: &str, candidate_name: &str) -> Vec<String> {
        debug!("preparing questions for {candidate_name} ({job_title})");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        STANDARD_QUESTIONS.iter().map(|q| q.to_string()).collect()
    }
}

/// Asks the backend for a follow-up based on the answers so far.
/// Falls back to a generic prompt when the call fails.
pub async fn generate_adaptive_question(
    client: &BackendClient,
    ui: &mut UiPatch,
    history: &[QaPair],
) -> String {
    let request = QuestionRequest {
        interview_history: history,
    };

    FOLLOW_UP
        .call_enveloped::<_, QuestionResponse>(client, ui, &request)
        .await
        .map(|response| response.question)
        .unwrap_or_else(|| FALLBACK_QUESTION.to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Session store
// ────────────────────────────────────────────────────────────────────────────

/// In-memory interview sessions keyed by session ID.
#[derive(Clone, Default)]
pub struct InterviewSessions {
    inner: Arc<Mutex<HashMap<Uuid, InterviewSession>>>,
}

impl InterviewSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a started session and returns its ID. A page restarting its
    /// interview passes its `previous` session, which is dropped.
    pub async fn begin(&self, previous: Option<Uuid>, questions: Vec<String>) -> Uuid {
        let id = Uuid::new_v4();
        let mut session = InterviewSession::new();
        session.start(questions);

        let mut guard = self.inner.lock().await;
        if let Some(old) = previous {
            if guard.remove(&old).is_some() {
                debug!("interview session {old} replaced");
            }
        }
        // An empty question list is complete on arrival; nothing to keep
        if session.phase != InterviewPhase::Completed {
            guard.insert(id, session);
        }
        info!("interview session {id} started ({} active)", guard.len());
        id
    }

    /// Applies `f` to the session, or returns `None` if it does not exist.
    pub async fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut InterviewSession) -> R,
    ) -> Option<R> {
        let mut guard = self.inner.lock().await;
        guard.get_mut(&id).map(f)
    }

    /// Records an answer. A session is released once its last answer is in,
    /// so `None` also covers sessions that already completed.
    pub async fn submit_answer(
        &self,
        id: Uuid,
        answer: &str,
    ) -> Option<Result<InterviewStep, InterviewError>> {
        let mut guard = self.inner.lock().await;
        let step = guard.get_mut(&id)?.submit_answer(answer);
        if step == Ok(InterviewStep::Completed) {
            guard.remove(&id);
            info!("interview session {id} completed and released");
        }
        Some(step)
    }

    pub async fn history(&self, id: Uuid) -> Option<Vec<QaPair>> {
        self.with_session(id, |session| session.history().to_vec()).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Shows question `index` of `total` with its progress bar.
pub fn display_question(ui: &mut UiPatch, index: usize, question: &str, total: usize) {
    let shown = index + 1;
    let percent = shown as f64 * 100.0 / total as f64;
    ui.set_text(QUESTION_TEXT, question);
    ui.set_progress(PROGRESS_BAR, percent, format!("Question {shown}/{total}"));
}

/// Swaps the interview panel for the completion panel.
pub fn display_completion(ui: &mut UiPatch) {
    ui.hide(INTERVIEW_CONTAINER);
    ui.show(COMPLETION_CONTAINER);
}
