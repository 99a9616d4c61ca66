//! Console actions: one handler per `data-action` route, each answering with a UI patch.
//!
//! Missing input is reported as a single error toast before any backend call.
//! Requests the console cannot interpret at all (unreadable uploads, unknown
//! interview sessions) are rejected with an `AppError`.

use axum::{
    extract::{Multipart, State},
    Form, Json,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::agents::interview::InterviewStep;
use crate::agents::ranking::ResumeUpload;
use crate::agents::{email, interview, ranking, recommendation, scheduling, sentiment};
use crate::errors::AppError;
use crate::forms::{FormError, FormFields};
use crate::state::AppState;
use crate::ui::UiPatch;

const RANKING_REQUIRED: &str = "Please provide a job description and at least one resume";
const ALL_FIELDS: &str = "Please fill in all fields";
const REQUIRED_FIELDS: &str = "Please fill in all required fields";
const ANSWER_REQUIRED: &str = "Please provide an answer";
const TRANSCRIPT_REQUIRED: &str = "Please provide an interview transcript";

type Fields = Form<Vec<(String, String)>>;

/// A patch holding only the validation message.
fn rejected(err: FormError) -> Json<UiPatch> {
    debug!("rejected submission: {err}");
    let mut ui = UiPatch::new();
    ui.error(err.to_string());
    Json(ui)
}

fn session_id(form: &FormFields) -> Result<Uuid, AppError> {
    Uuid::parse_str(form.get("session_id"))
        .map_err(|_| AppError::Validation("Missing or malformed interview session".to_string()))
}

fn unknown_session(id: Uuid) -> AppError {
    AppError::NotFound(format!("Interview session {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Ranking
// ────────────────────────────────────────────────────────────────────────────

/// POST /ui/rank-resumes
pub async fn handle_rank_resumes(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UiPatch>, AppError> {
    let mut job_description = String::new();
    let mut uploads = Vec::new();
    let mut pasted = Vec::new();
    let mut previous = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" => job_description = field.text().await?,
            "resume_text" => {
                let text = field.text().await?;
                if !text.is_empty() {
                    pasted.push(text);
                }
            }
            "resumes" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                // An empty file input still submits one nameless, empty part
                if !file_name.is_empty() && !bytes.is_empty() {
                    uploads.push(ResumeUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "ranking_id" => previous = Uuid::parse_str(&field.text().await?).ok(),
            other => debug!("ignoring ranking form field '{other}'"),
        }
    }

    if job_description.is_empty() || (uploads.is_empty() && pasted.is_empty()) {
        return Ok(rejected(FormError(RANKING_REQUIRED)));
    }

    let mut ui = UiPatch::new();
    let candidates = if uploads.is_empty() {
        let ranked =
            ranking::rank_resumes(&state.backend, &mut ui, &job_description, &pasted).await;
        (!ui.has_error()).then_some(ranked)
    } else {
        ranking::rank_uploads(&state.backend, &mut ui, &job_description, uploads).await
    };

    if let Some(candidates) = candidates {
        info!("ranked {} candidates", candidates.len());
        let ranking_id = state.candidates.remember(previous, &candidates).await;
        ui.set_value(ranking::RANKING_FIELD, ranking_id.to_string());
        ui.replace(
            ranking::RESULTS_CONTAINER,
            ranking::render_rankings(&candidates),
        );
    }
    Ok(Json(ui))
}

/// POST /ui/candidates/details
pub async fn handle_candidate_details(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    let candidate_id = form.get("candidate_id");
    let mut ui = UiPatch::new();

    let cached = match Uuid::parse_str(form.get("ranking_id")) {
        Ok(ranking) => state.candidates.get(ranking, candidate_id).await,
        Err(_) => None,
    };
    match cached {
        Some(candidate) => {
            ui.replace(
                ranking::DETAIL_BODY,
                ranking::render_candidate_detail(&candidate),
            );
            ui.open_modal(ranking::DETAIL_MODAL, Vec::new());
        }
        None => {
            debug!("no cached candidate '{candidate_id}'");
            ui.error("Candidate details are not available. Rank resumes first.");
        }
    }
    Json(ui)
}

// ────────────────────────────────────────────────────────────────────────────
// Email
// ────────────────────────────────────────────────────────────────────────────

/// POST /ui/email/prepare
pub async fn handle_prepare_email(Form(fields): Fields) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    let mut ui = UiPatch::new();
    email::prepare_email(&mut ui, form.get("recipient"), form.get("template"));
    Json(ui)
}

/// POST /ui/email/send
pub async fn handle_send_email(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    if let Err(err) = form.require(&["recipient", "subject", "body"], ALL_FIELDS) {
        return rejected(err);
    }

    let mut ui = UiPatch::new();
    let sent = email::send_email(
        &state.backend,
        &mut ui,
        form.get("recipient"),
        form.get("subject"),
        form.get("body"),
    )
    .await;
    if sent {
        ui.close_modal(email::EMAIL_MODAL);
    }
    Json(ui)
}

// ────────────────────────────────────────────────────────────────────────────
// Scheduling
// ────────────────────────────────────────────────────────────────────────────

/// POST /ui/schedule/availability
pub async fn handle_check_availability(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    if let Err(err) = form.require(&["start_date", "end_date"], REQUIRED_FIELDS) {
        return rejected(err);
    }

    let mut ui = UiPatch::new();
    let slots = scheduling::check_availability(
        &state.backend,
        &mut ui,
        form.get("start_date"),
        form.get("end_date"),
    )
    .await;
    if !ui.has_error() {
        ui.replace(
            scheduling::AVAILABILITY_CONTAINER,
            scheduling::render_slots(&slots),
        );
    }
    Json(ui)
}

/// POST /ui/schedule
pub async fn handle_schedule_interview(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    let interviewers = form.get_all("interviewers");
    let required = form.require(
        &["candidate_email", "interview_date", "interview_time", "duration"],
        REQUIRED_FIELDS,
    );
    if let Err(err) = required {
        return rejected(err);
    }

    let datetime = scheduling::combine_datetime(form.get("interview_date"), form.get("interview_time"));
    let mut ui = UiPatch::new();
    let booked = scheduling::schedule_interview(
        &state.backend,
        &mut ui,
        form.get("candidate_email"),
        &datetime,
        form.get("duration"),
        &interviewers,
    )
    .await;
    if booked {
        ui.reset_form(scheduling::SCHEDULER_FORM);
    }
    Json(ui)
}

// ────────────────────────────────────────────────────────────────────────────
// Interview
// ────────────────────────────────────────────────────────────────────────────

/// POST /ui/interview/start
pub async fn handle_start_interview(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    if let Err(err) = form.require(&["job_title", "candidate_name"], REQUIRED_FIELDS) {
        return rejected(err);
    }

    let mut ui = UiPatch::new();
    ui.show_loading(interview::PREPARING_MESSAGE);
    let questions = state
        .question_source
        .opening_questions(form.get("job_title"), form.get("candidate_name"))
        .await;
    ui.hide_loading();

    let total = questions.len();
    let first = questions.first().cloned();
    let previous = Uuid::parse_str(form.get("session_id")).ok();
    let id = state.interviews.begin(previous, questions).await;

    ui.set_value(interview::SESSION_FIELD, id.to_string());
    ui.set_value(interview::ANSWER_FIELD, "");
    ui.set_text(interview::FOLLOW_UP_TEXT, "");
    ui.hide(interview::COMPLETION_CONTAINER);
    ui.show(interview::INTERVIEW_CONTAINER);
    match first {
        Some(question) => interview::display_question(&mut ui, 0, &question, total),
        None => interview::display_completion(&mut ui),
    }
    Json(ui)
}

/// POST /ui/interview/answer
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Result<Json<UiPatch>, AppError> {
    let form = FormFields::from(fields);
    if let Err(err) = form.require(&["answer"], ANSWER_REQUIRED) {
        return Ok(rejected(err));
    }
    let id = session_id(&form)?;

    let step = state
        .interviews
        .submit_answer(id, form.get("answer"))
        .await
        .ok_or_else(|| unknown_session(id))?;

    let mut ui = UiPatch::new();
    match step {
        Ok(InterviewStep::Next {
            index,
            question,
            total,
        }) => {
            ui.set_value(interview::ANSWER_FIELD, "");
            ui.set_text(interview::FOLLOW_UP_TEXT, "");
            interview::display_question(&mut ui, index, &question, total);
        }
        Ok(InterviewStep::Completed) => {
            info!("interview session {id} completed");
            interview::display_completion(&mut ui);
        }
        Err(err) => ui.error(err.to_string()),
    }
    Ok(Json(ui))
}

/// POST /ui/interview/follow-up
pub async fn handle_follow_up(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Result<Json<UiPatch>, AppError> {
    let form = FormFields::from(fields);
    let id = session_id(&form)?;
    let history = state
        .interviews
        .history(id)
        .await
        .ok_or_else(|| unknown_session(id))?;

    let mut ui = UiPatch::new();
    let question = interview::generate_adaptive_question(&state.backend, &mut ui, &history).await;
    ui.set_text(interview::FOLLOW_UP_TEXT, question);
    Ok(Json(ui))
}

// ────────────────────────────────────────────────────────────────────────────
// Recommendation & sentiment
// ────────────────────────────────────────────────────────────────────────────

/// POST /ui/recommendation
pub async fn handle_recommendation(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    if let Err(err) = form.require(&["transcript"], TRANSCRIPT_REQUIRED) {
        return rejected(err);
    }

    let mut ui = UiPatch::new();
    if let Some(rec) =
        recommendation::analyze_interview(&state.backend, &mut ui, form.get("transcript")).await
    {
        ui.replace(
            recommendation::RESULTS_CONTAINER,
            recommendation::render_recommendation(&rec),
        );
    }
    Json(ui)
}

/// POST /ui/recommendation/export
pub async fn handle_export_recommendation(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    let mut ui = UiPatch::new();
    recommendation::export_recommendation(
        &mut ui,
        form.get("candidate_id"),
        state.config.export_delay,
    )
    .await;
    Json(ui)
}

/// POST /ui/recommendation/share
pub async fn handle_share_recommendation(Form(fields): Fields) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    debug!("sharing recommendation for '{}'", form.get("candidate_id"));
    let mut ui = UiPatch::new();
    email::prepare_email(&mut ui, email::TEAM_ADDRESS, "recommendation");
    Json(ui)
}

/// POST /ui/sentiment
pub async fn handle_sentiment(
    State(state): State<AppState>,
    Form(fields): Fields,
) -> Json<UiPatch> {
    let form = FormFields::from(fields);
    if let Err(err) = form.require(&["transcript"], TRANSCRIPT_REQUIRED) {
        return rejected(err);
    }

    let mut ui = UiPatch::new();
    if let Some(analysis) =
        sentiment::analyze_transcript(&state.backend, &mut ui, form.get("transcript")).await
    {
        ui.replace(
            sentiment::RESULTS_CONTAINER,
            sentiment::render_analysis(&analysis),
        );
    }
    Json(ui)
}
