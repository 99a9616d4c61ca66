pub mod handlers;
pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index_handler))
        .route("/health", get(health::health_handler))
        .route("/assets/console.js", get(pages::console_js_handler))
        // Ranking
        .route("/ui/rank-resumes", post(handlers::handle_rank_resumes))
        .route(
            "/ui/candidates/details",
            post(handlers::handle_candidate_details),
        )
        // Email
        .route("/ui/email/prepare", post(handlers::handle_prepare_email))
        .route("/ui/email/send", post(handlers::handle_send_email))
        // Scheduling
        .route(
            "/ui/schedule/availability",
            post(handlers::handle_check_availability),
        )
        .route("/ui/schedule", post(handlers::handle_schedule_interview))
        // Interview
        .route("/ui/interview/start", post(handlers::handle_start_interview))
        .route("/ui/interview/answer", post(handlers::handle_submit_answer))
        .route("/ui/interview/follow-up", post(handlers::handle_follow_up))
        // Recommendation & sentiment
        .route("/ui/recommendation", post(handlers::handle_recommendation))
        .route(
            "/ui/recommendation/export",
            post(handlers::handle_export_recommendation),
        )
        .route(
            "/ui/recommendation/share",
            post(handlers::handle_share_recommendation),
        )
        .route("/ui/sentiment", post(handlers::handle_sentiment))
        .with_state(state)
}
