//! Interview scheduling: calendar availability lookup and booking.

use chrono::{DateTime, NaiveDateTime};

use crate::agents::RemoteAction;
use crate::backend::contracts::{
    Ack, AvailabilityRequest, AvailabilityResponse, AvailableSlot, ScheduleInterviewRequest,
    CHECK_AVAILABILITY, SCHEDULE_INTERVIEW,
};
use crate::backend::BackendClient;
use crate::ui::markup::esc;
use crate::ui::UiPatch;

pub const SCHEDULER_FORM: &str = "scheduler-form";
pub const AVAILABILITY_CONTAINER: &str = "availability-results";

pub const AVAILABILITY: RemoteAction = RemoteAction {
    endpoint: CHECK_AVAILABILITY,
    loading: "Checking calendar availability...",
    error_context: "Error checking availability",
    failure_context: "Error checking availability",
};

pub const SCHEDULE: RemoteAction = RemoteAction {
    endpoint: SCHEDULE_INTERVIEW,
    loading: "Scheduling interview...",
    error_context: "Error scheduling interview",
    failure_context: "Failed to schedule interview",
};

/// Open calendar slots between two dates. Empty on failure.
pub async fn check_availability(
    client: &BackendClient,
    ui: &mut UiPatch,
    start_date: &str,
    end_date: &str,
) -> Vec<AvailableSlot> {
    let request = AvailabilityRequest {
        start_date,
        end_date,
    };

    AVAILABILITY
        .call_enveloped::<_, AvailabilityResponse>(client, ui, &request)
        .await
        .map(|response| response.available_slots)
        .unwrap_or_default()
}

/// Books an interview. `true` only when the backend confirms.
pub async fn schedule_interview(
    client: &BackendClient,
    ui: &mut UiPatch,
    candidate_email: &str,
    datetime: &str,
    duration: &str,
    interviewers: &[String],
) -> bool {
    let request = ScheduleInterviewRequest {
        candidate_email,
        datetime,
        duration,
        interviewers,
    };

    let booked = SCHEDULE
        .call_acknowledged::<_, Ack>(client, ui, &request)
        .await
        .is_some();
    if booked {
        ui.success("Interview scheduled successfully!");
    }
    booked
}

/// Joins the date and time inputs into the `datetime` the backend expects.
pub fn combine_datetime(date: &str, time: &str) -> String {
    format!("{date}T{time}")
}

pub fn render_slots(slots: &[AvailableSlot]) -> String {
    if slots.is_empty() {
        return r#"<p class="text-muted">No open slots in this range.</p>"#.to_string();
    }

    let items: String = slots
        .iter()
        .map(|slot| {
            format!(
                r#"<li class="list-group-item">{} to {}</li>"#,
                esc(&display_time(&slot.start)),
                esc(&display_time(&slot.end))
            )
        })
        .collect();

    format!(r#"<ul class="list-group">{items}</ul>"#)
}

/// Best-effort readable timestamp; unknown formats pass through unchanged.
fn display_time(raw: &str) -> String {
    const FORMAT: &str = "%a %b %-d, %H:%M";

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.format(FORMAT).to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(raw) {
        return parsed.format(FORMAT).to_string();
    }
    for layout in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, layout) {
            return parsed.format(FORMAT).to_string();
        }
    }
    raw.to_string()
}
