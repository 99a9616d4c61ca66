//! Candidate email: template prefill for the email modal and delivery via the backend.

use tracing::debug;

use crate::agents::RemoteAction;
use crate::backend::contracts::{Ack, SendEmailRequest, SEND_EMAIL};
use crate::backend::BackendClient;
use crate::ui::{FieldValue, UiPatch};

pub const EMAIL_MODAL: &str = "emailModal";
pub const RECIPIENT_FIELD: &str = "emailRecipient";
pub const SUBJECT_FIELD: &str = "emailSubject";
pub const BODY_FIELD: &str = "emailBody";

/// Recipient used when sharing a recommendation with the hiring team.
pub const TEAM_ADDRESS: &str = "team@company.com";

pub const SEND: RemoteAction = RemoteAction {
    endpoint: SEND_EMAIL,
    loading: "Sending email...",
    error_context: "Error sending email",
    failure_context: "Failed to send email",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailTemplate {
    pub subject: &'static str,
    pub body: &'static str,
}

const INTERVIEW: EmailTemplate = EmailTemplate {
    subject: "Interview Invitation - [Company Name]",
    body: "Dear [Candidate Name],\n\nWe are pleased to invite you for an interview for the [Job Title] position. Our team was impressed with your qualifications and experience.\n\n[Interview Details]\n\nPlease confirm your availability.\n\nBest regards,\n[Recruiter Name]\n[Company Name]",
};

const REJECTION: EmailTemplate = EmailTemplate {
    subject: "Application Status Update - [Company Name]",
    body: "Dear [Candidate Name],\n\nThank you for your interest in the [Job Title] position at [Company Name]. After careful consideration, we have decided to proceed with other candidates whose qualifications better match our current needs.\n\nWe appreciate your time and interest in our company, and we wish you the best in your job search.\n\nBest regards,\n[Recruiter Name]\n[Company Name]",
};

const OFFER: EmailTemplate = EmailTemplate {
    subject: "Job Offer - [Job Title] at [Company Name]",
    body: "Dear [Candidate Name],\n\nWe are delighted to offer you the [Job Title] position at [Company Name]. After our interviews and evaluation, we believe your skills and experience make you an excellent fit for our team.\n\n[Offer Details]\n\nPlease review the attached offer letter and let us know your decision by [Response Date].\n\nBest regards,\n[Recruiter Name]\n[Company Name]",
};

const BLANK: EmailTemplate = EmailTemplate {
    subject: "",
    body: "",
};

/// Looks up a template by key. Unknown keys yield an empty subject and body.
pub fn template(key: &str) -> EmailTemplate {
    match key {
        "interview" => INTERVIEW,
        "rejection" => REJECTION,
        "offer" => OFFER,
        _ => BLANK,
    }
}

/// Opens the email modal prefilled with `candidate_email` and the template's text.
pub fn prepare_email(ui: &mut UiPatch, candidate_email: &str, template_key: &str) {
    let chosen = template(template_key);
    debug!("preparing '{template_key}' email for {candidate_email}");

    ui.open_modal(
        EMAIL_MODAL,
        vec![
            FieldValue {
                target: RECIPIENT_FIELD.to_string(),
                value: candidate_email.to_string(),
            },
            FieldValue {
                target: SUBJECT_FIELD.to_string(),
                value: chosen.subject.to_string(),
            },
            FieldValue {
                target: BODY_FIELD.to_string(),
                value: chosen.body.to_string(),
            },
        ],
    );
}

/// Sends an email. `true` only when the backend confirms delivery.
pub async fn send_email(
    client: &BackendClient,
    ui: &mut UiPatch,
    recipient: &str,
    subject: &str,
    body: &str,
) -> bool {
    let request = SendEmailRequest {
        recipient,
        subject,
        body,
    };

    let sent = SEND
        .call_acknowledged::<_, Ack>(client, ui, &request)
        .await
        .is_some();
    if sent {
        ui.success("Email sent successfully!");
    }
    sent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubBackend;
    use crate::ui::{ToastLevel, UiOp};
    use serde_json::json;

    fn modal_fields(ui: &UiPatch) -> Vec<FieldValue> {
        ui.ops
            .iter()
            .find_map(|op| match op {
                UiOp::OpenModal { target, fields } if target == EMAIL_MODAL => {
                    Some(fields.clone())
                }
                _ => None,
            })
            .expect("email modal opened")
    }

    #[test]
    fn test_prepare_known_template() {
        let mut ui = UiPatch::new();
        prepare_email(&mut ui, "ada@example.com", "offer");

        let fields = modal_fields(&ui);
        assert_eq!(fields[0].value, "ada@example.com");
        assert_eq!(fields[1].value, "Job Offer - [Job Title] at [Company Name]");
        assert!(fields[2].value.starts_with("Dear [Candidate Name]"));
    }

    #[test]
    fn test_prepare_unknown_template_is_blank() {
        let mut ui = UiPatch::new();
        prepare_email(&mut ui, TEAM_ADDRESS, "recommendation");

        let fields = modal_fields(&ui);
        assert_eq!(fields[0].value, TEAM_ADDRESS);
        assert_eq!(fields[1].value, "");
        assert_eq!(fields[2].value, "");
        assert!(ui.toasts(ToastLevel::Error).is_empty());
    }

    #[tokio::test]
    async fn test_send_email_success_toasts() {
        let stub = StubBackend::start().await;
        stub.respond(SEND_EMAIL, 200, json!({"success": true, "message": "queued"}));
        let mut ui = UiPatch::new();

        let sent = send_email(&stub.client(), &mut ui, "ada@example.com", "Hi", "Body").await;

        assert!(sent);
        assert_eq!(ui.toasts(ToastLevel::Success), vec!["Email sent successfully!"]);
        assert_eq!(
            stub.requests()[0].body,
            json!({"recipient": "ada@example.com", "subject": "Hi", "body": "Body"})
        );
    }

    #[tokio::test]
    async fn test_send_email_failure_is_false() {
        let stub = StubBackend::start().await;
        stub.respond(SEND_EMAIL, 200, json!({"success": false, "message": "bad address"}));
        let mut ui = UiPatch::new();

        let sent = send_email(&stub.client(), &mut ui, "nobody", "Hi", "Body").await;

        assert!(!sent);
        assert!(ui.toasts(ToastLevel::Success).is_empty());
        assert_eq!(
            ui.toasts(ToastLevel::Error),
            vec!["Failed to send email: bad address"]
        );
    }
}
