//! Plain-text rendering of a [`FormSnapshot`].
//!
//! Order follows the form: field errors, request error, username, password
//! violations, then the submission status.

use super::form::{FormSnapshot, SubmissionState};
use std::fmt::Write;

/// Render `snapshot` as terminal lines. The password itself is never shown.
#[must_use]
pub fn render(snapshot: &FormSnapshot) -> String {
    let mut out = String::new();

    for error in &snapshot.field_errors {
        let _ = writeln!(out, "- {}", error.message());
    }

    if let Some(message) = snapshot.outcome.message() {
        let _ = writeln!(out, "{message}");
    }

    let _ = writeln!(out, "Username: {}", snapshot.username);
    let _ = writeln!(out, "Password: ********");

    for message in snapshot.violations.messages() {
        let _ = writeln!(out, "  * {message}");
    }

    let status = match snapshot.state {
        SubmissionState::Idle => "ready",
        SubmissionState::Submitting => "creating user...",
        SubmissionState::Success => "user created",
        SubmissionState::Failed => "failed",
    };
    let _ = writeln!(out, "Status: {status}");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::{
        form::FieldError,
        outcome::{SubmissionOutcome, UNAUTHENTICATED_MESSAGE},
        password::{validate, Violations},
    };

    fn snapshot() -> FormSnapshot {
        FormSnapshot {
            username: "alice".to_string(),
            violations: Violations::default(),
            field_errors: Vec::new(),
            outcome: SubmissionOutcome::None,
            state: SubmissionState::Idle,
            user_created: false,
        }
    }

    #[test]
    fn test_render_clean_form() {
        assert_eq!(
            render(&snapshot()),
            "Username: alice\nPassword: ********\nStatus: ready\n"
        );
    }

    #[test]
    fn test_render_errors_first() {
        let mut snap = snapshot();
        snap.username = String::new();
        snap.field_errors = vec![FieldError::UsernameRequired];
        snap.violations = validate("NOLOWERCASE1");
        let out = render(&snap);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "- Username is required");
        assert_eq!(lines[1], "Username: ");
        assert_eq!(
            lines[3],
            "  * Password must contain at least one lowercase letter"
        );
    }

    #[test]
    fn test_render_outcome_message() {
        let mut snap = snapshot();
        snap.outcome = SubmissionOutcome::Unauthenticated;
        snap.state = SubmissionState::Failed;
        let out = render(&snap);
        assert!(out.starts_with(UNAUTHENTICATED_MESSAGE));
        assert!(out.ends_with("Status: failed\n"));
    }
}
