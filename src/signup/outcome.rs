//! Result classification for a signup attempt.
//!
//! The mapping from response status to outcome is table driven through
//! [`StatusPolicy`] because backends disagree on which status carries the
//! "password not allowed" rejection.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub const UNAUTHENTICATED_MESSAGE: &str = "Not authenticated to access this resource.";
pub const PASSWORD_REJECTED_MESSAGE: &str =
    "Sorry, the entered password is not allowed, please try a different one.";
pub const GENERIC_MESSAGE: &str = "Something went wrong, please try again.";

/// Maximum number of body characters kept for diagnostics.
const MAX_BODY_CHARS: usize = 200;

/// Why a submission did not succeed. The `Display` output is for logs only;
/// use [`SubmissionOutcome`] for anything shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("not authenticated to access the signup endpoint")]
    Unauthenticated,
    #[error("password rejected by server: {0}")]
    PasswordRejected(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response body (status {status}): {reason}")]
    Malformed { status: u16, reason: String },
    #[error("request timed out")]
    Timeout,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Terminal classification of one attempt, as seen by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    #[default]
    None,
    Success,
    PasswordRejected(String),
    Unauthenticated,
    GenericError,
}

impl SubmissionOutcome {
    /// User-facing error line, `None` unless the attempt failed.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::None | Self::Success => None,
            Self::PasswordRejected(message) => Some(message),
            Self::Unauthenticated => Some(UNAUTHENTICATED_MESSAGE),
            Self::GenericError => Some(GENERIC_MESSAGE),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.message().is_some()
    }
}

impl From<&SubmitError> for SubmissionOutcome {
    fn from(err: &SubmitError) -> Self {
        match err {
            SubmitError::Unauthenticated => Self::Unauthenticated,
            SubmitError::PasswordRejected(message) => Self::PasswordRejected(message.clone()),
            SubmitError::Status { .. }
            | SubmitError::Malformed { .. }
            | SubmitError::Timeout
            | SubmitError::Transport(_) => Self::GenericError,
        }
    }
}

impl From<Result<(), SubmitError>> for SubmissionOutcome {
    fn from(result: Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(err) => Self::from(&err),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Which statuses may carry the password rejection and the message that
/// identifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPolicy {
    rejected_statuses: Vec<StatusCode>,
    rejected_message: String,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            rejected_statuses: vec![StatusCode::INTERNAL_SERVER_ERROR],
            rejected_message: PASSWORD_REJECTED_MESSAGE.to_string(),
        }
    }
}

impl StatusPolicy {
    #[must_use]
    pub fn new(rejected_statuses: Vec<StatusCode>, rejected_message: impl Into<String>) -> Self {
        Self {
            rejected_statuses,
            rejected_message: rejected_message.into(),
        }
    }

    #[must_use]
    pub fn rejected_statuses(&self) -> &[StatusCode] {
        &self.rejected_statuses
    }

    #[must_use]
    pub fn rejected_message(&self) -> &str {
        &self.rejected_message
    }

    /// Map a response to the attempt result.
    ///
    /// # Errors
    /// Returns a [`SubmitError`] for every non-success status. The body is only
    /// parsed for statuses listed in the policy.
    pub fn classify(&self, status: StatusCode, body: &str) -> Result<(), SubmitError> {
        if status.is_success() {
            return Ok(());
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SubmitError::Unauthenticated);
        }

        if self.rejected_statuses.contains(&status) {
            let parsed: ErrorBody =
                serde_json::from_str(body).map_err(|err| SubmitError::Malformed {
                    status: status.as_u16(),
                    reason: err.to_string(),
                })?;

            if parsed.message.as_deref() == Some(self.rejected_message.as_str()) {
                return Err(SubmitError::PasswordRejected(self.rejected_message.clone()));
            }
        }

        Err(SubmitError::Status {
            status: status.as_u16(),
            body: sanitize_body(body),
        })
    }
}

/// Trim and truncate a body for logging.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "<empty>".to_string()
    } else {
        trimmed.chars().take(MAX_BODY_CHARS).collect()
    }
}
