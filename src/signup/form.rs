//! Submission state machine for the user creation form.
//!
//! `Idle -> Submitting -> {Success, Failed}`. `Failed` goes back to `Idle` on
//! the next edit or retry.
//!
//! Every attempt gets a ticket. Only the completion carrying the latest ticket
//! is applied, so a slow response can never overwrite a newer outcome.

use super::{
    client::SignupClient,
    outcome::{SubmissionOutcome, SubmitError},
    password::{validate, Violations},
    token::TokenProvider,
    Credentials,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Success,
    Failed,
}

/// Field-level errors raised when a submit is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    UsernameRequired,
}

impl FieldError {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::UsernameRequired => "Username is required",
        }
    }
}

/// Read-only view of the form handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub username: String,
    pub violations: Violations,
    pub field_errors: Vec<FieldError>,
    pub outcome: SubmissionOutcome,
    pub state: SubmissionState,
    pub user_created: bool,
}

/// Change notification for presentation layers.
pub trait FormObserver {
    /// Called after every state mutation.
    fn on_change(&mut self, _snapshot: &FormSnapshot) {}

    /// Called once with `true` when the user was created.
    fn on_user_created(&mut self, _created: bool) {}
}

/// A request that passed every precondition and is ready to send.
pub struct PendingSubmission {
    ticket: u64,
    credentials: Credentials,
    token: SecretString,
}

impl PendingSubmission {
    #[must_use]
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

impl std::fmt::Debug for PendingSubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingSubmission")
            .field("ticket", &self.ticket)
            .field("username", &self.credentials.username)
            .field("token", &"***")
            .finish()
    }
}

pub struct SignupForm<P> {
    credentials: Credentials,
    violations: Violations,
    field_errors: Vec<FieldError>,
    outcome: SubmissionOutcome,
    state: SubmissionState,
    user_created: bool,
    tokens: P,
    last_ticket: u64,
    observers: Vec<Box<dyn FormObserver + Send>>,
}

impl<P: TokenProvider> SignupForm<P> {
    /// New empty form. The empty password is validated right away so an
    /// untouched form cannot be submitted.
    #[must_use]
    pub fn new(tokens: P) -> Self {
        Self {
            credentials: Credentials::default(),
            violations: validate(""),
            field_errors: Vec::new(),
            outcome: SubmissionOutcome::None,
            state: SubmissionState::Idle,
            user_created: false,
            tokens,
            last_ticket: 0,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: impl FormObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            username: self.credentials.username.clone(),
            violations: self.violations.clone(),
            field_errors: self.field_errors.clone(),
            outcome: self.outcome.clone(),
            state: self.state,
            user_created: self.user_created,
        }
    }

    #[must_use]
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    #[must_use]
    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.credentials.username = username.into();
        self.reset_failed();
        self.notify();
    }

    pub fn set_password(&mut self, password: SecretString) {
        self.violations = validate(password.expose_secret());
        self.credentials.password = password;
        self.reset_failed();
        self.notify();
    }

    /// Start an attempt. Clears the previous outcome and supersedes any attempt
    /// still in flight. Returns `None` when no request must be sent.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        self.last_ticket += 1;
        self.outcome = SubmissionOutcome::None;
        self.field_errors.clear();
        self.state = SubmissionState::Idle;

        if self.credentials.username.is_empty() {
            debug!("submit blocked: username is empty");
            self.field_errors.push(FieldError::UsernameRequired);
            self.notify();
            return None;
        }

        if !self.violations.is_empty() {
            debug!(
                "submit blocked: password violates {} rule(s)",
                self.violations.len()
            );
            self.notify();
            return None;
        }

        let Some(token) = self.tokens.token() else {
            warn!("no bearer token available, not sending signup request");
            self.outcome = SubmissionOutcome::Unauthenticated;
            self.state = SubmissionState::Failed;
            self.notify();
            return None;
        };

        self.state = SubmissionState::Submitting;
        self.notify();

        Some(PendingSubmission {
            ticket: self.last_ticket,
            credentials: self.credentials.clone(),
            token,
        })
    }

    /// Apply the result of the attempt identified by `ticket`.
    /// Returns `false` when the result was stale and ignored.
    pub fn complete(&mut self, ticket: u64, result: Result<(), SubmitError>) -> bool {
        if ticket != self.last_ticket || self.state != SubmissionState::Submitting {
            debug!(
                "ignoring stale signup result for ticket {}, latest is {}",
                ticket, self.last_ticket
            );
            return false;
        }

        if let Err(err) = &result {
            error!("signup failed: {}", err);
        }

        self.outcome = SubmissionOutcome::from(result);

        if self.outcome == SubmissionOutcome::Success {
            info!("user {} created", self.credentials.username);
            self.state = SubmissionState::Success;
            self.user_created = true;
            for observer in &mut self.observers {
                observer.on_user_created(true);
            }
        } else {
            self.state = SubmissionState::Failed;
        }

        self.notify();

        true
    }

    /// Run one full attempt against `client`.
    #[instrument(skip(self, client), fields(endpoint = %client.endpoint()))]
    pub async fn submit(&mut self, client: &SignupClient) -> SubmissionState {
        if let Some(pending) = self.begin_submit() {
            let result = client
                .signup(pending.credentials(), pending.token())
                .await;
            self.complete(pending.ticket(), result);
        }

        self.state
    }

    fn reset_failed(&mut self) {
        if self.state == SubmissionState::Failed {
            self.state = SubmissionState::Idle;
        }
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.on_change(&snapshot);
        }
    }
}
