//! HTTP collaborator for the challenge signup endpoint.

use super::{
    outcome::{StatusPolicy, SubmitError},
    Credentials,
};
use crate::APP_USER_AGENT;
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str =
    "https://api.challenge.hennge.com/password-validation-challenge-api/001/challenge-signup";

/// Applied to the whole request, connect included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SignupRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone)]
pub struct SignupClient {
    client: reqwest::Client,
    endpoint: Url,
    policy: StatusPolicy,
}

impl SignupClient {
    /// Build a client for `endpoint`.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration, policy: StatusPolicy) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            policy,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    /// POST the credentials with the bearer token and classify the response.
    ///
    /// # Errors
    /// Returns a [`SubmitError`] for any non-success status or transport failure.
    #[instrument(skip(self, credentials, token), fields(username = %credentials.username))]
    pub async fn signup(
        &self,
        credentials: &Credentials,
        token: &SecretString,
    ) -> Result<(), SubmitError> {
        let body = SignupRequest {
            username: &credentials.username,
            password: credentials.password.expose_secret(),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        debug!("signup response status: {}", status);

        if status.is_success() {
            return Ok(());
        }

        let text = response.text().await.map_err(map_request_error)?;

        self.policy.classify(status, &text)
    }
}

fn map_request_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Timeout
    } else {
        SubmitError::Transport(err.to_string())
    }
}
