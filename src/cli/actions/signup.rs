use crate::signup::{
    view, CookieToken, FormObserver, FormSnapshot, SignupClient, SignupForm, StaticToken,
    StatusPolicy, SubmissionState, TokenProvider,
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Where the bearer token comes from. Exactly one source is used.
#[derive(Debug)]
pub enum TokenSource {
    Static(SecretString),
    Cookie(SecretString),
}

impl TokenSource {
    #[must_use]
    pub fn into_provider(self) -> Box<dyn TokenProvider + Send> {
        match self {
            Self::Static(token) => Box::new(StaticToken::new(token)),
            Self::Cookie(cookies) => Box::new(CookieToken::new(cookies)),
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub username: String,
    pub password: SecretString,
    pub tokens: TokenSource,
    pub endpoint: Url,
    pub timeout: Duration,
    pub policy: StatusPolicy,
}

/// Logs every state transition of the form.
struct LogObserver {
    last_state: Option<SubmissionState>,
}

impl FormObserver for LogObserver {
    fn on_change(&mut self, snapshot: &FormSnapshot) {
        if self.last_state != Some(snapshot.state) {
            debug!("form state: {:?}", snapshot.state);
            self.last_state = Some(snapshot.state);
        }
    }

    fn on_user_created(&mut self, created: bool) {
        info!("user created: {}", created);
    }
}

/// Fill the form from the arguments, submit it once and print the result.
///
/// # Errors
/// Returns an error if the client cannot be built or the user was not created.
pub async fn execute(args: Args) -> Result<()> {
    let client = SignupClient::new(args.endpoint, args.timeout, args.policy)?;

    let mut form = SignupForm::new(args.tokens.into_provider());
    form.add_observer(LogObserver { last_state: None });
    form.set_username(args.username);
    form.set_password(args.password);

    let state = form.submit(&client).await;

    print!("{}", view::render(&form.snapshot()));

    if state == SubmissionState::Success {
        Ok(())
    } else {
        Err(anyhow!("user was not created"))
    }
}
