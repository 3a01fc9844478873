//! Map validated CLI arguments to the signup action.

use crate::cli::actions::{
    signup::{Args, TokenSource},
    Action,
};
use crate::cli::commands::{
    ARG_COOKIE, ARG_ENDPOINT, ARG_PASSWORD, ARG_REJECTED_MESSAGE, ARG_REJECTED_STATUS, ARG_TIMEOUT,
    ARG_TOKEN, ARG_USERNAME,
};
use crate::signup::{client::DEFAULT_TIMEOUT, StatusPolicy};
use anyhow::{anyhow, Context, Result};
use reqwest::StatusCode;
use secrecy::SecretString;
use std::time::Duration;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing or invalid.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let username = matches
        .get_one::<String>(ARG_USERNAME)
        .cloned()
        .context("missing required argument: --username")?;

    let password = matches
        .get_one::<String>(ARG_PASSWORD)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --password")?;

    let tokens = match (
        matches.get_one::<String>(ARG_TOKEN),
        matches.get_one::<String>(ARG_COOKIE),
    ) {
        (Some(token), None) => TokenSource::Static(SecretString::from(token.clone())),
        (None, Some(cookie)) => TokenSource::Cookie(SecretString::from(cookie.clone())),
        (Some(_), Some(_)) => return Err(anyhow!("--token and --cookie are mutually exclusive")),
        (None, None) => return Err(anyhow!("missing required argument: --token or --cookie")),
    };

    let endpoint = matches
        .get_one::<String>(ARG_ENDPOINT)
        .context("missing required argument: --endpoint")?;
    let endpoint = Url::parse(endpoint).context("invalid CHALLENGE_SIGNUP_ENDPOINT")?;
    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(anyhow!(
            "unsupported endpoint scheme: {}",
            endpoint.scheme()
        ));
    }

    let timeout = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .copied()
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    let rejected_statuses = matches
        .get_many::<u16>(ARG_REJECTED_STATUS)
        .map(|values| {
            values
                .map(|code| StatusCode::from_u16(*code).context("invalid --rejected-status"))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_else(|| StatusPolicy::default().rejected_statuses().to_vec());

    let rejected_message = matches
        .get_one::<String>(ARG_REJECTED_MESSAGE)
        .cloned()
        .unwrap_or_else(|| StatusPolicy::default().rejected_message().to_string());

    Ok(Action::Signup(Args {
        username,
        password,
        tokens,
        endpoint,
        timeout,
        policy: StatusPolicy::new(rejected_statuses, rejected_message),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::signup::outcome::PASSWORD_REJECTED_MESSAGE;

    fn action_from(args: &[&str]) -> Result<Action> {
        temp_env::with_vars(
            [
                ("CHALLENGE_SIGNUP_USERNAME", None::<&str>),
                ("CHALLENGE_SIGNUP_PASSWORD", None),
                ("CHALLENGE_SIGNUP_TOKEN", None),
                ("CHALLENGE_SIGNUP_COOKIE", None),
                ("CHALLENGE_SIGNUP_ENDPOINT", None),
                ("CHALLENGE_SIGNUP_TIMEOUT", None),
                ("CHALLENGE_SIGNUP_REJECTED_STATUS", None),
                ("CHALLENGE_SIGNUP_REJECTED_MESSAGE", None),
            ],
            || {
                let mut argv = vec!["challenge-signup"];
                argv.extend_from_slice(args);
                let matches = crate::cli::commands::new().get_matches_from(argv);
                handler(&matches)
            },
        )
    }

    #[test]
    fn handler_builds_signup_action() {
        let Action::Signup(args) = action_from(&[
            "-u",
            "alice",
            "-p",
            "Ab1defghij",
            "--cookie",
            "hennge_admission_challenge_token=tok",
            "--rejected-status",
            "400",
            "--timeout",
            "5",
        ])
        .unwrap();

        assert_eq!(args.username, "alice");
        assert!(matches!(args.tokens, TokenSource::Cookie(_)));
        assert_eq!(args.timeout, Duration::from_secs(5));
        assert_eq!(
            args.policy.rejected_statuses(),
            &[StatusCode::BAD_REQUEST]
        );
        assert_eq!(args.policy.rejected_message(), PASSWORD_REJECTED_MESSAGE);
        assert_eq!(args.endpoint.host_str(), Some("api.challenge.hennge.com"));
    }

    #[test]
    fn handler_falls_back_to_library_defaults() {
        let Action::Signup(args) =
            action_from(&["-u", "alice", "-p", "Ab1defghij", "--token", "tok"]).unwrap();
        let policy = StatusPolicy::default();

        assert_eq!(args.timeout, DEFAULT_TIMEOUT);
        assert_eq!(args.policy.rejected_statuses(), policy.rejected_statuses());
        assert_eq!(args.policy.rejected_message(), policy.rejected_message());
    }

    #[test]
    fn handler_uses_static_token() {
        let Action::Signup(args) =
            action_from(&["-u", "alice", "-p", "Ab1defghij", "--token", "tok"]).unwrap();
        assert!(matches!(args.tokens, TokenSource::Static(_)));
    }

    #[test]
    fn handler_rejects_bad_endpoint() {
        let result = action_from(&[
            "-u",
            "alice",
            "-p",
            "Ab1defghij",
            "--token",
            "tok",
            "--endpoint",
            "not a url",
        ]);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid CHALLENGE_SIGNUP_ENDPOINT"));
    }

    #[test]
    fn handler_rejects_unsupported_scheme() {
        let result = action_from(&[
            "-u",
            "alice",
            "-p",
            "Ab1defghij",
            "--token",
            "tok",
            "--endpoint",
            "ftp://example.com/signup",
        ]);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("unsupported endpoint scheme"));
    }
}
