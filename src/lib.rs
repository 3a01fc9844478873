//! # challenge-signup
//!
//! A user creation form without a UI framework. The form collects a username
//! and password, checks the password against a fixed rule set before anything
//! leaves the machine, and submits the credentials to the challenge signup
//! endpoint with a bearer token.
//!
//! ## Layout
//!
//! - [`signup::password`] holds the validation rules.
//! - [`signup::form`] is the submission state machine. It owns the observable
//!   state and exposes a read-only [`signup::FormSnapshot`] to presentation.
//! - [`signup::client`] performs the HTTP request and classifies the response.
//! - [`signup::token`] provides the bearer credential from one explicit source.
//! - [`signup::view`] renders a snapshot for the terminal.
//! - [`cli`] wires all of the above behind a `clap` command.

pub mod cli;
pub mod signup;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
