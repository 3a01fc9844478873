pub mod logging;

use crate::signup::{client::DEFAULT_ENDPOINT, outcome::PASSWORD_REJECTED_MESSAGE};
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ArgGroup, ColorChoice, Command,
};

pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_TOKEN: &str = "token";
pub const ARG_COOKIE: &str = "cookie";
pub const ARG_ENDPOINT: &str = "endpoint";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_REJECTED_STATUS: &str = "rejected-status";
pub const ARG_REJECTED_MESSAGE: &str = "rejected-message";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("challenge-signup")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long("username")
                .help("Username of the user to create")
                .env("CHALLENGE_SIGNUP_USERNAME")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .short('p')
                .long("password")
                .help("Password of the user to create")
                .env("CHALLENGE_SIGNUP_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new(ARG_TOKEN)
                .long("token")
                .help("Pre-provisioned bearer token")
                .env("CHALLENGE_SIGNUP_TOKEN")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_COOKIE)
                .long("cookie")
                .help("Cookie string holding hennge_admission_challenge_token, e.g. 'a=1; hennge_admission_challenge_token=<token>'")
                .env("CHALLENGE_SIGNUP_COOKIE")
                .hide_env_values(true),
        )
        .group(
            ArgGroup::new("credential-source")
                .args([ARG_TOKEN, ARG_COOKIE])
                .required(true)
                .multiple(false),
        )
        .arg(
            Arg::new(ARG_ENDPOINT)
                .long("endpoint")
                .help("Signup endpoint URL")
                .default_value(DEFAULT_ENDPOINT)
                .env("CHALLENGE_SIGNUP_ENDPOINT"),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("CHALLENGE_SIGNUP_TIMEOUT")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_REJECTED_STATUS)
                .long("rejected-status")
                .help("HTTP status that may carry the password rejection message (repeatable)")
                .default_value("500")
                .env("CHALLENGE_SIGNUP_REJECTED_STATUS")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(u16).range(400..600)),
        )
        .arg(
            Arg::new(ARG_REJECTED_MESSAGE)
                .long("rejected-message")
                .help("Server message identifying a rejected password")
                .default_value(PASSWORD_REJECTED_MESSAGE)
                .env("CHALLENGE_SIGNUP_REJECTED_MESSAGE"),
        );

    logging::with_args(command)
}
