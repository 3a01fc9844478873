use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

/// Level names accepted by `CHALLENGE_SIGNUP_LOG_LEVEL`, indexed by the
/// verbosity count they stand for.
const LEVEL_NAMES: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Largest numeric verbosity accepted. Counts past `trace` still log at `trace`.
const MAX_NUMERIC_LEVEL: u8 = 5;

fn parse_log_level(level: &str) -> Result<u8, String> {
    let level = level.trim();

    if let Ok(count) = level.parse::<u8>() {
        return if count <= MAX_NUMERIC_LEVEL {
            Ok(count)
        } else {
            Err(format!(
                "log level {count} is out of range, expected 0-{MAX_NUMERIC_LEVEL}"
            ))
        };
    }

    (0u8..)
        .zip(LEVEL_NAMES)
        .find_map(|(count, name)| name.eq_ignore_ascii_case(level).then_some(count))
        .ok_or_else(|| {
            format!(
                "unknown log level '{level}', expected one of: {} or 0-{MAX_NUMERIC_LEVEL}",
                LEVEL_NAMES.join(", ")
            )
        })
}

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(parse_log_level)
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("CHALLENGE_SIGNUP_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long("log-json")
                .help("Emit logs as JSON lines on stderr")
                .env("CHALLENGE_SIGNUP_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_log_level() {
        let command = with_args(Command::new("test"));
        for (value, expected) in [("error", 0), ("WARN", 1), ("info", 2), ("3", 3), ("trace", 4)] {
            let matches = temp_env::with_var("CHALLENGE_SIGNUP_LOG_LEVEL", Some(value), || {
                command.clone().get_matches_from(vec!["test"])
            });
            assert_eq!(
                matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                Some(expected)
            );
        }
    }

    #[test]
    fn test_invalid_log_level() {
        temp_env::with_var("CHALLENGE_SIGNUP_LOG_LEVEL", Some("loud"), || {
            let result = with_args(Command::new("test")).try_get_matches_from(vec!["test"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("Debug"), Ok(3));
        assert_eq!(parse_log_level(" trace "), Ok(4));
        assert_eq!(parse_log_level("5"), Ok(5));

        let err = parse_log_level("6").unwrap_err();
        assert!(err.contains("out of range"));

        let err = parse_log_level("verbose").unwrap_err();
        assert!(err.contains("verbose"));
        assert!(err.contains("error, warn, info, debug, trace"));
    }

    #[test]
    fn test_log_json_flag() {
        temp_env::with_var("CHALLENGE_SIGNUP_LOG_JSON", None::<&str>, || {
            let matches =
                with_args(Command::new("test")).get_matches_from(vec!["test", "--log-json"]);
            assert!(matches.get_flag(ARG_LOG_JSON));
        });
    }
}
