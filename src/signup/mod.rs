pub mod client;
pub use self::client::SignupClient;

pub mod form;
pub use self::form::{
    FieldError, FormObserver, FormSnapshot, PendingSubmission, SignupForm, SubmissionState,
};

pub mod outcome;
pub use self::outcome::{StatusPolicy, SubmissionOutcome, SubmitError};

pub mod password;
pub use self::password::{validate, Rule, Violation, Violations};

pub mod token;
pub use self::token::{CookieToken, StaticToken, TokenProvider};

pub mod view;

use secrecy::SecretString;

/// Username and password as currently entered. The password never leaves
/// `SecretString` except to build the request body.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(String::new(), SecretString::default())
    }
}
