//! Password rules checked before any request is made.
//!
//! Every rule is evaluated on every call so the caller always gets the full
//! list of problems, not just the first one.

use regex::Regex;
use std::{collections::BTreeSet, fmt, sync::LazyLock};

/// Minimum length accepted, in UTF-16 code units.
pub const MIN_LENGTH: usize = 10;
/// Maximum length accepted, in UTF-16 code units.
pub const MAX_LENGTH: usize = 24;

static DIGIT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[0-9]").ok());
static UPPERCASE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[A-Z]").ok());
static LOWERCASE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[a-z]").ok());

/// Named password rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    Length,
    Spaces,
    Number,
    Uppercase,
    Lowercase,
}

impl Rule {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Spaces => "spaces",
            Self::Number => "number",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single failed rule. Length failures keep their direction so the message
/// can tell the user which bound was crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    TooShort,
    TooLong,
    Spaces,
    MissingNumber,
    MissingUppercase,
    MissingLowercase,
}

impl Violation {
    #[must_use]
    pub const fn rule(self) -> Rule {
        match self {
            Self::TooShort | Self::TooLong => Rule::Length,
            Self::Spaces => Rule::Spaces,
            Self::MissingNumber => Rule::Number,
            Self::MissingUppercase => Rule::Uppercase,
            Self::MissingLowercase => Rule::Lowercase,
        }
    }

    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Password must be at least 10 characters long",
            Self::TooLong => "Password must be at most 24 characters long",
            Self::Spaces => "Password cannot contain spaces",
            Self::MissingNumber => "Password must contain at least one number",
            Self::MissingUppercase => "Password must contain at least one uppercase letter",
            Self::MissingLowercase => "Password must contain at least one lowercase letter",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Ordered set of violations. Empty means the password is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(BTreeSet<Violation>);

impl Violations {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any violation belongs to `rule`.
    #[must_use]
    pub fn contains(&self, rule: Rule) -> bool {
        self.0.iter().any(|violation| violation.rule() == rule)
    }

    /// Names of the failed rules.
    #[must_use]
    pub fn rules(&self) -> BTreeSet<Rule> {
        self.0.iter().map(|violation| violation.rule()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = Violation> + '_ {
        self.0.iter().copied()
    }

    /// User-facing messages, in rule order.
    #[must_use]
    pub fn messages(&self) -> Vec<&'static str> {
        self.iter().map(Violation::message).collect()
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn is_match(re: &LazyLock<Option<Regex>>, haystack: &str) -> bool {
    LazyLock::force(re)
        .as_ref()
        .is_some_and(|re| re.is_match(haystack))
}

/// Check `password` against every rule.
#[must_use]
pub fn validate(password: &str) -> Violations {
    let mut violations = BTreeSet::new();

    // UTF-16 code units, so characters outside the BMP count twice
    let length = password.encode_utf16().count();
    if length < MIN_LENGTH {
        violations.insert(Violation::TooShort);
    }
    if length > MAX_LENGTH {
        violations.insert(Violation::TooLong);
    }
    if password.contains(' ') {
        violations.insert(Violation::Spaces);
    }
    if !is_match(&DIGIT, password) {
        violations.insert(Violation::MissingNumber);
    }
    if !is_match(&UPPERCASE, password) {
        violations.insert(Violation::MissingUppercase);
    }
    if !is_match(&LOWERCASE, password) {
        violations.insert(Violation::MissingLowercase);
    }

    Violations(violations)
}
