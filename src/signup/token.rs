//! Bearer credential sources. A form is built with exactly one provider and
//! never falls back to another one.

use secrecy::SecretString;

/// Cookie carrying the admission token in browser deployments.
pub const TOKEN_COOKIE: &str = "hennge_admission_challenge_token";

/// Supplies the bearer token attached to the signup request.
pub trait TokenProvider {
    /// Returns `None` when no credential is available.
    fn token(&self) -> Option<SecretString>;
}

impl<T: TokenProvider + ?Sized> TokenProvider for Box<T> {
    fn token(&self) -> Option<SecretString> {
        (**self).token()
    }
}

/// Pre-provisioned token.
#[derive(Clone)]
pub struct StaticToken(SecretString);

impl StaticToken {
    #[must_use]
    pub fn new(token: SecretString) -> Self {
        Self(token)
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<SecretString> {
        use secrecy::ExposeSecret;

        let token = self.0.expose_secret().trim();
        if token.is_empty() {
            None
        } else {
            Some(SecretString::from(token.to_string()))
        }
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"***").finish()
    }
}

/// Reads the token from a `document.cookie` style string
/// (`name=value; other=value`).
#[derive(Clone)]
pub struct CookieToken {
    cookies: SecretString,
    name: String,
}

impl CookieToken {
    /// Provider for the default [`TOKEN_COOKIE`].
    #[must_use]
    pub fn new(cookies: SecretString) -> Self {
        Self::with_name(cookies, TOKEN_COOKIE)
    }

    #[must_use]
    pub fn with_name(cookies: SecretString, name: impl Into<String>) -> Self {
        Self {
            cookies,
            name: name.into(),
        }
    }
}

impl TokenProvider for CookieToken {
    fn token(&self) -> Option<SecretString> {
        use secrecy::ExposeSecret;

        cookie_value(self.cookies.expose_secret(), &self.name)
            .map(|value| SecretString::from(value.to_string()))
    }
}

impl std::fmt::Debug for CookieToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieToken")
            .field("cookies", &"***")
            .field("name", &self.name)
            .finish()
    }
}

/// Look up `name` in a cookie string. Empty values count as missing.
#[must_use]
pub fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_cookie_value_single() {
        assert_eq!(
            cookie_value("hennge_admission_challenge_token=abc", TOKEN_COOKIE),
            Some("abc")
        );
    }

    #[test]
    fn test_cookie_value_among_others() {
        let cookies = "theme=dark; hennge_admission_challenge_token=abc.def; lang=en";
        assert_eq!(cookie_value(cookies, TOKEN_COOKIE), Some("abc.def"));
    }

    #[test]
    fn test_cookie_value_keeps_equals_in_value() {
        assert_eq!(cookie_value("t=a=b==", "t"), Some("a=b=="));
    }

    #[test]
    fn test_cookie_value_missing() {
        assert_eq!(cookie_value("theme=dark; lang=en", TOKEN_COOKIE), None);
        assert_eq!(cookie_value("", TOKEN_COOKIE), None);
        assert_eq!(
            cookie_value("hennge_admission_challenge_token=", TOKEN_COOKIE),
            None
        );
    }

    #[test]
    fn test_cookie_value_requires_exact_name() {
        assert_eq!(
            cookie_value("xhennge_admission_challenge_token=abc", TOKEN_COOKIE),
            None
        );
    }

    #[test]
    fn test_cookie_provider() {
        let provider = CookieToken::new(SecretString::from(
            "a=1; hennge_admission_challenge_token=tok".to_string(),
        ));
        assert_eq!(
            provider.token().map(|t| t.expose_secret().to_string()),
            Some("tok".to_string())
        );
    }

    #[test]
    fn test_static_provider() {
        let provider = StaticToken::new(SecretString::from(" tok ".to_string()));
        assert_eq!(
            provider.token().map(|t| t.expose_secret().to_string()),
            Some("tok".to_string())
        );
        assert!(
            StaticToken::new(SecretString::from("  ".to_string()))
                .token()
                .is_none()
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let provider = StaticToken::new(SecretString::from("s3cr3t".to_string()));
        assert!(!format!("{provider:?}").contains("s3cr3t"));
        let provider = CookieToken::new(SecretString::from(
            "hennge_admission_challenge_token=s3cr3t".to_string(),
        ));
        assert!(!format!("{provider:?}").contains("s3cr3t"));
    }
}
