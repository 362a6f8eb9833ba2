use secrecy::{ExposeSecret, SecretString};

/// Username/password pair for the Elmax Cloud login.
///
/// Immutable for the lifetime of a [`Client`](crate::Client). The password
/// is kept as a [`SecretString`] so it never shows up in `Debug` output.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// Per-client login state.
///
/// `authenticated` is true exactly when `token` holds a non-empty token
/// taken from a successful login response.
#[derive(Debug, Default)]
pub(crate) struct Session {
    token: Option<SecretString>,
}

impl Session {
    /// Store a freshly issued token. Empty tokens are refused.
    pub(crate) fn authorize(&mut self, token: &str) -> bool {
        if token.is_empty() {
            self.token = None;
            return false;
        }
        self.token = Some(SecretString::from(token.to_owned()));
        true
    }

    /// Drop the token; idempotent.
    pub(crate) fn clear(&mut self) {
        self.token = None;
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The raw token, sent unprefixed in the `Authorization` header.
    pub(crate) fn token(&self) -> Option<&str> {
        self.token.as_ref().map(|t| t.expose_secret())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_not_authenticated() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn authorize_then_clear() {
        let mut session = Session::default();
        assert!(session.authorize("JWT 123456.123456"));
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("JWT 123456.123456"));

        session.clear();
        session.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn empty_token_is_refused() {
        let mut session = Session::default();
        session.authorize("T");
        assert!(!session.authorize(""));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::new("user@example.com", "hunter2".to_owned());
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("user@example.com"));
        assert!(!dbg.contains("hunter2"));
    }
}
