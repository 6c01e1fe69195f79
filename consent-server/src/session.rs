//! Signed session cookie holding the logged-in subject.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use std::fmt;

/// Delimiter between the identity scheme and the identifier
pub const SUBJECT_DELIMITER: char = ':';

/// Identity of a logged-in user, `<scheme>:<identifier>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject(String);

impl Subject {
    pub fn new(scheme: &str, identifier: &str) -> Self {
        Self(format!("{scheme}{SUBJECT_DELIMITER}{identifier}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: String, secure: bool) -> Self {
        Self { name, secure }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subject stored in the jar. Cookies with a bad signature never reach here.
    pub fn subject(&self, jar: &SignedCookieJar) -> Option<Subject> {
        jar.get(&self.name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
            .map(Subject)
    }

    pub fn store(&self, jar: SignedCookieJar, subject: &Subject) -> SignedCookieJar {
        let cookie = Cookie::build((self.name.clone(), subject.as_str().to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        jar.add(cookie)
    }

    /// Removes the subject, returning the updated jar and whether one was set
    pub fn clear(&self, jar: SignedCookieJar) -> (SignedCookieJar, bool) {
        if self.subject(&jar).is_none() {
            return (jar, false);
        }
        let removal = Cookie::build((self.name.clone(), "")).path("/");
        (jar.remove(removal), true)
    }
}
