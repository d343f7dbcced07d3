//! Redaction of emails and session tokens before they reach the logs.

use std::fmt;

use regex::Captures;

/// Masks emails (first character of the local part is kept) and JWT-shaped
/// tokens.
pub fn redact(input: &str) -> String {
    let emails = lazy_regex::regex!(r"\b([A-Za-z0-9._%+-])[A-Za-z0-9._%+-]*(@[A-Za-z0-9.-]+\.[A-Za-z]+)\b");
    let masked = emails.replace_all(input, |caps: &Captures| format!("{}***{}", &caps[1], &caps[2]));

    let tokens = lazy_regex::regex!(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b");
    tokens.replace_all(&masked, "[REDACTED_TOKEN]").into_owned()
}

/// Display wrapper applying [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
