//! Masking of emails and bearer-like secrets before they reach the log sink.

use std::fmt;

use lazy_regex::regex_replace_all;

/// Mask emails and opaque tokens in free text.
///
/// - JWT-shaped strings (`xxx.yyy.zzz`) become `[REDACTED_JWT]`.
/// - Emails keep the first character of the local part and the full domain.
/// - Base64-like or hex runs of 16+ characters become `[REDACTED_TOKEN]`.
///
/// JWTs go first so their segments are not masked piecemeal.
pub fn redact(input: &str) -> String {
    let jwt_redacted = regex_replace_all!(
        r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*",
        input,
        "[REDACTED_JWT]"
    );

    let email_redacted = regex_replace_all!(
        r"\b([A-Za-z0-9._%+-])[A-Za-z0-9._%+-]*(@[A-Za-z0-9.-]+\.[A-Za-z]{1,})\b",
        &jwt_redacted,
        |_, first: &str, domain: &str| format!("{first}***{domain}")
    );

    let base64_redacted = regex_replace_all!(
        r"\b[A-Za-z0-9+/]{16,}={0,2}\b",
        &email_redacted,
        "[REDACTED_TOKEN]"
    );

    regex_replace_all!(r"\b[A-Fa-f0-9]{16,}\b", &base64_redacted, "[REDACTED_TOKEN]").into_owned()
}

/// Display/Debug wrapper that runs [`redact`] on format.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
