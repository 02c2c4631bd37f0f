use actix_web::http::header::{HeaderMap, AUTHORIZATION};

/// Bearer token from the `Authorization` header.
///
/// The value must split on single spaces into exactly `Bearer` and a
/// non-empty token. Anything else counts as no token: a missing header,
/// another scheme, a doubled space or tab, extra parts, non-ASCII bytes.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}
