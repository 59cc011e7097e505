//! Session cookie carrying the signed admin token.

use http::{header, HeaderMap};
use crate::config::MAX_SESSION_TTL_HOURS;

pub const SESSION_COOKIE: &str = "admin_session";

/// `Set-Cookie` value that stores `token` for `ttl_hours`, at most one year.
pub fn session_cookie(token: &str, ttl_hours: i64, secure: bool) -> String {
    let max_age = ttl_hours.clamp(0, MAX_SESSION_TTL_HOURS) * 60 * 60;
    format!("{SESSION_COOKIE}={token}; Max-Age={max_age}{}", attributes(secure))
}

/// `Set-Cookie` value that removes the session.
pub fn clear_session_cookie(secure: bool) -> String {
    format!("{SESSION_COOKIE}=; Max-Age=0{}", attributes(secure))
}

fn attributes(secure: bool) -> &'static str {
    if secure {
        "; Path=/; HttpOnly; SameSite=Lax; Secure"
    } else {
        "; Path=/; HttpOnly; SameSite=Lax"
    }
}

/// Token from the session cookie, or from an `Authorization: Bearer` header.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
    })
}
