use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::Cookie;
use time::Duration;

use crate::session::{IdentitySession, is_truthy};

pub const AUTHENTICATED_COOKIE: &str = "is_authenticated";
pub const EMAIL_COOKIE: &str = "email";
pub const NAME_COOKIE: &str = "name";
pub const PICTURE_COOKIE: &str = "picture";

const SESSION_COOKIES: [&str; 4] = [
    AUTHENTICATED_COOKIE,
    EMAIL_COOKIE,
    NAME_COOKIE,
    PICTURE_COOKIE,
];

/// Create the four session cookies.
///
/// No expiry is set, so they live until the browser drops them or logout
/// overwrites them. Values are plaintext and unsigned.
pub(super) fn session_cookies(session: &IdentitySession, secure: bool) -> [Cookie<'static>; 4] {
    let flag = if session.authenticated { "true" } else { "false" };
    [
        session_cookie(AUTHENTICATED_COOKIE, flag, secure),
        session_cookie(EMAIL_COOKIE, &session.email, secure),
        session_cookie(NAME_COOKIE, &session.name, secure),
        session_cookie(PICTURE_COOKIE, &session.picture, secure),
    ]
}

fn session_cookie(name: &'static str, value: &str, secure: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((name, value.to_string())).path("/");
    if secure {
        builder = builder.secure(true).http_only(true);
    }
    builder.build()
}

/// Create overwrite cookies (empty value, `Max-Age=0`) for all session cookies.
pub(super) fn clear_session_cookies() -> [Cookie<'static>; 4] {
    SESSION_COOKIES.map(|name| {
        Cookie::build((name, ""))
            .path("/")
            .max_age(Duration::ZERO)
            .build()
    })
}

/// Whether the request carries a truthy authenticated flag.
pub(super) fn is_authenticated(jar: &CookieJar) -> bool {
    jar.get(AUTHENTICATED_COOKIE)
        .is_some_and(|c| is_truthy(c.value()))
}

/// Read the session from cookies; `None` unless the flag is truthy.
///
/// Identity values are not read at all for anonymous requests.
pub(super) fn read_session(jar: &CookieJar) -> Option<IdentitySession> {
    if !is_authenticated(jar) {
        return None;
    }
    let value = |name: &str| jar.get(name).map(|c| c.value().to_string()).unwrap_or_default();
    Some(IdentitySession::new(
        value(EMAIL_COOKIE),
        value(NAME_COOKIE),
        value(PICTURE_COOKIE),
    ))
}
