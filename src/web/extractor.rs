use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::response::Redirect;
use axum_extra::extract::CookieJar;

use super::cookies;
use super::routes::START_PATH;
use super::state::AppState;
use crate::session::IdentitySession;

/// Logged-in user extracted from the session cookies.
///
/// Use as an Axum extractor in route handlers. Redirects to the start page
/// if the `is_authenticated` cookie is absent or falsy.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(SessionUser(session): SessionUser) -> impl IntoResponse {
///     format!("Hello, {}", session.name)
/// }
///
/// // Optional: accessible to both authenticated and anonymous users
/// async fn public(user: Option<SessionUser>) -> impl IntoResponse {
///     match user {
///         Some(SessionUser(s)) => format!("Hello, {}", s.name),
///         None => "Hello, guest".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser(pub IdentitySession);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        cookies::read_session(&jar)
            .map(SessionUser)
            .ok_or_else(|| Redirect::to(START_PATH))
    }
}

impl OptionalFromRequestParts<AppState> for SessionUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(cookies::read_session(&jar).map(SessionUser))
    }
}
