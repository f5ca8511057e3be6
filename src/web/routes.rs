use std::any::Any;

use axum::Router;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::config::Environment;
use super::cookies;
use super::error::AppError;
use super::extractor::SessionUser;
use super::pages::{self, DashboardPage, IndexPage};
use super::state::AppState;
use crate::error::Error;
use crate::id_token::decode_identity_claims;
use crate::oauth::AuthClient;
use crate::session::IdentitySession;

pub const START_PATH: &str = "/";
pub const CALLBACK_PATH: &str = "/login/google";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const LOGOUT_PATH: &str = "/logout";

/// Create the application router.
///
/// Unmatched paths fall through to the static file directory. Panics inside
/// handlers become JSON 500 responses.
pub fn router(state: AppState) -> Router {
    let environment = state.settings.environment;
    let static_files = ServeDir::new(&state.settings.public_dir);

    let app = Router::new()
        .route(START_PATH, get(index))
        .route(CALLBACK_PATH, get(google_callback))
        .route(DASHBOARD_PATH, get(dashboard))
        .route(LOGOUT_PATH, get(logout))
        .fallback_service(static_files)
        .with_state(state);

    with_error_boundary(app, environment)
}

fn with_error_boundary(app: Router, environment: Environment) -> Router {
    app.layer(CatchPanicLayer::custom(move |panic: Box<dyn Any + Send>| {
        AppError::from_panic(panic.as_ref(), environment).into_response()
    }))
    .layer(TraceLayer::new_for_http())
}

// ── Start page ─────────────────────────────────────────────────────

async fn index(
    State(state): State<AppState>,
    user: Option<SessionUser>,
) -> Result<Html<String>, AppError> {
    let page = IndexPage {
        auth_url: state.client.authorization_url(),
        signed_in_as: user.map(|SessionUser(session)| session.email),
    };
    pages::render(&page, state.settings.environment)
}

// ── Callback ───────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    match complete_login(&state.client, params).await {
        Ok(session) => {
            tracing::info!(email = %session.email, "Google login successful");
            let jar = cookies::session_cookies(&session, state.settings.secure_cookies)
                .into_iter()
                .fold(jar, CookieJar::add);
            Ok((jar, Redirect::to(DASHBOARD_PATH)).into_response())
        }
        Err(e) if e.is_recoverable() => {
            match e {
                Error::MissingCode | Error::ProviderDenied { .. } => {
                    tracing::warn!(error = %e, code = e.code(), "Google login abandoned");
                }
                _ => {
                    tracing::error!(error = %e, code = e.code(), "Google token exchange failed");
                }
            }
            Ok(Redirect::to(START_PATH).into_response())
        }
        Err(e) => Err(AppError::internal(&e, state.settings.environment)),
    }
}

/// Exchange the callback's code for tokens and derive the session.
async fn complete_login(
    client: &AuthClient,
    params: CallbackParams,
) -> Result<IdentitySession, Error> {
    if let Some(error) = params.error {
        return Err(Error::ProviderDenied {
            error,
            description: params.error_description.unwrap_or_default(),
        });
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or(Error::MissingCode)?;

    let token_response = client.exchange_code(&code).await?;
    let claims = decode_identity_claims(token_response.id_token()?)?;

    Ok(IdentitySession::from(&claims))
}

// ── Dashboard ──────────────────────────────────────────────────────

async fn dashboard(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Html<String>, AppError> {
    let page = DashboardPage {
        email: &session.email,
        name: &session.name,
        picture: &session.picture,
    };
    pages::render(&page, state.settings.environment)
}

// ── Logout ─────────────────────────────────────────────────────────

async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = cookies::clear_session_cookies()
        .into_iter()
        .fold(jar, CookieJar::add);
    (jar, Redirect::to(START_PATH))
}
