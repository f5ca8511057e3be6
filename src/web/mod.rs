//! Axum application for the Google sign-in flow.
//!
//! Four routes make up the whole flow:
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | Start page with the Google authorization link |
//! | `GET /login/google` | OAuth2 callback: exchange code, set session cookies |
//! | `GET /dashboard` | Shows the signed-in identity, or redirects to `/` |
//! | `GET /logout` | Expires the session cookies |
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use google_oauth_login::web::{AppConfig, AppState, router};
//!
//! let config = AppConfig::from_env()?;
//! let app = router(AppState::new(config));
//! axum::serve(listener, app).await?;
//! ```

mod config;
mod cookies;
mod error;
mod extractor;
mod pages;
mod routes;
mod state;

pub use config::{AppConfig, Environment};
pub use cookies::{AUTHENTICATED_COOKIE, EMAIL_COOKIE, NAME_COOKIE, PICTURE_COOKIE};
pub use error::AppError;
pub use extractor::SessionUser;
pub use routes::{CALLBACK_PATH, DASHBOARD_PATH, LOGOUT_PATH, START_PATH, router};
pub use state::AppState;
