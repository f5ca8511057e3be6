use askama::Template;
use axum::response::Html;

use super::config::Environment;
use super::error::AppError;

/// Start page with the sign-in link.
#[derive(Template)]
#[template(path = "index.html")]
pub(super) struct IndexPage {
    pub(super) auth_url: String,
    /// Set when the visitor already holds a session.
    pub(super) signed_in_as: Option<String>,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub(super) struct DashboardPage<'a> {
    pub(super) email: &'a str,
    pub(super) name: &'a str,
    pub(super) picture: &'a str,
}

/// Render a template into an HTML response.
pub(super) fn render<T: Template>(
    page: &T,
    environment: Environment,
) -> Result<Html<String>, AppError> {
    page.render()
        .map(Html)
        .map_err(|e| AppError::internal(&e, environment))
}
