/// Failures of the authorization code flow.
///
/// Each variant is a distinct cause so callers can tell "the provider said no"
/// apart from "the network broke" or "the token was garbage".
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Callback arrived without an authorization code.
    #[error("authorization code missing from callback")]
    MissingCode,

    /// Provider redirected back with an `error` parameter instead of a code.
    #[error("provider denied authorization: {error} ({description})")]
    ProviderDenied { error: String, description: String },

    /// Token endpoint answered with a non-success status.
    #[error("token endpoint returned {status}: {detail}")]
    TokenEndpoint { status: u16, detail: String },

    /// Transport failure, timeout, or undecodable response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Identity token could not be decoded.
    #[error("invalid identity token: {0}")]
    InvalidIdToken(String),

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stable, machine-readable label for log fields.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingCode => "missing_code",
            Self::ProviderDenied { .. } => "provider_denied",
            Self::TokenEndpoint { .. } => "token_endpoint",
            Self::Http(_) => "network",
            Self::InvalidIdToken(_) => "invalid_id_token",
            Self::Config(_) => "config",
        }
    }

    /// Whether the login flow should fall back to the start page.
    ///
    /// Everything except a broken identity token or broken configuration is
    /// an expected way for a login attempt to end.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidIdToken(_) | Self::Config(_))
    }
}
