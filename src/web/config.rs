use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::error::Error;
use crate::oauth::OAuthConfig;
use crate::session::is_truthy;

const DEFAULT_PORT: u16 = 5001;

/// Deployment mode. Production hides stack traces from error bodies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Settings shared by config and runtime state.
#[derive(Debug, Clone)]
pub(crate) struct AppSettings {
    pub(crate) port: u16,
    pub(crate) public_dir: PathBuf,
    pub(crate) secure_cookies: bool,
    pub(crate) environment: Environment,
}

impl AppSettings {
    fn defaults() -> Self {
        Self {
            port: DEFAULT_PORT,
            public_dir: PathBuf::from("public"),
            secure_cookies: false,
            environment: Environment::Development,
        }
    }
}

/// Application configuration, built once at start-up.
///
/// Use [`from_env()`](AppConfig::from_env) for convention-based setup,
/// or [`new()`](AppConfig::new) with `with_*` methods for full control.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub(super) oauth: OAuthConfig,
    pub(super) settings: AppSettings,
}

impl AppConfig {
    /// Create config with the required `OAuthConfig`; everything else defaults.
    #[must_use]
    pub fn new(oauth: OAuthConfig) -> Self {
        Self {
            oauth,
            settings: AppSettings::defaults(),
        }
    }

    /// Create config from environment variables.
    ///
    /// # Required env vars
    /// - `GOOGLE_CLIENT_ID`: OAuth2 client ID
    /// - `GOOGLE_CLIENT_SECRET`: OAuth2 client secret
    /// - `GOOGLE_REDIRECT_URI`: OAuth2 callback URI (must be a valid URL)
    ///
    /// # Optional env vars
    /// - `PORT`: Listening port (default `5001`)
    /// - `GOOGLE_AUTH_URL`: Override the authorization endpoint
    /// - `GOOGLE_TOKEN_URL`: Override the token endpoint
    /// - `GOOGLE_SCOPES`: Comma-separated OAuth2 scopes
    /// - `TOKEN_REQUEST_TIMEOUT_SECS`: Token exchange timeout (default `10`)
    /// - `PUBLIC_DIR`: Static file directory (default `public`)
    /// - `COOKIE_SECURE`: `"1"` or `"true"` (any case) marks session cookies
    ///   `Secure` and `HttpOnly`
    /// - `APP_ENV`: `production` hides stack traces in error responses
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required env vars are missing or values are invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env()`](AppConfig::from_env) with a custom variable source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if required variables are missing or values are invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is required")))
        };

        let client_id = required("GOOGLE_CLIENT_ID")?;
        let client_secret = required("GOOGLE_CLIENT_SECRET")?;
        let redirect_uri = parse_url("GOOGLE_REDIRECT_URI", &required("GOOGLE_REDIRECT_URI")?)?;

        let mut oauth = OAuthConfig::new(client_id, client_secret, redirect_uri);

        if let Some(url_str) = lookup("GOOGLE_AUTH_URL") {
            oauth = oauth.with_auth_url(parse_url("GOOGLE_AUTH_URL", &url_str)?);
        }
        if let Some(url_str) = lookup("GOOGLE_TOKEN_URL") {
            oauth = oauth.with_token_url(parse_url("GOOGLE_TOKEN_URL", &url_str)?);
        }
        if let Some(scopes) = lookup("GOOGLE_SCOPES") {
            let scopes: Vec<String> = scopes
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if scopes.is_empty() {
                return Err(Error::Config("GOOGLE_SCOPES: no scopes given".into()));
            }
            oauth = oauth.with_scopes(scopes);
        }
        if let Some(secs) = lookup("TOKEN_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("TOKEN_REQUEST_TIMEOUT_SECS: {e}")))?;
            oauth = oauth.with_request_timeout(Duration::from_secs(secs));
        }

        let mut config = Self::new(oauth);

        if let Some(port) = lookup("PORT") {
            let port = port
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("PORT: {e}")))?;
            config = config.with_port(port);
        }
        if let Some(dir) = lookup("PUBLIC_DIR") {
            config = config.with_public_dir(dir);
        }

        let secure = lookup("COOKIE_SECURE").is_some_and(|v| is_truthy(&v));
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        };

        Ok(config
            .with_secure_cookies(secure)
            .with_environment(environment))
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.settings.port = port;
        self
    }

    #[must_use]
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.settings.public_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_secure_cookies(mut self, secure: bool) -> Self {
        self.settings.secure_cookies = secure;
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.settings.environment = environment;
        self
    }

    #[must_use]
    pub fn oauth(&self) -> &OAuthConfig {
        &self.oauth
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.settings.port
    }

    #[must_use]
    pub fn public_dir(&self) -> &Path {
        &self.settings.public_dir
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.settings.environment
    }
}

fn parse_url(key: &str, value: &str) -> Result<Url, Error> {
    value
        .parse()
        .map_err(|e| Error::Config(format!("{key}: {e}")))
}
