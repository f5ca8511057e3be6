use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::Error;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Google `OAuth2` client configuration.
///
/// Client id, secret and redirect URI are required up front; everything else
/// defaults to Google's endpoints.
///
/// ```rust,ignore
/// use google_oauth_login::OAuthConfig;
///
/// let config = OAuthConfig::new(
///     "my-client-id",
///     "my-client-secret",
///     "http://localhost:5001/login/google".parse()?,
/// );
/// // Optional overrides via chaining:
/// let config = config.with_token_url("http://127.0.0.1:9000/token".parse()?);
/// ```
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct OAuthConfig {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
    pub(crate) auth_url: Url,
    pub(crate) token_url: Url,
    pub(crate) redirect_uri: Url,
    pub(crate) scopes: Vec<String>,
    pub(crate) access_type: String,
    pub(crate) request_timeout: Duration,
}

impl OAuthConfig {
    /// Create a new `OAuth2` configuration pointing at Google's endpoints.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: Url,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri,
            auth_url: GOOGLE_AUTH_URL.parse().expect("valid default URL"),
            token_url: GOOGLE_TOKEN_URL.parse().expect("valid default URL"),
            scopes: vec![
                "https://www.googleapis.com/auth/userinfo.email".into(),
                "https://www.googleapis.com/auth/userinfo.profile".into(),
            ],
            access_type: "offline".into(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the authorization endpoint.
    #[must_use]
    pub fn with_auth_url(mut self, url: Url) -> Self {
        self.auth_url = url;
        self
    }

    /// Override the token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    /// Override the requested scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Override the `access_type` parameter (default: `offline`).
    #[must_use]
    pub fn with_access_type(mut self, access_type: impl Into<String>) -> Self {
        self.access_type = access_type.into();
        self
    }

    /// Upper bound for the token exchange round trip (default: 10 seconds).
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    #[must_use]
    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    #[must_use]
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    #[must_use]
    pub fn redirect_uri(&self) -> &Url {
        &self.redirect_uri
    }

    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    #[must_use]
    pub fn access_type(&self) -> &str {
        &self.access_type
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

/// Parameters of the browser redirect to the authorization endpoint.
///
/// Carries no `state` parameter, so the callback cannot detect a forged
/// redirect. Treat this as a demonstration flow, not a CSRF-safe one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct AuthorizationRequest {
    pub response_type: &'static str,
    pub client_id: String,
    pub redirect_uri: String,
    /// Space-joined scopes.
    pub scope: String,
    pub access_type: String,
}

impl AuthorizationRequest {
    /// Render the request as a URL on the given authorization endpoint.
    #[must_use]
    pub fn to_url(&self, auth_url: &Url) -> Url {
        let mut url = auth_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", self.response_type)
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &self.scope)
            .append_pair("access_type", &self.access_type);
        url
    }
}

/// Token bundle returned by the token endpoint.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Only issued on first consent when `access_type=offline`.
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
}

impl TokenResponse {
    /// The identity token, required for establishing a session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdToken`] if the provider did not include one.
    pub fn id_token(&self) -> Result<&str, Error> {
        self.id_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::InvalidIdToken("token response has no id_token".into()))
    }
}

/// `OAuth2` authorization code client for Google.
pub struct AuthClient {
    config: OAuthConfig,
    http: reqwest::Client,
}

impl AuthClient {
    #[must_use]
    pub fn new(config: OAuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    #[must_use]
    pub fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// Build the authorization request parameters from configuration.
    #[must_use]
    pub fn authorization_request(&self) -> AuthorizationRequest {
        AuthorizationRequest {
            response_type: "code",
            client_id: self.config.client_id.clone(),
            redirect_uri: self.config.redirect_uri.to_string(),
            scope: self.config.scopes.join(" "),
            access_type: self.config.access_type.clone(),
        }
    }

    /// Provider URL the browser should be sent to. Deterministic per config.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        self.authorization_request()
            .to_url(&self.config.auth_url)
            .into()
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCode`] for an empty code (no request is sent),
    /// [`Error::Http`] on network failure or timeout, or
    /// [`Error::TokenEndpoint`] if the token endpoint answers with an error status.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        if code.is_empty() {
            return Err(Error::MissingCode);
        }

        let params = [
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .timeout(self.config.request_timeout)
            .form(&params)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        response.json::<TokenResponse>().await.map_err(Into::into)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let detail = response.text().await.unwrap_or_default();
        Err(Error::TokenEndpoint { status, detail })
    }
}
