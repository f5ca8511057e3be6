#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use axum_extra::extract::cookie::Cookie;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use google_oauth_login::OAuthConfig;
use google_oauth_login::web::{AppConfig, AppState, Environment, router};

pub const CLIENT_ID: &str = "test-client.apps.googleusercontent.com";
pub const CLIENT_SECRET: &str = "test-secret";
pub const REDIRECT_URI: &str = "http://localhost:5001/login/google";

/// Config whose token endpoint lives under `provider_uri` (e.g. a wiremock server).
pub fn test_config(provider_uri: &str) -> AppConfig {
    let oauth = OAuthConfig::new(CLIENT_ID, CLIENT_SECRET, REDIRECT_URI.parse().unwrap())
        .with_token_url(format!("{provider_uri}/token").parse().unwrap())
        .with_request_timeout(Duration::from_millis(500));

    AppConfig::new(oauth)
        .with_public_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/public"))
        .with_environment(Environment::Development)
}

pub fn test_app(provider_uri: &str) -> Router {
    router(AppState::new(test_config(provider_uri)))
}

/// App whose token endpoint refuses connections; for tests that must not reach it.
pub fn offline_app() -> Router {
    test_app("http://127.0.0.1:1")
}

/// Unsigned compact token with the given claims as payload.
pub fn id_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","kid":"test","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.dGVzdC1zaWduYXR1cmU")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookies(uri: &str, cookies: &str) -> Request<Body> {
    Request::get(uri)
        .header(header::COOKIE, cookies)
        .body(Body::empty())
        .unwrap()
}

pub fn location<B>(res: &Response<B>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
}

/// All `Set-Cookie` headers, decoded.
pub fn set_cookies<B>(res: &Response<B>) -> Vec<Cookie<'static>> {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| Cookie::parse_encoded(v.to_str().unwrap().to_owned()).unwrap())
        .collect()
}

pub async fn body_string(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
