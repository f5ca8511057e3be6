use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identity claims carried by a Google ID token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct IdentityClaims {
    #[serde(default)]
    pub iss: String,
    #[serde(default)]
    pub aud: String,
    #[serde(default)]
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub exp: Option<i64>,
}

/// Decodes the payload of a compact `header.payload.signature` ID token.
///
/// **The signature is not verified**, and neither are `iss`, `aud` or `exp`.
/// The token came straight from the token endpoint over TLS, which is the
/// only thing vouching for it here. Do not reuse this for tokens received
/// from anywhere else.
///
/// # Errors
///
/// Returns `Error::InvalidIdToken` if the token does not have three segments,
/// the payload is not base64url, or the payload is not a JSON claims object.
pub fn decode_identity_claims(token_str: &str) -> Result<IdentityClaims, Error> {
    let payload = extract_payload_from_token(token_str)?;
    serde_json::from_slice(&payload).map_err(|e| Error::InvalidIdToken(format!("claims: {e}")))
}

/// Extracts the raw payload bytes from a compact token string.
pub(crate) fn extract_payload_from_token(token_str: &str) -> Result<Vec<u8>, Error> {
    let parts: Vec<&str> = token_str.split('.').collect();
    if parts.len() != 3 {
        return Err(Error::InvalidIdToken(format!(
            "expected 3 segments, got {}",
            parts.len()
        )));
    }

    let payload_b64 = parts[1];
    if payload_b64.is_empty() {
        return Err(Error::InvalidIdToken("empty payload".into()));
    }

    // Some issuers pad; the no-pad engine rejects '='.
    URL_SAFE_NO_PAD
        .decode(payload_b64.trim_end_matches('='))
        .map_err(|e| Error::InvalidIdToken(format!("payload: {e}")))
}
