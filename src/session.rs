use serde::{Deserialize, Serialize};

use crate::id_token::IdentityClaims;

/// Logged-in user as the browser holds it.
///
/// There is no server-side record: the value exists only as cookies and is
/// never revalidated against the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct IdentitySession {
    pub email: String,
    pub name: String,
    /// Avatar URL, passed through as received.
    pub picture: String,
    pub authenticated: bool,
}

impl IdentitySession {
    /// An authenticated session with the given identity fields.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        picture: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            picture: picture.into(),
            authenticated: true,
        }
    }
}

impl From<&IdentityClaims> for IdentitySession {
    fn from(claims: &IdentityClaims) -> Self {
        Self::new(&claims.email, &claims.name, &claims.picture)
    }
}

/// Interprets a flag value the way the session cookie is written and read.
///
/// `"true"` (any case) and `"1"` are truthy; anything else, including the
/// empty string left behind by logout, is not.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}
