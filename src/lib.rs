#![doc = include_str!("../README.md")]

pub mod error;
pub mod id_token;
pub mod oauth;
pub mod session;
pub mod web;

// Re-exports for convenient access
pub use error::Error;
pub use id_token::{IdentityClaims, decode_identity_claims};
pub use oauth::{AuthClient, AuthorizationRequest, OAuthConfig, TokenResponse};
pub use session::IdentitySession;
