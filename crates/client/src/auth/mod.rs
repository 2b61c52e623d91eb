//! Authentication interface consumed by the remote client.
//!
//! The client never acquires credentials itself; it asks an
//! [`Authenticator`] for a bearer token and a tenant id before every
//! request and attaches them as `X-Auth-Token` / `X-Project-ID`.
//! Token acquisition is the one place in the system allowed to retry:
//! implementations may loop internally up to the bound passed to
//! [`Authenticator::get_token`].

mod preshared;

pub use preshared::PresharedAuthenticator;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("authentication failed: {0}")]
    Failed(String),
    #[error("invalid credentials: {0}")]
    Credentials(String),
    #[error("authentication token expired at {0}")]
    Expired(DateTime<Utc>),
}

/// A source of bearer tokens for the Deuce API.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Tenant / project identifier, sent as `X-Project-ID` on every
    /// request.
    fn auth_tenant_id(&self) -> &str;

    /// When the current token stops being valid.
    fn auth_expiration_time(&self) -> DateTime<Utc>;

    /// Whether the current token is expired, treating anything within
    /// `fuzz` of the expiration time as already expired.
    fn is_expired(&self, fuzz: Duration) -> bool {
        Utc::now() + fuzz >= self.auth_expiration_time()
    }

    /// Acquire a fresh token, retrying internally at most `retry`
    /// times on transient failure before giving up.
    async fn get_token(&self, retry: u32) -> Result<String, AuthError>;

    /// The token to send right now: a cached one while it is valid,
    /// refreshed when it has expired or is about to.
    async fn auth_token(&self) -> Result<String, AuthError>;
}
