use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::{AuthError, Authenticator};

/// An [`Authenticator`] backed by a token obtained out of band.
///
/// There is nothing to refresh: the token is handed back until it
/// expires, after which every request fails with
/// [`AuthError::Expired`]. Useful for tests and for callers that
/// manage their own credential lifecycle.
#[derive(Debug, Clone)]
pub struct PresharedAuthenticator {
    tenant_id: String,
    token: String,
    expires_at: DateTime<Utc>,
}

impl PresharedAuthenticator {
    /// A token with no practical expiration.
    pub fn new(tenant_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_expiration(tenant_id, token, DateTime::<Utc>::MAX_UTC)
    }

    pub fn with_expiration(
        tenant_id: impl Into<String>,
        token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            token: token.into(),
            expires_at,
        }
    }
}

#[async_trait]
impl Authenticator for PresharedAuthenticator {
    fn auth_tenant_id(&self) -> &str {
        &self.tenant_id
    }

    fn auth_expiration_time(&self) -> DateTime<Utc> {
        self.expires_at
    }

    async fn get_token(&self, _retry: u32) -> Result<String, AuthError> {
        if self.is_expired(Duration::zero()) {
            return Err(AuthError::Expired(self.expires_at));
        }
        Ok(self.token.clone())
    }

    async fn auth_token(&self) -> Result<String, AuthError> {
        self.get_token(0).await
    }
}
