use async_trait::async_trait;

use crate::domain::Identity;

/// External identity provider: resolves a bearer token to the calling
/// identity, or `None` when the token is missing, expired, or unknown.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError>;
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),
    #[error("identity provider returned malformed claims: {0}")]
    MalformedClaims(String),
}
