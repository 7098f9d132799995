use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{IdentityError, IdentityProvider};
use crate::domain::Identity;

const USERINFO_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves bearer tokens against the identity provider's userinfo
/// endpoint. Token verification itself is the provider's concern; a 401 or
/// 403 from it simply means "no caller identity".
pub struct OidcIdentityProvider {
    client: Client,
    userinfo_url: String,
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
    name: Option<String>,
}

impl OidcIdentityProvider {
    pub fn new(userinfo_url: &str) -> Self {
        let client = Client::builder()
            .timeout(USERINFO_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            userinfo_url: userinfo_url.to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for OidcIdentityProvider {
    #[tracing::instrument(skip(self, token))]
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, IdentityError> {
        if token.is_empty() {
            return Ok(None);
        }

        let response = self
            .client
            .get(&self.userinfo_url)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| IdentityError::Unreachable(e.to_string()))?;

        match response.status() {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => {
                let info: UserInfo = response
                    .json()
                    .await
                    .map_err(|e| IdentityError::MalformedClaims(e.to_string()))?;
                Ok(Some(Identity {
                    subject: info.sub,
                    email: info.email,
                    name: info.name,
                }))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(IdentityError::Unreachable(format!("HTTP {status}: {body}")))
            }
        }
    }
}
