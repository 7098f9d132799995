use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{ContentPart, ModelClient, ModelClientError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Retry policy for the generate call. 503 means the endpoint is shedding
/// load and gets the longer backoff; transport-level failures get a
/// shorter one. Everything else fails fast.
const MAX_RETRIES: u32 = 3;
const OVERLOADED_BACKOFF_MS: u64 = 1_200;
const NETWORK_BACKOFF_MS: u64 = 800;

/// Gemini `generateContent` client over plain REST.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn build_parts(parts: &[ContentPart]) -> Vec<serde_json::Value> {
        parts
            .iter()
            .map(|part| match part {
                ContentPart::Text(text) => serde_json::json!({ "text": text }),
                ContentPart::InlineImage(image) => serde_json::json!({
                    "inline_data": {
                        "mime_type": image.mime,
                        "data": general_purpose::STANDARD.encode(&image.bytes),
                    }
                }),
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl ModelClient for GeminiClient {
    #[tracing::instrument(skip(self, parts), fields(parts = parts.len(), model = %self.model))]
    async fn generate(&self, parts: &[ContentPart]) -> Result<String, ModelClientError> {
        if self.api_key.is_empty() {
            return Err(ModelClientError::MissingCredential);
        }

        let body = serde_json::json!({
            "contents": [{ "parts": Self::build_parts(parts) }]
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let mut overload_retries = 0u32;
        let mut network_retries = 0u32;

        let response = loop {
            let result = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("Content-Type", "application/json")
                .json(&body)
                .send()
                .await;

            match result {
                Ok(response)
                    if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE =>
                {
                    if overload_retries >= MAX_RETRIES {
                        return Err(ModelClientError::Overloaded {
                            retries: overload_retries,
                        });
                    }
                    let backoff = OVERLOADED_BACKOFF_MS * 2u64.pow(overload_retries);
                    overload_retries += 1;
                    tracing::warn!(
                        retry = overload_retries,
                        backoff_ms = backoff,
                        "Model endpoint overloaded, backing off"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
                Ok(response) => break response,
                Err(e) => {
                    if network_retries >= MAX_RETRIES {
                        return Err(ModelClientError::ApiRequestFailed(e.to_string()));
                    }
                    let backoff = NETWORK_BACKOFF_MS * 2u64.pow(network_retries);
                    network_retries += 1;
                    tracing::warn!(
                        error = %e,
                        retry = network_retries,
                        backoff_ms = backoff,
                        "Model request failed at transport level, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff)).await;
                }
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelClientError::ApiRequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ModelClientError::InvalidResponse(e.to_string()))?;

        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ModelClientError::InvalidResponse(
                "no candidate text in response".to_string(),
            ));
        }

        Ok(text)
    }
}
