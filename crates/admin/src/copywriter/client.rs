//! HTTP client for the generative text API.
//!
//! Speaks the Messages API shape: one user message in, a list of content
//! blocks out. The copywriter only ever needs a single short completion per
//! request, so there is no streaming and no conversation state.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::CopywriterConfig;

use super::error::{ApiErrorResponse, CopywriterError};

const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 300;

/// Client for the copywriter API.
#[derive(Clone)]
pub struct CopywriterClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl CopywriterClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key cannot be used as a header value or
    /// the HTTP client fails to build.
    pub fn new(config: &CopywriterConfig) -> Result<Self, CopywriterError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|_| CopywriterError::InvalidApiKey)?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                client,
                endpoint: config.endpoint.to_string(),
                model: config.model.clone(),
            }),
        })
    }

    /// Request a single completion for `prompt` and return its text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with an error
    /// status, the body does not parse, or the completion has no text.
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    pub async fn complete(&self, prompt: &str) -> Result<String, CopywriterError> {
        let request = CompletionRequest {
            model: &self.inner.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ApiMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(error_for_status(status, response).await);
        }

        let body = response.text().await?;
        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CopywriterError::Parse(format!("Failed to parse response: {e}")))?;

        let text = extract_text(&completion);
        if text.is_empty() {
            return Err(CopywriterError::EmptyCompletion);
        }
        Ok(text)
    }
}

/// Map an error status code to a `CopywriterError`.
async fn error_for_status(
    status: reqwest::StatusCode,
    response: reqwest::Response,
) -> CopywriterError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return CopywriterError::RateLimited(retry_after);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return CopywriterError::Unauthorized;
    }

    match response.text().await {
        Ok(body) => {
            if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                CopywriterError::Api {
                    error_type: api_error.error.error_type,
                    message: api_error.error.message,
                }
            } else {
                CopywriterError::Api {
                    error_type: "unknown".to_string(),
                    message: body,
                }
            }
        }
        Err(e) => CopywriterError::Http(e),
    }
}

/// Concatenate the text blocks of a completion, trimmed.
fn extract_text(completion: &CompletionResponse) -> String {
    completion
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string()
}

// ===== Wire types =====

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

/// Response content block; only text blocks carry copy.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}
