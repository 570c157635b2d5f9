use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use super::error::GeminiError;
use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::config::ServiceConfig;
use crate::sentiment::truncate_for_log;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const SNIPPET_CHARS: usize = 200;
const REVIEW_LOG_CHARS: usize = 50;

/// Turns one review text into one raw sentiment answer.
///
/// The returned string is the lower-cased, trimmed model output. Mapping it
/// onto [`Sentiment`](crate::sentiment::Sentiment) is left to the caller.
pub trait Classifier: Send + Sync {
    /// Whether a credential is available. Callers check this before fanning out.
    fn is_configured(&self) -> bool;

    fn classify(&self, text: &str) -> impl Future<Output = Result<String, GeminiError>> + Send;
}

/// Build the instruction sent to the model for a single review.
pub fn build_prompt(review: &str) -> String {
    format!(
        "Classify the sentiment of the following movie review as either \
         'positive', 'negative', or 'neutral'. \
         Respond with only one word: positive, negative, or neutral.\n\n\
         Review: \"{review}\""
    )
}

pub struct GeminiClient {
    api_key: Option<String>,
    client: Client,
    endpoint: String,
}

impl GeminiClient {
    pub fn from_config(config: &ServiceConfig) -> Result<Self, GeminiError> {
        Self::with_base_url(
            config.api_key(),
            &config.api_base_url,
            &config.model,
            config.timeout(),
        )
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(
        api_key: Option<String>,
        base_url: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
            endpoint: format!(
                "{}/models/{model}:generateContent",
                base_url.trim_end_matches('/')
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Classifier for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn classify(&self, text: &str) -> Result<String, GeminiError> {
        let api_key = self.api_key.as_deref().ok_or(GeminiError::MissingApiKey)?;

        debug!(review = %truncate_for_log(text, REVIEW_LOG_CHARS), "calling Gemini API");

        let request = GenerateContentRequest::user_prompt(build_prompt(text));
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let snippet = truncate_for_log(&body, SNIPPET_CHARS);
            warn!(status = status.as_u16(), response = %snippet, "Gemini API returned an error status");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                snippet,
            });
        }

        extract_label(&body)
    }
}

/// Pull the first text fragment out of a raw `generateContent` response body.
pub fn extract_label(body: &str) -> Result<String, GeminiError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        warn!(response = %truncate_for_log(body, SNIPPET_CHARS), "Gemini response is not JSON");
        GeminiError::Decode(e.to_string())
    })?;

    let parsed: GenerateContentResponse = serde_json::from_value(value)
        .map_err(|e| GeminiError::Parse(e.to_string()))?;

    match parsed.first_text() {
        Some(text) => {
            let label = text.trim().to_lowercase();
            debug!(label = %label, "Gemini classification received");
            Ok(label)
        }
        None => {
            warn!(
                response = %truncate_for_log(body, SNIPPET_CHARS),
                "Gemini response did not contain the expected candidates structure"
            );
            Err(GeminiError::Parse(
                "missing candidates[0].content.parts[0].text".to_string(),
            ))
        }
    }
}
