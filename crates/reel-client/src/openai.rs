//! OpenAI embeddings client.
//!
//! Supports OpenAI's text embedding models:
//! - `text-embedding-ada-002` (1536 dimensions, default)
//! - `text-embedding-3-small` (1536 dimensions)
//! - `text-embedding-3-large` (3072 dimensions)
//!
//! All vectors stored by Reel must come from the same model; mixing models
//! makes similarity scores meaningless.
//!
//! # Examples
//!
//! ```no_run
//! use reel_client::OpenAIClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAIClient::new("sk-your-api-key")?;
//! let embedding = client.get_embeddings("Merhaba dünya").await?;
//! println!("Embedding dimension: {}", embedding.len()); // 1536
//! # Ok(())
//! # }
//! ```

use reel_core::HttpConfig;
use reel_core::config::DEFAULT_EMBEDDING_MODEL;
use reel_core::error::AppError;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";

/// Known OpenAI embedding models and their dimensions.
pub fn model_dimension(model: &str) -> usize {
    match model {
        "text-embedding-3-small" => 1536,
        "text-embedding-3-large" => 3072,
        "text-embedding-ada-002" => 1536,
        _ => 1536,
    }
}

/// HTTP client for OpenAI's Embeddings API.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    dim: usize,
    timeout_secs: u64,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Error response from OpenAI API
#[derive(Deserialize)]
struct OpenAIError {
    error: OpenAIErrorDetail,
}

#[derive(Deserialize)]
struct OpenAIErrorDetail {
    message: String,
}

impl OpenAIClient {
    /// Creates a new OpenAI client using `text-embedding-ada-002`.
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        Self::with_model(api_key, DEFAULT_EMBEDDING_MODEL)
    }

    /// Creates a new OpenAI client with a specific model.
    pub fn with_model(api_key: &str, model: &str) -> Result<Self, AppError> {
        Self::with_config(api_key, model, None)
    }

    /// Creates a new OpenAI client with full configuration.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model name
    /// * `endpoint` - Custom API endpoint (for Azure OpenAI or proxies)
    pub fn with_config(
        api_key: &str,
        model: &str,
        endpoint: Option<&str>,
    ) -> Result<Self, AppError> {
        let http_config = HttpConfig::default();
        let client = Client::builder()
            .timeout(http_config.timeout)
            .build()
            .map_err(|e| AppError::ClientError(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            dim: model_dimension(model),
            timeout_secs: http_config.timeout.as_secs(),
        })
    }

    /// Returns the model being used.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates the embedding for a single text.
    ///
    /// # Errors
    ///
    /// Returns `AppError::EmptyResponse` if the API answers without data.
    pub async fn get_embeddings(&self, text: &str) -> Result<Vec<f32>, AppError> {
        let input = sanitize_input(text);
        let request_body = EmbeddingRequest {
            model: &self.model,
            input: &input,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Cannot connect to OpenAI: {}", e))
                } else {
                    AppError::ClientError(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &error_text));
        }

        let embedding_response: EmbeddingResponse = response.json().await.map_err(|e| {
            AppError::ClientError(format!("Failed to parse OpenAI response: {}", e))
        })?;

        embedding_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(AppError::EmptyResponse)
    }
}

/// Replaces line breaks with spaces.
fn sanitize_input(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

fn status_error(status_code: u16, error_text: &str) -> AppError {
    let message = match serde_json::from_str::<OpenAIError>(error_text) {
        Ok(openai_error) => openai_error.error.message,
        Err(_) => format!("HTTP {}: {}", status_code, error_text),
    };

    match status_code {
        401 => AppError::ClientError(format!(
            "OpenAI authentication failed: {}. Check your OPENAI_API_KEY.",
            message
        )),
        429 => AppError::RateLimitExceeded,
        _ => AppError::ClientError(format!("OpenAI error: {}", message)),
    }
}

// =============================================================================
// Trait Implementation: EmbeddingProvider
// =============================================================================

impl reel_core::traits::EmbeddingProvider for OpenAIClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    async fn generate(&self, text: &str) -> Result<Vec<f32>, AppError> {
        self.get_embeddings(text).await
    }
}
