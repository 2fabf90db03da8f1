pub mod client;
pub mod deepl;
pub mod gemini;

pub use client::{PendingTranslation, TranslationClient};
pub use deepl::DeepLTranslator;
pub use gemini::GeminiTranslator;
pub use wordnest_types::Provider;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text into the target language
    async fn translate(&self, text: &str, target_lang: &str) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub target_lang: String,
    pub provider: Provider,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub provider: Provider,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Map non-success statuses onto the error taxonomy
pub(crate) fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TranslateError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(TranslateError::RateLimitExceeded);
    }

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(TranslateError::AuthenticationError);
    }

    if !status.is_success() {
        return Err(TranslateError::ApiError(format!("HTTP {}", status)));
    }

    Ok(response)
}

pub(crate) async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, TranslateError> {
    response
        .json()
        .await
        .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
pub(crate) mod test_server;
