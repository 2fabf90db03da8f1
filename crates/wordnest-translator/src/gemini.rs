use async_trait::async_trait;
use serde::Serialize;
use wordnest_types::Provider;

use crate::{ProviderMetadata, TranslateError, Translation, Translator, check_status, read_json};

#[derive(Serialize)]
struct GeminiRequest<'a> {
    input: &'a str,
}

/// Bearer-token translation gateway. The gateway decides the target language.
#[derive(Clone)]
pub struct GeminiTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl GeminiTranslator {
    pub fn new(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        tracing::debug!("Gemini request: {} chars", text.len());
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&GeminiRequest { input: text })
            .send()
            .await?;
        let json = read_json(check_status(response)?).await?;

        let output = json["output"]
            .as_str()
            .ok_or_else(|| TranslateError::ApiError("No output in response".to_string()))?;

        Ok(Translation {
            text: output.to_string(),
            target_lang: target_lang.to_string(),
            provider: Provider::Gemini,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            provider: Provider::Gemini,
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::serve_once;

    fn translator(url: &str, key: &str) -> GeminiTranslator {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        GeminiTranslator::new(client, key.to_string(), url.to_string())
    }

    #[tokio::test]
    async fn sends_bearer_token_and_reads_output() {
        let server = serve_once(200, r#"{"output":"Bonjour"}"#).await;

        let result = translator(&server.url, "tok").translate("Hello", "FR").await.unwrap();
        assert_eq!(result.text, "Bonjour");
        assert_eq!(result.provider, Provider::Gemini);

        let request = server.request.await.unwrap().to_lowercase();
        assert!(request.contains("authorization: bearer tok"));
        assert!(request.contains(r#"{"input":"hello"}"#));
    }

    #[tokio::test]
    async fn server_error_is_api_error() {
        let server = serve_once(500, r#"{"error":"boom"}"#).await;
        let err = translator(&server.url, "tok").translate("Hello", "EN").await.unwrap_err();
        assert!(matches!(err, TranslateError::ApiError(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/translate", listener.local_addr().unwrap());
        drop(listener);

        let err = translator(&url, "tok").translate("Hello", "EN").await.unwrap_err();
        assert!(matches!(err, TranslateError::NetworkError(_)));
    }
}
