use async_trait::async_trait;
use serde::Serialize;
use wordnest_types::Provider;

use crate::{ProviderMetadata, TranslateError, Translation, Translator, check_status, read_json};

#[derive(Serialize)]
struct DeepLRequest<'a> {
    text: &'a str,
    target_lang: &'a str,
    auth_key: &'a str,
}

#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(client: reqwest::Client, api_key: String, api_url: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
        }
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let target_lang = target_lang.to_uppercase();
        let request = DeepLRequest {
            text,
            target_lang: &target_lang,
            auth_key: &self.api_key,
        };

        tracing::debug!("DeepL request: {} chars -> {}", text.len(), target_lang);
        let response = self.client.post(&self.api_url).json(&request).send().await?;
        let json = read_json(check_status(response)?).await?;

        let translated_text = json["translations"]
            .get(0)
            .and_then(|t| t["text"].as_str())
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        Ok(Translation {
            text: translated_text.to_string(),
            target_lang,
            provider: Provider::DeepL,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            provider: Provider::DeepL,
            requires_api_key: true,
        }
    }
}
