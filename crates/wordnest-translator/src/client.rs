use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use wordnest_config::translator::TranslatorConfig;
use wordnest_core::generation::{Generation, Ticket};
use wordnest_types::Provider;

use crate::{DeepLTranslator, GeminiTranslator, TranslateError, Translation, Translator};

/// Dispatches to one of the two providers and tracks in-flight requests
pub struct TranslationClient {
    deepl: Arc<dyn Translator>,
    gemini: Arc<dyn Translator>,
    target_lang: String,
    in_flight: AtomicUsize,
    generation: Generation,
}

/// A request that has been registered with the client but not yet sent
pub struct PendingTranslation {
    pub ticket: Ticket,
    pub text: String,
    pub provider: Provider,
    translator: Arc<dyn Translator>,
    target_lang: String,
}

impl PendingTranslation {
    pub async fn send(&self) -> Result<Translation, TranslateError> {
        self.translator.translate(&self.text, &self.target_lang).await
    }
}

impl TranslationClient {
    pub fn new(deepl: Arc<dyn Translator>, gemini: Arc<dyn Translator>, target_lang: String) -> Self {
        Self {
            deepl,
            gemini,
            target_lang,
            in_flight: AtomicUsize::new(0),
            generation: Generation::new(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let http = builder.build()?;

        let deepl = DeepLTranslator::new(
            http.clone(),
            config.deepl.api_key.clone(),
            config.deepl.api_url.clone(),
        );
        let gemini = GeminiTranslator::new(
            http,
            config.gemini.api_key.clone(),
            config.gemini.api_url.clone(),
        );

        let client = Self::new(
            Arc::new(deepl),
            Arc::new(gemini),
            config.target_lang.clone(),
        );

        for provider in [Provider::DeepL, Provider::Gemini] {
            let metadata = client.translator(provider).metadata();
            if metadata.requires_api_key && config.provider(provider).api_key.is_empty() {
                tracing::warn!(
                    "No API key for {}, its requests will fail authentication",
                    metadata.name
                );
            }
        }

        Ok(client)
    }

    pub fn translator(&self, provider: Provider) -> Arc<dyn Translator> {
        match provider {
            Provider::DeepL => Arc::clone(&self.deepl),
            Provider::Gemini => Arc::clone(&self.gemini),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Register a request. Any request registered earlier is superseded.
    pub fn begin(&self, text: String, provider: Provider) -> PendingTranslation {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        PendingTranslation {
            ticket: self.generation.next(),
            text,
            provider,
            translator: self.translator(provider),
            target_lang: self.target_lang.clone(),
        }
    }

    /// Settle a request. Returns `None` when a newer request superseded it.
    pub fn finish(
        &self,
        ticket: Ticket,
        result: Result<Translation, TranslateError>,
    ) -> Option<Result<Translation, TranslateError>> {
        self.in_flight.fetch_sub(1, Ordering::AcqRel);

        if self.generation.is_current(ticket) {
            Some(result)
        } else {
            tracing::debug!("Dropping superseded translation #{}", ticket.id());
            None
        }
    }

    /// Translate directly. Counts toward `is_busy` but never competes with other requests.
    pub async fn translate(&self, text: &str, provider: Provider) -> Result<Translation, TranslateError> {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let result = self
            .translator(provider)
            .translate(text, &self.target_lang)
            .await;
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::time::sleep;

    use super::*;
    use crate::ProviderMetadata;

    struct Echo {
        provider: Provider,
        delay: Duration,
        seen: Mutex<Vec<String>>,
    }

    impl Echo {
        fn new(provider: Provider) -> Arc<Self> {
            Self::slow(provider, 0)
        }

        fn slow(provider: Provider, millis: u64) -> Arc<Self> {
            Arc::new(Self {
                provider,
                delay: Duration::from_millis(millis),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Translator for Echo {
        async fn translate(&self, text: &str, target_lang: &str) -> Result<Translation, TranslateError> {
            self.seen.lock().unwrap().push(text.to_string());
            sleep(self.delay).await;
            Ok(Translation {
                text: format!("{}:{}", self.provider, text),
                target_lang: target_lang.to_string(),
                provider: self.provider,
            })
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: self.provider.to_string(),
                provider: self.provider,
                requires_api_key: false,
            }
        }
    }

    fn client() -> (TranslationClient, Arc<Echo>, Arc<Echo>) {
        let deepl = Echo::new(Provider::DeepL);
        let gemini = Echo::new(Provider::Gemini);
        let client = TranslationClient::new(deepl.clone(), gemini.clone(), "EN".to_string());
        (client, deepl, gemini)
    }

    #[tokio::test]
    async fn provider_selects_backend() {
        let (client, deepl, gemini) = client();

        let a = client.translate("hi", Provider::DeepL).await.unwrap();
        let b = client.translate("yo", Provider::Gemini).await.unwrap();

        assert_eq!(a.text, "deepl:hi");
        assert_eq!(b.text, "gemini:yo");
        assert_eq!(*deepl.seen.lock().unwrap(), vec!["hi"]);
        assert_eq!(*gemini.seen.lock().unwrap(), vec!["yo"]);
    }

    #[tokio::test]
    async fn empty_text_never_panics() {
        let (client, _, _) = client();
        let result = client.translate("", Provider::DeepL).await;
        assert!(matches!(result, Ok(ref t) if t.text == "deepl:") || result.is_err());
    }

    #[tokio::test]
    async fn busy_while_in_flight() {
        let (client, _, _) = client();
        assert!(!client.is_busy());

        let pending = client.begin("hi".into(), Provider::DeepL);
        assert!(client.is_busy());

        let result = pending.send().await;
        assert!(client.finish(pending.ticket, result).is_some());
        assert!(!client.is_busy());
    }

    #[tokio::test]
    async fn superseded_result_is_dropped() {
        let (client, _, _) = client();
        let first = client.begin("old".into(), Provider::DeepL);
        let second = client.begin("new".into(), Provider::Gemini);

        let old = first.send().await;
        assert!(client.finish(first.ticket, old).is_none());
        assert!(client.is_busy());

        let new = second.send().await;
        let settled = client.finish(second.ticket, new).unwrap().unwrap();
        assert_eq!(settled.text, "gemini:new");
        assert!(!client.is_busy());
    }

    #[tokio::test]
    async fn overlapping_translations_both_succeed() {
        let client = TranslationClient::new(
            Echo::slow(Provider::DeepL, 100),
            Echo::slow(Provider::Gemini, 10),
            "EN".to_string(),
        );

        let (first, second) = tokio::join!(
            client.translate("first", Provider::DeepL),
            client.translate("second", Provider::Gemini)
        );

        assert_eq!(first.unwrap().text, "deepl:first");
        assert_eq!(second.unwrap().text, "gemini:second");
        assert!(!client.is_busy());
    }

    #[test]
    fn remote_providers_require_keys() {
        let client = TranslationClient::from_config(&TranslatorConfig::default()).unwrap();
        for provider in [Provider::DeepL, Provider::Gemini] {
            let metadata = client.translator(provider).metadata();
            assert_eq!(metadata.provider, provider);
            assert!(metadata.requires_api_key);
        }
    }

    #[tokio::test]
    async fn missing_credentials_surface_as_authentication_error() {
        let client = TranslationClient::from_config(&TranslatorConfig::default()).unwrap();
        let err = client.translate("hello", Provider::Gemini).await.unwrap_err();
        assert!(matches!(err, TranslateError::AuthenticationError));
    }
}
