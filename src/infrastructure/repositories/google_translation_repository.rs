use super::translation_repository::TranslationRepository;
use crate::domain::language::catalog;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Map a catalog code to the code Google's translate and speech endpoints expect
pub(super) fn google_language_code(code: &str) -> &str {
    match code {
        "zh-cn" => "zh-CN",
        "zh-tw" => "zh-TW",
        "he" => "iw",
        other => other,
    }
}

/// Google Translate implementation of the translation repository
pub struct GoogleTranslationRepository {
    api_url: String,
    http_client: reqwest::Client,
}

impl GoogleTranslationRepository {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_url,
            http_client,
        })
    }

    /// Join the translated segments of a `translate_a/single` response
    fn parse_translation(body: &Value) -> Result<String, String> {
        let segments = body
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| "unexpected response format from translation service".to_string())?;

        let translated: String = segments
            .iter()
            .filter_map(|segment| segment.get(0).and_then(Value::as_str))
            .collect();

        if translated.trim().is_empty() {
            return Err("translation service returned no text".to_string());
        }

        Ok(translated)
    }
}

#[async_trait]
impl TranslationRepository for GoogleTranslationRepository {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, String> {
        if !catalog::is_valid(target) {
            return Err(format!("unsupported target language '{}'", target));
        }

        let start_time = std::time::Instant::now();
        let params = [
            ("client", "gtx"),
            ("sl", google_language_code(source)),
            ("tl", google_language_code(target)),
            ("dt", "t"),
        ];

        tracing::info!(
            source = source,
            target = target,
            text_length = text.len(),
            "Calling translation service"
        );

        let response = self
            .http_client
            .post(&self.api_url)
            .query(&params)
            .form(&[("q", text)])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, target = target, "Translation request failed");
                format!("translation request failed: {}", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                target = target,
                "Translation service returned an error"
            );
            return Err(format!(
                "translation service returned {}: {}",
                status,
                error_text.chars().take(200).collect::<String>()
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("failed to parse translation response: {}", e))?;

        let translated = Self::parse_translation(&body)?;

        tracing::info!(
            provider = "google",
            target = target,
            latency_ms = start_time.elapsed().as_millis(),
            translated_length = translated.len(),
            "Translation completed"
        );

        Ok(translated)
    }
}
