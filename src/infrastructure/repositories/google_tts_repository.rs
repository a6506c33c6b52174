use super::google_translation_repository::google_language_code;
use super::tts_repository::TtsRepository;
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_TTS_API_URL: &str = "https://translate.google.com/translate_tts";

/// Google Translate speech rejects requests much longer than this
const MAX_BATCH_CHARS: usize = 100;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?;。！？；]+\s*").expect("sentence pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Google Translate speech implementation of TTS repository
pub struct GoogleTtsRepository {
    api_url: String,
    http_client: reqwest::Client,
}

impl GoogleTtsRepository {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_url,
            http_client,
        })
    }

    /// Split text into batches that respect sentence boundaries.
    /// Each batch is at most MAX_BATCH_CHARS characters.
    fn split_into_batches(text: &str) -> Vec<String> {
        let normalized = WHITESPACE.replace_all(text.trim(), " ");
        if normalized.chars().count() <= MAX_BATCH_CHARS {
            return vec![normalized.into_owned()];
        }

        let mut pieces = Vec::new();
        let mut last_end = 0;
        for mat in SENTENCE_END.find_iter(&normalized) {
            pieces.extend(Self::split_oversized(&normalized[last_end..mat.end()]));
            last_end = mat.end();
        }
        if last_end < normalized.len() {
            pieces.extend(Self::split_oversized(&normalized[last_end..]));
        }

        let mut batches = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for piece in pieces {
            let piece = piece.trim();
            if piece.is_empty() {
                continue;
            }
            let piece_len = piece.chars().count();

            // If adding this piece would exceed the limit, save current batch
            if current_len > 0 && current_len + 1 + piece_len > MAX_BATCH_CHARS {
                batches.push(std::mem::take(&mut current));
                current_len = 0;
            }

            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(piece);
            current_len += piece_len;
        }

        if !current.is_empty() {
            batches.push(current);
        }

        batches
    }

    /// Break a sentence that is too long on its own into words, and words into characters
    fn split_oversized(sentence: &str) -> Vec<String> {
        if sentence.chars().count() <= MAX_BATCH_CHARS {
            return vec![sentence.to_string()];
        }

        let mut parts = Vec::new();
        for word in sentence.split_whitespace() {
            if word.chars().count() <= MAX_BATCH_CHARS {
                parts.push(word.to_string());
            } else {
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(MAX_BATCH_CHARS) {
                    parts.push(chunk.iter().collect());
                }
            }
        }
        parts
    }

    /// Fetch MP3 audio for a single batch
    async fn call_google(
        &self,
        text: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        let total = total.to_string();
        let index = index.to_string();
        let text_len = text.chars().count().to_string();
        let params = [
            ("ie", "UTF-8"),
            ("client", "tw-ob"),
            ("tl", google_language_code(language)),
            ("q", text),
            ("total", total.as_str()),
            ("idx", index.as_str()),
            ("textlen", text_len.as_str()),
        ];

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    language = language,
                    text_length = text.len(),
                    "Speech synthesis request failed"
                );
                format!("speech request failed: {}", e)
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(
                status = status.as_u16(),
                language = language,
                "Speech service returned an error"
            );
            return Err(format!(
                "speech service returned {} for language '{}'",
                status, language
            ));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read speech response: {}", e))?
            .to_vec();

        if audio_bytes.is_empty() {
            return Err("speech service returned empty audio".to_string());
        }

        tracing::debug!(audio_size = audio_bytes.len(), "Speech audio received");

        Ok(audio_bytes)
    }

    /// Synthesize multiple text batches and merge the audio results in order
    async fn synthesize_batches(&self, batches: &[String], language: &str) -> Result<Vec<u8>, String> {
        let mut merged_audio = Vec::new();

        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self.call_google(batch, language, index, batches.len()).await?;
            merged_audio.extend(audio_data);

            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        Ok(merged_audio)
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        if text.trim().is_empty() {
            return Err("cannot synthesize empty text".to_string());
        }

        let start_time = std::time::Instant::now();
        let batches = Self::split_into_batches(text);

        tracing::info!(
            language = language,
            text_length = text.len(),
            batch_count = batches.len(),
            "Starting speech synthesis"
        );

        let audio_data = self.synthesize_batches(&batches, language).await?;

        tracing::info!(
            provider = "google",
            language = language,
            latency_ms = start_time.elapsed().as_millis(),
            batch_count = batches.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}
