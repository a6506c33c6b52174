use async_trait::async_trait;
use parking_lot::Mutex;
use speech_text_conversion::infrastructure::repositories::{TranslationRepository, TtsRepository};
use std::collections::HashMap;

/// Translator returning canned phrases, or `[<target>] <text>` otherwise
#[derive(Default)]
pub struct FakeTranslationRepository {
    phrases: HashMap<(String, String), String>,
    failure: Mutex<Option<String>>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeTranslationRepository {
    pub fn with_phrases(phrases: &[(&str, &str, &str)]) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|(text, target, translated)| {
                    ((text.to_string(), target.to_string()), translated.to_string())
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock() = Some(reason.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl TranslationRepository for FakeTranslationRepository {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, String> {
        self.calls
            .lock()
            .push((text.to_string(), source.to_string(), target.to_string()));

        if let Some(reason) = self.failure.lock().clone() {
            return Err(reason);
        }

        Ok(self
            .phrases
            .get(&(text.to_string(), target.to_string()))
            .cloned()
            .unwrap_or_else(|| format!("[{}] {}", target, text)))
    }
}

/// Synthesizer producing a recognizable fake MP3 payload
#[derive(Default)]
pub struct FakeTtsRepository {
    failure: Mutex<Option<String>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl FakeTtsRepository {
    pub fn audio_for(text: &str, language: &str) -> Vec<u8> {
        let mut audio = b"ID3".to_vec();
        audio.extend_from_slice(format!("{}:{}", language, text).as_bytes());
        audio
    }

    pub fn fail_with(&self, reason: &str) {
        *self.failure.lock() = Some(reason.to_string());
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl TtsRepository for FakeTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        self.calls
            .lock()
            .push((text.to_string(), language.to_string()));

        if let Some(reason) = self.failure.lock().clone() {
            return Err(reason);
        }

        Ok(Self::audio_for(text, language))
    }
}
