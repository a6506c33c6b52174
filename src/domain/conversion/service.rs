use super::error::ConversionError;
use super::{
    ArtifactId, AudioDelivery, AudioPayload, ConversionOutcome, ConversionRequest,
    ConversionStage, StorageBackend, UploadedFile,
};
use crate::domain::language::{catalog, DetectedLanguage, LanguageDetection, AUTO_LANGUAGE};
use crate::infrastructure::repositories::{ArtifactRepository, TranslationRepository, TtsRepository};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;

/// Upper bound the translation provider accepts in a single request
pub const MAX_TEXT_CHARS: usize = 5000;

/// Error together with the stage the request was in when it failed
#[derive(Debug)]
struct StageFailure {
    stage: ConversionStage,
    error: ConversionError,
}

fn failed_at(stage: ConversionStage) -> impl FnOnce(ConversionError) -> StageFailure {
    move |error| StageFailure { stage, error }
}

/// Text that passed validation, with where it came from
struct ValidatedInput {
    text: String,
    from_upload: bool,
    target_language: String,
}

pub struct ConversionService {
    detector: Arc<dyn LanguageDetection>,
    translation_repo: Arc<dyn TranslationRepository>,
    tts_repo: Arc<dyn TtsRepository>,
    artifact_repo: Arc<dyn ArtifactRepository>,
}

impl ConversionService {
    pub fn new(
        detector: Arc<dyn LanguageDetection>,
        translation_repo: Arc<dyn TranslationRepository>,
        tts_repo: Arc<dyn TtsRepository>,
        artifact_repo: Arc<dyn ArtifactRepository>,
    ) -> Self {
        Self {
            detector,
            translation_repo,
            tts_repo,
            artifact_repo,
        }
    }
}

#[async_trait]
pub trait ConversionServiceApi: Send + Sync {
    /// Turn text into stored speech in the target language
    ///
    /// This operation:
    /// - Validates the request (text present, plain-text upload, target present)
    /// - Detects the source language, for uploads only
    /// - Translates into the target language
    /// - Synthesizes the translated text
    /// - Stores the audio and returns its identifier
    async fn convert(&self, request: ConversionRequest)
        -> Result<ConversionOutcome, ConversionError>;

    /// Fetch stored audio for playback or download
    async fn fetch_audio(
        &self,
        artifact_id: &str,
        delivery: AudioDelivery,
    ) -> Result<AudioPayload, ConversionError>;

    fn storage_backend(&self) -> StorageBackend;
}

#[async_trait]
impl ConversionServiceApi for ConversionService {
    async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionOutcome, ConversionError> {
        tracing::info!(
            stage = %ConversionStage::Idle,
            has_text = request.text.is_some(),
            has_upload = request.upload.is_some(),
            target_language = request.target_language.as_deref().unwrap_or(""),
            "Conversion request received"
        );

        let start_time = std::time::Instant::now();

        match self.run_pipeline(request).await {
            Ok(outcome) => {
                tracing::info!(
                    stage = %ConversionStage::Done,
                    artifact_id = %outcome.artifact_id,
                    target_language = %outcome.target_language,
                    detected_language = outcome.detected_language.as_ref().map(|d| d.code.as_str()),
                    latency_ms = start_time.elapsed().as_millis(),
                    "Conversion completed"
                );
                Ok(outcome)
            }
            Err(StageFailure { stage, error }) => {
                tracing::warn!(
                    stage = %stage,
                    kind = error.kind().as_str(),
                    error = %error,
                    latency_ms = start_time.elapsed().as_millis(),
                    "Conversion failed"
                );
                Err(error)
            }
        }
    }

    async fn fetch_audio(
        &self,
        artifact_id: &str,
        delivery: AudioDelivery,
    ) -> Result<AudioPayload, ConversionError> {
        let id = ArtifactId::parse(artifact_id).ok_or(ConversionError::NotFound)?;

        let audio = self
            .artifact_repo
            .get(&id)
            .await
            .map_err(ConversionError::RetrievalFailed)?
            .ok_or(ConversionError::NotFound)?;

        tracing::debug!(
            artifact_id = %id,
            audio_size = audio.len(),
            delivery = ?delivery,
            "Audio artifact retrieved"
        );

        Ok(AudioPayload::new(id, audio, delivery))
    }

    fn storage_backend(&self) -> StorageBackend {
        self.artifact_repo.backend()
    }
}

impl ConversionService {
    async fn run_pipeline(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionOutcome, StageFailure> {
        // 1. Validate input
        let input = self
            .validate(request)
            .map_err(failed_at(ConversionStage::Validating))?;

        // 2. Detect language (uploads only)
        let (detected_language, guard_stage) = if input.from_upload {
            let detected = self
                .detect(&input.text)
                .map_err(failed_at(ConversionStage::Detecting))?;
            (Some(detected), ConversionStage::Detecting)
        } else {
            (None, ConversionStage::Validating)
        };

        // 3. Resolve and check target language before translation starts
        let target_language_name = self
            .resolve_target(&input.target_language)
            .map_err(failed_at(guard_stage))?;

        // 4. Translate
        let translated = self
            .translate(&input.text, &input.target_language)
            .await
            .map_err(failed_at(ConversionStage::Translating))?;

        // 5. Synthesize the translated text in the target language
        let audio = self
            .synthesize(&translated, &input.target_language)
            .await
            .map_err(failed_at(ConversionStage::Synthesizing))?;

        // 6. Store
        let artifact_id = self
            .store(audio)
            .await
            .map_err(failed_at(ConversionStage::Stored))?;

        Ok(ConversionOutcome {
            artifact_id,
            target_language: input.target_language,
            target_language_name,
            detected_language,
            created_at: Utc::now(),
        })
    }

    fn validate(&self, request: ConversionRequest) -> Result<ValidatedInput, ConversionError> {
        tracing::debug!(stage = %ConversionStage::Validating, "Validating conversion request");

        let ConversionRequest {
            text,
            target_language,
            upload,
        } = request;

        let target_language = target_language
            .map(|language| catalog::normalize(&language))
            .filter(|language| !language.is_empty());

        let (text, from_upload) = match upload {
            Some(file) => (Self::read_upload(file)?, true),
            None => (text.unwrap_or_default(), false),
        };

        // Empty uploads are left for detection to reject
        if !from_upload && text.trim().is_empty() {
            return Err(ConversionError::MissingInput);
        }

        let target_language = target_language.ok_or(ConversionError::MissingInput)?;

        let char_count = text.chars().count();
        if char_count > MAX_TEXT_CHARS {
            return Err(ConversionError::TextTooLong {
                actual: char_count,
                max: MAX_TEXT_CHARS,
            });
        }

        Ok(ValidatedInput {
            text,
            from_upload,
            target_language,
        })
    }

    /// Accept `.txt` uploads holding UTF-8 text
    fn read_upload(file: UploadedFile) -> Result<String, ConversionError> {
        if !file.file_name.to_lowercase().ends_with(".txt") {
            return Err(ConversionError::UnsupportedUpload);
        }

        let text = String::from_utf8(file.content).map_err(|_| ConversionError::UnsupportedUpload)?;

        Ok(match text.strip_prefix('\u{feff}') {
            Some(without_bom) => without_bom.to_string(),
            None => text,
        })
    }

    fn detect(&self, text: &str) -> Result<DetectedLanguage, ConversionError> {
        let detected = self
            .detector
            .detect(text)
            .map_err(ConversionError::DetectionFailed)?;

        tracing::info!(
            stage = %ConversionStage::Detecting,
            language_detected = %detected,
            "Language detected for uploaded text"
        );

        Ok(detected)
    }

    fn resolve_target(&self, target_language: &str) -> Result<&'static str, ConversionError> {
        if target_language == AUTO_LANGUAGE {
            return Err(ConversionError::NoTargetLanguage);
        }

        catalog::lookup(target_language)
            .ok_or_else(|| ConversionError::InvalidTargetLanguage(target_language.to_string()))
    }

    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ConversionError> {
        tracing::debug!(
            stage = %ConversionStage::Translating,
            target_language = target_language,
            text_length = text.len(),
            "Translating text"
        );

        self.translation_repo
            .translate(text, AUTO_LANGUAGE, target_language)
            .await
            .map_err(ConversionError::TranslationFailed)
    }

    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, ConversionError> {
        tracing::debug!(
            stage = %ConversionStage::Synthesizing,
            language = language,
            text_length = text.len(),
            "Synthesizing translated text"
        );

        let audio = self
            .tts_repo
            .synthesize(text, language)
            .await
            .map_err(ConversionError::SynthesisFailed)?;

        if audio.is_empty() {
            return Err(ConversionError::SynthesisFailed(
                "no audio was produced".to_string(),
            ));
        }

        Ok(audio)
    }

    async fn store(&self, audio: Vec<u8>) -> Result<ArtifactId, ConversionError> {
        let artifact_id = self
            .artifact_repo
            .put(Bytes::from(audio))
            .await
            .map_err(ConversionError::StorageFailed)?;

        tracing::debug!(
            stage = %ConversionStage::Stored,
            artifact_id = %artifact_id,
            backend = %self.artifact_repo.backend(),
            "Audio artifact stored"
        );

        Ok(artifact_id)
    }
}
