pub mod artifact;
pub mod error;
pub mod service;

pub use artifact::{ArtifactId, AudioDelivery, AudioPayload, StorageBackend, AUDIO_MIME_TYPE};
pub use error::{ConversionError, ConversionErrorKind};
pub use service::{ConversionService, ConversionServiceApi};

use crate::domain::language::DetectedLanguage;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// File received alongside a conversion request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

/// Input of a single conversion, as extracted from the HTTP request
#[derive(Debug, Clone, Default)]
pub struct ConversionRequest {
    pub text: Option<String>,
    pub target_language: Option<String>,
    pub upload: Option<UploadedFile>,
}

/// Lifecycle of a conversion request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    Idle,
    Validating,
    Detecting,
    Translating,
    Synthesizing,
    Stored,
    Done,
}

impl std::fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConversionStage::Idle => "idle",
            ConversionStage::Validating => "validating",
            ConversionStage::Detecting => "detecting",
            ConversionStage::Translating => "translating",
            ConversionStage::Synthesizing => "synthesizing",
            ConversionStage::Stored => "stored",
            ConversionStage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Result of a successful conversion
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    pub artifact_id: ArtifactId,
    pub target_language: String,
    pub target_language_name: &'static str,
    pub detected_language: Option<DetectedLanguage>,
    pub created_at: DateTime<Utc>,
}

/// Response for POST /api/convert
#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub message: String,
    pub audio_id: ArtifactId,
    pub play_url: String,
    pub download_url: String,
    pub language: String,
    pub language_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<DetectedLanguage>,
    pub created_at: DateTime<Utc>,
}

impl From<ConversionOutcome> for ConversionResponse {
    fn from(outcome: ConversionOutcome) -> Self {
        Self {
            message: "Conversion successful.".to_string(),
            play_url: format!("/play/{}", outcome.artifact_id),
            download_url: format!("/download/{}", outcome.artifact_id),
            audio_id: outcome.artifact_id,
            language: outcome.target_language,
            language_name: outcome.target_language_name.to_string(),
            detected_language: outcome.detected_language,
            created_at: outcome.created_at,
        }
    }
}
