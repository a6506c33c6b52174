use crate::domain::language::DetectionError;

/// Broad failure categories callers can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionErrorKind {
    Input,
    Detection,
    Translation,
    Synthesis,
    Storage,
    NotFound,
}

impl ConversionErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionErrorKind::Input => "input_error",
            ConversionErrorKind::Detection => "detection_error",
            ConversionErrorKind::Translation => "translation_error",
            ConversionErrorKind::Synthesis => "synthesis_error",
            ConversionErrorKind::Storage => "storage_error",
            ConversionErrorKind::NotFound => "not_found",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Please provide text or upload a file and select a language.")]
    MissingInput,
    #[error("Only plain-text (.txt) uploads are supported.")]
    UnsupportedUpload,
    #[error("Text must be {max} characters or less, got {actual}.")]
    TextTooLong { actual: usize, max: usize },
    #[error("No destination language selected. Choose a language instead of auto.")]
    NoTargetLanguage,
    #[error("Invalid destination language selected: '{0}'.")]
    InvalidTargetLanguage(String),
    #[error("Could not detect language. Please provide more text or choose a language manually.")]
    DetectionFailed(#[source] DetectionError),
    #[error("Translation failed: {0}")]
    TranslationFailed(String),
    #[error("Speech synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("Could not store audio: {0}")]
    StorageFailed(String),
    #[error("Audio file not found.")]
    NotFound,
    #[error("Could not read audio: {0}")]
    RetrievalFailed(String),
}

impl ConversionError {
    pub fn kind(&self) -> ConversionErrorKind {
        match self {
            ConversionError::MissingInput
            | ConversionError::UnsupportedUpload
            | ConversionError::TextTooLong { .. }
            | ConversionError::NoTargetLanguage
            | ConversionError::InvalidTargetLanguage(_) => ConversionErrorKind::Input,
            ConversionError::DetectionFailed(_) => ConversionErrorKind::Detection,
            ConversionError::TranslationFailed(_) => ConversionErrorKind::Translation,
            ConversionError::SynthesisFailed(_) => ConversionErrorKind::Synthesis,
            ConversionError::StorageFailed(_) | ConversionError::RetrievalFailed(_) => {
                ConversionErrorKind::Storage
            }
            ConversionError::NotFound => ConversionErrorKind::NotFound,
        }
    }
}
