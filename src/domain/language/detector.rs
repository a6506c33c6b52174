use super::catalog;
use lingua::{LanguageDetector, LanguageDetectorBuilder};
use serde::Serialize;

/// Fewer letters than this give lingua too little to go on
const MIN_LETTERS: usize = 8;

/// Required gap between the two most likely languages
const MIN_RELATIVE_DISTANCE: f64 = 0.05;

/// Language inferred from a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedLanguage {
    pub code: String,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<&'static str>,
}

impl DetectedLanguage {
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        let display_name = catalog::lookup(&code);
        Self { code, display_name }
    }
}

impl std::fmt::Display for DetectedLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.display_name {
            Some(name) => write!(f, "{} ({})", name, self.code),
            None => write!(f, "{}", self.code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DetectionError {
    #[error("text contains nothing to detect")]
    NoText,
    #[error("language could not be determined")]
    Undetermined,
}

/// Infers the language a text is written in.
///
/// Implementations must be deterministic: the same text always yields the
/// same answer within a process.
pub trait LanguageDetection: Send + Sync {
    fn detect(&self, text: &str) -> Result<DetectedLanguage, DetectionError>;
}

/// Detector backed by lingua's statistical models
pub struct LinguaLanguageDetector {
    detector: LanguageDetector,
}

impl LinguaLanguageDetector {
    pub fn new() -> Self {
        Self {
            detector: LanguageDetectorBuilder::from_all_languages()
                .with_minimum_relative_distance(MIN_RELATIVE_DISTANCE)
                .build(),
        }
    }
}

impl Default for LinguaLanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetection for LinguaLanguageDetector {
    fn detect(&self, text: &str) -> Result<DetectedLanguage, DetectionError> {
        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        if letters == 0 {
            return Err(DetectionError::NoText);
        }
        if letters < MIN_LETTERS {
            return Err(DetectionError::Undetermined);
        }

        let language = self
            .detector
            .detect_language_of(text)
            .ok_or(DetectionError::Undetermined)?;

        let code = match language.iso_code_639_1().to_string().as_str() {
            // lingua splits Norwegian into Bokmal and Nynorsk
            "nb" | "nn" => "no".to_string(),
            other => other.to_string(),
        };

        Ok(DetectedLanguage::from_code(code))
    }
}
