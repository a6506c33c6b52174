pub mod catalog;
pub mod detector;

pub use catalog::AUTO_LANGUAGE;
pub use detector::{DetectedLanguage, DetectionError, LanguageDetection, LinguaLanguageDetector};
use serde::{Deserialize, Serialize};

/// Entry of GET /api/languages
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub code: String,
    pub name: String,
}

impl LanguageResponse {
    pub fn from_catalog() -> Vec<LanguageResponse> {
        catalog::all()
            .map(|(code, name)| LanguageResponse {
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect()
    }
}
