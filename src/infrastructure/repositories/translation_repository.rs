use async_trait::async_trait;

/// Repository for machine translation.
/// Abstracts the underlying translation provider.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translate text into the target language
    ///
    /// # Arguments
    /// * `text` - Text to translate
    /// * `source` - `"auto"` or a catalog code hinting the source language
    /// * `target` - Catalog code of the target language
    ///
    /// # Errors
    /// Returns a human-readable cause if the target is unknown or the provider fails
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, String>;
}
