use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying speech provider.
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech in the given language
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    ///
    /// # Arguments
    /// * `text` - The translated text to speak
    /// * `language` - Catalog code of the language the audio must be spoken in
    ///
    /// # Errors
    /// Returns error if the text is blank, synthesis fails or the provider is unavailable
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String>;
}
