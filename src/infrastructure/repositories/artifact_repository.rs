use crate::domain::conversion::{ArtifactId, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;

/// Repository for synthesized audio artifacts.
/// Abstracts where the audio lives (durable directory, process memory).
///
/// Implementations are responsible for:
/// - Generating a fresh identifier on every `put`
/// - Returning `None` (never partial bytes) for unknown identifiers
/// - Allowing concurrent `put`/`get` calls for distinct identifiers
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    /// Persist audio and return the identifier it can be fetched with
    async fn put(&self, audio: Bytes) -> Result<ArtifactId, String>;

    /// Fetch previously stored audio
    ///
    /// # Errors
    /// Returns error only when the backend itself fails; a missing artifact is `Ok(None)`
    async fn get(&self, id: &ArtifactId) -> Result<Option<Bytes>, String>;

    /// Backend kind, for logging and readiness checks
    fn backend(&self) -> StorageBackend;
}
