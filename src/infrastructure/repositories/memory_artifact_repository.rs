use super::artifact_repository::ArtifactRepository;
use crate::domain::conversion::{ArtifactId, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;

/// Keeps artifacts in process memory, for hosts without a writable filesystem.
///
/// The cache is built without capacity or expiry, so entries live until the
/// process exits.
pub struct MemoryArtifactRepository {
    artifacts: Cache<String, Bytes>,
}

impl MemoryArtifactRepository {
    pub fn new() -> Self {
        Self {
            artifacts: Cache::builder().build(),
        }
    }
}

impl Default for MemoryArtifactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactRepository for MemoryArtifactRepository {
    async fn put(&self, audio: Bytes) -> Result<ArtifactId, String> {
        let id = ArtifactId::generate();
        let audio_size = audio.len();

        self.artifacts.insert(id.as_str().to_string(), audio).await;

        tracing::debug!(
            artifact_id = %id,
            audio_size = audio_size,
            "Audio artifact stored in memory"
        );

        Ok(id)
    }

    async fn get(&self, id: &ArtifactId) -> Result<Option<Bytes>, String> {
        Ok(self.artifacts.get(id.as_str()).await)
    }

    fn backend(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
