use super::artifact_repository::ArtifactRepository;
use crate::domain::conversion::{ArtifactId, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each artifact as a file named by its identifier inside a fixed directory
pub struct DiskArtifactRepository {
    storage_dir: PathBuf,
}

impl DiskArtifactRepository {
    /// Create the repository, creating the storage directory if needed
    pub fn new(storage_dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let storage_dir = storage_dir.into();
        std::fs::create_dir_all(&storage_dir)?;

        tracing::info!(
            storage_dir = %storage_dir.display(),
            "Disk artifact storage ready"
        );

        Ok(Self { storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    fn path_for(&self, id: &ArtifactId) -> PathBuf {
        self.storage_dir.join(id.as_str())
    }
}

#[async_trait]
impl ArtifactRepository for DiskArtifactRepository {
    async fn put(&self, audio: Bytes) -> Result<ArtifactId, String> {
        let id = ArtifactId::generate();
        let path = self.path_for(&id);

        tokio::fs::write(&path, &audio).await.map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path.display(),
                "Failed to write audio artifact"
            );
            format!("failed to write audio file: {}", e)
        })?;

        tracing::debug!(
            artifact_id = %id,
            audio_size = audio.len(),
            "Audio artifact written to disk"
        );

        Ok(id)
    }

    async fn get(&self, id: &ArtifactId) -> Result<Option<Bytes>, String> {
        match tokio::fs::read(self.path_for(id)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("failed to read audio file: {}", e)),
        }
    }

    fn backend(&self) -> StorageBackend {
        StorageBackend::Disk
    }
}
