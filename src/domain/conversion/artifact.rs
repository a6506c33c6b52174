use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const AUDIO_EXTENSION: &str = ".mp3";

pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Opaque identifier of a stored audio artifact, `<uuid-v4>.mp3`.
///
/// Safe to use as a URL path segment, a map key and a file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn generate() -> Self {
        Self(format!("{}{}", Uuid::new_v4(), AUDIO_EXTENSION))
    }

    /// Parse an identifier received from a caller.
    ///
    /// Anything that is not a hyphenated uuid followed by `.mp3` is rejected,
    /// which also keeps path separators out of the disk backend.
    pub fn parse(raw: &str) -> Option<Self> {
        let stem = raw.strip_suffix(AUDIO_EXTENSION)?;
        let uuid = Uuid::try_parse(stem).ok()?;
        if uuid.hyphenated().to_string() != stem {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where artifacts live for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Files inside a durable directory
    Disk,
    /// Process memory, lost on restart
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Disk => "disk",
            StorageBackend::Memory => "memory",
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a retrieved artifact should be presented to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioDelivery {
    Inline,
    Attachment,
}

/// Stored audio ready to be written to a response
#[derive(Debug, Clone)]
pub struct AudioPayload {
    pub artifact_id: ArtifactId,
    pub audio: Bytes,
    pub content_type: &'static str,
    pub content_disposition: String,
}

impl AudioPayload {
    pub fn new(artifact_id: ArtifactId, audio: Bytes, delivery: AudioDelivery) -> Self {
        let content_disposition = match delivery {
            AudioDelivery::Inline => "inline".to_string(),
            AudioDelivery::Attachment => format!("attachment; filename=\"{}\"", artifact_id),
        };

        Self {
            artifact_id,
            audio,
            content_type: AUDIO_MIME_TYPE,
            content_disposition,
        }
    }
}
