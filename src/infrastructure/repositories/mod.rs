pub mod artifact_repository;
pub mod disk_artifact_repository;
pub mod google_translation_repository;
pub mod google_tts_repository;
pub mod memory_artifact_repository;
pub mod translation_repository;
pub mod tts_repository;

pub use artifact_repository::ArtifactRepository;
pub use disk_artifact_repository::DiskArtifactRepository;
pub use google_translation_repository::GoogleTranslationRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use memory_artifact_repository::MemoryArtifactRepository;
pub use translation_repository::TranslationRepository;
pub use tts_repository::TtsRepository;
