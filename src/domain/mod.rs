pub mod conversion;
pub mod language;
