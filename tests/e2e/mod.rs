// End-to-end tests for the speech text conversion API
//
// Each test starts the real axum router on an ephemeral port. Translation and
// speech synthesis are replaced by in-process fakes, language detection is real.
// TestContext keeps audio in memory, DiskTestContext in a temporary directory.

mod test_audio;
mod test_conversion;
