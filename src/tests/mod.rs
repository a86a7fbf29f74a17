use std::io::Write;
use tempfile::NamedTempFile;

pub mod fixtures;

/// Helper to write log content to a scratch file the scanner can open by path
pub fn temp_log(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp log file");
    file.write_all(content)
        .expect("Failed to write temp log file");
    file
}
