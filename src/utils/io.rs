//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents as UTF-8 text.
///
/// Reads raw bytes first so a decoding failure is reported as
/// `io.invalid_utf8` rather than a generic read error.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .map_err(|e| Error::read_failed(path.display().to_string(), e.to_string()))?;

    String::from_utf8(bytes)
        .map_err(|e| Error::invalid_utf8(path.display().to_string(), e.to_string()))
}

/// Write text content to a file, reporting failures as `io.write_failed`.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::write_failed(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn read_text_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_text(temp.path()).unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_text_returns_error_for_missing_file() {
        let result = read_text(Path::new("/nonexistent/path.lua"));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "io.read_failed");
    }

    #[test]
    fn read_text_rejects_invalid_utf8() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(&[0xff, 0xfe, 0x00, 0x9f]).unwrap();

        let err = read_text(temp.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "io.invalid_utf8");
    }

    #[test]
    fn write_text_succeeds_for_valid_path() {
        let temp = NamedTempFile::new().unwrap();
        let result = write_text(temp.path(), "new content");
        assert!(result.is_ok());

        let content = fs::read_to_string(temp.path()).unwrap();
        assert_eq!(content, "new content");
    }

    #[test]
    fn write_text_returns_error_for_invalid_path() {
        let result = write_text(Path::new("/nonexistent/dir/file.lua"), "content");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "io.write_failed");
    }
}
