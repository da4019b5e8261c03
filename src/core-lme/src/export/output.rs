//! Manifest file writing: whole-file overwrite, UTF-8 with a leading BOM.

use std::path::{Path, PathBuf};

use crate::export::config::OutputFile;
use crate::export::errors::{ExportError, Result};

/// Byte-order mark prepended to every written manifest.
pub const BOM: char = '\u{feff}';

/// Writes one manifest into the output directory, replacing any previous
/// content in a single whole-file write.
pub async fn write_manifest(out_dir: &Path, file: OutputFile, content: &str) -> Result<PathBuf> {
    let path = out_dir.join(file.file_name());
    tokio::fs::write(&path, format!("{BOM}{content}"))
        .await
        .map_err(|source| ExportError::Write {
            file: file.file_name().to_string(),
            source,
        })?;
    Ok(path)
}

/// Removes one manifest from the output directory. Returns whether a file
/// actually existed.
pub async fn delete_manifest(out_dir: &Path, file: OutputFile) -> Result<bool> {
    let path = out_dir.join(file.file_name());
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_prepends_bom_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(dir.path(), OutputFile::Links, "# Acme\n").await.unwrap();
        assert_eq!(path.file_name().unwrap(), "llms.txt");

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
        assert_eq!(&bytes[3..], b"# Acme\n");

        write_manifest(dir.path(), OutputFile::Links, "# Replaced\n").await.unwrap();
        let replaced = std::fs::read_to_string(&path).unwrap();
        assert_eq!(replaced, "\u{feff}# Replaced\n");
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!delete_manifest(dir.path(), OutputFile::Full).await.unwrap());
        write_manifest(dir.path(), OutputFile::Full, "x").await.unwrap();
        assert!(delete_manifest(dir.path(), OutputFile::Full).await.unwrap());
        assert!(!dir.path().join("llms-full.txt").exists());
    }
}
