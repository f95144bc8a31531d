//! Generated documents written next to the cache slot.

use crate::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub filename: String,
    pub data: String,
}

impl GeneratedFile {
    pub fn new(filename: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Write every file relative to `root`, creating parent directories.
pub fn write_generated_files(root: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = root.join(&file.filename);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.data)?;
        log::debug!("Wrote {} bytes to {}", file.data.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![
            GeneratedFile::new("README.md", "# Stars\n"),
            GeneratedFile::new("docs/STARS.md", "# More\n"),
        ];

        let written = write_generated_files(temp_dir.path(), &files).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("docs/STARS.md")).unwrap(),
            "# More\n"
        );
    }
}
