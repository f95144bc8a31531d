//! Temporary roots holding a cache file and an optional config

#![allow(dead_code)]

use starlist::core::cache::{store_catalog, FileSlot, DEFAULT_CACHE_FILENAME};
use starlist::core::catalog::CatalogResponse;
use starlist::core::dirs::PROJECT_CONFIG_FILENAME;
use starlist::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The TempDir must be kept alive for the duration of the test.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    /// Empty directory used as the user config home.
    pub config_home: TempDir,
}

impl TestWorkspace {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn cache_path(&self) -> PathBuf {
        self.path.join(DEFAULT_CACHE_FILENAME)
    }

    pub fn write_catalog(&self, catalog: &CatalogResponse) -> Result<()> {
        let mut slot = FileSlot::new(self.cache_path());
        store_catalog(&mut slot, catalog)
    }

    pub fn write_cache_raw(&self, contents: &str) -> Result<()> {
        fs::write(self.cache_path(), contents)?;
        Ok(())
    }

    pub fn write_cache_bytes(&self, contents: &[u8]) -> Result<()> {
        fs::write(self.cache_path(), contents)?;
        Ok(())
    }

    pub fn write_config(&self, yaml: &str) -> Result<()> {
        fs::write(self.path.join(PROJECT_CONFIG_FILENAME), yaml)?;
        Ok(())
    }

    pub fn read(&self, filename: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path.join(filename))?)
    }
}

pub fn setup_workspace() -> Result<TestWorkspace> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();
    Ok(TestWorkspace {
        temp_dir,
        path,
        config_home: TempDir::new()?,
    })
}
