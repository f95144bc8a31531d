//! The single persisted snapshot location.
//!
//! A slot is whole-file only: it exists or not, is read in full and is written in
//! full. [`FileSlot`] is the production slot (`data.json` in the output root),
//! [`MemorySlot`] backs tests and dry runs.
//!
//! # Cache Strategy
//! - **JSON serialization**: human-readable snapshot that is committed alongside the report
//! - **Versioning**: the snapshot carries a data version checked on every read
//! - **No retention**: each successful pull overwrites the previous snapshot

use crate::core::catalog::{CatalogResponse, DATA_VERSION};
use crate::core::error::{Result, StarlistError};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default cache slot filename inside the output root.
pub const DEFAULT_CACHE_FILENAME: &str = "data.json";

pub trait CacheSlot {
    /// Name used in diagnostics.
    fn name(&self) -> String;
    fn exists(&self) -> bool;
    fn read(&self) -> Result<String>;
    fn write(&mut self, contents: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CacheSlot for FileSlot {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(StarlistError::cache_file_not_found(&self.path));
        }
        fs::read_to_string(&self.path).map_err(|e| StarlistError::cache_read_failed(&self.path, e))
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| StarlistError::cache_write_failed(&self.path, e))?;
        }
        log::debug!("Writing cache slot {}", self.path.display());
        fs::write(&self.path, contents).map_err(|e| StarlistError::cache_write_failed(&self.path, e))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Option<String>,
    writes: usize,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            writes: 0,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of writes since creation.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CacheSlot for MemorySlot {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn exists(&self) -> bool {
        self.contents.is_some()
    }

    fn read(&self) -> Result<String> {
        self.contents
            .clone()
            .ok_or_else(|| StarlistError::cache_file_not_found("memory"))
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Reads from `inner` until the first write; writes stay in memory.
#[derive(Debug, Clone)]
pub struct OverlaySlot<S> {
    inner: S,
    written: Option<String>,
}

impl<S: CacheSlot> OverlaySlot<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            written: None,
        }
    }

    pub fn written(&self) -> Option<&str> {
        self.written.as_deref()
    }
}

impl<S: CacheSlot> CacheSlot for OverlaySlot<S> {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn exists(&self) -> bool {
        self.written.is_some() || self.inner.exists()
    }

    fn read(&self) -> Result<String> {
        match &self.written {
            Some(contents) => Ok(contents.clone()),
            None => self.inner.read(),
        }
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        self.written = Some(contents.to_string());
        Ok(())
    }
}

/// Why a cached snapshot was not used.
#[derive(Debug)]
pub enum CacheRejection {
    Missing,
    Unreadable(StarlistError),
    Unparsable(StarlistError),
    VersionMismatch { found: Option<u32>, expected: u32 },
}

impl fmt::Display for CacheRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheRejection::Missing => write!(f, "the data file does not exist"),
            CacheRejection::Unreadable(e) => write!(f, "the data file could not be read ({e})"),
            CacheRejection::Unparsable(e) => write!(f, "the data file is not valid ({e})"),
            CacheRejection::VersionMismatch {
                found: Some(found),
                expected,
            } => write!(
                f,
                "the data file has version {found}, expected version {expected}"
            ),
            CacheRejection::VersionMismatch {
                found: None,
                expected,
            } => write!(
                f,
                "the data file has no version, expected version {expected}"
            ),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionProbe {
    data_version: Option<u32>,
}

/// Serialize a snapshot and overwrite the slot.
pub fn store_catalog<S: CacheSlot + ?Sized>(slot: &mut S, catalog: &CatalogResponse) -> Result<()> {
    let contents = serde_json::to_string_pretty(catalog)?;
    slot.write(&contents)
}

/// Read a snapshot, accepting it only if its data version is current.
///
/// The version is probed before the full parse so an old shape is reported as a
/// version mismatch rather than a parse failure.
pub fn load_catalog<S: CacheSlot + ?Sized>(
    slot: &S,
) -> std::result::Result<CatalogResponse, CacheRejection> {
    if !slot.exists() {
        return Err(CacheRejection::Missing);
    }

    let contents = slot.read().map_err(CacheRejection::Unreadable)?;

    let probe: VersionProbe = serde_json::from_str(&contents)
        .map_err(|e| CacheRejection::Unparsable(StarlistError::cache_parse_failed(slot.name(), e)))?;

    if probe.data_version != Some(DATA_VERSION) {
        return Err(CacheRejection::VersionMismatch {
            found: probe.data_version,
            expected: DATA_VERSION,
        });
    }

    serde_json::from_str(&contents)
        .map_err(|e| CacheRejection::Unparsable(StarlistError::cache_parse_failed(slot.name(), e)))
}
