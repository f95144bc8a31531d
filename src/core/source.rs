//! Choice between the cached snapshot and a live pull.
//!
//! A cached snapshot is trusted only as a whole: a missing, unreadable or
//! version-mismatched slot falls back to a live pull with a warning.

use crate::core::assembler::{Assembler, Backoff};
use crate::core::cache::{load_catalog, CacheSlot};
use crate::core::catalog::CatalogResponse;
use crate::core::diagnostics::Diagnostics;
use crate::core::error::{Result, StarlistError};
use crate::core::upstream::StarsClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Pull from the GitHub API.
    #[default]
    Api,
    /// Prefer the snapshot in the cache slot.
    File,
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Api => write!(f, "api"),
            CatalogSource::File => write!(f, "file"),
        }
    }
}

impl FromStr for CatalogSource {
    type Err = StarlistError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "api" => Ok(CatalogSource::Api),
            "file" => Ok(CatalogSource::File),
            other => Err(StarlistError::config_error(format!(
                "stars source must be either api or file, got '{other}'"
            ))),
        }
    }
}

/// Where the returned catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Cache,
    Live,
}

/// Load the catalog from `source`.
///
/// `assembler` is only invoked for a live pull; it receives the slot so a
/// successful pull replaces the snapshot.
pub fn select_catalog<C, B, S>(
    source: CatalogSource,
    slot: &mut S,
    assembler: impl FnOnce() -> Result<Assembler<C, B>>,
    diagnostics: &mut Diagnostics,
) -> Result<(CatalogResponse, Origin)>
where
    C: StarsClient,
    B: Backoff,
    S: CacheSlot + ?Sized,
{
    if source == CatalogSource::File {
        match load_catalog(slot) {
            Ok(catalog) => {
                log::info!(
                    "Loaded {} stars for {} from {}",
                    catalog.stars.len(),
                    catalog.login,
                    slot.name()
                );
                return Ok((catalog, Origin::Cache));
            }
            Err(rejection) => diagnostics.warn(format!(
                "stars source is file, but {rejection}; falling back to api"
            )),
        }
    }

    let catalog = assembler()?.assemble(slot, diagnostics)?;
    Ok((catalog, Origin::Live))
}
