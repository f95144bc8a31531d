use crate::core::{
    cache::{load_catalog, CacheRejection, CacheSlot, FileSlot},
    catalog::CatalogResponse,
    config::{Config, ConfigOverrides},
    diagnostics::Diagnostics,
    error::{Result, StarlistError},
    grouping::Groups,
    output::{print_diagnostics_summary, print_field, print_section_header},
    timestamp::{timestamp, DateTimeConfig},
};
use std::path::PathBuf;

/// What `inspect` reports about a cached snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub login: String,
    pub data_version: u32,
    pub stars: usize,
    pub total: u64,
    pub truncated: bool,
    pub updated_at: String,
    /// Primary languages by descending record count, ties by name.
    pub languages: Vec<(String, usize)>,
    pub topics: usize,
}

impl CatalogSummary {
    pub fn from_catalog(catalog: &CatalogResponse, config: &DateTimeConfig) -> Self {
        let stars = catalog.display_records(config);
        let groups = Groups::build(&stars);

        let mut languages: Vec<(String, usize)> = groups
            .by_language
            .iter()
            .map(|(name, entries)| (name.clone(), entries.len()))
            .collect();
        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let updated = timestamp(config, Some(&catalog.updated_at));

        Self {
            login: catalog.login.clone(),
            data_version: catalog.data_version,
            stars: stars.len(),
            total: catalog.total,
            truncated: catalog.truncated,
            updated_at: format!("{} {}", updated.date, updated.time),
            languages,
            topics: groups.topics.len(),
        }
    }
}

/// Load and summarize the snapshot in `slot`, refusing stale or missing data.
pub fn inspect_catalog<S: CacheSlot + ?Sized>(
    slot: &S,
    config: &DateTimeConfig,
) -> Result<CatalogSummary> {
    match load_catalog(slot) {
        Ok(catalog) => Ok(CatalogSummary::from_catalog(&catalog, config)),
        Err(CacheRejection::Missing) => Err(StarlistError::cache_file_not_found(slot.name())),
        Err(CacheRejection::Unreadable(e)) | Err(CacheRejection::Unparsable(e)) => Err(e),
        Err(rejection) => Err(StarlistError::cache_rejected(slot.name(), rejection)),
    }
}

pub fn execute_inspect(root: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let mut diagnostics = Diagnostics::new();
    let config = Config::resolve(
        ConfigOverrides {
            root,
            config_path,
            ..Default::default()
        },
        &mut diagnostics,
    )?;

    let slot = FileSlot::new(config.stars_path());
    let summary = inspect_catalog(&slot, &config.date_time)?;

    print_diagnostics_summary(&diagnostics);
    print_section_header(&format!("Stars cached in {}", slot.path().display()));
    print_field("Login", &summary.login);
    print_field("Data version", &summary.data_version.to_string());
    print_field(
        "Repositories",
        &format!("{} of {} starred", summary.stars, summary.total),
    );
    if summary.truncated {
        print_field("Truncated", "yes, upstream reported more stars than it returned");
    }
    print_field("Updated", &summary.updated_at);
    print_field("Topics", &summary.topics.to_string());

    print_section_header("Languages");
    for (name, count) in &summary.languages {
        print_field(name, &count.to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cache::MemorySlot;
    use crate::core::catalog::DATA_VERSION;

    #[test]
    fn test_missing_slot_is_not_found() {
        let slot = MemorySlot::new();
        let err = inspect_catalog(&slot, &DateTimeConfig::default()).unwrap_err();
        assert!(matches!(err, StarlistError::CacheFileNotFound { .. }));
    }

    #[test]
    fn test_old_version_is_rejected() {
        let slot = MemorySlot::with_contents(r#"{"dataVersion": 1, "stars": []}"#);
        let err = inspect_catalog(&slot, &DateTimeConfig::default()).unwrap_err();
        assert!(matches!(err, StarlistError::CacheRejected { .. }));
        assert!(err.to_string().contains(&format!("expected version {DATA_VERSION}")));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let slot = MemorySlot::with_contents("not json");
        let err = inspect_catalog(&slot, &DateTimeConfig::default()).unwrap_err();
        assert!(matches!(err, StarlistError::CacheParseFailed { .. }));
    }
}
