//! The cached star snapshot and its display-ready projection.

use crate::core::normalize::{Language, RawRecord, Topic};
use crate::core::timestamp::{timestamp, DateTimeConfig, Timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version of [`CatalogResponse`]; bump when [`RawRecord`] changes shape.
pub const DATA_VERSION: u32 = 2;

/// One complete pull of the viewer's stars, as persisted in the cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub data_version: u32,
    pub login: String,
    /// Aggregate reported upstream; includes private stars that were skipped.
    pub total: u64,
    pub truncated: bool,
    pub updated_at: DateTime<Utc>,
    pub stars: Vec<RawRecord>,
}

impl CatalogResponse {
    pub fn is_current(&self) -> bool {
        self.data_version == DATA_VERSION
    }

    /// Project every record for display. No record is dropped.
    pub fn display_records(&self, config: &DateTimeConfig) -> Vec<DisplayRecord> {
        self.stars
            .iter()
            .map(|record| DisplayRecord::from_raw(record, config))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub name: String,
    pub published_on: Option<Timestamp>,
}

/// A [`RawRecord`] with every instant formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub archived_on: Option<Timestamp>,
    pub description: Option<String>,
    pub forks: u64,
    pub homepage_url: Option<String>,
    pub is_fork: bool,
    pub is_template: bool,
    pub language_count: u32,
    pub languages: Vec<Language>,
    pub latest_release: Option<Release>,
    pub license: String,
    pub name: String,
    pub parent_repo: Option<String>,
    pub pushed_on: Option<Timestamp>,
    pub starred_on: Timestamp,
    pub stars: u64,
    pub topic_count: u32,
    pub topics: Option<Vec<Topic>>,
    pub url: String,
}

impl DisplayRecord {
    pub fn from_raw(record: &RawRecord, config: &DateTimeConfig) -> Self {
        let format = |instant: &DateTime<Utc>| timestamp(config, Some(instant));

        Self {
            archived_on: record.archived_at.as_ref().map(format),
            description: record.description.clone(),
            forks: record.forks,
            homepage_url: record.homepage_url.clone(),
            is_fork: record.is_fork,
            is_template: record.is_template,
            language_count: record.language_count,
            languages: record.languages.clone(),
            latest_release: record.latest_release.as_ref().map(|release| Release {
                name: release.name.clone(),
                published_on: release.published_at.as_ref().map(format),
            }),
            license: record.license.clone(),
            name: record.name.clone(),
            parent_repo: record.parent_repo.clone(),
            pushed_on: record.pushed_at.as_ref().map(format),
            starred_on: format(&record.starred_at),
            stars: record.stars,
            topic_count: record.topic_count,
            topics: record.topics.clone(),
            url: record.url.clone(),
        }
    }

    pub fn primary_language(&self) -> &str {
        self.languages
            .first()
            .map(|language| language.name.as_str())
            .unwrap_or(crate::core::normalize::UNCLASSIFIED_LANGUAGE)
    }
}
