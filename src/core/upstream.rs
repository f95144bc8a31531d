//! Shapes of the GitHub GraphQL starred-repositories query and the client seam.
//!
//! Every field the API may omit or null out is an `Option` here; the normalizer
//! decides what each absence means.

use crate::core::error::Result;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page of the viewer query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerPage {
    pub viewer: Option<Viewer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewer {
    pub login: String,
    pub starred_repositories: Option<StarredRepositoryConnection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarredRepositoryConnection {
    #[serde(default)]
    pub is_over_limit: bool,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page_info: PageInfo,
    pub edges: Option<Vec<Option<StarredRepositoryEdge>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarredRepositoryEdge {
    pub node: RepositoryNode,
    pub starred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNode {
    pub archived_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    #[serde(default)]
    pub fork_count: u64,
    pub homepage_url: Option<String>,
    pub url: String,
    #[serde(default)]
    pub is_fork: bool,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub is_template: bool,
    pub languages: Option<LanguageConnection>,
    pub latest_release: Option<ReleaseNode>,
    pub license_info: Option<LicenseInfo>,
    pub name_with_owner: String,
    pub parent: Option<ParentRepository>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub repository_topics: Option<RepositoryTopicConnection>,
    #[serde(default)]
    pub stargazer_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConnection {
    pub edges: Option<Vec<Option<LanguageEdge>>>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub total_size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageEdge {
    pub node: NamedNode,
    pub size: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedNode {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNode {
    pub name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseInfo {
    pub nickname: Option<String>,
    pub spdx_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRepository {
    pub name_with_owner: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryTopicConnection {
    #[serde(default)]
    pub total_count: u32,
    pub nodes: Option<Vec<Option<RepositoryTopic>>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryTopic {
    pub topic: NamedNode,
    pub url: String,
}

/// Source of viewer pages, one cursor at a time.
///
/// Throttling is reported as [`StarlistError::RateLimited`](crate::core::error::StarlistError::RateLimited)
/// so the caller decides whether the same cursor is requested again.
pub trait StarsClient {
    fn fetch_page(&mut self, cursor: Option<&str>) -> Result<ViewerPage>;
}

impl<C: StarsClient + ?Sized> StarsClient for &mut C {
    fn fetch_page(&mut self, cursor: Option<&str>) -> Result<ViewerPage> {
        (**self).fetch_page(cursor)
    }
}
