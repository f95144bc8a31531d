//! Everything a renderer receives for one document.

use crate::core::catalog::{CatalogResponse, DisplayRecord};
use crate::core::grouping::Groups;
use crate::core::source::Origin;
use crate::core::timestamp::{timestamp, DateTimeConfig, Timestamp};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub login: &'a str,
    pub total: u64,
    pub truncated: bool,
    pub updated_at: Timestamp,
    pub stars: &'a [DisplayRecord],
    #[serde(flatten)]
    pub groups: Groups<'a>,
    #[serde(skip)]
    pub origin: Origin,
}

impl<'a> Report<'a> {
    pub fn build(
        catalog: &'a CatalogResponse,
        stars: &'a [DisplayRecord],
        config: &DateTimeConfig,
        origin: Origin,
    ) -> Self {
        Self {
            login: &catalog.login,
            total: catalog.total,
            truncated: catalog.truncated,
            updated_at: timestamp(config, Some(&catalog.updated_at)),
            stars,
            groups: Groups::build(stars),
            origin,
        }
    }

    pub fn origin_label(&self) -> &'static str {
        match self.origin {
            Origin::Cache => "the cached data file",
            Origin::Live => "the GitHub API",
        }
    }
}
