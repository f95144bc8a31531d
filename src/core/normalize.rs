//! Flattening of upstream repository edges into [`RawRecord`]s.
//!
//! The record keeps instants unformatted so the cached snapshot is independent of
//! any display configuration. Missing upstream fields always resolve to a default,
//! never to an error.

use crate::core::upstream::{
    LanguageConnection, LicenseInfo, ReleaseNode, RepositoryTopicConnection,
    StarredRepositoryEdge,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Language used when the upstream repository reports no language data.
pub const UNCLASSIFIED_LANGUAGE: &str = "Unclassified";

pub const UNKNOWN_LICENSE: &str = "Unknown license";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub percent: u32,
}

impl Language {
    pub fn unclassified() -> Self {
        Self {
            name: UNCLASSIFIED_LANGUAGE.to_string(),
            percent: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRelease {
    pub name: String,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub archived_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub forks: u64,
    pub homepage_url: Option<String>,
    pub is_fork: bool,
    pub is_template: bool,
    pub language_count: u32,
    pub languages: Vec<Language>,
    pub latest_release: Option<RawRelease>,
    pub license: String,
    pub name: String,
    pub parent_repo: Option<String>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub starred_at: DateTime<Utc>,
    pub stars: u64,
    pub topic_count: u32,
    pub topics: Option<Vec<Topic>>,
    pub url: String,
}

impl RawRecord {
    /// The first-ranked language, used as the grouping key.
    pub fn primary_language(&self) -> &str {
        self.languages
            .first()
            .map(|language| language.name.as_str())
            .unwrap_or(UNCLASSIFIED_LANGUAGE)
    }
}

/// Convert one starred edge into a flat record.
///
/// Private repositories must be filtered out by the caller before this point.
pub fn normalize_edge(edge: &StarredRepositoryEdge) -> RawRecord {
    let node = &edge.node;
    let (language_count, languages) = normalize_languages(node.languages.as_ref());
    let (topic_count, topics) = normalize_topics(node.repository_topics.as_ref());

    RawRecord {
        archived_at: node.archived_at,
        description: non_empty(node.description.as_deref()),
        forks: node.fork_count,
        homepage_url: non_empty(node.homepage_url.as_deref()),
        is_fork: node.is_fork,
        is_template: node.is_template,
        language_count,
        languages,
        latest_release: normalize_release(node.latest_release.as_ref()),
        license: resolve_license(node.license_info.as_ref()),
        name: node.name_with_owner.clone(),
        parent_repo: node
            .parent
            .as_ref()
            .and_then(|parent| non_empty(Some(&parent.name_with_owner))),
        pushed_at: node.pushed_at,
        starred_at: edge.starred_at,
        stars: node.stargazer_count,
        topic_count,
        topics,
        url: node.url.clone(),
    }
}

/// Nickname, then SPDX id, then a fixed fallback.
pub fn resolve_license(info: Option<&LicenseInfo>) -> String {
    info.and_then(|info| {
        non_empty(info.nickname.as_deref()).or_else(|| non_empty(info.spdx_id.as_deref()))
    })
    .unwrap_or_else(|| UNKNOWN_LICENSE.to_string())
}

/// Language shares in upstream order, or the single unclassified entry.
pub fn normalize_languages(connection: Option<&LanguageConnection>) -> (u32, Vec<Language>) {
    let Some(connection) = connection else {
        return (1, vec![Language::unclassified()]);
    };

    let edges: Vec<_> = connection
        .edges
        .iter()
        .flatten()
        .flatten()
        .collect();

    if edges.is_empty() || connection.total_count == 0 || connection.total_size == 0 {
        return (1, vec![Language::unclassified()]);
    }

    let total_size = connection.total_size as f64;
    let languages = edges
        .into_iter()
        .map(|edge| Language {
            name: edge.node.name.clone(),
            percent: (edge.size as f64 / total_size * 100.0).round() as u32,
        })
        .collect();

    (connection.total_count, languages)
}

/// Topics in upstream order; `None` when there is nothing to group by.
pub fn normalize_topics(connection: Option<&RepositoryTopicConnection>) -> (u32, Option<Vec<Topic>>) {
    let Some(connection) = connection else {
        return (0, None);
    };

    let topics: Vec<Topic> = connection
        .nodes
        .iter()
        .flatten()
        .flatten()
        .map(|node| Topic {
            name: node.topic.name.clone(),
            url: node.url.clone(),
        })
        .collect();

    if topics.is_empty() {
        (0, None)
    } else {
        (connection.total_count, Some(topics))
    }
}

fn normalize_release(release: Option<&ReleaseNode>) -> Option<RawRelease> {
    let release = release?;
    let name = non_empty(release.name.as_deref())?;
    Some(RawRelease {
        name,
        published_at: release.published_at,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::upstream::{LanguageEdge, NamedNode, RepositoryNode, RepositoryTopic};

    fn edge(node: RepositoryNode) -> StarredRepositoryEdge {
        StarredRepositoryEdge {
            node,
            starred_at: "2024-03-01T10:20:30Z".parse().unwrap(),
        }
    }

    fn language_edge(name: &str, size: u64) -> Option<LanguageEdge> {
        Some(LanguageEdge {
            node: NamedNode {
                name: name.to_string(),
            },
            size,
        })
    }

    #[test]
    fn test_missing_languages_become_unclassified() {
        let cases = [
            None,
            Some(LanguageConnection::default()),
            Some(LanguageConnection {
                edges: Some(vec![]),
                total_count: 0,
                total_size: 0,
            }),
            Some(LanguageConnection {
                edges: Some(vec![language_edge("Rust", 0)]),
                total_count: 1,
                total_size: 0,
            }),
        ];

        for connection in cases {
            let (count, languages) = normalize_languages(connection.as_ref());
            assert_eq!(count, 1);
            assert_eq!(languages, vec![Language::unclassified()]);
        }
    }

    #[test]
    fn test_language_percentages_preserve_rank() {
        let connection = LanguageConnection {
            edges: Some(vec![
                language_edge("Rust", 6670),
                None,
                language_edge("Shell", 3330),
            ]),
            total_count: 7,
            total_size: 10000,
        };

        let (count, languages) = normalize_languages(Some(&connection));
        assert_eq!(count, 7);
        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].name, "Rust");
        assert_eq!(languages[0].percent, 67);
        assert_eq!(languages[1].percent, 33);
    }

    #[test]
    fn test_license_fallback_chain() {
        let nickname = LicenseInfo {
            nickname: Some("GNU GPLv3".to_string()),
            spdx_id: Some("GPL-3.0".to_string()),
        };
        let spdx = LicenseInfo {
            nickname: None,
            spdx_id: Some("MIT".to_string()),
        };

        assert_eq!(resolve_license(Some(&nickname)), "GNU GPLv3");
        assert_eq!(resolve_license(Some(&spdx)), "MIT");
        assert_eq!(resolve_license(Some(&LicenseInfo::default())), UNKNOWN_LICENSE);
        assert_eq!(resolve_license(None), UNKNOWN_LICENSE);
    }

    #[test]
    fn test_topics_absent_or_empty_are_none() {
        assert_eq!(normalize_topics(None), (0, None));

        let empty = RepositoryTopicConnection {
            total_count: 0,
            nodes: Some(vec![]),
        };
        assert_eq!(normalize_topics(Some(&empty)), (0, None));

        let no_nodes = RepositoryTopicConnection {
            total_count: 0,
            nodes: None,
        };
        assert_eq!(normalize_topics(Some(&no_nodes)), (0, None));
    }

    #[test]
    fn test_topics_carry_urls() {
        let connection = RepositoryTopicConnection {
            total_count: 1,
            nodes: Some(vec![Some(RepositoryTopic {
                topic: NamedNode {
                    name: "cli".to_string(),
                },
                url: "/t/cli".to_string(),
            })]),
        };

        let (count, topics) = normalize_topics(Some(&connection));
        assert_eq!(count, 1);
        assert_eq!(
            topics,
            Some(vec![Topic {
                name: "cli".to_string(),
                url: "/t/cli".to_string()
            }])
        );
    }

    #[test]
    fn test_release_requires_name() {
        let unnamed = ReleaseNode {
            name: Some(String::new()),
            published_at: None,
        };
        assert_eq!(normalize_release(Some(&unnamed)), None);
        assert_eq!(normalize_release(None), None);

        let named = ReleaseNode {
            name: Some("v1.0.0".to_string()),
            published_at: Some("2024-01-01T00:00:00Z".parse().unwrap()),
        };
        assert_eq!(normalize_release(Some(&named)).unwrap().name, "v1.0.0");
    }

    #[test]
    fn test_normalize_edge_defaults() {
        let record = normalize_edge(&edge(RepositoryNode {
            url: "https://github.com/octo/tool".to_string(),
            name_with_owner: "octo/tool".to_string(),
            homepage_url: Some(String::new()),
            fork_count: 2,
            stargazer_count: 10,
            ..Default::default()
        }));

        assert_eq!(record.name, "octo/tool");
        assert_eq!(record.homepage_url, None);
        assert_eq!(record.description, None);
        assert_eq!(record.archived_at, None);
        assert_eq!(record.parent_repo, None);
        assert_eq!(record.license, UNKNOWN_LICENSE);
        assert_eq!(record.primary_language(), UNCLASSIFIED_LANGUAGE);
        assert_eq!(record.topics, None);
        assert_eq!(record.forks, 2);
        assert_eq!(record.stars, 10);
    }

    #[test]
    fn test_real_language_named_unclassified_is_indistinguishable() {
        // A real language with the sentinel name groups together with missing data.
        let connection = LanguageConnection {
            edges: Some(vec![language_edge(UNCLASSIFIED_LANGUAGE, 10)]),
            total_count: 1,
            total_size: 10,
        };
        let (_, languages) = normalize_languages(Some(&connection));
        assert_eq!(languages, vec![Language::unclassified()]);
    }
}
