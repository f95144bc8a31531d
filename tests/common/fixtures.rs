//! Scripted upstream pages and catalog snapshots
//!
//! [`FakeClient`] replays a queue of page results and records every cursor it
//! was asked for; [`RecordingBackoff`] records delays instead of sleeping.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use starlist::core::assembler::{Backoff, RateLimitKind};
use starlist::core::catalog::{CatalogResponse, DATA_VERSION};
use starlist::core::error::{Result, StarlistError};
use starlist::core::normalize::{Language, RawRecord, Topic};
use starlist::core::upstream::{
    LanguageConnection, LanguageEdge, NamedNode, PageInfo, RepositoryNode, RepositoryTopic,
    RepositoryTopicConnection, StarredRepositoryConnection, StarredRepositoryEdge, StarsClient,
    Viewer, ViewerPage,
};
use std::collections::VecDeque;
use std::time::Duration;

pub const LOGIN: &str = "octocat";

#[derive(Default)]
pub struct FakeClient {
    responses: VecDeque<Result<ViewerPage>>,
    pub cursors: Vec<Option<String>>,
}

impl FakeClient {
    pub fn new(responses: Vec<Result<ViewerPage>>) -> Self {
        Self {
            responses: responses.into(),
            cursors: Vec::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.cursors.len()
    }
}

impl StarsClient for FakeClient {
    fn fetch_page(&mut self, cursor: Option<&str>) -> Result<ViewerPage> {
        self.cursors.push(cursor.map(str::to_string));
        self.responses
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted response for call {}", self.cursors.len()))
    }
}

#[derive(Default)]
pub struct RecordingBackoff {
    pub delays: Vec<Duration>,
}

impl Backoff for RecordingBackoff {
    fn wait(&mut self, delay: Duration) {
        self.delays.push(delay);
    }
}

pub fn primary_limit() -> Result<ViewerPage> {
    Err(StarlistError::rate_limited(
        RateLimitKind::Primary,
        Duration::from_secs(5),
    ))
}

pub fn secondary_limit() -> Result<ViewerPage> {
    Err(StarlistError::rate_limited(
        RateLimitKind::Secondary,
        Duration::from_secs(60),
    ))
}

pub fn instant(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 10, 20, 30).unwrap()
}

/// A public repository with one language and the given topics.
pub fn repo(name: &str, language: &str, topics: &[&str]) -> RepositoryNode {
    RepositoryNode {
        url: format!("https://github.com/{name}"),
        name_with_owner: name.to_string(),
        description: Some(format!("{name} description")),
        stargazer_count: 10,
        languages: Some(LanguageConnection {
            edges: Some(vec![Some(LanguageEdge {
                node: NamedNode {
                    name: language.to_string(),
                },
                size: 100,
            })]),
            total_count: 1,
            total_size: 100,
        }),
        repository_topics: Some(RepositoryTopicConnection {
            total_count: topics.len() as u32,
            nodes: Some(
                topics
                    .iter()
                    .map(|topic| {
                        Some(RepositoryTopic {
                            topic: NamedNode {
                                name: topic.to_string(),
                            },
                            url: format!("https://github.com/topics/{topic}"),
                        })
                    })
                    .collect(),
            ),
        }),
        ..Default::default()
    }
}

pub fn private_repo(name: &str) -> RepositoryNode {
    RepositoryNode {
        is_private: true,
        ..repo(name, "Rust", &[])
    }
}

pub fn edge(node: RepositoryNode) -> StarredRepositoryEdge {
    StarredRepositoryEdge {
        node,
        starred_at: instant(1),
    }
}

pub fn page(
    nodes: Vec<RepositoryNode>,
    total: u64,
    next_cursor: Option<&str>,
) -> Result<ViewerPage> {
    Ok(ViewerPage {
        viewer: Some(Viewer {
            login: LOGIN.to_string(),
            starred_repositories: Some(StarredRepositoryConnection {
                is_over_limit: false,
                total_count: total,
                page_info: PageInfo {
                    end_cursor: next_cursor.map(str::to_string),
                    has_next_page: next_cursor.is_some(),
                },
                edges: Some(nodes.into_iter().map(|node| Some(edge(node))).collect()),
            }),
        }),
    })
}

pub fn record(name: &str, languages: &[&str], topics: Option<&[&str]>) -> RawRecord {
    RawRecord {
        archived_at: None,
        description: None,
        forks: 0,
        homepage_url: None,
        is_fork: false,
        is_template: false,
        language_count: languages.len() as u32,
        languages: languages
            .iter()
            .map(|name| Language {
                name: name.to_string(),
                percent: 100 / languages.len() as u32,
            })
            .collect(),
        latest_release: None,
        license: "MIT".to_string(),
        name: name.to_string(),
        parent_repo: None,
        pushed_at: None,
        starred_at: instant(1),
        stars: 1,
        topic_count: topics.map_or(0, |t| t.len() as u32),
        topics: topics.map(|topics| {
            topics
                .iter()
                .map(|topic| Topic {
                    name: topic.to_string(),
                    url: format!("https://github.com/topics/{topic}"),
                })
                .collect()
        }),
        url: format!("https://github.com/{name}"),
    }
}

pub fn catalog(stars: Vec<RawRecord>) -> CatalogResponse {
    CatalogResponse {
        data_version: DATA_VERSION,
        login: LOGIN.to_string(),
        total: stars.len() as u64,
        truncated: false,
        updated_at: instant(2),
        stars,
    }
}

/// Two Rust tools and one topic-less Go library.
pub fn sample_catalog() -> CatalogResponse {
    catalog(vec![
        record("a/ripgrep", &["Rust"], Some(&["cli", "search"])),
        record("b/fd", &["Rust"], Some(&["cli"])),
        record("c/gorm", &["Go"], None),
    ])
}
