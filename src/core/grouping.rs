//! Language and topic indexes over the display records.
//!
//! Groups borrow the records; membership order follows input order and key lists
//! are sorted by name (byte order). When two records carry the same topic name
//! with different URLs, the URL of the last record wins.

use crate::core::catalog::DisplayRecord;
use crate::core::normalize::Topic;
use serde::Serialize;
use std::collections::BTreeMap;

/// Key for records that carry no topics.
pub const NO_TOPICS: &str = "no-topics";

/// URL used for the [`NO_TOPICS`] group.
pub const NO_TOPICS_URL: &str = "#";

pub type LanguageGroups<'a> = BTreeMap<String, Vec<&'a DisplayRecord>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicGroup<'a> {
    pub url: String,
    pub entries: Vec<&'a DisplayRecord>,
}

pub type TopicGroups<'a> = BTreeMap<String, TopicGroup<'a>>;

/// Group by the first-ranked language of each record.
pub fn group_by_first_language(stars: &[DisplayRecord]) -> LanguageGroups<'_> {
    let mut groups = LanguageGroups::new();
    for repo in stars {
        groups
            .entry(repo.primary_language().to_string())
            .or_default()
            .push(repo);
    }
    groups
}

/// Group under every language a record carries.
pub fn group_by_all_languages(stars: &[DisplayRecord]) -> LanguageGroups<'_> {
    let mut groups = LanguageGroups::new();
    for repo in stars {
        for language in &repo.languages {
            groups.entry(language.name.clone()).or_default().push(repo);
        }
    }
    groups
}

pub fn group_by_topics(stars: &[DisplayRecord]) -> TopicGroups<'_> {
    let mut groups = TopicGroups::new();
    for repo in stars {
        match &repo.topics {
            None => groups
                .entry(NO_TOPICS.to_string())
                .or_insert_with(|| TopicGroup {
                    url: NO_TOPICS_URL.to_string(),
                    entries: Vec::new(),
                })
                .entries
                .push(repo),
            Some(topics) => {
                for Topic { name, url } in topics {
                    let group = groups.entry(name.clone()).or_insert_with(|| TopicGroup {
                        url: url.clone(),
                        entries: Vec::new(),
                    });
                    group.url = url.clone();
                    group.entries.push(repo);
                }
            }
        }
    }
    groups
}

/// Sorted distinct language names of the groups.
pub fn language_names(groups: &LanguageGroups<'_>) -> Vec<String> {
    let mut names: Vec<String> = groups.keys().cloned().collect();
    names.sort();
    names
}

/// Sorted `{name, url}` list of the topic groups, including [`NO_TOPICS`] if present.
pub fn topic_list(groups: &TopicGroups<'_>) -> Vec<Topic> {
    let mut topics: Vec<Topic> = groups
        .iter()
        .map(|(name, group)| Topic {
            name: name.clone(),
            url: group.url.clone(),
        })
        .collect();
    topics.sort_by(|a, b| a.name.cmp(&b.name));
    topics
}

/// Every index the renderer consumes, borrowing the display records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Groups<'a> {
    pub by_language: LanguageGroups<'a>,
    pub by_all_languages: LanguageGroups<'a>,
    pub by_topic: TopicGroups<'a>,
    pub languages: Vec<String>,
    pub topics: Vec<Topic>,
}

impl<'a> Groups<'a> {
    pub fn build(stars: &'a [DisplayRecord]) -> Self {
        let by_language = group_by_first_language(stars);
        let by_topic = group_by_topics(stars);
        let languages = language_names(&by_language);
        let topics = topic_list(&by_topic);

        Self {
            by_language,
            by_all_languages: group_by_all_languages(stars),
            by_topic,
            languages,
            topics,
        }
    }
}
