//! Line templates and the built-in Markdown renderer.
//!
//! Output is assembled from fixed `{placeholder}` line templates rendered in a
//! single pass. Unknown placeholders are kept verbatim so a typo shows up in the
//! document instead of silently disappearing.
//!
//! # Public API
//! - [`Templates`]: Template definitions for every document section
//! - [`TEMPLATES`]: Global template instance
//! - [`TemplateContext`]: Placeholder values for one line
//! - [`render_template`]: Single-pass placeholder substitution
//! - [`Renderer`] / [`MarkdownRenderer`]: turn a [`Report`] into a document

use crate::core::catalog::DisplayRecord;
use crate::core::error::Result;
use crate::core::grouping::NO_TOPICS;
use crate::core::report::Report;
use std::borrow::Cow;
use std::fmt::Write;

/// Template definitions for all document lines
pub struct Templates {
    pub header: &'static str,
    pub summary: &'static str,
    pub truncated_note: &'static str,
    pub contents_heading: &'static str,
    pub languages_heading: &'static str,
    pub language_section: &'static str,
    pub topics_heading: &'static str,
    pub topic_section: &'static str,
    pub topic_link: &'static str,
    pub no_topics_section: &'static str,
    pub repo_line: &'static str,
    pub repo_detail: &'static str,
    pub release_detail: &'static str,
    pub footer: &'static str,
}

/// Global templates instance
pub static TEMPLATES: Templates = Templates {
    header: "# Starred repositories of {login}",
    summary: "{count} of {total} starred repositories, updated {date} at {time}.",
    truncated_note: "> The star list reported by GitHub is truncated.",
    contents_heading: "## Contents",
    languages_heading: "## Languages",
    language_section: "### {name}",
    topics_heading: "## Topics",
    topic_section: "### {name}",
    topic_link: "[{name} on GitHub]({url})",
    no_topics_section: "### Without topics",
    repo_line: "- [{name}]({url}){markers}{description}",
    repo_detail: "  - {stars} stars, {forks} forks, {license}, {languages}, starred {date}",
    release_detail: "  - Latest release {release}{published}",
    footer: "Generated by starlist from {source}.",
};

/// Placeholder values for one template line
#[derive(Debug, Default)]
pub struct TemplateContext<'a> {
    values: Vec<(&'static str, Cow<'a, str>)>,
}

impl<'a> TemplateContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        self.values.push((key, value.into()));
        self
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_ref())
    }
}

/// Render a template with context
pub fn render_template(template: &str, context: &TemplateContext) -> String {
    let estimated_capacity = template.len()
        + context.values.iter().map(|(_, v)| v.len()).sum::<usize>();
    let mut output = String::with_capacity(estimated_capacity);
    let mut chars = template.chars();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            output.push(ch);
            continue;
        }

        let mut placeholder = String::new();
        let mut found_closing = false;

        for next_ch in chars.by_ref() {
            if next_ch == '}' {
                found_closing = true;
                break;
            }
            placeholder.push(next_ch);
        }

        match (found_closing, context.get(&placeholder)) {
            (true, Some(value)) => output.push_str(value),
            (true, None) => {
                output.push('{');
                output.push_str(&placeholder);
                output.push('}');
            }
            // No closing brace found, treat as literal
            (false, _) => {
                output.push(ch);
                output.push_str(&placeholder);
            }
        }
    }

    output
}

/// Turns the grouped report into document text.
pub trait Renderer {
    fn render(&self, report: &Report<'_>) -> Result<String>;
}

/// Built-in Markdown layout: repositories grouped by primary language, then by topic.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render(&self, report: &Report<'_>) -> Result<String> {
        let mut doc = String::new();
        let count = report.stars.len().to_string();
        let total = report.total.to_string();

        push_line(
            &mut doc,
            render_template(
                TEMPLATES.header,
                &TemplateContext::new().with("login", report.login),
            ),
        );
        doc.push('\n');
        push_line(
            &mut doc,
            render_template(
                TEMPLATES.summary,
                &TemplateContext::new()
                    .with("count", count.as_str())
                    .with("total", total.as_str())
                    .with("date", report.updated_at.date.as_str())
                    .with("time", report.updated_at.time.as_str()),
            ),
        );
        if report.truncated {
            doc.push('\n');
            push_line(&mut doc, TEMPLATES.truncated_note.to_string());
        }

        doc.push('\n');
        push_line(&mut doc, TEMPLATES.contents_heading.to_string());
        doc.push('\n');

        push_line(&mut doc, TEMPLATES.languages_heading.to_string());
        for language in &report.groups.languages {
            doc.push('\n');
            push_line(
                &mut doc,
                render_template(
                    TEMPLATES.language_section,
                    &TemplateContext::new().with("name", language.as_str()),
                ),
            );
            doc.push('\n');
            for repo in &report.groups.by_language[language] {
                write_repo(&mut doc, repo);
            }
        }

        doc.push('\n');
        push_line(&mut doc, TEMPLATES.topics_heading.to_string());
        for topic in &report.groups.topics {
            doc.push('\n');
            if topic.name == NO_TOPICS {
                push_line(&mut doc, TEMPLATES.no_topics_section.to_string());
            } else {
                let context = TemplateContext::new()
                    .with("name", topic.name.as_str())
                    .with("url", topic.url.as_str());
                push_line(&mut doc, render_template(TEMPLATES.topic_section, &context));
                doc.push('\n');
                push_line(&mut doc, render_template(TEMPLATES.topic_link, &context));
            }
            doc.push('\n');
            for repo in &report.groups.by_topic[&topic.name].entries {
                write_repo(&mut doc, repo);
            }
        }

        doc.push('\n');
        push_line(
            &mut doc,
            render_template(
                TEMPLATES.footer,
                &TemplateContext::new().with("source", report.origin_label()),
            ),
        );

        Ok(doc)
    }
}

fn push_line(doc: &mut String, line: String) {
    doc.push_str(line.trim_end());
    doc.push('\n');
}

fn write_repo(doc: &mut String, repo: &DisplayRecord) {
    let mut markers = String::new();
    if repo.archived_on.is_some() {
        markers.push_str(" (archived)");
    }
    if repo.is_template {
        markers.push_str(" (template)");
    }
    if let Some(parent) = &repo.parent_repo {
        let _ = write!(markers, " (fork of {parent})");
    } else if repo.is_fork {
        markers.push_str(" (fork)");
    }

    let description = repo
        .description
        .as_deref()
        .map(|d| format!(": {}", d.trim()))
        .unwrap_or_default();

    let languages = repo
        .languages
        .iter()
        .map(|language| format!("{} {}%", language.name, language.percent))
        .collect::<Vec<_>>()
        .join(" / ");

    push_line(
        doc,
        render_template(
            TEMPLATES.repo_line,
            &TemplateContext::new()
                .with("name", repo.name.as_str())
                .with("url", repo.url.as_str())
                .with("markers", markers)
                .with("description", description),
        ),
    );
    push_line(
        doc,
        render_template(
            TEMPLATES.repo_detail,
            &TemplateContext::new()
                .with("stars", repo.stars.to_string())
                .with("forks", repo.forks.to_string())
                .with("license", repo.license.as_str())
                .with("languages", languages)
                .with("date", repo.starred_on.date.as_str()),
        ),
    );

    if let Some(release) = &repo.latest_release {
        let published = release
            .published_on
            .as_ref()
            .map(|ts| format!(" on {}", ts.date))
            .unwrap_or_default();
        push_line(
            doc,
            render_template(
                TEMPLATES.release_detail,
                &TemplateContext::new()
                    .with("release", release.name.as_str())
                    .with("published", published),
            ),
        );
    }
}
