//! Markdown post-processing: table of contents generation.
//!
//! The list under the first heading named `Contents`, `Table of Contents` or
//! `TOC` is replaced with links to every later heading of the same or greater
//! depth, using GitHub anchor slugs. Documents without such a heading are returned unchanged.

use std::collections::HashMap;
use std::fmt::Write;

struct Heading {
    depth: usize,
    text: String,
    line: usize,
}

pub fn generate(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    let headings = collect_headings(&lines);

    let Some(toc_index) = headings.iter().position(|h| is_toc_heading(&h.text)) else {
        return doc.to_string();
    };
    let toc = &headings[toc_index];

    // Existing content under the contents heading is replaced up to the next heading.
    let section_end = headings
        .get(toc_index + 1)
        .map(|h| h.line)
        .unwrap_or(lines.len());

    let mut slugger = Slugger::default();
    let mut entries = Vec::new();
    for heading in &headings {
        let slug = slugger.slug(&heading.text);
        if heading.line > toc.line && heading.depth >= toc.depth {
            entries.push((heading.depth, heading.text.as_str(), slug));
        }
    }

    if entries.is_empty() {
        return doc.to_string();
    }

    let min_depth = entries.iter().map(|(depth, _, _)| *depth).min().unwrap_or(toc.depth + 1);

    let mut output = String::with_capacity(doc.len() + entries.len() * 32);
    for line in &lines[..=toc.line] {
        output.push_str(line);
        output.push('\n');
    }
    output.push('\n');
    for (depth, text, slug) in &entries {
        let indent = "  ".repeat(depth - min_depth);
        let _ = writeln!(output, "{indent}- [{text}](#{slug})");
    }
    if section_end < lines.len() {
        output.push('\n');
        for line in &lines[section_end..] {
            output.push_str(line);
            output.push('\n');
        }
    }

    output
}

fn collect_headings(lines: &[&str]) -> Vec<Heading> {
    let mut headings = Vec::new();
    let mut in_fence = false;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || line.starts_with("    ") {
            continue;
        }

        let depth = trimmed.chars().take_while(|c| *c == '#').count();
        if depth == 0 || depth > 6 {
            continue;
        }
        let rest = &trimmed[depth..];
        if !rest.is_empty() && !rest.starts_with(' ') {
            continue;
        }

        let text = rest.trim().trim_end_matches('#').trim().to_string();
        if !text.is_empty() {
            headings.push(Heading {
                depth,
                text,
                line: index,
            });
        }
    }

    headings
}

fn is_toc_heading(text: &str) -> bool {
    matches!(
        text.to_lowercase().as_str(),
        "contents" | "table of contents" | "toc"
    )
}

/// GitHub-compatible heading anchors, deduplicated with numeric suffixes.
#[derive(Default)]
struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    fn slug(&mut self, text: &str) -> String {
        let base: String = text
            .to_lowercase()
            .chars()
            .filter_map(|c| match c {
                ' ' => Some('-'),
                '-' | '_' => Some(c),
                c if c.is_alphanumeric() => Some(c),
                _ => None,
            })
            .collect();

        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_contents_heading_unchanged() {
        let doc = "# Title\n\n## One\n";
        assert_eq!(generate(doc), doc);
    }

    #[test]
    fn test_builds_nested_list() {
        let doc = "# Stars\n\n## Contents\n\n## Languages\n\n### C++\n\n### Rust\n\n## Topics\n";
        let result = generate(doc);

        assert!(result.contains("- [Languages](#languages)\n"));
        assert!(result.contains("  - [C++](#c)\n"));
        assert!(result.contains("  - [Rust](#rust)\n"));
        assert!(result.contains("- [Topics](#topics)\n"));
        assert!(result.ends_with("## Topics\n"));
    }

    #[test]
    fn test_replaces_existing_list() {
        let doc = "## Table of Contents\n\n- [Stale](#stale)\n\n## Fresh\n";
        let result = generate(doc);
        assert!(!result.contains("Stale"));
        assert!(result.contains("- [Fresh](#fresh)"));
    }

    #[test]
    fn test_duplicate_slugs_numbered() {
        let doc = "## Contents\n\n### Go\n\n### Go\n";
        let result = generate(doc);
        assert!(result.contains("[Go](#go)"));
        assert!(result.contains("[Go](#go-1)"));
    }

    #[test]
    fn test_headings_in_code_fences_ignored() {
        let doc = "## Contents\n\n```\n## Not a heading\n```\n\n## Real\n";
        let result = generate(doc);
        assert!(!result.contains("[Not a heading]"));
        assert!(result.contains("[Real](#real)"));
    }

    #[test]
    fn test_slugs() {
        let mut slugger = Slugger::default();
        assert_eq!(slugger.slug("Jupyter Notebook"), "jupyter-notebook");
        assert_eq!(slugger.slug("no-topics"), "no-topics");
        assert_eq!(slugger.slug("Emacs Lisp!"), "emacs-lisp");
    }
}
