//! Predicates for CLI output and rendered documents

#![allow(dead_code)]

use predicates::prelude::*;

pub fn cache_error() -> impl Predicate<str> {
    predicates::str::contains("Cache file does not exist")
        .or(predicates::str::contains("cannot be used"))
}

pub fn missing_token() -> impl Predicate<str> {
    predicates::str::contains("A GitHub token is required")
}

pub fn fallback_warning() -> impl Predicate<str> {
    predicates::str::contains("falling back to api")
}

/// A `### <name>` section heading in the rendered document.
pub fn has_section(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("### {name}\n"))
}

pub fn links_repo(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("(https://github.com/{name})"))
}
