//! Blocking GitHub GraphQL client for the viewer's starred repositories.
//!
//! The client only moves bytes and classifies throttling; retry decisions belong
//! to the [`Assembler`](crate::core::assembler::Assembler).

use crate::core::assembler::RateLimitKind;
use crate::core::error::{Result, StarlistError};
use crate::core::upstream::{StarsClient, ViewerPage};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, RETRY_AFTER, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Delay used for a secondary rate limit that carries no `retry-after` header.
pub const DEFAULT_SECONDARY_DELAY: Duration = Duration::from_secs(60);

pub const STARS_QUERY: &str = r#"query GetViewerStargazers($cursor: String) {
  viewer {
    login
    starredRepositories(first: 40, after: $cursor) {
      isOverLimit
      totalCount
      pageInfo { endCursor hasNextPage }
      edges {
        node {
          archivedAt
          description
          forkCount
          homepageUrl
          url
          isFork
          isPrivate
          isTemplate
          languages(first: 5, orderBy: { direction: DESC, field: SIZE }) {
            edges {
              node { name }
              size
            }
            totalCount
            totalSize
          }
          latestRelease { name publishedAt }
          licenseInfo { nickname spdxId }
          nameWithOwner
          parent { nameWithOwner }
          pushedAt
          repositoryTopics(first: 20) {
            totalCount
            nodes {
              topic { name }
              url
            }
          }
          stargazerCount
        }
        starredAt
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ViewerPage>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    #[serde(rename = "type")]
    kind: Option<String>,
    message: String,
}

pub struct GithubClient {
    http: Client,
    token: String,
    endpoint: String,
}

impl GithubClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http,
            token: token.into(),
            endpoint: GITHUB_GRAPHQL_URL.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl StarsClient for GithubClient {
    fn fetch_page(&mut self, cursor: Option<&str>) -> Result<ViewerPage> {
        log::debug!("POST {} (cursor: {:?})", self.endpoint, cursor);

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("bearer {}", self.token))
            .header(USER_AGENT, concat!("starlist/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .json(&json!({ "query": STARS_QUERY, "variables": { "cursor": cursor } }))
            .send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text()?;
        let now = chrono::Utc::now().timestamp();

        if let Some(kind) = classify_throttle(status, &headers, &body) {
            return Err(StarlistError::rate_limited(
                kind,
                retry_delay(kind, &headers, now),
            ));
        }

        if !status.is_success() {
            return Err(StarlistError::unexpected_status(
                status.as_u16(),
                body.chars().take(200).collect::<String>(),
            ));
        }

        let parsed: GraphqlResponse = serde_json::from_str(&body)?;

        if parsed
            .errors
            .iter()
            .any(|e| e.kind.as_deref() == Some("RATE_LIMITED"))
        {
            return Err(StarlistError::rate_limited(
                RateLimitKind::Primary,
                retry_delay(RateLimitKind::Primary, &headers, now),
            ));
        }

        if !parsed.errors.is_empty() {
            return Err(StarlistError::Graphql {
                messages: parsed.errors.into_iter().map(|e| e.message).collect(),
            });
        }

        Ok(parsed.data.unwrap_or_default())
    }
}

/// Classify a throttled HTTP response, if it is one.
pub fn classify_throttle(status: StatusCode, headers: &HeaderMap, body: &str) -> Option<RateLimitKind> {
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }

    if body.to_lowercase().contains("secondary rate") || headers.contains_key(RETRY_AFTER) {
        return Some(RateLimitKind::Secondary);
    }

    if header_value(headers, "x-ratelimit-remaining") == Some(0) {
        return Some(RateLimitKind::Primary);
    }

    None
}

/// Delay before retrying, from `retry-after` or `x-ratelimit-reset` (never negative).
pub fn retry_delay(kind: RateLimitKind, headers: &HeaderMap, now: i64) -> Duration {
    match kind {
        RateLimitKind::Secondary => header_value(headers, RETRY_AFTER.as_str())
            .map(|secs| Duration::from_secs(secs.max(0) as u64))
            .unwrap_or(DEFAULT_SECONDARY_DELAY),
        RateLimitKind::Primary => header_value(headers, "x-ratelimit-reset")
            .map(|reset| Duration::from_secs((reset - now).max(0) as u64))
            .unwrap_or(Duration::ZERO),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
