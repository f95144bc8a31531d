//! Live acquisition of the starred repository catalog.
//!
//! [`Assembler`] walks the cursor-paginated viewer query one page at a time,
//! applies the rate limit retry policy to each page, normalizes every public
//! edge and finally overwrites the cache slot with the assembled snapshot.
//!
//! # Retry Policy
//! - **Primary** and **secondary** rate limits keep independent counters
//! - A counter allows [`MAX_RETRIES`] retries of the same page, then the whole
//!   acquisition fails; no partial catalog is returned
//! - Both counters start over for every new page

use crate::core::cache::{store_catalog, CacheSlot};
use crate::core::catalog::{CatalogResponse, DATA_VERSION};
use crate::core::diagnostics::Diagnostics;
use crate::core::error::{Result, StarlistError};
use crate::core::normalize::normalize_edge;
use crate::core::upstream::{StarsClient, ViewerPage};
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Retries allowed per trigger for a single page.
pub const MAX_RETRIES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitKind {
    Primary,
    Secondary,
}

impl fmt::Display for RateLimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateLimitKind::Primary => write!(f, "Primary"),
            RateLimitKind::Secondary => write!(f, "Secondary"),
        }
    }
}

/// Retry counter for one trigger type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    attempts: u32,
    limit: u32,
}

impl RetryState {
    pub fn new(limit: u32) -> Self {
        Self { attempts: 0, limit }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.attempts)
    }

    /// Consume one retry if any is left.
    pub fn try_retry(&mut self) -> bool {
        if self.attempts < self.limit {
            self.attempts += 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    primary: RetryState,
    secondary: RetryState,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES)
    }
}

impl RetryPolicy {
    pub fn new(limit: u32) -> Self {
        Self {
            primary: RetryState::new(limit),
            secondary: RetryState::new(limit),
        }
    }

    pub fn state(&self, kind: RateLimitKind) -> &RetryState {
        match kind {
            RateLimitKind::Primary => &self.primary,
            RateLimitKind::Secondary => &self.secondary,
        }
    }

    pub fn limit(&self) -> u32 {
        self.primary.limit
    }

    /// Decide whether a throttled request is retried. Every signal is reported
    /// as a warning; exhaustion is reported as an error.
    pub fn on_rate_limit(
        &mut self,
        kind: RateLimitKind,
        retry_after: Duration,
        diagnostics: &mut Diagnostics,
    ) -> bool {
        let state = match kind {
            RateLimitKind::Primary => &mut self.primary,
            RateLimitKind::Secondary => &mut self.secondary,
        };

        diagnostics.warn(match kind {
            RateLimitKind::Primary => "Request quota exhausted for star retrieval",
            RateLimitKind::Secondary => "Secondary rate limit detected for star retrieval",
        });

        let remaining = state.remaining();
        if state.try_retry() {
            diagnostics.info(format!(
                "Retrying after {} seconds ({remaining} retries left)",
                retry_after.as_secs()
            ));
            true
        } else {
            diagnostics.error(format!("{kind} request retries exhausted"));
            false
        }
    }

    pub fn reset(&mut self) {
        self.primary.reset();
        self.secondary.reset();
    }
}

/// Waits out a rate limit delay.
pub trait Backoff {
    fn wait(&mut self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleep;

impl Backoff for ThreadSleep {
    fn wait(&mut self, delay: Duration) {
        log::debug!("Sleeping {}ms before retrying", delay.as_millis());
        std::thread::sleep(delay);
    }
}

pub struct Assembler<C, B = ThreadSleep> {
    client: C,
    backoff: B,
    policy: RetryPolicy,
}

impl<C: StarsClient> Assembler<C, ThreadSleep> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            backoff: ThreadSleep,
            policy: RetryPolicy::default(),
        }
    }
}

impl<C: StarsClient, B: Backoff> Assembler<C, B> {
    pub fn with_backoff<B2: Backoff>(self, backoff: B2) -> Assembler<C, B2> {
        Assembler {
            client: self.client,
            backoff,
            policy: self.policy,
        }
    }

    pub fn backoff(&self) -> &B {
        &self.backoff
    }

    /// Pull every page, store the snapshot in `slot` and return it.
    pub fn assemble<S: CacheSlot + ?Sized>(
        &mut self,
        slot: &mut S,
        diagnostics: &mut Diagnostics,
    ) -> Result<CatalogResponse> {
        self.assemble_at(Utc::now(), slot, diagnostics)
    }

    /// As [`assemble`](Self::assemble), stamping the snapshot with `started_at`.
    pub fn assemble_at<S: CacheSlot + ?Sized>(
        &mut self,
        started_at: DateTime<Utc>,
        slot: &mut S,
        diagnostics: &mut Diagnostics,
    ) -> Result<CatalogResponse> {
        let mut cursor: Option<String> = None;
        let mut login: Option<String> = None;
        let mut total = 0;
        let mut truncated = false;
        let mut stars = Vec::new();
        let mut skipped = 0usize;
        let mut page_number = 0usize;

        loop {
            page_number += 1;
            log::debug!("Fetching starred repositories page {page_number}");

            let page = self.fetch_with_retry(cursor.as_deref(), diagnostics)?;
            let viewer = page.viewer.ok_or(StarlistError::MissingViewer)?;
            let connection = viewer
                .starred_repositories
                .ok_or(StarlistError::MissingStarredRepositories)?;
            let edges = connection
                .edges
                .ok_or(StarlistError::MissingStarredRepositories)?;

            login.get_or_insert(viewer.login);
            total = connection.total_count;
            truncated = connection.is_over_limit;

            for edge in edges.into_iter().flatten() {
                if edge.node.is_private {
                    skipped += 1;
                    continue;
                }
                stars.push(normalize_edge(&edge));
            }

            let page_info = connection.page_info;
            if !page_info.has_next_page {
                break;
            }

            match page_info.end_cursor {
                Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
                _ => {
                    diagnostics.warn(format!(
                        "Page {page_number} reported more results without a new cursor; stopping"
                    ));
                    break;
                }
            }
        }

        log::info!(
            "Fetched {} starred repositories in {page_number} pages ({skipped} private skipped)",
            stars.len()
        );

        let catalog = CatalogResponse {
            data_version: DATA_VERSION,
            login: login.unwrap_or_default(),
            total,
            truncated,
            updated_at: started_at,
            stars,
        };

        store_catalog(slot, &catalog)?;
        Ok(catalog)
    }

    fn fetch_with_retry(
        &mut self,
        cursor: Option<&str>,
        diagnostics: &mut Diagnostics,
    ) -> Result<ViewerPage> {
        self.policy.reset();

        loop {
            match self.client.fetch_page(cursor) {
                Ok(page) => return Ok(page),
                Err(StarlistError::RateLimited { kind, retry_after }) => {
                    if !self.policy.on_rate_limit(kind, retry_after, diagnostics) {
                        return Err(StarlistError::retries_exhausted(kind, self.policy.limit()));
                    }
                    self.backoff.wait(retry_after);
                }
                Err(e) => return Err(e),
            }
        }
    }
}
