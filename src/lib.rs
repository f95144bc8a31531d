//! Starlist - builds a Markdown catalog of the repositories a GitHub user has starred.
//!
//! Stars are pulled page by page from the GitHub GraphQL API (retrying through
//! primary and secondary rate limits), normalized into flat records, cached in a
//! versioned JSON file and grouped by language and topic for rendering.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The [`Assembler`] and the [`StarsClient`] seam it pages through
//! - The cache slot and source selection
//! - Record normalization, timestamp formatting and grouping
//! - Error handling and result types

pub mod commands;
pub mod core;

pub use core::{
    // Acquisition
    Assembler,
    Backoff,
    // Cache
    CacheSlot,
    CatalogResponse,
    CatalogSource,
    // Configuration
    Config,
    DateTimeConfig,
    Diagnostics,
    DisplayRecord,
    FileSlot,
    GithubClient,
    // Grouping and rendering
    Groups,
    MarkdownRenderer,
    MemorySlot,
    Origin,
    RawRecord,
    Renderer,
    Report,
    Result,
    // Error handling
    StarlistError,
    StarsClient,
    Timestamp,
};
