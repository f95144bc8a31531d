//! Core functionality for starlist.
//!
//! Star acquisition (upstream client, retrying assembler, cache slot), record
//! normalization, grouping and Markdown rendering.

pub mod assembler;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod diagnostics;
pub mod dirs;
pub mod error;
pub mod files;
pub mod github;
pub mod grouping;
pub mod markdown;
pub mod normalize;
pub mod output;
pub mod report;
pub mod source;
pub mod templates;
pub mod timestamp;
pub mod upstream;

// === Error handling ===
pub use error::{Result, StarlistError};

// === Acquisition ===
// Paged retrieval with the primary/secondary rate limit policy
pub use assembler::{Assembler, Backoff, RateLimitKind, RetryPolicy, ThreadSleep, MAX_RETRIES};
pub use github::GithubClient;
pub use upstream::{StarsClient, ViewerPage};

// === Cache slot ===
pub use cache::{
    load_catalog, store_catalog, CacheRejection, CacheSlot, FileSlot, MemorySlot,
    OverlaySlot,
};
pub use catalog::{CatalogResponse, DisplayRecord, DATA_VERSION};
pub use source::{select_catalog, CatalogSource, Origin};

// === Records and grouping ===
pub use grouping::Groups;
pub use normalize::{normalize_edge, RawRecord};
pub use timestamp::{timestamp, DateTimeConfig, Timestamp};

// === Configuration and diagnostics ===
pub use config::{Config, ConfigOverrides};
pub use diagnostics::Diagnostics;

// === Rendering ===
pub use report::Report;
pub use templates::{render_template, MarkdownRenderer, Renderer, TemplateContext, TEMPLATES};

// === Output formatting ===
pub use output::{print_error, print_info, print_section_header, print_success, print_warning};
