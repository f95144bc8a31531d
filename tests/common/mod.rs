//! Shared utilities for starlist integration tests
//!
//! Scripted upstream clients, page builders and temporary workspaces, so every
//! scenario runs offline and without real backoff delays.

pub mod assertions;
pub mod fixtures;
pub mod workspace;
