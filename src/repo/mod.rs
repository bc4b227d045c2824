// src/repo/mod.rs
// =============================================================================
// This module knows how to talk to Anonymous GitHub.
//
// Currently implements:
// - Parsing repository URLs (https://anonymous.4open.science/r/<name>/...)
// - Building the listing and per-file API URLs
// - Fetching the file listing and flattening it into file paths
//
// Submodules:
// - endpoint: Service origin, repository URL parsing, API URL building
// - tree: The file listing as a typed tree, plus the depth-first path walk
// - api: The HTTP client wrapper used by the downloader
// =============================================================================

mod api;
mod endpoint;
mod tree;

// Re-export the public API so callers can write `repo::ApiClient`
pub use api::{ApiClient, USER_AGENT};
pub use endpoint::{ServiceEndpoint, DEFAULT_BASE_URL};
