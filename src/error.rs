// src/error.rs
// =============================================================================
// Typed errors for everything below main.rs.
//
// main.rs still works with anyhow::Result, but the modules that talk to the
// network and the filesystem return this enum so callers (and tests) can tell
// an invalid URL apart from a broken listing or a failed download.
//
// Rust concepts:
// - thiserror: Derives std::error::Error and Display from attributes
// - #[source]: Keeps the underlying error so anyhow can print the whole chain
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while downloading a repository
#[derive(Debug, Error)]
pub enum Error {
    /// The URL given on the command line is not an Anonymous GitHub repo URL
    #[error("URL is not a valid Anonymous GitHub repository: {0}")]
    InvalidRepoUrl(String),

    /// The service origin given with --base-url cannot be used
    #[error("invalid service base URL: {0}")]
    InvalidBaseUrl(String),

    /// The file listing contained something that is neither a file nor a folder
    #[error("malformed file listing at '{path}': expected an object, found {found}")]
    MalformedTree { path: String, found: &'static str },

    /// A listed file path would land outside the save directory
    #[error("refusing to write '{0}' outside the save directory")]
    UnsafePath(String),

    /// The HTTP client could not be set up (e.g. TLS backend failure)
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// Connection failures, non-2xx responses and broken response bodies
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Anything the local filesystem refused to do
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Http {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
