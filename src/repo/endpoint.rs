// src/repo/endpoint.rs
// =============================================================================
// Where the service lives and what its URLs look like.
//
// Anonymous GitHub has two kinds of URLs we care about:
// - What users paste:  https://anonymous.4open.science/r/<repo_name>/...
// - What we call:      https://anonymous.4open.science/api/repo/<repo_name>/files/
//                      https://anonymous.4open.science/api/repo/<repo_name>/file/<path>
//
// The origin is configurable (hidden --base-url flag) so the whole pipeline
// can be pointed at a local fake server.
// =============================================================================

use url::Url;

use crate::error::{Error, Result};

/// Origin of the public Anonymous GitHub service
pub const DEFAULT_BASE_URL: &str = "https://anonymous.4open.science";

/// The service origin plus the URL shapes built on top of it
#[derive(Debug, Clone)]
pub struct ServiceEndpoint {
    base: Url,
}

impl ServiceEndpoint {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        if base.cannot_be_a_base() || base.host_str().is_none() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self { base })
    }

    // Extracts the repository name from a user-supplied repository URL
    //
    // Accepts:
    //   https://anonymous.4open.science/r/repo-name
    //   https://anonymous.4open.science/r/repo-name/
    //   https://anonymous.4open.science/r/repo-name/src/main.rs
    //
    // Anything on another scheme, host or port, or not under /r/, is rejected
    // before a single request is made.
    //
    // Example:
    //   "https://anonymous.4open.science/r/my-paper-1234/" -> "my-paper-1234"
    pub fn parse_repo_url(&self, input: &str) -> Result<String> {
        let invalid = || Error::InvalidRepoUrl(input.to_string());

        let url = Url::parse(input.trim()).map_err(|_| invalid())?;

        let same_origin = url.scheme() == self.base.scheme()
            && url.host_str() == self.base.host_str()
            && url.port_or_known_default() == self.base.port_or_known_default();
        if !same_origin {
            return Err(invalid());
        }

        let mut segments = url.path_segments().ok_or_else(invalid)?;
        match (segments.next(), segments.next()) {
            (Some("r"), Some(name)) if !name.is_empty() => Ok(name.to_string()),
            _ => Err(invalid()),
        }
    }

    /// `GET` target for the recursive file listing of a repository
    pub fn files_url(&self, repo: &str) -> String {
        format!("{}/api/repo/{}/files/", self.origin(), repo)
    }

    // `GET` target for one file's raw bytes
    //
    // Every path segment is percent-encoded on its own so the slashes between
    // them survive: "docs/read me.md" -> "docs/read%20me.md"
    pub fn file_url(&self, repo: &str, path: &str) -> String {
        let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
        format!("{}/api/repo/{}/file/{}", self.origin(), repo, encoded.join("/"))
    }

    fn origin(&self) -> String {
        self.base.origin().ascii_serialization()
    }
}
