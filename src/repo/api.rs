// src/repo/api.rs
// =============================================================================
// Thin wrapper around reqwest for the Anonymous GitHub API.
//
// The service filters out clients that do not look like a browser, so every
// request carries a browser User-Agent. The listing request also asks for JSON
// explicitly.
// =============================================================================

use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::debug;

use super::endpoint::ServiceEndpoint;
use super::tree::FileTree;
use crate::error::{Error, Result};

/// Browser-like client identifier sent with every request
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/87.0.4280.88 Safari/537.36";

/// HTTP client bound to one service endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    endpoint: ServiceEndpoint,
}

impl ApiClient {
    pub fn new(endpoint: ServiceEndpoint) -> Result<Self> {
        // No timeout: a download runs until it finishes or the connection fails
        let http = Client::builder().build().map_err(Error::Client)?;

        Ok(Self { http, endpoint })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    // Fetches and classifies the full file listing of a repository
    //
    // Parameters:
    //   repo: repository name as found in the /r/<repo> URL
    //
    // Returns: the typed tree, or Error::Http / Error::MalformedTree
    pub async fn fetch_tree(&self, repo: &str) -> Result<FileTree> {
        let url = self.endpoint.files_url(repo);
        debug!(url = %url, "fetching file listing");

        let response = self
            .http
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| Error::http(&url, e))?;

        // reqwest decodes the body using the charset from Content-Type
        let listing: Value = response.json().await.map_err(|e| Error::http(&url, e))?;

        FileTree::from_value(listing)
    }
}
