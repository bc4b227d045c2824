// src/download/fetch.rs
// =============================================================================
// Downloads a single file.
//
// The request is sent first. Only once the server has answered with a 2xx
// status is a temp file created, so a refused request never touches the disk.
// The body is then streamed through write_atomically.
// =============================================================================

use std::path::Path;

use futures::StreamExt;
use reqwest::{header, Client, Response};
use tracing::debug;

use super::atomic::write_atomically;
use crate::error::{Error, Result};
use crate::repo::USER_AGENT;

// Downloads `url` into `destination`
//
// Parameters:
//   client: reqwest HTTP client (shared across the whole run)
//   url: fully built file URL
//   destination: local path; its parent directory must exist
//
// Returns: number of bytes written, or the first network / disk error
pub async fn fetch_file(client: &Client, url: &str, destination: &Path) -> Result<u64> {
    debug!(url, destination = %destination.display(), "requesting file");

    let response = client
        .get(url)
        .header(header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(|e| Error::http(url, e))?;

    let body = response
        .bytes_stream()
        .map(|chunk| chunk.map_err(|e| Error::http(url, e)));

    write_atomically(body, destination).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::download::atomic::temp_path;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn test_fetch_file() {
        let mut server = Server::new_async().await;
        let file = server
            .mock("GET", "/api/repo/demo/file/src/main.rs")
            .match_header("user-agent", Matcher::Regex("Chrome".to_string()))
            .with_status(200)
            .with_body("fn main() {}\n")
            .expect(1)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("main.rs");
        let url = format!("{}/api/repo/demo/file/src/main.rs", server.url());

        let written = fetch_file(&Client::new(), &url, &destination).await.unwrap();

        file.assert_async().await;
        assert_eq!(written, 13);
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "fn main() {}\n");
        assert!(!temp_path(&destination).exists());
    }

    #[tokio::test]
    async fn test_fetch_file_error_status_leaves_destination_alone() {
        let mut server = Server::new_async().await;
        let _file = server
            .mock("GET", "/api/repo/demo/file/gone.txt")
            .with_status(404)
            .with_body("not found")
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("gone.txt");
        std::fs::write(&destination, "old contents").unwrap();
        let url = format!("{}/api/repo/demo/file/gone.txt", server.url());

        let result = fetch_file(&Client::new(), &url, &destination).await;

        assert!(matches!(result, Err(Error::Http { .. })));
        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "old contents");
        assert!(!temp_path(&destination).exists());
    }

    #[tokio::test]
    async fn test_fetch_file_connection_refused() {
        // Port 1 (tcpmux) is never served on a test machine
        let url = "http://127.0.0.1:1/api/repo/demo/file/a.txt";

        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("a.txt");

        let result = fetch_file(&Client::new(), url, &destination).await;

        assert!(matches!(result, Err(Error::Http { .. })));
        assert!(!destination.exists());
        assert!(!temp_path(&destination).exists());
    }
}
