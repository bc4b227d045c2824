// src/download/repository.rs
// =============================================================================
// Downloads a whole repository, one file after another.
//
// Steps:
// 1. Fetch the file listing once
// 2. For every file path, in listing order:
//    - work out where it goes under the save directory
//    - skip it if it is already there and --skip-existing was given
//    - create missing parent directories
//    - download it atomically
//
// The first error ends the run. Files finished before it stay on disk, so a
// second run with --skip-existing picks up where the first one stopped.
// =============================================================================

use std::path::{Component, Path, PathBuf};

use tracing::info;

use super::fetch::fetch_file;
use crate::error::{Error, Result};
use crate::repo::ApiClient;

/// What to download and where to put it
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Repository name as it appears in /r/<repo>
    pub repo: String,
    /// Local root the repository layout is recreated under
    pub save_dir: PathBuf,
    /// Leave files that already exist untouched
    pub skip_existing: bool,
}

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub bytes: u64,
}

pub async fn download_repo(api: &ApiClient, options: &DownloadOptions) -> Result<DownloadSummary> {
    let tree = api.fetch_tree(&options.repo).await?;

    if tree.is_empty() {
        println!("⚠️  No files found in repository {}", options.repo);
        return Ok(DownloadSummary::default());
    }

    println!(
        "📄 Found {} file(s), {} byte(s) in total",
        tree.len(),
        tree.total_size()
    );

    let mut summary = DownloadSummary::default();

    for file in tree.paths() {
        let destination = local_path(&options.save_dir, &file)?;

        if options.skip_existing && destination.exists() {
            println!(
                "⏭️  Skipping {} because it already exists at {}",
                file,
                destination.display()
            );
            summary.skipped += 1;
            continue;
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::io(parent, e))?;
        }

        let url = api.endpoint().file_url(&options.repo, &file);
        println!("📥 Downloading {} to {}", file, destination.display());

        let bytes = fetch_file(api.http(), &url, &destination).await?;
        info!(file = %file, bytes, "downloaded");

        summary.downloaded += 1;
        summary.bytes += bytes;
    }

    Ok(summary)
}

// Maps a listed file path onto the local filesystem
//
// Example:
//   ("my-repo", "src/main.rs") -> my-repo/src/main.rs
//
// Every segment has to be a plain file or folder name. "..", ".", empty
// segments and anything the platform would read as a root or drive prefix
// are rejected with Error::UnsafePath.
pub fn local_path(save_dir: &Path, file: &str) -> Result<PathBuf> {
    let mut path = save_dir.to_path_buf();

    for segment in file.split('/') {
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => path.push(segment),
            _ => return Err(Error::UnsafePath(file.to_string())),
        }
    }

    Ok(path)
}
