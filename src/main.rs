// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Turn the repository URL into a repository name
// 3. Download every file of the repository, one at a time
// 4. Print a summary and exit with a proper code
//    (0 = success, 1 = not an Anonymous GitHub URL, 2 = download failed)
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod download; // src/download/ - atomic file downloads and the download loop
mod error; // src/error.rs - typed errors
mod logging; // src/logging.rs - tracing setup
mod repo; // src/repo/ - Anonymous GitHub URLs, API client, file listing

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use download::{DownloadOptions, DownloadSummary};
use repo::{ApiClient, ServiceEndpoint};

// Everything runs on one thread: requests are awaited one after another
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole cause chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = repository downloaded
//   Ok(1) = the URL is not an Anonymous GitHub repository (nothing was done)
//   Err   = a request or a file write failed
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    logging::init(cli.verbose)?;

    let endpoint = ServiceEndpoint::new(&cli.base_url)?;

    let repo = match endpoint.parse_repo_url(&cli.url) {
        Ok(repo) => repo,
        Err(e) => {
            eprintln!("❌ {}", e);
            return Ok(1);
        }
    };

    let save_dir = cli.save_dir.unwrap_or_else(|| PathBuf::from(&repo));

    println!("🔍 Downloading repository {} into {}", repo, save_dir.display());

    let api = ApiClient::new(endpoint)?;
    let options = DownloadOptions {
        repo,
        save_dir,
        skip_existing: cli.skip_existing,
    };

    let summary = download::download_repo(&api, &options).await?;

    print_summary(&summary, &options.save_dir);

    Ok(0)
}

fn print_summary(summary: &DownloadSummary, save_dir: &Path) {
    println!();
    println!("📊 Summary for {}:", save_dir.display());
    println!("   ✅ Downloaded: {} ({} bytes)", summary.downloaded, summary.bytes);
    println!("   ⏭️  Skipped: {}", summary.skipped);
    println!("   📋 Total: {}", summary.downloaded + summary.skipped);
}
