// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   anon-fetch <url> [save_dir] [--skip-existing] [-v...]
//
// clap's derive API turns the struct below into a parser: every field is an
// argument, and the doc comments become the --help text.
// =============================================================================

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::repo::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(
    name = "anon-fetch",
    version,
    about = "Download a repository from Anonymous GitHub (https://anonymous.4open.science/)",
    long_about = "anon-fetch lists every file of an Anonymous GitHub repository and downloads \
                  them one by one, recreating the folder layout locally. Each file is written \
                  to a .temp file first and renamed into place once complete."
)]
pub struct Cli {
    /// URL of the repository to download
    ///
    /// Example: https://anonymous.4open.science/r/repo-name/
    pub url: String,

    /// Directory to save the repository in (defaults to the repository name)
    pub save_dir: Option<PathBuf>,

    /// Skip files that already exist in the save directory
    #[arg(long)]
    pub skip_existing: bool,

    /// Print more diagnostics (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Service origin (for mirrors and local testing)
    #[arg(long, default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,
}
