// src/download/atomic.rs
// =============================================================================
// Atomic file writes: a destination path either does not exist, or holds a
// complete download. Never half a file.
//
// How it works:
// 1. Create <destination>.temp
// 2. Copy the byte stream into it through a 256 KiB buffer
// 3. Flush and rename <destination>.temp -> <destination>
//
// If anything fails before the rename lands, the TempFile guard deletes the
// .temp file when it goes out of scope and the original error is returned.
// The destination is not touched on that path, so an older copy survives.
//
// Rust concepts:
// - Drop: Cleanup that runs on every exit path, including `?` early returns
// - Generic streams: Any Stream of byte chunks can be written, which lets tests
//   feed in a stream that breaks half-way
// =============================================================================

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures::{pin_mut, Stream, StreamExt};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Bytes buffered between disk writes
pub const CHUNK_SIZE: usize = 256 * 1024;

/// Sibling path used while a download is in flight: `<destination>.temp`
pub fn temp_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".temp");
    PathBuf::from(name)
}

// Owns a temporary file on disk until it is either persisted or dropped
struct TempFile {
    path: PathBuf,
    persisted: bool,
}

impl TempFile {
    async fn create(path: PathBuf) -> Result<(Self, File)> {
        let file = File::create(&path)
            .await
            .map_err(|e| Error::io(&path, e))?;

        let guard = Self {
            path,
            persisted: false,
        };
        Ok((guard, file))
    }

    // Commit point: after this the destination holds the complete file
    async fn persist(mut self, destination: &Path) -> Result<()> {
        tokio::fs::rename(&self.path, destination)
            .await
            .map_err(|e| Error::io(destination, e))?;
        self.persisted = true;
        Ok(())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.persisted {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "removed incomplete download"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "could not remove temp file"),
        }
    }
}

// Writes a stream of byte chunks to `destination`, all or nothing
//
// Parameters:
//   body: the chunks to write, in order; an Err item aborts the write
//   destination: final path; its parent directory must already exist
//
// Returns: number of bytes written
pub async fn write_atomically<S, B>(body: S, destination: &Path) -> Result<u64>
where
    S: Stream<Item = Result<B>>,
    B: AsRef<[u8]>,
{
    pin_mut!(body);

    let (temp, file) = TempFile::create(temp_path(destination)).await?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut written: u64 = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        writer
            .write_all(bytes)
            .await
            .map_err(|e| Error::io(&temp.path, e))?;
        written += bytes.len() as u64;
    }

    writer.flush().await.map_err(|e| Error::io(&temp.path, e))?;
    // Close the handle before renaming
    drop(writer);

    temp.persist(destination).await?;
    debug!(path = %destination.display(), bytes = written, "download committed");

    Ok(written)
}
