//! Document reads and atomic writes with file locking

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use fs2::FileExt;

use crate::{Error, Result};

/// Read a seed document as UTF-8 text.
///
/// A missing file is reported as [`Error::NotFound`] so callers can treat it
/// as a precondition failure rather than a generic I/O problem.
pub fn read_document(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            tracing::debug!(path = %path.display(), bytes = text.len(), "Read document");
            Ok(text)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Replace a seed document with new text.
///
/// The document must already exist; seed files are edited, never created.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    write_atomic(path, text.as_bytes())?;
    tracing::info!(path = %path.display(), bytes = text.len(), "Wrote document");
    Ok(())
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers see either the old or the new
/// content, never a partial write. The parent directory must exist. The temp
/// file is removed again when any step fails.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    // Temp file lives next to the target so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let result = write_locked(&temp_path, path, content)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    if result.is_err()
        && let Err(e) = fs::remove_file(&temp_path)
        && e.kind() != ErrorKind::NotFound
    {
        tracing::warn!(path = %temp_path.display(), error = %e, "Failed to remove temp file");
    }

    result
}

fn write_locked(temp_path: &Path, target: &Path, content: &[u8]) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })
}
