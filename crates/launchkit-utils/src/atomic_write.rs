//! Atomic file replacement.
//!
//! Writers go through a temporary file in the target directory, fsync it and
//! rename it over the target. Readers therefore see either the previous
//! content or the new content, never a partial file.

use anyhow::{Context, Result};
use camino::Utf8Path;
use serde::Serialize;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

#[cfg(target_os = "windows")]
use std::{thread, time::Duration};

/// Atomically replace `path` with `bytes`, creating parent directories.
pub fn write_bytes_atomic(path: &Utf8Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {dir}"))?;

    let mut temp_file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in: {dir}"))?;
    temp_file
        .write_all(bytes)
        .context("Failed to write content to temporary file")?;
    temp_file
        .as_file()
        .sync_all()
        .context("Failed to fsync temporary file")?;

    persist(temp_file, path).with_context(|| format!("Failed to atomically write file: {path}"))
}

/// Serialize `value` as pretty JSON with a trailing newline and write it atomically.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Utf8Path, value: &T) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(value).context("Failed to serialize JSON")?;
    json.push(b'\n');
    write_bytes_atomic(path, &json)
}

#[cfg(not(target_os = "windows"))]
fn persist(temp_file: NamedTempFile, target: &Utf8Path) -> Result<()> {
    temp_file
        .persist(target.as_std_path())
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!(e.error))
}

/// Windows can briefly refuse the rename while a reader holds the target open.
#[cfg(target_os = "windows")]
fn persist(mut temp_file: NamedTempFile, target: &Utf8Path) -> Result<()> {
    const MAX_RETRIES: u32 = 5;
    const INITIAL_DELAY_MS: u64 = 10;

    let mut attempt = 0;
    loop {
        match temp_file.persist(target.as_std_path()) {
            Ok(_) => return Ok(()),
            Err(err)
                if attempt < MAX_RETRIES
                    && err.error.kind() == std::io::ErrorKind::PermissionDenied =>
            {
                thread::sleep(Duration::from_millis(INITIAL_DELAY_MS << attempt));
                attempt += 1;
                temp_file = err.file;
            }
            Err(err) => return Err(anyhow::anyhow!(err.error)),
        }
    }
}
