//! Terminal identifier resolution.
//!
//! # Responsibilities
//! - Scan one directory (no recursion) for terminal configuration files
//! - Pick the most recently modified one
//! - Return its third line
//!
//! # Design Decisions
//! - Nothing is cached; every call re-reads the disk
//! - Equal modification times resolve to the smallest file name
//! - Lines are split on `\n` only, so a `\r` before it stays in the result
//! - A matching entry that cannot be inspected fails the whole call rather
//!   than letting an older file win

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

/// Extension of the gateway's terminal configuration files.
pub const TERMINAL_FILE_EXTENSION: &str = ".EMVTERM";

/// Zero-based line holding the terminal identifier.
const TERMINAL_ID_LINE: usize = 2;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to read directory {}: {source}", dir.display())]
    ReadDir { dir: PathBuf, source: io::Error },

    #[error("no files with extension {extension} in {}", dir.display())]
    NoMatchingFiles { extension: String, dir: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    ReadFile { path: PathBuf, source: io::Error },

    #[error("file {} has less than 3 lines", path.display())]
    InsufficientLines { path: PathBuf },
}

/// Resolves the currently configured terminal identifier from disk.
#[derive(Debug, Clone)]
pub struct TerminalIdResolver {
    dir: PathBuf,
    extension: String,
}

impl TerminalIdResolver {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    /// Directory scanned on every call.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Blocking; run it off the async executor.
    pub fn resolve(&self) -> Result<String, ResolveError> {
        resolve(&self.dir, &self.extension)
    }
}

/// Return the third line of the newest file in `dir` ending with `extension`.
pub fn resolve(dir: &Path, extension: &str) -> Result<String, ResolveError> {
    let newest = newest_matching_file(dir, extension)?;

    let bytes = fs::read(&newest).map_err(|source| ResolveError::ReadFile {
        path: newest.clone(),
        source,
    })?;
    let content = String::from_utf8_lossy(&bytes);

    match content.split('\n').nth(TERMINAL_ID_LINE) {
        Some(line) => {
            tracing::debug!(file = %newest.display(), "Resolved terminal id");
            Ok(line.to_string())
        }
        None => Err(ResolveError::InsufficientLines { path: newest }),
    }
}

fn newest_matching_file(dir: &Path, extension: &str) -> Result<PathBuf, ResolveError> {
    let read_dir_err = |source| ResolveError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };
    let suffix = extension.to_lowercase();

    let mut newest: Option<(SystemTime, String, PathBuf)> = None;
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.to_lowercase().ends_with(&suffix) {
            continue;
        }

        let path = entry.path();
        let metadata = fs::metadata(&path).map_err(|source| ResolveError::ReadFile {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_file() {
            continue;
        }
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);

        let is_newer = match &newest {
            None => true,
            Some((best_time, best_name, _)) => {
                modified > *best_time || (modified == *best_time && name < *best_name)
            }
        };
        if is_newer {
            newest = Some((modified, name, path));
        }
    }

    newest
        .map(|(_, _, path)| path)
        .ok_or_else(|| ResolveError::NoMatchingFiles {
            extension: extension.to_string(),
            dir: dir.to_path_buf(),
        })
}
