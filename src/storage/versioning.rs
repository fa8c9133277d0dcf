//! Non-destructive output naming: `v<N>_<name>.<ext>`

use crate::error::{CoConservationError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Next free version for `<name>.<ext>` in `dir`: one past the highest
/// existing `v<N>_<name>.<ext>`, or 1. Creates `dir` if missing.
pub fn next_version(dir: &Path, name: &str, ext: &str) -> Result<u32> {
    fs::create_dir_all(dir).map_err(|source| CoConservationError::OutputIo {
        path: dir.to_path_buf(),
        source,
    })?;

    let entries = fs::read_dir(dir).map_err(|source| CoConservationError::OutputIo {
        path: dir.to_path_buf(),
        source,
    })?;

    let suffix = format!("_{}.{}", name, ext);
    let mut highest: u32 = 0;
    for entry in entries {
        let entry = entry.map_err(|source| CoConservationError::OutputIo {
            path: dir.to_path_buf(),
            source,
        })?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        if let Some(version) = parse_version(file_name, &suffix) {
            highest = highest.max(version);
        }
    }

    highest.checked_add(1).ok_or_else(|| CoConservationError::OutputIo {
        path: dir.join(format!("v{}{}", highest, suffix)),
        source: std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "no version number left for a new output",
        ),
    })
}

/// Path of the next version of `<name>.<ext>` in `dir`
pub fn next_versioned_path(dir: &Path, name: &str, ext: &str) -> Result<PathBuf> {
    let version = next_version(dir, name, ext)?;
    Ok(dir.join(format!("v{}_{}.{}", version, name, ext)))
}

fn parse_version(file_name: &str, suffix: &str) -> Option<u32> {
    let digits = file_name.strip_prefix('v')?.strip_suffix(suffix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
