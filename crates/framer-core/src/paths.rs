//! User-supplied path handling.

use std::path::{Path, PathBuf};

use crate::error::{FramerError, Result};

/// Expand a leading `~` to the current user's home directory.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
}

/// Expand `raw` and require it to be an existing directory.
pub fn resolve_dir(raw: &str) -> Result<PathBuf> {
    let path = expand_path(raw);
    if !path.is_dir() {
        return Err(FramerError::InputPath { path });
    }
    Ok(path)
}

/// True when `inner` is `outer` or lives somewhere below it.
///
/// Both paths are canonicalized; a path that does not exist yet cannot
/// contain anything.
pub fn contains(outer: &Path, inner: &Path) -> bool {
    match (outer.canonicalize(), inner.canonicalize()) {
        (Ok(outer), Ok(inner)) => inner.starts_with(outer),
        _ => false,
    }
}
