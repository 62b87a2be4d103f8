//! Breadth-first discovery of image files.
//!
//! Each level's directories are read concurrently and joined before the next
//! level starts. Order within a level is not guaranteed. Symlinked directories
//! are followed without cycle detection, so a cyclic symlink tree never
//! terminates.

use futures_util::future::join_all;
use std::path::{Path, PathBuf};

/// Files and subdirectories found in one directory.
#[derive(Debug, Default)]
struct Listing {
    files: Vec<PathBuf>,
    dirs: Vec<PathBuf>,
}

/// Recursively collect every file under `root` whose extension (with the dot)
/// is in `extensions`. Matching is case-sensitive.
///
/// An unreadable `root` is an error; unreadable subdirectories are logged and
/// skipped.
pub async fn scan(root: &Path, extensions: &[String]) -> std::io::Result<Vec<PathBuf>> {
    let first = read_level_dir(root, extensions).await?;
    let mut files = first.files;
    let mut level = first.dirs;
    let mut depth = 0usize;

    while !level.is_empty() {
        depth += 1;
        tracing::trace!("  Scan depth {}: {} dir(s)", depth, level.len());

        let listings = join_all(level.iter().map(|dir| read_level_dir(dir, extensions))).await;

        let mut next = Vec::new();
        for (dir, listing) in level.iter().zip(listings) {
            match listing {
                Ok(listing) => {
                    files.extend(listing.files);
                    next.extend(listing.dirs);
                }
                Err(e) => tracing::warn!("Skipping unreadable directory {:?}: {}", dir, e),
            }
        }
        level = next;
    }

    Ok(files)
}

async fn read_level_dir(dir: &Path, extensions: &[String]) -> std::io::Result<Listing> {
    let mut listing = Listing::default();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        // Follows symlinks.
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        if metadata.is_dir() {
            listing.dirs.push(path);
        } else if metadata.is_file() && has_extension(&path, extensions) {
            listing.files.push(std::path::absolute(&path).unwrap_or(path));
        }
    }

    Ok(listing)
}

/// Case-sensitive suffix match on the file extension, dot included.
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let dotted = format!(".{ext}");
            extensions.iter().any(|allowed| *allowed == dotted)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec![".png".to_string(), ".jpg".to_string()]
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn test_has_extension_is_case_sensitive() {
        let exts = exts();
        assert!(has_extension(Path::new("a.png"), &exts));
        assert!(has_extension(Path::new("dir/b.jpg"), &exts));
        assert!(!has_extension(Path::new("a.PNG"), &exts));
        assert!(!has_extension(Path::new("a.jpeg"), &exts));
        assert!(!has_extension(Path::new("png"), &exts));
        assert!(!has_extension(Path::new(".png"), &exts));
    }

    #[tokio::test]
    async fn test_scan_finds_all_nested_matches() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let matching = [
            "top.png",
            "a/one.jpg",
            "a/b/two.png",
            "a/b/c/d/three.png",
            "e/four.jpg",
            "e/f/five.png",
        ];
        for rel in matching {
            touch(&root.join(rel));
        }
        for rel in ["notes.txt", "a/b/skip.PNG", "e/f/g/readme.md"] {
            touch(&root.join(rel));
        }

        let mut found = scan(root, &exts()).await.unwrap();
        found.sort();

        let mut expected: Vec<PathBuf> = matching
            .iter()
            .map(|rel| std::path::absolute(root.join(rel)).unwrap())
            .collect();
        expected.sort();

        assert_eq!(found.len(), matching.len());
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let found = scan(dir.path(), &exts()).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_scan_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(scan(&missing, &exts()).await.is_err());
    }
}
