//! In-memory ordered list of images produced by a scan.

use std::path::Path;

use crate::codec::LazyImage;
use crate::config::Config;
use crate::error::{FramerError, Result};
use crate::scan::scan;
use crate::types::Image;

/// Ordered images found under an input directory.
#[derive(Debug, Default)]
pub struct ImageCatalog {
    images: Vec<Image>,
}

impl ImageCatalog {
    /// Scan `root` and wrap every match in a lazy handle. No pixels are read.
    pub async fn load(root: &Path, config: &Config) -> Result<Self> {
        let extensions = config.scan.normalized_extensions();
        let paths = scan(root, &extensions)
            .await
            .map_err(|source| FramerError::Scan {
                path: root.to_path_buf(),
                source,
            })?;

        let images = paths
            .into_iter()
            .map(|path| {
                let file_name = file_name_of(&path);
                Image::new(file_name, Box::new(LazyImage::open(path, config.limits.clone())))
            })
            .collect();

        Ok(Self { images })
    }

    pub fn from_images(images: Vec<Image>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Drop images whose source file lives under `dir` and return how many
    /// were dropped. A `dir` that does not exist yet holds nothing.
    pub fn exclude_under(&mut self, dir: &Path) -> usize {
        let Ok(dir) = dir.canonicalize() else {
            return 0;
        };
        let before = self.images.len();
        self.images.retain(|image| {
            !image
                .data
                .source_path()
                .and_then(|path| path.canonicalize().ok())
                .is_some_and(|path| path.starts_with(&dir))
        });
        before - self.images.len()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn into_images(self) -> Vec<Image> {
        self.images
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resolution;
    use image::DynamicImage;

    #[tokio::test]
    async fn test_load_wraps_every_scanned_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        DynamicImage::new_rgb8(4, 3)
            .save(dir.path().join("a.png"))
            .unwrap();
        DynamicImage::new_rgb8(8, 6)
            .save(dir.path().join("sub/b.png"))
            .unwrap();
        std::fs::write(dir.path().join("c.txt"), b"x").unwrap();

        let catalog = ImageCatalog::load(dir.path(), &Config::default())
            .await
            .unwrap();
        assert_eq!(catalog.len(), 2);

        let mut names: Vec<_> = catalog
            .images()
            .iter()
            .map(|i| i.file_name.clone())
            .collect();
        names.sort();
        assert_eq!(names, ["a.png", "b.png"]);

        let b = catalog
            .images()
            .iter()
            .find(|i| i.file_name == "b.png")
            .unwrap();
        assert_eq!(b.data.read_metadata().await.unwrap(), Resolution::new(8, 6));
    }

    #[tokio::test]
    async fn test_exclude_under_drops_nested_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("framed");
        std::fs::create_dir(&out).unwrap();
        DynamicImage::new_rgb8(2, 2)
            .save(dir.path().join("a.png"))
            .unwrap();
        DynamicImage::new_rgb8(2, 2).save(out.join("a.png")).unwrap();
        DynamicImage::new_rgb8(2, 2).save(out.join("old.png")).unwrap();

        let mut catalog = ImageCatalog::load(dir.path(), &Config::default())
            .await
            .unwrap();
        assert_eq!(catalog.len(), 3);

        assert_eq!(catalog.exclude_under(&out), 2);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.images()[0].file_name, "a.png");
        assert_eq!(
            catalog.images()[0].data.source_path(),
            Some(dir.path().join("a.png").as_path())
        );

        assert_eq!(catalog.exclude_under(&dir.path().join("missing")), 0);
        assert_eq!(catalog.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_root_is_scan_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageCatalog::load(&dir.path().join("gone"), &Config::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FramerError::Scan { .. }));
    }
}
