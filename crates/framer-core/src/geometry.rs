//! Exact-ratio arithmetic.
//!
//! Only integer scaling is used, so a result's reduced ratio always equals the
//! requested ratio with no rounding drift.

use std::cmp;

use crate::error::{GeometryError, PipelineError, PipelineResult};
use crate::types::{Image, Ratio, Resolution};

/// Greatest common divisor of two positive integers (Euclid).
pub fn gcd(a: u32, b: u32) -> Result<u32, GeometryError> {
    if a == 0 || b == 0 {
        return Err(GeometryError::NonPositive(a, b));
    }
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    Ok(a)
}

/// Smallest integer ratio with the same aspect as `width × height`.
pub fn reduce_to_ratio(width: u32, height: u32) -> Result<Ratio, GeometryError> {
    let divisor = gcd(width, height)?;
    Ratio::new(width / divisor, height / divisor)
}

/// Largest `unit * ratio` that fits inside `resolution`.
///
/// `unit` is zero when one ratio part already exceeds the matching side; the
/// result is then empty and callers must treat it as a failure.
pub fn max_size_for_ratio(resolution: Resolution, ratio: Ratio) -> Resolution {
    let unit = cmp::min(
        resolution.width / ratio.width(),
        resolution.height / ratio.height(),
    );
    Resolution::new(unit * ratio.width(), unit * ratio.height())
}

/// Crop `image` to the largest exact `ratio` that fits it.
///
/// Consumes the input and returns a new `Image` around a new handle. An empty
/// target is reported as [`PipelineError::DegenerateCrop`].
pub async fn crop_by_ratio(image: Image, ratio: Ratio) -> PipelineResult<Image> {
    let resolution = image.data.read_metadata().await?;
    let target = max_size_for_ratio(resolution, ratio);

    if target.is_empty() {
        return Err(PipelineError::DegenerateCrop {
            file_name: image.file_name,
            resolution,
            ratio,
        });
    }

    tracing::trace!("  Crop {}: {} -> {}", image.file_name, resolution, target);
    let data = image.data.resize(target);
    Ok(Image::new(image.file_name, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::RATIOS;
    use crate::testing::MockImage;

    fn ratio(w: u32, h: u32) -> Ratio {
        Ratio::new(w, h).unwrap()
    }

    #[test]
    fn test_gcd_is_symmetric() {
        for (a, b) in [(1920, 1080), (7, 3), (12, 18), (1, 100)] {
            assert_eq!(gcd(a, b), gcd(b, a));
        }
    }

    #[test]
    fn test_gcd_of_equal_operands() {
        assert_eq!(gcd(42, 42), Ok(42));
        assert_eq!(gcd(1, 1), Ok(1));
    }

    #[test]
    fn test_gcd_values() {
        assert_eq!(gcd(1920, 1080), Ok(120));
        assert_eq!(gcd(17, 5), Ok(1));
    }

    #[test]
    fn test_gcd_rejects_zero() {
        assert_eq!(gcd(0, 5), Err(GeometryError::NonPositive(0, 5)));
        assert!(gcd(5, 0).is_err());
        assert!(gcd(0, 0).is_err());
    }

    #[test]
    fn test_reduce_to_ratio() {
        assert_eq!(reduce_to_ratio(1920, 1080).unwrap(), ratio(16, 9));
        assert_eq!(reduce_to_ratio(2560, 1600).unwrap(), ratio(16, 10).reduced());
        assert_eq!(reduce_to_ratio(1080, 1080).unwrap(), ratio(1, 1));
    }

    #[test]
    fn test_max_size_square_in_landscape() {
        let got = max_size_for_ratio(Resolution::new(1920, 1080), ratio(1, 1));
        assert_eq!(got, Resolution::new(1080, 1080));
    }

    #[test]
    fn test_max_size_ultra_wide_in_4k() {
        // unit = min(3840 / 21, 2160 / 9) = min(182, 240) = 182
        let got = max_size_for_ratio(Resolution::new(3840, 2160), ratio(21, 9));
        assert_eq!(got, Resolution::new(3822, 1638));
    }

    #[test]
    fn test_max_size_degenerate_unit() {
        let got = max_size_for_ratio(Resolution::new(20, 8), ratio(21, 9));
        assert!(got.is_empty());
    }

    #[test]
    fn test_max_size_fits_and_keeps_ratio_for_presets() {
        let sources = [(1920, 1080), (1080, 1920), (4000, 3000), (333, 777)];
        for &(ratio, _) in RATIOS {
            for (w, h) in sources {
                let got = max_size_for_ratio(Resolution::new(w, h), ratio);
                assert!(got.width <= w && got.height <= h);
                if !got.is_empty() {
                    assert_eq!(
                        reduce_to_ratio(got.width, got.height).unwrap(),
                        ratio.reduced()
                    );
                }
            }
        }
    }

    #[tokio::test]
    async fn test_crop_by_ratio_returns_new_image() {
        let image = Image::new("a.png", Box::new(MockImage::new(1920, 1080)));
        let cropped = crop_by_ratio(image, ratio(1, 1)).await.unwrap();
        assert_eq!(cropped.file_name, "a.png");
        assert_eq!(
            cropped.data.read_metadata().await.unwrap(),
            Resolution::new(1080, 1080)
        );
    }

    #[tokio::test]
    async fn test_crop_by_ratio_rejects_degenerate() {
        let image = Image::new("tiny.png", Box::new(MockImage::new(10, 4)));
        let err = crop_by_ratio(image, ratio(21, 9)).await.unwrap_err();
        assert!(matches!(err, PipelineError::DegenerateCrop { .. }));
    }

    #[tokio::test]
    async fn test_crop_by_ratio_propagates_metadata_failure() {
        let image = Image::new("bad.png", Box::new(MockImage::broken_metadata()));
        let err = crop_by_ratio(image, ratio(4, 3)).await.unwrap_err();
        assert!(matches!(err, PipelineError::Metadata { .. }));
    }
}
