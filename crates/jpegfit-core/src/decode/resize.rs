//! Image resizing for the dimension bound and the shrink rounds.
//!
//! All dimension arithmetic is integer-truncating, and no output side is ever
//! smaller than one pixel.

use image::RgbImage;

use super::FilterType;

/// Resize an image to exact dimensions.
///
/// Returns a clone when the dimensions already match.
pub fn resize(image: &RgbImage, width: u32, height: u32, filter: FilterType) -> RgbImage {
    let (width, height) = (width.max(1), height.max(1));
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    image::imageops::resize(image, width, height, filter.to_image_filter())
}

/// Resize an image so its larger side is at most `max_edge`, preserving aspect ratio.
///
/// Images that already fit are returned unchanged without copying.
pub fn resize_to_fit(image: RgbImage, max_edge: u32, filter: FilterType) -> RgbImage {
    let (width, height) = image.dimensions();
    match fit_dimensions(width, height, max_edge) {
        Some((new_width, new_height)) => {
            log::debug!(
                "bounding {}x{} to {}x{} (max edge {})",
                width,
                height,
                new_width,
                new_height,
                max_edge
            );
            resize(&image, new_width, new_height, filter)
        }
        None => image,
    }
}

/// Calculate dimensions that bring the larger side down to exactly `max_edge`.
///
/// Returns `None` when the image already fits. The smaller side is scaled by
/// the same ratio and truncated.
pub fn fit_dimensions(width: u32, height: u32, max_edge: u32) -> Option<(u32, u32)> {
    let larger = width.max(height);
    if larger <= max_edge {
        return None;
    }

    let scale = |side: u32| -> u32 {
        if side == larger {
            max_edge.max(1)
        } else {
            ((side as u64 * max_edge as u64) / larger as u64).max(1) as u32
        }
    };
    Some((scale(width), scale(height)))
}

/// Scale both dimensions by `numerator / denominator`, truncating.
pub fn scale_dimensions(width: u32, height: u32, numerator: u32, denominator: u32) -> (u32, u32) {
    let scale = |side: u32| -> u32 {
        ((side as u64 * numerator as u64) / denominator.max(1) as u64).max(1) as u32
    };
    (scale(width), scale(height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> RgbImage {
        // Simple gradient image for testing
        RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([
                ((x * 255) / width.max(1)) as u8,
                ((y * 255) / height.max(1)) as u8,
                128,
            ])
        })
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Lanczos3);
        assert_eq!(resized.dimensions(), (50, 25));
        assert_eq!(resized.as_raw().len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear);
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_zero_clamps_to_one() {
        let img = create_test_image(10, 10);
        let resized = resize(&img, 0, 5, FilterType::Bilinear);
        assert_eq!(resized.dimensions(), (1, 5));
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_image(3000, 2000);
        let resized = resize_to_fit(img, 2000, FilterType::Lanczos3);
        assert_eq!(resized.dimensions(), (2000, 1333));
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50);
        let resized = resize_to_fit(img.clone(), 256, FilterType::Lanczos3);
        assert_eq!(resized, img);
    }

    #[test]
    fn test_fit_dimensions_landscape() {
        assert_eq!(fit_dimensions(6000, 4000, 2560), Some((2560, 1706)));
    }

    #[test]
    fn test_fit_dimensions_portrait() {
        assert_eq!(fit_dimensions(4000, 6000, 2560), Some((1706, 2560)));
    }

    #[test]
    fn test_fit_dimensions_square() {
        assert_eq!(fit_dimensions(4000, 4000, 256), Some((256, 256)));
    }

    #[test]
    fn test_fit_dimensions_exact_bound_is_noop() {
        assert_eq!(fit_dimensions(2000, 1000, 2000), None);
        assert_eq!(fit_dimensions(100, 50, 2000), None);
    }

    #[test]
    fn test_fit_dimensions_extreme_aspect() {
        // Thin side never collapses to zero
        assert_eq!(fit_dimensions(10_000, 1, 100), Some((100, 1)));
    }

    #[test]
    fn test_scale_dimensions_shrink_round() {
        assert_eq!(scale_dimensions(600, 600, 4, 5), (480, 480));
        assert_eq!(scale_dimensions(480, 480, 4, 5), (384, 384));
        assert_eq!(scale_dimensions(2000, 1333, 4, 5), (1600, 1066));
        assert_eq!(scale_dimensions(1, 1, 4, 5), (1, 1));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the larger side lands exactly on the bound.
        #[test]
        fn prop_fit_hits_bound_exactly(
            width in 1u32..=20_000,
            height in 1u32..=20_000,
            max_edge in 1u32..=5_000,
        ) {
            match fit_dimensions(width, height, max_edge) {
                Some((w, h)) => {
                    prop_assert_eq!(w.max(h), max_edge);
                    prop_assert!(w >= 1 && h >= 1);
                    prop_assert!(w <= width && h <= height);
                }
                None => prop_assert!(width.max(height) <= max_edge),
            }
        }

        /// Property: a shrink round never grows either side and strictly
        /// shrinks any side of five pixels or more.
        #[test]
        fn prop_scale_is_monotonic(width in 1u32..=20_000, height in 1u32..=20_000) {
            let (w, h) = scale_dimensions(width, height, 4, 5);
            prop_assert!(w <= width && h <= height);
            if width >= 5 {
                prop_assert!(w < width);
            }
            if height >= 5 {
                prop_assert!(h < height);
            }
        }
    }
}
