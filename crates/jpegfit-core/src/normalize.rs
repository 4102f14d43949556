//! Conversion of decoded input into the opaque working image.
//!
//! JPEG has no alpha channel. Transparent pixels are composited over white so
//! that they do not come out black after the alpha channel is dropped.

use image::{Rgb, RgbImage, RgbaImage};

use crate::decode::SourceImage;

/// Background used when compositing transparent pixels.
pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Convert a decoded source into an opaque RGB working image.
///
/// Sources with an alpha channel or a transparent palette are composited over
/// [`BACKGROUND`] using their own alpha. Everything else is converted to RGB
/// unchanged. Dimensions are preserved.
pub fn normalize(source: SourceImage) -> RgbImage {
    if source.color_mode.needs_flattening() {
        log::debug!(
            "flattening {:?} source {}x{} onto white",
            source.color_mode,
            source.width(),
            source.height()
        );
        flatten(&source.image.into_rgba8())
    } else {
        source.image.into_rgb8()
    }
}

/// Composite an RGBA image over [`BACKGROUND`].
pub fn flatten(rgba: &RgbaImage) -> RgbImage {
    let (width, height) = rgba.dimensions();
    let mut out = RgbImage::new(width, height);

    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let alpha = src[3] as u32;
        for c in 0..3 {
            dst[c] = blend(src[c] as u32, BACKGROUND[c] as u32, alpha);
        }
    }
    out
}

#[inline]
fn blend(fg: u32, bg: u32, alpha: u32) -> u8 {
    ((fg * alpha + bg * (255 - alpha) + 127) / 255) as u8
}
