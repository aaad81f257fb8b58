use image::{DynamicImage, GrayImage};
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// Pages larger than this on either side are scaled down before recognition.
pub const MAX_PAGE_SIDE: u32 = 2800;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Load a page scan, normalize it, and return PNG bytes ready for the engine.
pub fn prepare_for_ocr(path: &Path) -> Result<Vec<u8>, PreprocessError> {
    let img = image::open(path)?;
    let page = normalize_page(img);
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(page)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Downscale oversized pages, convert to grayscale and stretch contrast to
/// the full 0..=255 range.
fn normalize_page(img: DynamicImage) -> GrayImage {
    let img = if img.width() > MAX_PAGE_SIDE || img.height() > MAX_PAGE_SIDE {
        img.resize(MAX_PAGE_SIDE, MAX_PAGE_SIDE, image::imageops::FilterType::Lanczos3)
    } else {
        img
    };

    let mut gray = img.to_luma8();
    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    if hi == lo {
        return gray;
    }

    let range = u32::from(hi - lo);
    for p in gray.pixels_mut() {
        p[0] = (u32::from(p[0] - lo) * 255 / range) as u8;
    }
    gray
}
