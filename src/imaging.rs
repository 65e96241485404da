use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageDecoder, ImageReader};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Error;

/// Target box for slideshow frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

/// Largest size with the same aspect ratio as `width`×`height` that fits in `screen`.
/// Small images are scaled up as well.
pub fn fit_within(width: u32, height: u32, screen: ScreenSize) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (screen.width, screen.height);
    }
    let ratio = f64::min(
        screen.width as f64 / width as f64,
        screen.height as f64 / height as f64,
    );
    let w = ((width as f64 * ratio).round() as u32).clamp(1, screen.width);
    let h = ((height as f64 * ratio).round() as u32).clamp(1, screen.height);
    (w, h)
}

/// Decode `source` upright, following its EXIF orientation tag.
fn open_upright(source: &Path) -> Result<DynamicImage, Error> {
    let mut decoder = ImageReader::open(source)?
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut img = DynamicImage::from_decoder(decoder)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Decode `source`, scale it to fit `screen` and write it as a JPEG at `dest`.
pub fn render_slide(
    source: &Path,
    dest: &Path,
    screen: ScreenSize,
    quality: u8,
) -> Result<(), Error> {
    let img = open_upright(source)?;
    let (w, h) = fit_within(img.width(), img.height(), screen);
    let resized = img.resize_exact(w, h, FilterType::Triangle);

    let mut out = BufWriter::new(File::create(dest)?);
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    // JPEG has no alpha channel.
    DynamicImage::ImageRgb8(resized.to_rgb8()).write_with_encoder(encoder)?;
    out.flush()?;
    Ok(())
}
