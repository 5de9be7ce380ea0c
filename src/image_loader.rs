//! Cover image loading
//!
//! Decodes a cover file with the `image` crate and converts it to the
//! premultiplied RGBA pixmap the raster compositor samples from.

use crate::error::{ImageError, RenderError, Result};
use crate::paint::pixmap::new_pixmap;
use image::DynamicImage;
use log::debug;
use std::path::Path;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Reads and decodes the cover image at `path`.
pub fn load_cover(path: &Path) -> Result<Pixmap> {
  let label = path.display().to_string();
  let bytes = std::fs::read(path).map_err(|e| ImageError::LoadFailed {
    path: label.clone(),
    reason: e.to_string(),
  })?;
  decode_cover(&bytes, &label)
}

/// Decodes an in-memory cover image; `label` names it in errors.
pub fn decode_cover(bytes: &[u8], label: &str) -> Result<Pixmap> {
  let image = image::load_from_memory(bytes).map_err(|e| ImageError::DecodeFailed {
    path: label.to_string(),
    reason: e.to_string(),
  })?;
  debug!("decoded cover {label}: {}x{}", image.width(), image.height());
  image_to_pixmap(&image)
}

/// Converts straight RGBA to a premultiplied pixmap.
pub fn image_to_pixmap(image: &DynamicImage) -> Result<Pixmap> {
  let rgba = image.to_rgba8();
  let (width, height) = rgba.dimensions();
  let mut pixmap = new_pixmap(width, height, "cover")?;
  for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
    let [r, g, b, a] = src.0;
    let premultiply = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    *dst = PremultipliedColorU8::from_rgba(premultiply(r), premultiply(g), premultiply(b), a)
      .ok_or_else(|| RenderError::InvalidParameters {
        message: format!("cover pixel ({r}, {g}, {b}, {a}) does not premultiply"),
      })?;
  }
  Ok(pixmap)
}
