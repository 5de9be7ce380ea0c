use crate::error::{Error, RenderError, Result};
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::io::Cursor;
use std::path::Path;
use tiny_skia::Pixmap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
  #[default]
  Png,
  Jpeg(u8), // quality 0-100
}

impl OutputFormat {
  /// Picks the format from a file extension; PNG unless it names JPEG.
  pub fn from_path(path: &Path) -> Self {
    match path
      .extension()
      .and_then(|e| e.to_str())
      .map(|e| e.to_ascii_lowercase())
      .as_deref()
    {
      Some("jpg" | "jpeg") => OutputFormat::Jpeg(90),
      _ => OutputFormat::Png,
    }
  }

  fn name(self) -> &'static str {
    match self {
      OutputFormat::Png => "PNG",
      OutputFormat::Jpeg(_) => "JPEG",
    }
  }
}

fn encode_failed(format: OutputFormat, reason: impl ToString) -> Error {
  Error::Render(RenderError::EncodeFailed {
    format: format.name().to_string(),
    reason: reason.to_string(),
  })
}

/// Premultiplied pixmap to straight RGBA.
fn unpremultiplied(pixmap: &Pixmap) -> Vec<u8> {
  let mut rgba = Vec::with_capacity(pixmap.data().len());
  for px in pixmap.pixels() {
    let c = px.demultiply();
    rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
  }
  rgba
}

pub fn encode_image(pixmap: &Pixmap, format: OutputFormat) -> Result<Vec<u8>> {
  let (width, height) = (pixmap.width(), pixmap.height());
  let img = RgbaImage::from_raw(width, height, unpremultiplied(pixmap))
    .ok_or_else(|| encode_failed(format, "pixel buffer does not match dimensions"))?;

  let mut buffer = Vec::new();
  let mut cursor = Cursor::new(&mut buffer);
  match format {
    OutputFormat::Png => {
      img
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|e| encode_failed(format, e))?;
    }
    OutputFormat::Jpeg(quality) => {
      // JPEG has no alpha channel
      let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
      let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality);
      rgb
        .write_with_encoder(encoder)
        .map_err(|e| encode_failed(format, e))?;
    }
  }
  Ok(buffer)
}

/// Encodes `pixmap` in the format implied by `path` and writes it there.
pub fn write_image(pixmap: &Pixmap, path: &Path) -> Result<()> {
  let format = OutputFormat::from_path(path);
  let bytes = encode_image(pixmap, format)?;
  std::fs::write(path, &bytes)?;
  debug!("wrote {} bytes of {} to {}", bytes.len(), format.name(), path.display());
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn png_round_trips_through_image() {
    let mut pixmap = Pixmap::new(3, 2).unwrap();
    pixmap.fill(tiny_skia::Color::from_rgba8(10, 200, 30, 255));
    let bytes = encode_image(&pixmap, OutputFormat::Png).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(2, 1).0, [10, 200, 30, 255]);
  }

  #[test]
  fn format_follows_extension() {
    assert_eq!(OutputFormat::from_path(Path::new("a/b.PNG")), OutputFormat::Png);
    assert_eq!(OutputFormat::from_path(Path::new("mock.jpeg")), OutputFormat::Jpeg(90));
    assert_eq!(OutputFormat::from_path(Path::new("mock")), OutputFormat::Png);
  }
}
