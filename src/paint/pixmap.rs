//! Fallible pixmap allocation.
//!
//! `Pixmap::new` aborts the process when the allocator gives up. Canvas and
//! layer sizes come from user config, so every allocation goes through
//! [`new_pixmap`] instead and surfaces as a [`RenderError`].

use crate::error::RenderError;
use tiny_skia::{IntSize, Pixmap};

const BYTES_PER_PIXEL: u64 = 4;
/// Largest single pixmap the renderer will allocate.
pub(crate) const MAX_PIXMAP_BYTES: u64 = 512 * 1024 * 1024;

/// Byte length of a `width × height` RGBA buffer within [`MAX_PIXMAP_BYTES`].
fn buffer_len(width: u32, height: u32, what: &str) -> Result<usize, RenderError> {
  let invalid = |message: String| RenderError::InvalidParameters { message };
  if width == 0 || height == 0 {
    return Err(invalid(format!("{what} has an empty size ({width}x{height})")));
  }
  let bytes = (u64::from(width) * u64::from(height)).saturating_mul(BYTES_PER_PIXEL);
  if bytes > MAX_PIXMAP_BYTES {
    return Err(invalid(format!(
      "{what} of {width}x{height} needs {bytes} bytes, over the {MAX_PIXMAP_BYTES} byte limit"
    )));
  }
  usize::try_from(bytes).map_err(|_| invalid(format!("{what} needs {bytes} bytes")))
}

/// A transparent `width × height` pixmap; `what` names it in errors.
pub(crate) fn new_pixmap(width: u32, height: u32, what: &str) -> Result<Pixmap, RenderError> {
  let len = buffer_len(width, height, what)?;
  let mut data = Vec::new();
  data
    .try_reserve_exact(len)
    .map_err(|e| RenderError::InvalidParameters {
      message: format!("{what}: cannot reserve {len} bytes: {e}"),
    })?;
  data.resize(len, 0);
  IntSize::from_wh(width, height)
    .and_then(|size| Pixmap::from_vec(data, size))
    .ok_or(RenderError::CanvasCreationFailed { width, height })
}
