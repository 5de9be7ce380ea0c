//! Output-levels adjustment.

use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Remaps every colour channel from `[0, 255]` onto `[0, max_output]`.
///
/// Alpha is untouched. Scaling premultiplied channels is the same as scaling
/// the straight colour, so no unpremultiply round trip is needed.
pub fn clamp_output_levels(pixmap: &mut Pixmap, max_output: u8) {
  if max_output == u8::MAX {
    return;
  }
  let mut table = [0u8; 256];
  for (value, out) in table.iter_mut().enumerate() {
    *out = ((value as u32 * max_output as u32 + 127) / 255) as u8;
  }
  for px in pixmap.pixels_mut() {
    let r = table[px.red() as usize];
    let g = table[px.green() as usize];
    let b = table[px.blue() as usize];
    *px = PremultipliedColorU8::from_rgba(r, g, b, px.alpha()).unwrap_or(*px);
  }
}
