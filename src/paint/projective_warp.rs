//! Inverse-mapped texture warping into arbitrary quads.

use crate::compositor::Sampling;
use crate::geometry::{Bounds, PixelRect, Point};
use crate::paint::homography::Homography;
use rayon::prelude::*;
use tiny_skia::{Pixmap, PremultipliedColorU8};

const PARALLEL_THRESHOLD: usize = 2048;

/// Subpixel offsets used to estimate edge coverage for smooth sampling.
const COVERAGE_OFFSETS: [f64; 4] = [0.125, 0.375, 0.625, 0.875];

/// Warps `src_rect` of `src` into `quad` on `dst`, overwriting covered pixels.
///
/// `quad` lists where the rect's top-left, top-right, bottom-right and
/// bottom-left land. Returns `false` (and paints nothing) for degenerate
/// input: an empty or out-of-range rect, or a quad with no area.
pub fn warp_into(
  dst: &mut Pixmap,
  src: &Pixmap,
  src_rect: PixelRect,
  quad: &[Point; 4],
  sampling: Sampling,
) -> bool {
  if src_rect.is_empty()
    || src_rect.x.saturating_add(src_rect.width) > src.width()
    || src_rect.y.saturating_add(src_rect.height) > src.height()
  {
    return false;
  }
  let Some(inv) = Homography::from_quad_to_quad(*quad, src_rect.corners()) else {
    return false;
  };
  let Some(bounds) = Bounds::from_points(quad) else {
    return false;
  };

  let width = dst.width() as usize;
  let height = dst.height() as usize;
  let min_x = (bounds.min_x.floor().max(0.0) as usize).min(width);
  let max_x = (bounds.max_x.ceil().max(0.0) as usize).min(width);
  let min_y = (bounds.min_y.floor().max(0.0) as usize).min(height);
  let max_y = (bounds.max_y.ceil().max(0.0) as usize).min(height);
  if min_x >= max_x || min_y >= max_y {
    return false;
  }

  let process_row = |y: usize, row: &mut [PremultipliedColorU8]| {
    for x in min_x..max_x {
      let coverage = match sampling {
        Sampling::Nearest => {
          if point_in_quad(Point::new(x as f64 + 0.5, y as f64 + 0.5), quad) {
            1.0
          } else {
            0.0
          }
        }
        Sampling::Smooth => pixel_coverage(x, y, quad),
      };
      if coverage <= 0.0 {
        continue;
      }
      let Some(s) = inv.map_point(Point::new(x as f64 + 0.5, y as f64 + 0.5)) else {
        continue;
      };
      let sample = match sampling {
        Sampling::Nearest => sample_nearest(src, src_rect, s),
        Sampling::Smooth => sample_bilinear(src, src_rect, s),
      };
      row[x] = scale_color(sample, coverage);
    }
  };

  let rows = &mut dst.pixels_mut()[min_y * width..max_y * width];
  if (max_x - min_x) * (max_y - min_y) > PARALLEL_THRESHOLD {
    rows
      .par_chunks_mut(width)
      .enumerate()
      .for_each(|(i, row)| process_row(min_y + i, row));
  } else {
    for (i, row) in rows.chunks_mut(width).enumerate() {
      process_row(min_y + i, row);
    }
  }
  true
}

/// Point-in-convex-quad test that accepts either winding.
pub(crate) fn point_in_quad(p: Point, quad: &[Point; 4]) -> bool {
  let mut sign = 0.0f64;
  for i in 0..4 {
    let a = quad[i];
    let b = quad[(i + 1) % 4];
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if !cross.is_finite() {
      return false;
    }
    if cross.abs() < 1e-9 {
      continue;
    }
    if sign == 0.0 {
      sign = cross;
      continue;
    }
    if cross * sign < 0.0 {
      return false;
    }
  }
  true
}

/// Fraction of a 4×4 subsample grid inside `quad`.
fn pixel_coverage(x: usize, y: usize, quad: &[Point; 4]) -> f32 {
  let mut inside = 0u32;
  for dy in COVERAGE_OFFSETS {
    for dx in COVERAGE_OFFSETS {
      if point_in_quad(Point::new(x as f64 + dx, y as f64 + dy), quad) {
        inside += 1;
      }
    }
  }
  inside as f32 / 16.0
}

fn scale_color(c: PremultipliedColorU8, coverage: f32) -> PremultipliedColorU8 {
  if coverage >= 1.0 {
    return c;
  }
  let scale = |v: u8| (v as f32 * coverage).round().clamp(0.0, 255.0) as u8;
  PremultipliedColorU8::from_rgba(scale(c.red()), scale(c.green()), scale(c.blue()), scale(c.alpha()))
    .unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

fn texel(src: &Pixmap, x: i64, y: i64, rect: PixelRect) -> PremultipliedColorU8 {
  let x = x.clamp(rect.x as i64, (rect.x + rect.width) as i64 - 1) as u32;
  let y = y.clamp(rect.y as i64, (rect.y + rect.height) as i64 - 1) as u32;
  src
    .pixel(x, y)
    .unwrap_or(PremultipliedColorU8::TRANSPARENT)
}

fn sample_nearest(src: &Pixmap, rect: PixelRect, p: Point) -> PremultipliedColorU8 {
  texel(src, p.x.floor() as i64, p.y.floor() as i64, rect)
}

/// Bilinear sample at `p` (pixel-corner coordinates), clamped to `rect`.
fn sample_bilinear(src: &Pixmap, rect: PixelRect, p: Point) -> PremultipliedColorU8 {
  let x = p.x - 0.5;
  let y = p.y - 0.5;
  let sx0 = x.floor() as i64;
  let sy0 = y.floor() as i64;
  let fx = (x - sx0 as f64) as f32;
  let fy = (y - sy0 as f64) as f32;

  let c00 = texel(src, sx0, sy0, rect);
  let c10 = texel(src, sx0 + 1, sy0, rect);
  let c01 = texel(src, sx0, sy0 + 1, rect);
  let c11 = texel(src, sx0 + 1, sy0 + 1, rect);

  let lerp = |a: f32, b: f32, t: f32| a + (b - a) * t;
  let channel = |get: fn(&PremultipliedColorU8) -> u8| {
    let top = lerp(get(&c00) as f32, get(&c10) as f32, fx);
    let bottom = lerp(get(&c01) as f32, get(&c11) as f32, fx);
    lerp(top, bottom, fy).round().clamp(0.0, 255.0) as u8
  };

  let a = channel(|c| c.alpha());
  // Premultiplied channels never exceed alpha; rounding can push them over.
  let r = channel(|c| c.red()).min(a);
  let g = channel(|c| c.green()).min(a);
  let b = channel(|c| c.blue()).min(a);
  PremultipliedColorU8::from_rgba(r, g, b, a).unwrap_or(PremultipliedColorU8::TRANSPARENT)
}
