//! Square max/min filters.

use crate::compositor::Morphology;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Replaces every pixel with the channel-wise max (grow) or min (shrink)
/// over the `(2r + 1)²` square around it. Edges clamp.
///
/// Premultiplied colour never exceeds alpha, and that still holds for the
/// channel-wise extremes, so the result stays a valid premultiplied pixmap.
pub fn apply_morphology(pixmap: &mut Pixmap, op: Morphology, radius: u32) {
  if radius == 0 {
    return;
  }
  let width = pixmap.width() as usize;
  let height = pixmap.height() as usize;
  let r = radius as usize;
  let pick: fn(u8, u8) -> u8 = match op {
    Morphology::Grow => u8::max,
    Morphology::Shrink => u8::min,
  };
  let fold = |window: &mut dyn Iterator<Item = [u8; 4]>| {
    let mut acc = window.next().unwrap_or([0; 4]);
    for px in window {
      for c in 0..4 {
        acc[c] = pick(acc[c], px[c]);
      }
    }
    acc
  };

  let src: Vec<[u8; 4]> = pixmap
    .pixels()
    .iter()
    .map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
    .collect();

  let mut temp = vec![[0u8; 4]; src.len()];
  for y in 0..height {
    let line = &src[y * width..(y + 1) * width];
    for x in 0..width {
      let lo = x.saturating_sub(r);
      let hi = (x + r).min(width - 1);
      temp[y * width + x] = fold(&mut line[lo..=hi].iter().copied());
    }
  }

  let pixels = pixmap.pixels_mut();
  for y in 0..height {
    let lo = y.saturating_sub(r);
    let hi = (y + r).min(height - 1);
    for x in 0..width {
      let [red, green, blue, alpha] = fold(&mut (lo..=hi).map(|yy| temp[yy * width + x]));
      pixels[y * width + x] = PremultipliedColorU8::from_rgba(red, green, blue, alpha)
        .unwrap_or(PremultipliedColorU8::TRANSPARENT);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn alpha_grid(pixmap: &Pixmap) -> Vec<u8> {
    pixmap.pixels().iter().map(|p| p.alpha()).collect()
  }

  fn dot() -> Pixmap {
    let mut pixmap = Pixmap::new(5, 5).unwrap();
    pixmap.pixels_mut()[12] = PremultipliedColorU8::from_rgba(0, 0, 0, 255).unwrap();
    pixmap
  }

  #[test]
  fn grow_expands_to_a_square() {
    let mut pixmap = dot();
    apply_morphology(&mut pixmap, Morphology::Grow, 1);
    let alpha = alpha_grid(&pixmap);
    for y in 0..5 {
      for x in 0..5 {
        let inside = (1..=3).contains(&x) && (1..=3).contains(&y);
        assert_eq!(alpha[y * 5 + x], if inside { 255 } else { 0 }, "({x}, {y})");
      }
    }
  }

  #[test]
  fn shrink_undoes_grow_for_an_isolated_square() {
    let mut pixmap = dot();
    apply_morphology(&mut pixmap, Morphology::Grow, 1);
    apply_morphology(&mut pixmap, Morphology::Shrink, 1);
    assert_eq!(alpha_grid(&pixmap), alpha_grid(&dot()));
  }

  #[test]
  fn grow_then_shrink_closes_a_one_pixel_gap() {
    let mut pixmap = Pixmap::new(7, 3).unwrap();
    let black = PremultipliedColorU8::from_rgba(0, 0, 0, 255).unwrap();
    for y in 0..3 {
      for x in [0, 1, 2, 4, 5, 6] {
        pixmap.pixels_mut()[y * 7 + x] = black;
      }
    }
    apply_morphology(&mut pixmap, Morphology::Grow, 1);
    apply_morphology(&mut pixmap, Morphology::Shrink, 1);
    assert!(alpha_grid(&pixmap).iter().all(|a| *a == 255));
  }
}
