use rayon::prelude::*;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Normalized gaussian weights for `sigma`, spanning `ceil(3σ)` on each side.
pub(crate) fn gaussian_kernel(sigma: f32) -> (Vec<f32>, usize) {
  let radius = (sigma.abs() * 3.0).ceil() as usize;
  if radius == 0 || !sigma.is_finite() {
    return (Vec::new(), 0);
  }

  let two_sigma_sq = 2.0 * sigma * sigma;
  let mut kernel: Vec<f32> = (0..=radius * 2)
    .map(|i| {
      let x = i as f32 - radius as f32;
      (-x * x / two_sigma_sq).exp()
    })
    .collect();
  let sum: f32 = kernel.iter().sum();
  if sum > 0.0 {
    for k in &mut kernel {
      *k /= sum;
    }
  }
  (kernel, radius)
}

/// Separable gaussian blur over premultiplied pixels; edges clamp.
pub fn gaussian_blur(pixmap: &mut Pixmap, sigma: f32) {
  let (kernel, radius) = gaussian_kernel(sigma);
  if kernel.is_empty() {
    return;
  }

  let width = pixmap.width() as usize;
  let height = pixmap.height() as usize;
  let src: Vec<[f32; 4]> = pixmap
    .pixels()
    .iter()
    .map(|p| [p.red() as f32, p.green() as f32, p.blue() as f32, p.alpha() as f32])
    .collect();

  let convolve = |sample: &dyn Fn(isize) -> [f32; 4]| {
    let mut accum = [0.0f32; 4];
    for (i, weight) in kernel.iter().enumerate() {
      let s = sample(i as isize - radius as isize);
      for c in 0..4 {
        accum[c] += s[c] * weight;
      }
    }
    accum
  };

  // Horizontal pass
  let mut temp = vec![[0.0f32; 4]; src.len()];
  temp
    .par_chunks_mut(width)
    .enumerate()
    .for_each(|(y, row)| {
      let line = &src[y * width..(y + 1) * width];
      for (x, out) in row.iter_mut().enumerate() {
        *out = convolve(&|offset| {
          line[(x as isize + offset).clamp(0, width as isize - 1) as usize]
        });
      }
    });

  // Vertical pass
  pixmap
    .pixels_mut()
    .par_chunks_mut(width)
    .enumerate()
    .for_each(|(y, row)| {
      for (x, out) in row.iter_mut().enumerate() {
        let v = convolve(&|offset| {
          temp[(y as isize + offset).clamp(0, height as isize - 1) as usize * width + x]
        });
        let a = v[3].round().clamp(0.0, 255.0) as u8;
        let channel = |c: f32| (c.round().clamp(0.0, 255.0) as u8).min(a);
        *out = PremultipliedColorU8::from_rgba(channel(v[0]), channel(v[1]), channel(v[2]), a)
          .unwrap_or(PremultipliedColorU8::TRANSPARENT);
      }
    });
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kernel_is_normalized_and_symmetric() {
    let (kernel, radius) = gaussian_kernel(2.0);
    assert_eq!(radius, 6);
    assert_eq!(kernel.len(), 13);
    assert!((kernel.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    assert_eq!(kernel[0], kernel[12]);
    assert!(kernel[6] > kernel[5]);
  }

  #[test]
  fn zero_sigma_is_a_no_op() {
    let mut pixmap = Pixmap::new(3, 3).unwrap();
    pixmap.pixels_mut()[4] = PremultipliedColorU8::from_rgba(9, 9, 9, 9).unwrap();
    let before = pixmap.data().to_vec();
    gaussian_blur(&mut pixmap, 0.0);
    assert_eq!(pixmap.data(), &before[..]);
  }

  #[test]
  fn blur_spreads_a_single_pixel() {
    let mut pixmap = Pixmap::new(9, 9).unwrap();
    let white = PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap();
    pixmap.pixels_mut()[4 * 9 + 4] = white;
    gaussian_blur(&mut pixmap, 1.0);
    let center = pixmap.pixels()[4 * 9 + 4];
    let neighbor = pixmap.pixels()[4 * 9 + 5];
    assert!(center.alpha() < 255);
    assert!(neighbor.alpha() > 0 && neighbor.alpha() < center.alpha());
    assert_eq!(pixmap.pixels()[0].alpha(), 0);
  }
}
