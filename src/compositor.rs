//! The compositing collaborator the render driver talks to.
//!
//! A [`Compositor`] owns a stack of layers above a base layer. Painting a
//! quad pushes a new layer; every adjustment acts on the topmost layer (the
//! base when the stack is empty); [`Compositor::composite_down`] merges the
//! top layer into the one below it. The driver in [`crate::renderer`] is the
//! only code that decides the order of these calls.

use crate::book::Face;
use crate::color::Rgba;
use crate::config::RenderStyle;
use crate::error::Result;
use crate::geometry::PixelRect;
use crate::scene::Quad;
use serde::{Deserialize, Serialize};

/// Texture filtering for [`Compositor::paint_quad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampling {
  /// Hard edges, nearest texel
  Nearest,
  /// Anti-aliased edges, bilinear texels
  Smooth,
}

/// Square max/min filter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Morphology {
  Grow,
  Shrink,
}

/// What to paint into a quad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRegion {
  /// A pixel rectangle of the cover texture
  Cover(PixelRect),
  /// A flat colour
  Solid(Rgba),
}

/// Canvas operations issued by the render driver.
///
/// Every call either succeeds or aborts the render; callers never retry.
pub trait Compositor {
  /// Warps `source` into `target` (texture top-left, top-right, bottom-right,
  /// bottom-left) on a new layer.
  fn paint_quad(&mut self, source: &SourceRegion, target: &Quad, sampling: Sampling) -> Result<()>;

  /// Merges the top layer into the layer below, honoring its opacity.
  fn composite_down(&mut self) -> Result<()>;

  /// Clamps the top layer's output brightness to `[0, max_output]`.
  fn apply_levels_clamp(&mut self, max_output: u8) -> Result<()>;

  fn apply_blur(&mut self, radius: f32) -> Result<()>;

  fn apply_morphology(&mut self, op: Morphology, radius: u32) -> Result<()>;

  /// Sets the top layer's opacity in percent (0..=100).
  fn set_layer_opacity(&mut self, percent: u8) -> Result<()>;

  /// Floods the top layer with `color`.
  fn fill_solid(&mut self, color: Rgba) -> Result<()>;
}

/// How the cover image maps onto the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverLayout {
  /// A jacket laid out as back cover | spine | front cover
  #[default]
  Wrap,
  /// Only the front cover; back and spine get the solid cover colour
  FrontOnly,
}

/// Pixel dimensions of the cover image and how it wraps the book.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverTexture {
  pub width: u32,
  pub height: u32,
  pub layout: CoverLayout,
  /// Physical cover width (inches)
  pub book_width: f64,
  /// Physical spine depth (inches)
  pub spine_width: f64,
}

impl CoverTexture {
  pub fn new(width: u32, height: u32, layout: CoverLayout, book_width: f64, spine_width: f64) -> Self {
    Self {
      width,
      height,
      layout,
      book_width,
      spine_width,
    }
  }

  /// Source region painted onto `face`.
  ///
  /// In a wrap layout each cover face takes the texture columns proportional
  /// to its physical width out of `2 * book_width + spine_width`.
  pub fn region(&self, face: Face, style: &RenderStyle) -> SourceRegion {
    match (face, self.layout) {
      (Face::Top | Face::Side, _) => SourceRegion::Solid(style.page_color),
      (Face::Front, CoverLayout::FrontOnly) => {
        SourceRegion::Cover(PixelRect::new(0, 0, self.width, self.height))
      }
      (Face::Back | Face::Spine, CoverLayout::FrontOnly) => SourceRegion::Solid(style.cover_color),
      (_, CoverLayout::Wrap) => {
        let [spine_start, front_start] = self.wrap_columns();
        let (x0, x1) = match face {
          Face::Back => (0, spine_start),
          Face::Spine => (spine_start, front_start),
          _ => (front_start, self.width),
        };
        SourceRegion::Cover(PixelRect::new(x0, 0, x1.saturating_sub(x0), self.height))
      }
    }
  }

  /// First texture column of the spine and of the front cover.
  fn wrap_columns(&self) -> [u32; 2] {
    let total = 2.0 * self.book_width + self.spine_width;
    let column = |inches: f64| -> u32 {
      if !(total > 0.0) {
        return 0;
      }
      ((inches / total) * self.width as f64).round().clamp(0.0, self.width as f64) as u32
    };
    [
      column(self.book_width),
      column(self.book_width + self.spine_width),
    ]
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wrap_splits_columns_by_physical_width() {
    let cover = CoverTexture::new(1300, 900, CoverLayout::Wrap, 6.0, 1.0);
    let style = RenderStyle::default();
    assert_eq!(
      cover.region(Face::Back, &style),
      SourceRegion::Cover(PixelRect::new(0, 0, 600, 900))
    );
    assert_eq!(
      cover.region(Face::Spine, &style),
      SourceRegion::Cover(PixelRect::new(600, 0, 100, 900))
    );
    assert_eq!(
      cover.region(Face::Front, &style),
      SourceRegion::Cover(PixelRect::new(700, 0, 600, 900))
    );
  }

  #[test]
  fn front_only_paints_back_and_spine_solid() {
    let cover = CoverTexture::new(600, 900, CoverLayout::FrontOnly, 6.0, 1.0);
    let style = RenderStyle::default();
    assert_eq!(
      cover.region(Face::Front, &style),
      SourceRegion::Cover(PixelRect::new(0, 0, 600, 900))
    );
    assert_eq!(
      cover.region(Face::Spine, &style),
      SourceRegion::Solid(style.cover_color)
    );
    assert_eq!(cover.region(Face::Top, &style), SourceRegion::Solid(style.page_color));
    assert_eq!(cover.region(Face::Side, &style), SourceRegion::Solid(style.page_color));
  }
}
