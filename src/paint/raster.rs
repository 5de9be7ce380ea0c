//! [`Compositor`] implementation on `tiny-skia` pixmaps.

use crate::color::Rgba;
use crate::compositor::{Compositor, Morphology, Sampling, SourceRegion};
use crate::error::{RenderError, Result};
use crate::geometry::IntPoint;
use crate::paint::blur::gaussian_blur;
use crate::paint::levels::clamp_output_levels;
use crate::paint::morphology::apply_morphology;
use crate::paint::pixmap::new_pixmap;
use crate::paint::projective_warp::warp_into;
use crate::scene::Quad;
use log::trace;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};

struct Layer {
  pixmap: Pixmap,
  /// Percent, 0..=100
  opacity: u8,
}

/// Layered raster canvas that samples quads from one cover image.
pub struct RasterCompositor<'a> {
  base: Pixmap,
  layers: Vec<Layer>,
  cover: &'a Pixmap,
}

impl<'a> RasterCompositor<'a> {
  /// Creates a transparent `width × height` canvas painting from `cover`.
  pub fn new(width: u32, height: u32, cover: &'a Pixmap) -> Result<Self> {
    Ok(Self {
      base: new_pixmap(width, height, "canvas")?,
      layers: Vec::new(),
      cover,
    })
  }

  pub fn width(&self) -> u32 {
    self.base.width()
  }

  pub fn height(&self) -> u32 {
    self.base.height()
  }

  /// Number of layers stacked above the base.
  pub fn layer_count(&self) -> usize {
    self.layers.len()
  }

  /// The layer adjustments currently apply to.
  pub fn top(&self) -> &Pixmap {
    self.layers.last().map(|l| &l.pixmap).unwrap_or(&self.base)
  }

  fn top_mut(&mut self) -> &mut Pixmap {
    match self.layers.last_mut() {
      Some(layer) => &mut layer.pixmap,
      None => &mut self.base,
    }
  }

  /// Composites every remaining layer and returns the canvas.
  pub fn finish(mut self) -> Result<Pixmap> {
    while !self.layers.is_empty() {
      self.composite_down()?;
    }
    Ok(self.base)
  }

  fn fill_quad(&self, target: &mut Pixmap, color: Rgba, quad: &Quad, sampling: Sampling) {
    let mut pb = PathBuilder::new();
    pb.move_to(quad[0].x as f32, quad[0].y as f32);
    for p in &quad[1..] {
      pb.line_to(p.x as f32, p.y as f32);
    }
    pb.close();
    let Some(path) = pb.finish() else {
      trace!("solid quad {quad:?} is empty");
      return;
    };
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = sampling == Sampling::Smooth;
    target.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
  }
}

impl Compositor for RasterCompositor<'_> {
  fn paint_quad(&mut self, source: &SourceRegion, target: &Quad, sampling: Sampling) -> Result<()> {
    let mut layer = new_pixmap(self.width(), self.height(), "layer")?;
    match source {
      SourceRegion::Solid(color) => self.fill_quad(&mut layer, *color, target, sampling),
      SourceRegion::Cover(rect) => {
        let quad = target.map(IntPoint::to_point);
        if !warp_into(&mut layer, self.cover, *rect, &quad, sampling) {
          trace!("cover region {rect:?} into {quad:?} painted nothing");
        }
      }
    }
    self.layers.push(Layer {
      pixmap: layer,
      opacity: 100,
    });
    Ok(())
  }

  fn composite_down(&mut self) -> Result<()> {
    let layer = self.layers.pop().ok_or(RenderError::NoLayer {
      operation: "composite_down",
    })?;
    let paint = PixmapPaint {
      opacity: layer.opacity as f32 / 100.0,
      ..PixmapPaint::default()
    };
    self
      .top_mut()
      .draw_pixmap(0, 0, layer.pixmap.as_ref(), &paint, Transform::identity(), None);
    Ok(())
  }

  fn apply_levels_clamp(&mut self, max_output: u8) -> Result<()> {
    clamp_output_levels(self.top_mut(), max_output);
    Ok(())
  }

  fn apply_blur(&mut self, radius: f32) -> Result<()> {
    if !radius.is_finite() || radius < 0.0 {
      return Err(
        RenderError::InvalidParameters {
          message: format!("blur radius {radius}"),
        }
        .into(),
      );
    }
    gaussian_blur(self.top_mut(), radius);
    Ok(())
  }

  fn apply_morphology(&mut self, op: Morphology, radius: u32) -> Result<()> {
    apply_morphology(self.top_mut(), op, radius);
    Ok(())
  }

  fn set_layer_opacity(&mut self, percent: u8) -> Result<()> {
    if percent > 100 {
      return Err(
        RenderError::InvalidParameters {
          message: format!("layer opacity {percent}% is above 100%"),
        }
        .into(),
      );
    }
    let layer = self.layers.last_mut().ok_or(RenderError::NoLayer {
      operation: "set_layer_opacity",
    })?;
    layer.opacity = percent;
    Ok(())
  }

  fn fill_solid(&mut self, color: Rgba) -> Result<()> {
    self.top_mut().fill(color.to_skia());
    Ok(())
  }
}
