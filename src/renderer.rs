//! Book mockup renderer
//!
//! This module drives a [`Compositor`] through one render.
//!
//! # Pipeline
//!
//! 1. **Scene**: [`BookConfig`] → [`BookScene`] (geometry, paint order, lighting)
//! 2. **Background**: flood the base layer when a background colour is set
//! 3. **Shadow**: paint the shadow quads, close their seams, blur, fade
//! 4. **Faces**: paint each visible face back to front, darkened by its level
//! 5. **Encode**: Pixmap → PNG

use crate::book::lighting::FULL_LEVEL;
use crate::compositor::{Compositor, CoverLayout, CoverTexture, Morphology, Sampling, SourceRegion};
use crate::config::{BookConfig, RenderStyle};
use crate::error::Result;
use crate::image_output::{self, OutputFormat};
use crate::paint::raster::RasterCompositor;
use crate::scene::BookScene;
use log::{debug, trace};
use tiny_skia::Pixmap;

/// Issues the full compositing sequence for `scene` to `compositor`.
///
/// Compositor errors abort the render and are returned as is.
pub fn render_book<C: Compositor + ?Sized>(
  scene: &BookScene,
  cover: &CoverTexture,
  style: &RenderStyle,
  compositor: &mut C,
) -> Result<()> {
  if let Some(background) = style.background {
    trace!("fill background {background}");
    compositor.fill_solid(background)?;
  }

  if style.shadow {
    render_shadow(scene, style, compositor)?;
  }

  for &face in scene.render_order().iter() {
    let source = cover.region(face, style);
    let quad = scene.face_quad(face);
    let level = scene.level(face);
    trace!("paint {face} {source:?} into {quad:?}, level {level}");

    compositor.paint_quad(&source, &quad, Sampling::Nearest)?;
    compositor.paint_quad(&source, &quad, Sampling::Smooth)?;
    compositor.composite_down()?;
    if level < FULL_LEVEL {
      compositor.apply_levels_clamp(level)?;
    }
    compositor.composite_down()?;
  }

  Ok(())
}

fn render_shadow<C: Compositor + ?Sized>(
  scene: &BookScene,
  style: &RenderStyle,
  compositor: &mut C,
) -> Result<()> {
  let quads = scene.shadow_quads();
  let Some((first, rest)) = quads.split_first() else {
    debug!("no shadow quads; skipping shadow");
    return Ok(());
  };
  trace!("paint {} shadow quads", quads.len());

  let source = SourceRegion::Solid(style.shadow_color);
  compositor.paint_quad(&source, first, Sampling::Nearest)?;
  for quad in rest {
    compositor.paint_quad(&source, quad, Sampling::Nearest)?;
    compositor.composite_down()?;
  }
  compositor.apply_morphology(Morphology::Grow, style.shadow_seam)?;
  compositor.apply_morphology(Morphology::Shrink, style.shadow_seam)?;
  compositor.apply_blur(style.shadow_blur)?;
  compositor.set_layer_opacity(style.shadow_opacity)?;
  compositor.composite_down()
}

/// Renders book mockups from a cover pixmap with the raster compositor.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
  config: BookConfig,
  style: RenderStyle,
  layout: CoverLayout,
}

impl Renderer {
  pub fn new(config: BookConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub fn with_style(mut self, style: RenderStyle) -> Self {
    self.style = style;
    self
  }

  pub fn with_layout(mut self, layout: CoverLayout) -> Self {
    self.layout = layout;
    self
  }

  pub fn config(&self) -> &BookConfig {
    &self.config
  }

  /// Computes the scene without painting anything.
  pub fn scene(&self) -> Result<BookScene> {
    BookScene::compute(&self.config)
  }

  /// Renders onto a fresh canvas of the configured output size.
  pub fn render(&self, cover: &Pixmap) -> Result<Pixmap> {
    let scene = self.scene()?;
    debug!(
      "rendering {}x{} mockup from {}x{} cover at {:.2} px/in",
      self.config.output_width,
      self.config.output_height,
      cover.width(),
      cover.height(),
      scene.scale()
    );

    let texture = CoverTexture::new(
      cover.width(),
      cover.height(),
      self.layout,
      self.config.book_width,
      self.config.spine_width,
    );
    let mut compositor =
      RasterCompositor::new(self.config.output_width, self.config.output_height, cover)?;
    render_book(&scene, &texture, &self.style, &mut compositor)?;
    compositor.finish()
  }

  pub fn render_to_png(&self, cover: &Pixmap) -> Result<Vec<u8>> {
    let pixmap = self.render(cover)?;
    image_output::encode_image(&pixmap, OutputFormat::Png)
  }
}
