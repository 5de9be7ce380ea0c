use bookmockup::compositor::{Compositor, CoverLayout, CoverTexture, Morphology, Sampling, SourceRegion};
use bookmockup::error::{Error, RenderError};
use bookmockup::{render_book, BookConfig, BookScene, Face, PixelRect, Quad, RenderStyle, Result, Rgba};

#[derive(Debug, Clone, PartialEq)]
enum Call {
  Paint(SourceRegion, Quad, Sampling),
  Composite,
  Levels(u8),
  Blur(f32),
  Morph(Morphology, u32),
  Opacity(u8),
  Fill(Rgba),
}

#[derive(Default)]
struct Recorder {
  calls: Vec<Call>,
}

impl Compositor for Recorder {
  fn paint_quad(&mut self, source: &SourceRegion, target: &Quad, sampling: Sampling) -> Result<()> {
    self.calls.push(Call::Paint(*source, *target, sampling));
    Ok(())
  }
  fn composite_down(&mut self) -> Result<()> {
    self.calls.push(Call::Composite);
    Ok(())
  }
  fn apply_levels_clamp(&mut self, max_output: u8) -> Result<()> {
    self.calls.push(Call::Levels(max_output));
    Ok(())
  }
  fn apply_blur(&mut self, radius: f32) -> Result<()> {
    self.calls.push(Call::Blur(radius));
    Ok(())
  }
  fn apply_morphology(&mut self, op: Morphology, radius: u32) -> Result<()> {
    self.calls.push(Call::Morph(op, radius));
    Ok(())
  }
  fn set_layer_opacity(&mut self, percent: u8) -> Result<()> {
    self.calls.push(Call::Opacity(percent));
    Ok(())
  }
  fn fill_solid(&mut self, color: Rgba) -> Result<()> {
    self.calls.push(Call::Fill(color));
    Ok(())
  }
}

fn face_calls(scene: &BookScene, cover: &CoverTexture, style: &RenderStyle) -> Vec<Call> {
  let mut calls = Vec::new();
  for &face in scene.render_order().iter() {
    let source = cover.region(face, style);
    let quad = scene.face_quad(face);
    calls.push(Call::Paint(source, quad, Sampling::Nearest));
    calls.push(Call::Paint(source, quad, Sampling::Smooth));
    calls.push(Call::Composite);
    if scene.level(face) < 255 {
      calls.push(Call::Levels(scene.level(face)));
    }
    calls.push(Call::Composite);
  }
  calls
}

#[test]
fn full_sequence_with_background_and_shadow() {
  let scene = BookScene::compute(&BookConfig::default()).unwrap();
  let cover = CoverTexture::new(1300, 900, CoverLayout::Wrap, 6.0, 1.0);
  let style = RenderStyle {
    background: Some(Rgba::WHITE),
    ..RenderStyle::default()
  };
  let mut recorder = Recorder::default();
  render_book(&scene, &cover, &style, &mut recorder).unwrap();

  let mut expected = vec![Call::Fill(Rgba::WHITE)];
  let shadow = SourceRegion::Solid(style.shadow_color);
  let quads = scene.shadow_quads();
  assert!(!quads.is_empty());
  for (i, quad) in quads.iter().enumerate() {
    expected.push(Call::Paint(shadow, *quad, Sampling::Nearest));
    if i > 0 {
      expected.push(Call::Composite);
    }
  }
  expected.extend([
    Call::Morph(Morphology::Grow, style.shadow_seam),
    Call::Morph(Morphology::Shrink, style.shadow_seam),
    Call::Blur(style.shadow_blur),
    Call::Opacity(style.shadow_opacity),
    Call::Composite,
  ]);
  expected.extend(face_calls(&scene, &cover, &style));

  assert_eq!(recorder.calls, expected);
}

#[test]
fn no_shadow_no_background_paints_faces_only() {
  let scene = BookScene::compute(&BookConfig::default().with_angles(-40.0, 10.0)).unwrap();
  let cover = CoverTexture::new(600, 900, CoverLayout::FrontOnly, 6.0, 1.0);
  let style = RenderStyle {
    shadow: false,
    ..RenderStyle::default()
  };
  let mut recorder = Recorder::default();
  render_book(&scene, &cover, &style, &mut recorder).unwrap();
  assert_eq!(recorder.calls, face_calls(&scene, &cover, &style));
  assert_eq!(
    recorder.calls[0],
    Call::Paint(
      SourceRegion::Solid(style.page_color),
      scene.face_quad(Face::Side),
      Sampling::Nearest
    )
  );
}

#[test]
fn front_face_samples_the_front_of_the_wrap() {
  let scene = BookScene::compute(&BookConfig::default().with_angles(0.0, 20.0)).unwrap();
  let cover = CoverTexture::new(1300, 900, CoverLayout::Wrap, 6.0, 1.0);
  let style = RenderStyle {
    shadow: false,
    ..RenderStyle::default()
  };
  let mut recorder = Recorder::default();
  render_book(&scene, &cover, &style, &mut recorder).unwrap();
  let front = Call::Paint(
    SourceRegion::Cover(PixelRect::new(700, 0, 600, 900)),
    scene.face_quad(Face::Front),
    Sampling::Smooth,
  );
  assert!(recorder.calls.contains(&front));
}

struct Failing;

impl Compositor for Failing {
  fn paint_quad(&mut self, _: &SourceRegion, _: &Quad, _: Sampling) -> Result<()> {
    Err(Error::Render(RenderError::PaintFailed {
      operation: "paint_quad".to_string(),
    }))
  }
  fn composite_down(&mut self) -> Result<()> {
    Ok(())
  }
  fn apply_levels_clamp(&mut self, _: u8) -> Result<()> {
    Ok(())
  }
  fn apply_blur(&mut self, _: f32) -> Result<()> {
    Ok(())
  }
  fn apply_morphology(&mut self, _: Morphology, _: u32) -> Result<()> {
    Ok(())
  }
  fn set_layer_opacity(&mut self, _: u8) -> Result<()> {
    Ok(())
  }
  fn fill_solid(&mut self, _: Rgba) -> Result<()> {
    Ok(())
  }
}

#[test]
fn compositor_errors_propagate() {
  let scene = BookScene::compute(&BookConfig::default()).unwrap();
  let cover = CoverTexture::new(10, 10, CoverLayout::Wrap, 6.0, 1.0);
  let err = render_book(&scene, &cover, &RenderStyle::default(), &mut Failing).unwrap_err();
  assert!(matches!(err, Error::Render(RenderError::PaintFailed { .. })));
}
