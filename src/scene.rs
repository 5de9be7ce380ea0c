//! One render's worth of derived geometry.
//!
//! [`BookScene::compute`] is the single entry point of the core: it turns a
//! [`BookConfig`] into projected corners, the face paint order and per-face
//! lighting levels. It is pure; the same config always gives the same scene.

use crate::book::shadow::{shadow_corners, shadow_faces};
use crate::book::{
  render_order, BookModel, CornerSet, Face, FaceLevels, FaceNormals, Lighting, RenderOrder,
};
use crate::config::BookConfig;
use crate::error::Result;
use crate::geometry::{quad_signed_area, IntPoint, Point};
use crate::math::Vector3;
use crate::projection::{self, shadow_index, Projection, POINT_COUNT};
use log::{debug, warn};
use serde::Serialize;

/// Shadow quads covering less than this many square pixels are dropped.
const MIN_SHADOW_AREA: f64 = 0.5;

/// A screen-space quad in paste winding: top-left, top-right, bottom-right,
/// bottom-left of the source texture.
pub type Quad = [IntPoint; 4];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookScene {
  pub book: BookModel,
  /// Ground shadows of the scene corners
  pub shadows: CornerSet,
  pub normals: FaceNormals,
  pub projection: Projection,
  pub render_order: RenderOrder,
  pub levels: FaceLevels,
  /// Faces whose shadows form the ground shadow
  pub shadow_faces: Vec<Face>,
}

impl BookScene {
  /// Validates `config` and derives the scene.
  ///
  /// # Errors
  ///
  /// Returns a config error for invalid dimensions and a geometry error when
  /// any point lands at or behind the camera's focal plane.
  pub fn compute(config: &BookConfig) -> Result<Self> {
    config.validate()?;

    let yaw = config.yaw();
    let open = config.open_angle();
    let book = BookModel::new(
      config.book_width,
      config.book_height,
      config.spine_width,
      open,
      yaw,
    );
    let normals = FaceNormals::compute(&book.scene);

    if config.light_dir.y == 0.0 {
      warn!("light direction {:?} is horizontal; shadow is flattened", config.light_dir);
    }
    let shadows = shadow_corners(&book.scene, config.light_dir);

    let mut points = [Vector3::ZERO; POINT_COUNT];
    for i in 0..8 {
      points[i] = book.scene[i];
      points[shadow_index(i)] = shadows[i];
    }
    let projection = projection::project(&points, config)?;

    let render_order = render_order(yaw, open / 2.0);
    let lighting = Lighting::new(config.light_dir, config.ambient_light, config.diffuse_light);
    let levels = FaceLevels::compute(&lighting, &normals);

    debug!(
      "yaw {:.2}, tilt {:.2}, open {:.2}: render order {:?}",
      yaw,
      config.tilt(),
      open,
      render_order.faces()
    );
    for face in render_order.iter() {
      debug!("{} level {}", face, levels.get(*face));
    }

    Ok(Self {
      book,
      shadows,
      normals,
      projection,
      render_order,
      levels,
      shadow_faces: shadow_faces(&normals, config.light_dir),
    })
  }

  /// Screen corners of `face` in paste winding.
  pub fn face_quad(&self, face: Face) -> Quad {
    face.quad().map(|i| self.projection.point(i))
  }

  /// Screen corners of the shadow cast by `face`.
  pub fn face_shadow_quad(&self, face: Face) -> Quad {
    face.quad().map(|i| self.projection.point(shadow_index(i)))
  }

  /// Distinct, non-degenerate shadow quads in face order (at most three).
  pub fn shadow_quads(&self) -> Vec<Quad> {
    let mut quads: Vec<Quad> = Vec::with_capacity(3);
    for face in &self.shadow_faces {
      let quad = self.face_shadow_quad(*face);
      let area = quad_signed_area(&quad.map(IntPoint::to_point)).abs();
      if area < MIN_SHADOW_AREA {
        continue;
      }
      if quads.iter().any(|q| same_quad(q, &quad)) {
        continue;
      }
      quads.push(quad);
    }
    quads
  }

  pub fn render_order(&self) -> RenderOrder {
    self.render_order
  }

  pub fn level(&self, face: Face) -> u8 {
    self.levels.get(face)
  }

  pub fn normal(&self, face: Face) -> Vector3 {
    self.normals.get(face)
  }

  /// All sixteen canvas points; `8 + i` is the shadow of corner `i`.
  pub fn points(&self) -> &[IntPoint; POINT_COUNT] {
    &self.projection.points
  }

  /// Pixels per inch applied by the canvas fit.
  pub fn scale(&self) -> f64 {
    self.projection.scale
  }

  pub fn offset(&self) -> Point {
    self.projection.offset
  }

  pub fn to_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }
}

/// Same corner set regardless of starting corner or winding.
fn same_quad(a: &Quad, b: &Quad) -> bool {
  a.iter().all(|p| b.contains(p)) && b.iter().all(|p| a.contains(p))
}
