//! Lambertian face shading from a single distant light.

use crate::book::{Face, FaceNormals};
use crate::math::Vector3;
use serde::Serialize;

/// Level meaning "paint the face as is".
pub const FULL_LEVEL: u8 = 255;

/// Ambient + diffuse directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
  /// Direction pointing toward the light; normalized on construction
  pub direction: Vector3,
  pub ambient: f64,
  pub diffuse: f64,
}

impl Lighting {
  pub fn new(direction: Vector3, ambient: f64, diffuse: f64) -> Self {
    Self {
      direction: direction.normalize(),
      ambient,
      diffuse,
    }
  }

  /// Unclamped `ambient + diffuse * max(0, L·n̂)` for an (unnormalized) normal.
  pub fn raw_intensity(&self, normal: Vector3) -> f64 {
    let cos = self.direction.dot(&normal.normalize()).max(0.0);
    self.ambient + self.diffuse * cos
  }

  /// Brightness in `[0, 1]` of a surface with normal `normal`.
  pub fn intensity(&self, normal: Vector3) -> f64 {
    self.raw_intensity(normal).clamp(0.0, 1.0)
  }

  /// Output level for `normal`, see [`level_for_intensity`].
  pub fn level(&self, normal: Vector3) -> u8 {
    level_for_intensity(self.raw_intensity(normal))
  }
}

/// Maps a raw brightness to a displayable level in `0..=255`.
///
/// 255 is reserved for brightness of at least 1: anything darker that would
/// round up to 255 is held at 254 so it still gets its levels adjustment.
pub fn level_for_intensity(raw: f64) -> u8 {
  if raw >= 1.0 {
    return FULL_LEVEL;
  }
  if !(raw > 0.0) {
    return 0;
  }
  let level = (raw * 255.0).round();
  level.min(254.0) as u8
}

/// Output level of every face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaceLevels([u8; 5]);

impl FaceLevels {
  pub fn compute(lighting: &Lighting, normals: &FaceNormals) -> Self {
    let mut levels = [FULL_LEVEL; 5];
    for face in Face::ALL {
      levels[face.index()] = lighting.level(normals.get(face));
    }
    Self(levels)
  }

  pub fn get(&self, face: Face) -> u8 {
    self.0[face.index()]
  }
}
