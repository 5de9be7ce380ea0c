//! 4×4 homogeneous transforms.
//!
//! Coefficients are stored in **column-major** order, `m[col * 4 + row]`,
//! and points are transformed as row vectors:
//! ```text
//! [x' y' z' w'] = [x y z 1] · M
//! ```
//! so the translation lives in row 3 and `a.then(&b)` (the plain product
//! `a · b`) applies `a` before `b`.

use crate::math::Vector3;
use serde::{Deserialize, Serialize};

/// Rotations smaller than this (in degrees) are treated as the identity.
pub const ROTATION_EPSILON_DEG: f64 = 1e-4;

const W_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
  pub m: [f64; 16],
}

impl Default for Matrix4 {
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl Matrix4 {
  pub const IDENTITY: Self = Self {
    m: [
      1.0, 0.0, 0.0, 0.0, //
      0.0, 1.0, 0.0, 0.0, //
      0.0, 0.0, 1.0, 0.0, //
      0.0, 0.0, 0.0, 1.0,
    ],
  };

  /// Coefficient at `row`, `col`.
  #[inline]
  pub fn get(&self, row: usize, col: usize) -> f64 {
    self.m[col * 4 + row]
  }

  #[inline]
  fn set(&mut self, row: usize, col: usize, value: f64) {
    self.m[col * 4 + row] = value;
  }

  /// Rotation about the axis of `axis_angle` by its length in degrees.
  ///
  /// Builds the Rodrigues matrix for the normalized axis. Returns the identity
  /// when the angle is below [`ROTATION_EPSILON_DEG`], which also avoids
  /// normalizing a near-zero axis.
  pub fn rotation(axis_angle: Vector3) -> Self {
    let degrees = axis_angle.length();
    if !(degrees >= ROTATION_EPSILON_DEG) {
      return Self::IDENTITY;
    }
    let k = axis_angle.scale(1.0 / degrees);
    let (s, c) = degrees.to_radians().sin_cos();
    let t = 1.0 - c;

    let mut out = Self::IDENTITY;
    out.set(0, 0, c + k.x * k.x * t);
    out.set(0, 1, k.x * k.y * t - k.z * s);
    out.set(0, 2, k.x * k.z * t + k.y * s);
    out.set(1, 0, k.x * k.y * t + k.z * s);
    out.set(1, 1, c + k.y * k.y * t);
    out.set(1, 2, k.y * k.z * t - k.x * s);
    out.set(2, 0, k.x * k.z * t - k.y * s);
    out.set(2, 1, k.y * k.z * t + k.x * s);
    out.set(2, 2, c + k.z * k.z * t);
    out
  }

  /// Non-uniform scale along each axis.
  pub fn scale(factors: Vector3) -> Self {
    let mut out = Self::IDENTITY;
    out.set(0, 0, factors.x);
    out.set(1, 1, factors.y);
    out.set(2, 2, factors.z);
    out
  }

  /// Translation by `offset`.
  pub fn translation(offset: Vector3) -> Self {
    let mut out = Self::IDENTITY;
    out.set(3, 0, offset.x);
    out.set(3, 1, offset.y);
    out.set(3, 2, offset.z);
    out
  }

  /// Perspective divide for a camera `factor` units in front of the origin.
  ///
  /// Sets `w = 1 + z / factor`, so applying it scales a point by
  /// `factor / (factor + z)`.
  pub fn perspective(factor: f64) -> Self {
    let mut out = Self::IDENTITY;
    out.set(2, 3, 1.0 / factor);
    out
  }

  /// Matrix product `self · other`: applies `self` first, then `other`.
  pub fn then(&self, other: &Matrix4) -> Matrix4 {
    let mut out = Matrix4 { m: [0.0; 16] };
    for row in 0..4 {
      for col in 0..4 {
        let mut sum = 0.0;
        for k in 0..4 {
          sum += self.get(row, k) * other.get(k, col);
        }
        out.set(row, col, sum);
      }
    }
    out
  }

  /// Composes two transforms so that `a` is applied before `b`.
  pub fn compose(a: &Matrix4, b: &Matrix4) -> Matrix4 {
    a.then(b)
  }

  /// Transforms a point and divides by the resulting `w`.
  ///
  /// A vanishing `w` leaves the undivided coordinates; the projection
  /// pipeline rejects such configurations before they get here.
  pub fn transform_point(&self, p: Vector3) -> Vector3 {
    let x = p.x * self.get(0, 0) + p.y * self.get(1, 0) + p.z * self.get(2, 0) + self.get(3, 0);
    let y = p.x * self.get(0, 1) + p.y * self.get(1, 1) + p.z * self.get(2, 1) + self.get(3, 1);
    let z = p.x * self.get(0, 2) + p.y * self.get(1, 2) + p.z * self.get(2, 2) + self.get(3, 2);
    let w = p.x * self.get(0, 3) + p.y * self.get(1, 3) + p.z * self.get(2, 3) + self.get(3, 3);
    if w.abs() < W_EPSILON || (w - 1.0).abs() < f64::EPSILON {
      Vector3::new(x, y, z)
    } else {
      Vector3::new(x / w, y / w, z / w)
    }
  }

  pub fn approx_eq(&self, other: &Matrix4, eps: f64) -> bool {
    self
      .m
      .iter()
      .zip(other.m.iter())
      .all(|(a, b)| (a - b).abs() <= eps)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const EPS: f64 = 1e-9;

  #[test]
  fn tiny_rotation_is_identity() {
    for v in [
      Vector3::ZERO,
      Vector3::new(0.0, 5e-5, 0.0),
      Vector3::new(3e-5, -3e-5, 2e-5),
    ] {
      assert_eq!(Matrix4::rotation(v), Matrix4::IDENTITY);
    }
  }

  #[test]
  fn positive_yaw_swings_width_axis_toward_depth() {
    let r = Matrix4::rotation(Vector3::new(0.0, 90.0, 0.0));
    let p = Vector3::X.apply(&r);
    assert!(p.approx_eq(&Vector3::new(0.0, 0.0, 1.0), EPS), "{p:?}");
    let q = Vector3::Z.apply(&r);
    assert!(q.approx_eq(&Vector3::new(-1.0, 0.0, 0.0), EPS), "{q:?}");
  }

  #[test]
  fn positive_tilt_tips_height_axis_toward_viewer() {
    let r = Matrix4::rotation(Vector3::new(30.0, 0.0, 0.0));
    let up = Vector3::Y.apply(&r);
    assert!(up.z < 0.0);
    assert!((up.length() - 1.0).abs() < EPS);
  }

  #[test]
  fn rotation_round_trip_restores_point() {
    let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
    let forward = Matrix4::rotation(axis.scale(37.5));
    let back = Matrix4::rotation(axis.scale(-37.5));
    let p = Vector3::new(4.0, -1.5, 9.0);
    let q = p.apply(&forward.then(&back));
    assert!(q.approx_eq(&p, EPS), "{q:?}");
  }

  #[test]
  fn then_applies_left_operand_first() {
    let t = Matrix4::translation(Vector3::new(1.0, 0.0, 0.0));
    let r = Matrix4::rotation(Vector3::new(0.0, 0.0, 90.0));
    // Translate to (1,0,0) first, then rotate about z.
    let p = Vector3::ZERO.apply(&t.then(&r));
    let expected = Vector3::new(1.0, 0.0, 0.0).apply(&r);
    assert!(p.approx_eq(&expected, EPS));
    // The other order leaves the rotated origin at the origin, then translates.
    let p = Vector3::ZERO.apply(&Matrix4::compose(&r, &t));
    assert!(p.approx_eq(&Vector3::new(1.0, 0.0, 0.0), EPS));
  }

  #[test]
  fn scale_and_translation() {
    let m = Matrix4::scale(Vector3::new(2.0, 3.0, -1.0))
      .then(&Matrix4::translation(Vector3::new(0.5, 0.0, 1.0)));
    let p = Vector3::new(1.0, 1.0, 1.0).apply(&m);
    assert_eq!(p, Vector3::new(2.5, 3.0, 0.0));
  }

  #[test]
  fn perspective_divide_by_w() {
    let mut m = Matrix4::IDENTITY;
    // w = 1 + z
    m.m[14] = 1.0;
    let p = Vector3::new(2.0, 4.0, 1.0).apply(&m);
    assert!(p.approx_eq(&Vector3::new(1.0, 2.0, 0.5), EPS));
  }
}
