use crate::math::Matrix4;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D point or direction.
///
/// The type does not distinguish points from directions; callers track which
/// one they hold. All operations return new values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
  pub x: f64,
  pub y: f64,
  pub z: f64,
}

impl Vector3 {
  pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
  /// Width axis.
  pub const X: Self = Self::new(1.0, 0.0, 0.0);
  /// Height axis.
  pub const Y: Self = Self::new(0.0, 1.0, 0.0);
  /// Depth axis.
  pub const Z: Self = Self::new(0.0, 0.0, 1.0);

  pub const fn new(x: f64, y: f64, z: f64) -> Self {
    Self { x, y, z }
  }

  #[inline]
  pub fn dot(&self, other: &Vector3) -> f64 {
    self.x * other.x + self.y * other.y + self.z * other.z
  }

  /// Cross product `self × other`.
  #[inline]
  pub fn cross(&self, other: &Vector3) -> Vector3 {
    Vector3::new(
      self.y * other.z - self.z * other.y,
      self.z * other.x - self.x * other.z,
      self.x * other.y - self.y * other.x,
    )
  }

  /// Cross product of two edges sharing `self` as origin: `(a − self) × (b − self)`.
  ///
  /// Used to derive a face normal from three corners of that face.
  #[inline]
  pub fn cross2(&self, a: &Vector3, b: &Vector3) -> Vector3 {
    (*a - *self).cross(&(*b - *self))
  }

  #[inline]
  pub fn length(&self) -> f64 {
    self.dot(self).sqrt()
  }

  /// Unit vector in the same direction, or the zero vector if the length is zero.
  ///
  /// Never divides by zero; callers that need a direction must check the result.
  pub fn normalize(&self) -> Vector3 {
    let len = self.length();
    if !(len > 0.0) {
      return Vector3::ZERO;
    }
    self.scale(1.0 / len)
  }

  /// Component-wise sum; `a.plus(&b) == a + b`.
  #[inline]
  pub fn plus(&self, other: &Vector3) -> Vector3 {
    Vector3::new(self.x + other.x, self.y + other.y, self.z + other.z)
  }

  #[inline]
  pub fn subtract(&self, other: &Vector3) -> Vector3 {
    Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
  }

  /// Multiply every component by `s`.
  #[inline]
  pub fn scale(&self, s: f64) -> Vector3 {
    Vector3::new(self.x * s, self.y * s, self.z * s)
  }

  /// Component-wise product.
  #[inline]
  pub fn scale_by(&self, other: &Vector3) -> Vector3 {
    Vector3::new(self.x * other.x, self.y * other.y, self.z * other.z)
  }

  /// Transform this point by `m`, including the perspective divide by `w`.
  #[inline]
  pub fn apply(&self, m: &Matrix4) -> Vector3 {
    m.transform_point(*self)
  }

  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
  }

  /// Returns true if every component differs from `other` by at most `eps`.
  pub fn approx_eq(&self, other: &Vector3, eps: f64) -> bool {
    (self.x - other.x).abs() <= eps
      && (self.y - other.y).abs() <= eps
      && (self.z - other.z).abs() <= eps
  }
}

impl From<[f64; 3]> for Vector3 {
  fn from(v: [f64; 3]) -> Self {
    Vector3::new(v[0], v[1], v[2])
  }
}

impl From<Vector3> for [f64; 3] {
  fn from(v: Vector3) -> Self {
    [v.x, v.y, v.z]
  }
}

impl Add for Vector3 {
  type Output = Vector3;
  fn add(self, rhs: Vector3) -> Vector3 {
    self.plus(&rhs)
  }
}

impl Sub for Vector3 {
  type Output = Vector3;
  fn sub(self, rhs: Vector3) -> Vector3 {
    self.subtract(&rhs)
  }
}

impl Neg for Vector3 {
  type Output = Vector3;
  fn neg(self) -> Vector3 {
    Vector3::new(-self.x, -self.y, -self.z)
  }
}

impl Mul<f64> for Vector3 {
  type Output = Vector3;
  fn mul(self, s: f64) -> Vector3 {
    self.scale(s)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const EPS: f64 = 1e-12;

  #[test]
  fn normalize_zero_is_zero() {
    assert_eq!(Vector3::ZERO.normalize(), Vector3::ZERO);
  }

  #[test]
  fn normalize_has_unit_length() {
    let n = Vector3::new(3.0, -4.0, 12.0).normalize();
    assert!((n.length() - 1.0).abs() < EPS);
    assert!(n.approx_eq(&Vector3::new(3.0 / 13.0, -4.0 / 13.0, 12.0 / 13.0), EPS));
  }

  #[test]
  fn cross_follows_right_hand_rule() {
    assert_eq!(Vector3::X.cross(&Vector3::Y), Vector3::Z);
    assert_eq!(Vector3::Y.cross(&Vector3::Z), Vector3::X);
    assert_eq!(Vector3::Z.cross(&Vector3::X), Vector3::Y);
  }

  #[test]
  fn cross2_uses_shared_origin() {
    let origin = Vector3::new(1.0, 1.0, 1.0);
    let a = Vector3::new(2.0, 1.0, 1.0);
    let b = Vector3::new(1.0, 2.0, 1.0);
    assert_eq!(origin.cross2(&a, &b), Vector3::Z);
  }

  #[test]
  fn component_wise_scale() {
    let v = Vector3::new(1.0, 2.0, 3.0).scale_by(&Vector3::new(2.0, 0.5, -1.0));
    assert_eq!(v, Vector3::new(2.0, 1.0, -3.0));
  }

  #[test]
  fn operators_match_methods() {
    let a = Vector3::new(1.0, -2.0, 0.5);
    let b = Vector3::new(0.25, 4.0, -1.0);
    assert_eq!(a + b, a.plus(&b));
    assert_eq!(a - b, a.subtract(&b));
    assert_eq!(a * 3.0, a.scale(3.0));
    assert_eq!(-a, a.scale(-1.0));
  }
}
