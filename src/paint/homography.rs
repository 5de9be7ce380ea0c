//! Plane-to-plane projective maps.
//!
//! A [`Homography`] is a 3×3 matrix `H`, row-major, sending `(x, y, 1)` to
//! `(x', y', w')`; the mapped point is `(x' / w', y' / w')`. The warp builds
//! one from the four corners of a target quad back to the four corners of a
//! source rect and evaluates it per destination pixel.

use crate::geometry::{quad_signed_area, Point};

const EPSILON: f64 = 1e-9;

/// Quads smaller than this (in square units) have no usable mapping.
const MIN_AREA: f64 = 1e-3;

/// Eight unknowns plus the right-hand side.
type Augmented = [[f64; 9]; 8];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Homography {
  /// Row-major coefficients with `m[8] == 1`
  pub m: [f64; 9],
}

impl Homography {
  pub const IDENTITY: Self = Self {
    m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
  };

  /// Solves for the map taking `from[i]` to `to[i]` for all four corners.
  ///
  /// `None` for non-finite input, a quad with (almost) no area, or three
  /// collinear corners.
  pub fn from_quad_to_quad(from: [Point; 4], to: [Point; 4]) -> Option<Self> {
    let finite = |q: &[Point; 4]| q.iter().all(|p| p.x.is_finite() && p.y.is_finite());
    if !finite(&from) || !finite(&to) {
      return None;
    }
    if quad_signed_area(&from).abs() < MIN_AREA || quad_signed_area(&to).abs() < MIN_AREA {
      return None;
    }

    // Each correspondence (x, y) -> (u, v) gives two rows:
    //   h0 x + h1 y + h2 - h6 x u - h7 y u = u
    //   h3 x + h4 y + h5 - h6 x v - h7 y v = v
    let mut system: Augmented = [[0.0; 9]; 8];
    for (k, (s, t)) in from.iter().zip(to.iter()).enumerate() {
      system[2 * k] = [s.x, s.y, 1.0, 0.0, 0.0, 0.0, -s.x * t.x, -s.y * t.x, t.x];
      system[2 * k + 1] = [0.0, 0.0, 0.0, s.x, s.y, 1.0, -s.x * t.y, -s.y * t.y, t.y];
    }

    let h = solve(system)?;
    Some(Self {
      m: [h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0],
    })
  }

  /// Maps `p`, or `None` where it lands on the line at infinity.
  #[inline]
  pub fn map_point(&self, p: Point) -> Option<Point> {
    let [a, b, c, d, e, f, g, h, i] = self.m;
    let w = g * p.x + h * p.y + i;
    if !(w.abs() >= EPSILON) {
      return None;
    }
    let mapped = Point::new((a * p.x + b * p.y + c) / w, (d * p.x + e * p.y + f) / w);
    (mapped.x.is_finite() && mapped.y.is_finite()).then_some(mapped)
  }
}

/// Gaussian elimination with partial pivoting, then back substitution.
fn solve(mut rows: Augmented) -> Option<[f64; 8]> {
  for col in 0..8 {
    let pivot = (col..8).max_by(|&r1, &r2| rows[r1][col].abs().total_cmp(&rows[r2][col].abs()))?;
    let magnitude = rows[pivot][col].abs();
    if !magnitude.is_finite() || magnitude < EPSILON {
      return None;
    }
    rows.swap(col, pivot);

    let lead = rows[col];
    for row in rows.iter_mut().skip(col + 1) {
      let factor = row[col] / lead[col];
      if factor != 0.0 {
        for (v, l) in row.iter_mut().zip(lead.iter()).skip(col) {
          *v -= factor * l;
        }
      }
    }
  }

  let mut x = [0.0; 8];
  for col in (0..8).rev() {
    let tail: f64 = (col + 1..8).map(|j| rows[col][j] * x[j]).sum();
    x[col] = (rows[col][8] - tail) / rows[col][col];
  }
  x.iter().all(|v| v.is_finite()).then_some(x)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn assert_point_close(actual: Point, expected: Point) {
    assert!(
      (actual.x - expected.x).abs() < 1e-6 && (actual.y - expected.y).abs() < 1e-6,
      "points differ: actual={actual:?} expected={expected:?}"
    );
  }

  fn unit_square() -> [Point; 4] {
    [
      Point::new(0.0, 0.0),
      Point::new(1.0, 0.0),
      Point::new(1.0, 1.0),
      Point::new(0.0, 1.0),
    ]
  }

  #[test]
  fn same_quad_gives_identity() {
    let h = Homography::from_quad_to_quad(unit_square(), unit_square()).unwrap();
    for (a, b) in h.m.iter().zip(Homography::IDENTITY.m.iter()) {
      assert!((a - b).abs() < 1e-9);
    }
  }

  #[test]
  fn corners_map_onto_perspective_quad() {
    let dst = [
      Point::new(10.0, 10.0),
      Point::new(52.0, 11.0),
      Point::new(50.0, 49.0),
      Point::new(9.0, 60.0),
    ];
    let h = Homography::from_quad_to_quad(unit_square(), dst).unwrap();
    for (s, d) in unit_square().iter().zip(dst.iter()) {
      assert_point_close(h.map_point(*s).unwrap(), *d);
    }
    let back = Homography::from_quad_to_quad(dst, unit_square()).unwrap();
    let p = Point::new(0.3, 0.4);
    assert_point_close(back.map_point(h.map_point(p).unwrap()).unwrap(), p);
  }

  #[test]
  fn collapsed_quad_has_no_mapping() {
    let line = [
      Point::new(0.0, 0.0),
      Point::new(1.0, 1.0),
      Point::new(2.0, 2.0),
      Point::new(3.0, 3.0),
    ];
    assert!(Homography::from_quad_to_quad(unit_square(), line).is_none());
  }
}
