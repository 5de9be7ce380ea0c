//! Core 2D geometry types for screen space
//!
//! Projected book corners live in canvas pixel space. The coordinate system
//! has its origin at the top-left corner of the output canvas:
//! - Positive X extends to the right
//! - Positive Y extends downward

use serde::{Deserialize, Serialize};

/// A 2D point in screen space (unrounded)
///
/// # Examples
///
/// ```
/// use bookmockup::Point;
///
/// let p = Point::new(10.0, 20.0).translate(Point::new(5.0, -5.0));
/// assert_eq!(p, Point::new(15.0, 15.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f64,
  /// Y coordinate (increases downward)
  pub y: f64,
}

impl Point {
  /// The zero point at the origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Translates this point by another point's coordinates
  pub fn translate(self, other: Point) -> Self {
    Self::new(self.x + other.x, self.y + other.y)
  }

  /// Scales both coordinates by the same factor
  pub fn scale(self, factor: f64) -> Self {
    Self::new(self.x * factor, self.y * factor)
  }

  /// Rounds both coordinates to the nearest whole pixel
  pub fn round(self) -> IntPoint {
    IntPoint::new(self.x.round() as i32, self.y.round() as i32)
  }
}

/// A whole-pixel point on the output canvas
///
/// Final projected coordinates are rounded so adjoining warped faces share
/// exact edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntPoint {
  pub x: i32,
  pub y: i32,
}

impl IntPoint {
  /// Creates a new pixel point
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }

  /// Converts to a floating-point [`Point`]
  pub fn to_point(self) -> Point {
    Point::new(self.x as f64, self.y as f64)
  }
}

/// An axis-aligned bounding box given by its extreme coordinates
///
/// # Examples
///
/// ```
/// use bookmockup::{Bounds, Point};
///
/// let b = Bounds::from_points(&[Point::new(1.0, 4.0), Point::new(-2.0, 0.5)]).unwrap();
/// assert_eq!(b.width(), 3.0);
/// assert_eq!(b.height(), 3.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
  pub min_x: f64,
  pub min_y: f64,
  pub max_x: f64,
  pub max_y: f64,
}

impl Bounds {
  /// Computes the tight bounding box of a set of points.
  ///
  /// Returns `None` for an empty set or when any coordinate is non-finite.
  pub fn from_points(points: &[Point]) -> Option<Self> {
    if points.is_empty() {
      return None;
    }
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for p in points {
      if !p.x.is_finite() || !p.y.is_finite() {
        return None;
      }
      min_x = min_x.min(p.x);
      min_y = min_y.min(p.y);
      max_x = max_x.max(p.x);
      max_y = max_y.max(p.y);
    }

    Some(Self {
      min_x,
      min_y,
      max_x,
      max_y,
    })
  }

  pub fn width(&self) -> f64 {
    self.max_x - self.min_x
  }

  pub fn height(&self) -> f64 {
    self.max_y - self.min_y
  }

  /// Returns true if `p` lies inside or on the edge of the box
  pub fn contains(&self, p: Point) -> bool {
    p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
  }
}

/// An integer pixel rectangle inside a source texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}

impl PixelRect {
  pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  pub fn is_empty(&self) -> bool {
    self.width == 0 || self.height == 0
  }

  /// Corners in paste winding order: top-left, top-right, bottom-right, bottom-left.
  pub fn corners(&self) -> [Point; 4] {
    let x0 = self.x as f64;
    let y0 = self.y as f64;
    let x1 = x0 + self.width as f64;
    let y1 = y0 + self.height as f64;
    [
      Point::new(x0, y0),
      Point::new(x1, y0),
      Point::new(x1, y1),
      Point::new(x0, y1),
    ]
  }
}

/// Signed area of a quadrilateral via the shoelace formula.
///
/// Positive for clockwise winding in screen space (Y down).
pub fn quad_signed_area(quad: &[Point; 4]) -> f64 {
  let mut area = 0.0;
  for i in 0..4 {
    let p0 = quad[i];
    let p1 = quad[(i + 1) % 4];
    area += p0.x * p1.y - p1.x * p0.y;
  }
  0.5 * area
}

/// Returns true if the quad is strictly convex with a consistent winding.
///
/// A self-intersecting ("bow-tie") quad or one with a reflex corner fails.
pub fn quad_is_convex(quad: &[Point; 4]) -> bool {
  let mut sign = 0.0f64;
  for i in 0..4 {
    let a = quad[i];
    let b = quad[(i + 1) % 4];
    let c = quad[(i + 2) % 4];
    let cross = (b.x - a.x) * (c.y - b.y) - (b.y - a.y) * (c.x - b.x);
    if !cross.is_finite() || cross == 0.0 {
      return false;
    }
    if sign == 0.0 {
      sign = cross;
    } else if cross * sign < 0.0 {
      return false;
    }
  }
  // A convex winding must also trace the boundary exactly once.
  let turning = quad_signed_area(quad);
  turning != 0.0 && turning.signum() == sign.signum()
}
