//! Back-to-front face ordering.
//!
//! The book is convex apart from the slightly opened covers, so the set of
//! visible faces and their paint order depend only on the yaw. Later faces
//! are painted over earlier ones; there is no depth buffer.

use crate::book::Face;
use serde::Serialize;
use std::ops::Deref;

use Face::{Back, Front, Side, Spine, Top};

/// Faces to paint, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderOrder(&'static [Face]);

impl RenderOrder {
  pub fn faces(&self) -> &'static [Face] {
    self.0
  }

  pub fn contains(&self, face: Face) -> bool {
    self.0.contains(&face)
  }
}

impl Deref for RenderOrder {
  type Target = [Face];

  fn deref(&self) -> &[Face] {
    self.0
  }
}

/// Paint order for a normalized yaw `angle` in `(-180, 180]` and half of the
/// partial-open angle.
///
/// Near ±90° the cover that is almost edge-on is either skipped (−90) or
/// painted under the other cover (+90) inside a band of `half_open` degrees,
/// since the opened cover may still show there.
pub fn render_order(angle: f64, half_open: f64) -> RenderOrder {
  let h = half_open.abs();
  let faces: &'static [Face] = if angle < -90.0 - h {
    &[Side, Top, Back]
  } else if angle <= -90.0 + h {
    &[Side, Top]
  } else if angle < 0.0 {
    &[Side, Top, Front]
  } else if angle == 0.0 {
    &[Top, Front]
  } else if angle < 90.0 - h {
    &[Top, Spine, Front]
  } else if angle < 90.0 + h {
    &[Top, Spine, Back, Front]
  } else if angle <= 180.0 - h {
    &[Top, Spine, Back]
  } else {
    &[Side, Top, Spine, Back]
  };
  RenderOrder(faces)
}
