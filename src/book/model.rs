use crate::math::{Matrix4, Vector3};
use serde::Serialize;
use std::ops::Index;

/// The eight corners of the book, indexed by axis bit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerSet(pub [Vector3; 8]);

impl CornerSet {
  /// Applies `m` to every corner.
  pub fn transform(&self, m: &Matrix4) -> CornerSet {
    CornerSet(self.0.map(|c| c.apply(m)))
  }

  pub fn iter(&self) -> impl Iterator<Item = &Vector3> {
    self.0.iter()
  }
}

impl Index<usize> for CornerSet {
  type Output = Vector3;

  fn index(&self, index: usize) -> &Vector3 {
    &self.0[index]
  }
}

/// Hinge transforms for a book opened by `open_angle` degrees in total.
///
/// The front cover swings by `-open/2` about the spine edge; the back cover
/// swings by `+open/2` about the same edge and is then pushed back by the
/// spine depth.
pub fn hinge_matrices(open_angle: f64, depth: f64) -> (Matrix4, Matrix4) {
  let half = open_angle / 2.0;
  let front = Matrix4::rotation(Vector3::Y.scale(-half));
  let back = Matrix4::rotation(Vector3::Y.scale(half))
    .then(&Matrix4::translation(Vector3::Z.scale(depth)));
  (front, back)
}

/// Model-space corners of a `width × height × depth` book with hinged covers.
pub fn build_corners(width: f64, height: f64, depth: f64, open_angle: f64) -> CornerSet {
  let (front, back) = hinge_matrices(open_angle, depth);
  let fore_bottom = Vector3::new(width, 0.0, 0.0);
  let fore_top = Vector3::new(width, height, 0.0);

  CornerSet([
    Vector3::ZERO,
    fore_bottom.apply(&front),
    Vector3::new(0.0, height, 0.0),
    fore_top.apply(&front),
    Vector3::new(0.0, 0.0, depth),
    fore_bottom.apply(&back),
    Vector3::new(0.0, height, depth),
    fore_top.apply(&back),
  ])
}

/// The book in model space and turned into the scene by its yaw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookModel {
  pub model: CornerSet,
  /// Corners after the yaw turn, before any camera transform
  pub scene: CornerSet,
}

impl BookModel {
  /// Builds the hinged box and turns it by `yaw` degrees about the height axis.
  pub fn new(width: f64, height: f64, depth: f64, open_angle: f64, yaw: f64) -> Self {
    let model = build_corners(width, height, depth, open_angle);
    let turn = Matrix4::rotation(Vector3::Y.scale(yaw));
    Self {
      model,
      scene: model.transform(&turn),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::book::{Face, FaceNormals};

  const EPS: f64 = 1e-9;

  #[test]
  fn closed_book_is_an_axis_aligned_box() {
    let c = build_corners(6.0, 9.0, 1.0, 0.0);
    for i in 0..8 {
      let expected = Vector3::new(
        if i & 1 != 0 { 6.0 } else { 0.0 },
        if i & 2 != 0 { 9.0 } else { 0.0 },
        if i & 4 != 0 { 1.0 } else { 0.0 },
      );
      assert!(c[i].approx_eq(&expected, EPS), "corner {i}: {:?}", c[i]);
    }
  }

  #[test]
  fn spine_corners_ignore_the_hinge() {
    let open = build_corners(6.0, 9.0, 1.0, 20.0);
    let closed = build_corners(6.0, 9.0, 1.0, 0.0);
    for i in [0, 2, 4, 6] {
      assert_eq!(open[i], closed[i]);
    }
  }

  #[test]
  fn covers_open_away_from_each_other() {
    let c = build_corners(6.0, 9.0, 1.0, 20.0);
    // Front cover swings toward -z, back cover toward +z beyond the spine depth.
    assert!(c[1].z < 0.0 && c[3].z < 0.0);
    assert!(c[5].z > 1.0 && c[7].z > 1.0);
    let expected = 6.0 * 10f64.to_radians().sin();
    assert!((c[1].z + expected).abs() < EPS);
    assert!((c[5].z - 1.0 - expected).abs() < EPS);
    // Cover width is preserved by the hinge.
    assert!(((c[1] - c[0]).length() - 6.0).abs() < EPS);
    assert!(((c[7] - c[6]).length() - 6.0).abs() < EPS);
  }

  #[test]
  fn normals_point_outward_for_an_unturned_book() {
    let book = BookModel::new(6.0, 9.0, 1.0, 2.0, 0.0);
    let n = FaceNormals::compute(&book.scene);
    assert!(n.get(Face::Front).z < 0.0);
    assert!(n.get(Face::Back).z > 0.0);
    assert!(n.get(Face::Spine).x < 0.0);
    assert!(n.get(Face::Top).y > 0.0);
    assert!(n.get(Face::Side).x > 0.0);
  }

  #[test]
  fn turn_preserves_heights_and_distances() {
    let book = BookModel::new(6.0, 9.0, 1.0, 4.0, 73.0);
    for i in 0..8 {
      assert!((book.scene[i].y - book.model[i].y).abs() < EPS);
      assert!((book.scene[i].length() - book.model[i].length()).abs() < EPS);
    }
  }
}
