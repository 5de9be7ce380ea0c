//! Ground shadow of the book on the `y = 0` plane.

use crate::book::{CornerSet, Face, FaceNormals};
use crate::math::Vector3;

/// Projects `point` onto the ground plane along `light`.
///
/// The direction's sign does not matter. A horizontal light never reaches
/// the ground, so the point is flattened instead.
pub fn project_to_ground(point: Vector3, light: Vector3) -> Vector3 {
  if light.y == 0.0 {
    return Vector3::new(point.x, 0.0, point.z);
  }
  point - light.scale(point.y / light.y)
}

/// Ground shadows of all eight corners, index for index.
pub fn shadow_corners(corners: &CornerSet, light: Vector3) -> CornerSet {
  CornerSet(corners.0.map(|c| project_to_ground(c, light)))
}

/// Faces whose shadows make up the ground shadow: those facing the light.
///
/// The light is taken from above the ground whichever way `light` points, so
/// at most three faces of the box qualify.
pub fn shadow_faces(normals: &FaceNormals, light: Vector3) -> Vec<Face> {
  let toward_light = if light.y < 0.0 { -light } else { light };
  Face::ALL
    .into_iter()
    .filter(|face| normals.get(*face).dot(&toward_light) > 0.0)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::book::BookModel;

  #[test]
  fn straight_down_light_drops_height() {
    let book = BookModel::new(6.0, 9.0, 1.0, 2.0, 35.0);
    for k in [1.0, 0.25, 40.0] {
      let shadows = shadow_corners(&book.scene, Vector3::new(0.0, -k, 0.0));
      for i in 0..8 {
        let c = book.scene[i];
        assert!(shadows[i].approx_eq(&Vector3::new(c.x, 0.0, c.z), 1e-12));
      }
    }
  }

  #[test]
  fn oblique_light_lands_on_ground_along_the_ray() {
    let light = Vector3::new(1.0, 2.0, -0.5);
    let p = Vector3::new(0.5, 4.0, 2.0);
    let s = project_to_ground(p, light);
    assert!(s.y.abs() < 1e-12);
    // p - s is parallel to the light direction.
    assert!((p - s).cross(&light).length() < 1e-12);
    assert_eq!(project_to_ground(p, -light), s);
  }

  #[test]
  fn horizontal_light_flattens() {
    let s = project_to_ground(Vector3::new(1.0, 5.0, 2.0), Vector3::new(1.0, 0.0, 0.0));
    assert_eq!(s, Vector3::new(1.0, 0.0, 2.0));
  }

  #[test]
  fn at_most_three_faces_cast_the_shadow() {
    let book = BookModel::new(6.0, 9.0, 1.0, 0.0, 20.0);
    let normals = FaceNormals::compute(&book.scene);
    let faces = shadow_faces(&normals, Vector3::new(-1.0, 2.0, -1.5));
    assert!(!faces.is_empty() && faces.len() <= 3);
    assert!(faces.contains(&Face::Top));
    assert_eq!(
      shadow_faces(&normals, Vector3::new(0.0, -3.0, 0.0)),
      vec![Face::Top]
    );
  }
}
