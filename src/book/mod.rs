//! The book as a box: corners, faces, visibility and shading.
//!
//! Corners are indexed by bit pattern: bit 0 selects the width axis, bit 1
//! the height axis and bit 2 the depth axis. Corner 0 is the bottom of the
//! spine edge on the front cover; corner 7 is the top fore-edge corner of the
//! back cover. Faces refer to corners only through the fixed tables in
//! [`Face`].

pub mod lighting;
pub mod model;
pub mod render_order;
pub mod shadow;

pub use lighting::{FaceLevels, Lighting};
pub use model::{BookModel, CornerSet};
pub use render_order::{render_order, RenderOrder};

use crate::math::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A drawable face of the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
  /// Front cover
  Front,
  /// Back cover
  Back,
  /// Spine
  Spine,
  /// Top edge of the page block
  Top,
  /// Fore-edge of the page block
  Side,
}

impl Face {
  pub const ALL: [Face; 5] = [Face::Front, Face::Back, Face::Spine, Face::Top, Face::Side];

  /// Dense index for per-face tables.
  pub const fn index(self) -> usize {
    match self {
      Face::Front => 0,
      Face::Back => 1,
      Face::Spine => 2,
      Face::Top => 3,
      Face::Side => 4,
    }
  }

  /// Corner indices in paste winding order: the texture's top-left,
  /// top-right, bottom-right and bottom-left land on these corners.
  pub const fn quad(self) -> [usize; 4] {
    match self {
      Face::Front => [2, 3, 1, 0],
      Face::Back => [7, 6, 4, 5],
      Face::Spine => [6, 2, 0, 4],
      Face::Top => [6, 7, 3, 2],
      Face::Side => [3, 7, 5, 1],
    }
  }

  /// Corner triple `(origin, a, b)` whose `cross2` points out of the box.
  pub const fn normal_corners(self) -> (usize, usize, usize) {
    match self {
      Face::Front => (0, 2, 1),
      Face::Back => (4, 5, 6),
      Face::Spine => (0, 4, 2),
      Face::Top => (2, 6, 3),
      Face::Side => (1, 3, 5),
    }
  }

  pub const fn name(self) -> &'static str {
    match self {
      Face::Front => "front",
      Face::Back => "back",
      Face::Spine => "spine",
      Face::Top => "top",
      Face::Side => "side",
    }
  }
}

impl fmt::Display for Face {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Outward normal of every face, unnormalized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FaceNormals {
  normals: [Vector3; 5],
}

impl FaceNormals {
  /// Derives normals from a corner set with the fixed per-face winding.
  pub fn compute(corners: &CornerSet) -> Self {
    let mut normals = [Vector3::ZERO; 5];
    for face in Face::ALL {
      let (o, a, b) = face.normal_corners();
      normals[face.index()] = corners[o].cross2(&corners[a], &corners[b]);
    }
    Self { normals }
  }

  pub fn get(&self, face: Face) -> Vector3 {
    self.normals[face.index()]
  }
}
