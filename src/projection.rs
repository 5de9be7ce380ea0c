//! Camera projection and canvas fit.
//!
//! Scene-space points (the eight corners followed by their eight ground
//! shadows) are tilted by the camera, divided for perspective, flipped so
//! scene up is screen down, then scaled and placed on the output canvas. The
//! shadows share the book's scale and placement because all sixteen points
//! go through one fit.

use crate::config::BookConfig;
use crate::error::GeometryError;
use crate::geometry::{Bounds, IntPoint, Point};
use crate::math::{Matrix4, Vector3};
use log::debug;
use serde::Serialize;

/// Number of projected points: 8 corners + 8 shadows.
pub const POINT_COUNT: usize = 16;

/// Index of the shadow of corner `corner`.
pub const fn shadow_index(corner: usize) -> usize {
  8 + corner
}

/// Points at or closer than this to the camera plane cannot be projected.
const FOCAL_PLANE_EPSILON: f64 = 1e-9;

/// Result of projecting the scene onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
  /// Rounded canvas points; `0..8` corners, `8..16` shadows
  pub points: [IntPoint; POINT_COUNT],
  /// Pixels per scene unit
  pub scale: f64,
  /// Canvas position of the unscaled screen origin
  pub offset: Point,
  /// Bounds of the unscaled screen points
  pub screen_bounds: Bounds,
}

impl Projection {
  pub fn point(&self, index: usize) -> IntPoint {
    self.points[index]
  }
}

/// Camera transform: tilt about the width axis, then perspective divide.
pub struct Camera {
  tilt: Matrix4,
  perspective: Matrix4,
  factor: f64,
}

impl Camera {
  /// `tilt` in degrees; `factor` is `z_distance / focal_length`.
  pub fn new(tilt: f64, factor: f64) -> Self {
    Self {
      tilt: Matrix4::rotation(Vector3::X.scale(tilt)),
      perspective: Matrix4::perspective(factor),
      factor,
    }
  }

  /// Projects a scene point to unscaled screen space (Y down).
  ///
  /// `index` only labels the error for a point at or behind the focal plane.
  pub fn project(&self, index: usize, p: Vector3) -> Result<Point, GeometryError> {
    let camera = p.apply(&self.tilt);
    let depth = self.factor + camera.z;
    if !(depth > FOCAL_PLANE_EPSILON) {
      return Err(GeometryError::InvalidCameraGeometry {
        point: index,
        depth: camera.z,
      });
    }
    let projected = camera.apply(&self.perspective);
    Ok(Point::new(projected.x, -projected.y))
  }
}

/// Runs the full camera pipeline over the sixteen scene points.
pub fn project(
  points: &[Vector3; POINT_COUNT],
  config: &BookConfig,
) -> Result<Projection, GeometryError> {
  let camera = Camera::new(config.tilt(), config.perspective_factor());

  let mut screen = [Point::ZERO; POINT_COUNT];
  for (i, p) in points.iter().enumerate() {
    screen[i] = camera.project(i, *p)?;
  }

  let bounds = Bounds::from_points(&screen).ok_or_else(|| GeometryError::DegenerateFit {
    message: "projected points are not finite".to_string(),
  })?;

  let scale = match config.output_dpi {
    Some(dpi) => dpi,
    None => fit_scale(&bounds, config)?,
  };

  let offset = match config.output_origin {
    Some(anchor) => {
      let origin = camera.project(usize::MAX, Vector3::ZERO)?;
      Point::new(anchor.x - origin.x * scale, anchor.y - origin.y * scale)
    }
    None => Point::new(
      (config.output_width as f64 - bounds.width() * scale) / 2.0 - bounds.min_x * scale,
      (config.output_height as f64 - bounds.height() * scale) / 2.0 - bounds.min_y * scale,
    ),
  };

  let placed = screen.map(|p| p.scale(scale).translate(offset));
  if let Some((i, p)) = placed
    .iter()
    .enumerate()
    .find(|(_, p)| !fits_pixel_grid(p.x) || !fits_pixel_grid(p.y))
  {
    return Err(GeometryError::DegenerateFit {
      message: format!(
        "point {i} lands at ({}, {}), outside the pixel grid (scale {scale}, offset ({}, {}))",
        p.x, p.y, offset.x, offset.y
      ),
    });
  }
  let canvas = placed.map(Point::round);

  debug!(
    "projected {} points: bounds {:.3}x{:.3}, scale {:.3}, offset ({:.1}, {:.1})",
    POINT_COUNT,
    bounds.width(),
    bounds.height(),
    scale,
    offset.x,
    offset.y
  );

  Ok(Projection {
    points: canvas,
    scale,
    offset,
    screen_bounds: bounds,
  })
}

/// True when `v` rounds to a representable pixel coordinate.
fn fits_pixel_grid(v: f64) -> bool {
  let r = v.round();
  r.is_finite() && r >= i32::MIN as f64 && r <= i32::MAX as f64
}

/// Largest uniform scale fitting `bounds` inside the canvas minus its border.
fn fit_scale(bounds: &Bounds, config: &BookConfig) -> Result<f64, GeometryError> {
  let avail_w = config.output_width.saturating_sub(config.output_border) as f64;
  let avail_h = config.output_height.saturating_sub(config.output_border) as f64;

  let sx = if bounds.width() > 0.0 {
    avail_w / bounds.width()
  } else {
    f64::INFINITY
  };
  let sy = if bounds.height() > 0.0 {
    avail_h / bounds.height()
  } else {
    f64::INFINITY
  };
  let scale = sx.min(sy);
  if !scale.is_finite() || scale <= 0.0 {
    return Err(GeometryError::DegenerateFit {
      message: format!(
        "{:.3}x{:.3} screen bounds into {}x{} available pixels",
        bounds.width(),
        bounds.height(),
        avail_w,
        avail_h
      ),
    });
  }
  Ok(scale)
}
