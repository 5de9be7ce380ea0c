//! Render configuration
//!
//! [`BookConfig`] carries every input of the pure scene computation: physical
//! dimensions in inches, angles in degrees, camera and lighting parameters,
//! and the output canvas. [`RenderStyle`] carries the compositing-only
//! settings (colours and the shadow cleanup constants).
//!
//! Both load from JSON with every field optional:
//!
//! ```
//! use bookmockup::BookConfig;
//!
//! let config = BookConfig::from_json_str(r#"{ "y_angle": -45.0, "output_width": 800 }"#).unwrap();
//! assert_eq!(config.y_angle, -45.0);
//! assert_eq!(config.output_width, 800);
//! assert_eq!(config.book_height, 9.0);
//! ```

use crate::color::Rgba;
use crate::error::{ConfigError, Error, Result};
use crate::geometry::Point;
use crate::math::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Wraps an angle in degrees into `(-180, 180]`.
///
/// # Examples
///
/// ```
/// use bookmockup::config::normalize_angle;
///
/// assert_eq!(normalize_angle(190.0), -170.0);
/// assert_eq!(normalize_angle(-180.0), 180.0);
/// assert_eq!(normalize_angle(540.0), 180.0);
/// ```
pub fn normalize_angle(degrees: f64) -> f64 {
  let mut a = degrees % 360.0;
  if a > 180.0 {
    a -= 360.0;
  } else if a <= -180.0 {
    a += 360.0;
  }
  a
}

/// Inputs of a single render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
  /// Output canvas width in pixels
  pub output_width: u32,
  /// Output canvas height in pixels
  pub output_height: u32,
  /// Total horizontal/vertical margin in pixels; half of it lands on each side
  pub output_border: u32,
  /// Fixed scale in pixels per inch; fitted to the canvas when absent
  pub output_dpi: Option<f64>,
  /// Fixed canvas position of the model origin; centred when absent
  pub output_origin: Option<Point>,
  /// Cover width (inches)
  pub book_width: f64,
  /// Cover height (inches)
  pub book_height: f64,
  /// Spine depth (inches)
  pub spine_width: f64,
  /// Full angle between the covers (degrees); each cover opens by half
  pub partial_open_angle: f64,
  /// Yaw of the book about the vertical axis (degrees)
  pub y_angle: f64,
  /// Camera tilt about the width axis (degrees); positive looks down on the top
  pub x_angle: f64,
  pub focal_length: f64,
  /// Camera distance; with `focal_length` gives the perspective factor
  pub z_distance: f64,
  /// Ambient light floor (0..1)
  pub ambient_light: f64,
  /// Diffuse light strength (0..1)
  pub diffuse_light: f64,
  /// Direction pointing toward the light
  pub light_dir: Vector3,
}

impl Default for BookConfig {
  fn default() -> Self {
    Self {
      output_width: 1200,
      output_height: 1200,
      output_border: 100,
      output_dpi: None,
      output_origin: None,
      book_width: 6.0,
      book_height: 9.0,
      spine_width: 1.0,
      partial_open_angle: 2.0,
      y_angle: 30.0,
      x_angle: 20.0,
      focal_length: 1.5,
      z_distance: 100.0,
      ambient_light: 0.6,
      diffuse_light: 0.4,
      light_dir: Vector3::new(-1.0, 2.0, -1.5),
    }
  }
}

impl BookConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_output_size(mut self, width: u32, height: u32) -> Self {
    self.output_width = width;
    self.output_height = height;
    self
  }

  pub fn with_border(mut self, border: u32) -> Self {
    self.output_border = border;
    self
  }

  pub fn with_output_dpi(mut self, dpi: f64) -> Self {
    self.output_dpi = Some(dpi);
    self
  }

  pub fn with_output_origin(mut self, origin: Point) -> Self {
    self.output_origin = Some(origin);
    self
  }

  /// Sets cover width, cover height and spine depth (inches).
  pub fn with_dimensions(mut self, width: f64, height: f64, spine: f64) -> Self {
    self.book_width = width;
    self.book_height = height;
    self.spine_width = spine;
    self
  }

  pub fn with_partial_open(mut self, degrees: f64) -> Self {
    self.partial_open_angle = degrees;
    self
  }

  /// Sets yaw and camera tilt (degrees).
  pub fn with_angles(mut self, y_angle: f64, x_angle: f64) -> Self {
    self.y_angle = y_angle;
    self.x_angle = x_angle;
    self
  }

  pub fn with_camera(mut self, focal_length: f64, z_distance: f64) -> Self {
    self.focal_length = focal_length;
    self.z_distance = z_distance;
    self
  }

  pub fn with_light(mut self, dir: Vector3, ambient: f64, diffuse: f64) -> Self {
    self.light_dir = dir;
    self.ambient_light = ambient;
    self.diffuse_light = diffuse;
    self
  }

  /// Parses a (possibly partial) JSON config over the defaults.
  pub fn from_json_str(json: &str) -> Result<Self> {
    Ok(serde_json::from_str(json)?)
  }

  /// Loads a (possibly partial) JSON config file over the defaults.
  pub fn from_json_file(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
      Error::Config(ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
      })
    })
  }

  /// Yaw wrapped into `(-180, 180]`.
  pub fn yaw(&self) -> f64 {
    normalize_angle(self.y_angle)
  }

  /// Camera tilt wrapped into `(-180, 180]`.
  pub fn tilt(&self) -> f64 {
    normalize_angle(self.x_angle)
  }

  /// Partial-open angle wrapped into `(-180, 180]`.
  pub fn open_angle(&self) -> f64 {
    normalize_angle(self.partial_open_angle)
  }

  /// Perspective factor `z_distance / focal_length`.
  pub fn perspective_factor(&self) -> f64 {
    self.z_distance / self.focal_length
  }

  /// Checks the caller contract: finite inputs, positive dimensions and
  /// camera parameters, and a canvas larger than its border.
  pub fn validate(&self) -> std::result::Result<(), ConfigError> {
    let finite = [
      ("book_width", self.book_width),
      ("book_height", self.book_height),
      ("spine_width", self.spine_width),
      ("partial_open_angle", self.partial_open_angle),
      ("y_angle", self.y_angle),
      ("x_angle", self.x_angle),
      ("focal_length", self.focal_length),
      ("z_distance", self.z_distance),
      ("ambient_light", self.ambient_light),
      ("diffuse_light", self.diffuse_light),
    ];
    for (field, value) in finite {
      if !value.is_finite() {
        return Err(ConfigError::NonFinite { field });
      }
    }
    if !self.light_dir.is_finite() {
      return Err(ConfigError::NonFinite { field: "light_dir" });
    }

    let positive = [
      ("book_width", self.book_width),
      ("book_height", self.book_height),
      ("spine_width", self.spine_width),
      ("focal_length", self.focal_length),
      ("z_distance", self.z_distance),
    ];
    for (field, value) in positive {
      if value <= 0.0 {
        return Err(ConfigError::InvalidDimension { field, value });
      }
    }

    if self.output_width <= self.output_border || self.output_height <= self.output_border {
      return Err(ConfigError::InvalidCanvas {
        message: format!(
          "{}x{} canvas leaves no room inside a {}px border",
          self.output_width, self.output_height, self.output_border
        ),
      });
    }

    if let Some(dpi) = self.output_dpi {
      if !dpi.is_finite() {
        return Err(ConfigError::NonFinite { field: "output_dpi" });
      }
      if dpi <= 0.0 {
        return Err(ConfigError::InvalidDimension {
          field: "output_dpi",
          value: dpi,
        });
      }
    }

    if let Some(origin) = self.output_origin {
      if !origin.x.is_finite() || !origin.y.is_finite() {
        return Err(ConfigError::NonFinite {
          field: "output_origin",
        });
      }
    }

    Ok(())
  }
}

/// Compositing settings that do not affect the computed geometry.
///
/// The shadow seam radius and blur are empirical cleanup constants for the
/// quad warp's edge artifacts; they are configuration, not derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
  /// Canvas background; transparent when absent
  pub background: Option<Rgba>,
  /// Colour of the page block (top and fore-edge faces)
  pub page_color: Rgba,
  /// Colour of back cover and spine when only a front cover is supplied
  pub cover_color: Rgba,
  pub shadow: bool,
  pub shadow_color: Rgba,
  /// Shadow layer opacity (0..100)
  pub shadow_opacity: u8,
  /// Gaussian blur radius applied to the shadow (pixels)
  pub shadow_blur: f32,
  /// Grow-then-shrink radius closing seams between shadow quads (pixels)
  pub shadow_seam: u32,
}

impl Default for RenderStyle {
  fn default() -> Self {
    Self {
      background: None,
      page_color: Rgba::rgb(0xf4, 0xf0, 0xe4),
      cover_color: Rgba::rgb(0x40, 0x40, 0x40),
      shadow: true,
      shadow_color: Rgba::BLACK,
      shadow_opacity: 60,
      shadow_blur: 4.0,
      shadow_seam: 1,
    }
  }
}

/// Config file layout: the scene config plus an optional `style` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
  #[serde(flatten)]
  pub book: BookConfig,
  pub style: RenderStyle,
}

impl ConfigFile {
  pub fn from_json_file(path: &Path) -> Result<Self> {
    let text = std::fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| {
      Error::Config(ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
      })
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn angles_wrap_into_half_open_range() {
    assert_eq!(normalize_angle(0.0), 0.0);
    assert_eq!(normalize_angle(180.0), 180.0);
    assert_eq!(normalize_angle(-180.0), 180.0);
    assert_eq!(normalize_angle(181.0), -179.0);
    assert_eq!(normalize_angle(-181.0), 179.0);
    assert_eq!(normalize_angle(720.0 + 30.0), 30.0);
    assert_eq!(normalize_angle(-90.0), -90.0);
  }

  #[test]
  fn default_config_is_valid() {
    assert!(BookConfig::default().validate().is_ok());
  }

  #[test]
  fn rejects_non_positive_dimensions() {
    let config = BookConfig::default().with_dimensions(6.0, 0.0, 1.0);
    assert_eq!(
      config.validate(),
      Err(ConfigError::InvalidDimension {
        field: "book_height",
        value: 0.0
      })
    );
    let config = BookConfig::default().with_dimensions(6.0, 9.0, -1.0);
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidDimension {
        field: "spine_width",
        ..
      })
    ));
  }

  #[test]
  fn rejects_non_finite_angles() {
    let config = BookConfig::default().with_angles(f64::NAN, 10.0);
    assert_eq!(
      config.validate(),
      Err(ConfigError::NonFinite { field: "y_angle" })
    );
  }

  #[test]
  fn rejects_canvas_smaller_than_border() {
    let config = BookConfig::default().with_output_size(100, 400).with_border(100);
    assert!(matches!(
      config.validate(),
      Err(ConfigError::InvalidCanvas { .. })
    ));
  }

  #[test]
  fn rejects_bad_fixed_scale() {
    let config = BookConfig::default().with_output_dpi(0.0);
    assert!(config.validate().is_err());
  }

  #[test]
  fn partial_json_keeps_defaults() {
    let config = BookConfig::from_json_str(r#"{"x_angle": 45, "light_dir": {"x": 0, "y": -1, "z": 0}}"#)
      .unwrap();
    assert_eq!(config.x_angle, 45.0);
    assert_eq!(config.light_dir, Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(config.book_width, 6.0);
  }

  #[test]
  fn config_file_reads_style_section() {
    let file: ConfigFile = serde_json::from_str(
      r##"{"y_angle": 10, "style": {"background": "#ffffff", "shadow_opacity": 40}}"##,
    )
    .unwrap();
    assert_eq!(file.book.y_angle, 10.0);
    assert_eq!(file.style.background, Some(Rgba::WHITE));
    assert_eq!(file.style.shadow_opacity, 40);
    assert_eq!(file.style.shadow_seam, 1);
  }
}
