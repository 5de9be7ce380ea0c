//! Error types for bookmockup
//!
//! This module provides the error types for every stage of a render:
//! - Config errors (invalid dimensions, canvas, unreadable config files)
//! - Geometry errors (camera setups that cannot be projected)
//! - Render errors (compositor failures, encoding)
//! - Image errors (cover texture loading and decoding)
//!
//! All errors use the `thiserror` crate for minimal boilerplate and
//! proper error trait implementations.

use thiserror::Error;

/// Result type alias for bookmockup operations
///
/// # Examples
///
/// ```
/// use bookmockup::Result;
///
/// fn compute() -> Result<()> {
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for bookmockup
///
/// Each variant wraps a more specific error type for that stage.
///
/// # Examples
///
/// ```
/// use bookmockup::Error;
/// use bookmockup::error::ConfigError;
///
/// fn configure() -> Result<(), Error> {
///     Err(Error::Config(ConfigError::InvalidDimension {
///         field: "book_width",
///         value: -1.0,
///     }))
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
  /// Invalid render configuration
  #[error("Config error: {0}")]
  Config(#[from] ConfigError),

  /// Geometry that cannot be projected or fitted
  #[error("Geometry error: {0}")]
  Geometry(#[from] GeometryError),

  /// Compositing or rasterization error
  #[error("Render error: {0}")]
  Render(#[from] RenderError),

  /// Cover image loading or decoding error
  #[error("Image error: {0}")]
  Image(#[from] ImageError),

  /// I/O error (config files, output files)
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  /// JSON (de)serialization error
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Errors raised while validating a [`BookConfig`](crate::config::BookConfig)
///
/// Physical dimensions and camera parameters are a caller contract; these
/// errors are raised up front instead of producing degenerate geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
  /// A physical dimension or camera parameter is zero or negative
  #[error("Invalid value for '{field}': {value} (must be positive)")]
  InvalidDimension { field: &'static str, value: f64 },

  /// A numeric input is NaN or infinite
  #[error("Non-finite value for '{field}'")]
  NonFinite { field: &'static str },

  /// The output canvas cannot hold anything
  #[error("Invalid output canvas: {message}")]
  InvalidCanvas { message: String },

  /// A config file could not be parsed
  #[error("Failed to parse config '{path}': {reason}")]
  Parse { path: String, reason: String },
}

/// Errors raised by the camera projection pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
  /// A projected point lies at or behind the camera's focal plane
  #[error("Invalid camera geometry: point {point} has depth {depth} at or behind the focal plane")]
  InvalidCameraGeometry { point: usize, depth: f64 },

  /// No finite scale fits the projected points into the canvas
  #[error("Cannot fit projection into canvas: {message}")]
  DegenerateFit { message: String },
}

/// Errors that occur while compositing the mockup
///
/// These come from the [`Compositor`](crate::compositor::Compositor)
/// collaborator. The render driver never retries them.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
  /// Canvas creation failed
  #[error("Failed to create canvas: {width}x{height}")]
  CanvasCreationFailed { width: u32, height: u32 },

  /// Paint operation failed
  #[error("Paint operation failed: {operation}")]
  PaintFailed { operation: String },

  /// An operation needed a layer that does not exist
  #[error("No layer available for '{operation}'")]
  NoLayer { operation: &'static str },

  /// Image encoding failed
  #[error("Failed to encode image as {format}: {reason}")]
  EncodeFailed { format: String, reason: String },

  /// Invalid paint parameters
  #[error("Invalid paint parameters: {message}")]
  InvalidParameters { message: String },
}

/// Errors that occur during cover image loading and decoding
#[derive(Error, Debug, Clone)]
pub enum ImageError {
  /// Image loading failed
  #[error("Failed to load image from '{path}': {reason}")]
  LoadFailed { path: String, reason: String },

  /// Image decoding failed
  #[error("Failed to decode image from '{path}': {reason}")]
  DecodeFailed { path: String, reason: String },
}
