//! Book mockup renderer
//!
//! Turns a flat cover image into a 3D-looking picture of a book: a box with
//! two slightly opened covers, seen from a tilted perspective camera, shaded
//! by one distant light and standing on its own ground shadow.
//!
//! The pure core lives in [`scene`]: [`BookScene::compute`] derives the
//! projected corners, the back-to-front face order and the per-face lighting
//! levels from a [`BookConfig`]. [`renderer::render_book`] replays that scene
//! as calls on any [`Compositor`]; [`paint::RasterCompositor`] is the
//! `tiny-skia` implementation.
//!
//! ```no_run
//! use bookmockup::{image_loader, BookConfig, Renderer};
//! use std::path::Path;
//!
//! let cover = image_loader::load_cover(Path::new("cover.png"))?;
//! let png = Renderer::new(BookConfig::default().with_angles(-30.0, 15.0))
//!   .render_to_png(&cover)?;
//! std::fs::write("mockup.png", png)?;
//! # Ok::<(), bookmockup::Error>(())
//! ```

pub mod book;
pub mod color;
pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod image_loader;
pub mod image_output;
pub mod math;
pub mod paint;
pub mod projection;
pub mod renderer;
pub mod scene;

pub use book::{Face, FaceNormals, RenderOrder};
pub use color::Rgba;
pub use compositor::{Compositor, CoverLayout, CoverTexture, Morphology, Sampling, SourceRegion};
pub use config::{BookConfig, ConfigFile, RenderStyle};
pub use error::{Error, Result};
pub use geometry::{Bounds, IntPoint, PixelRect, Point};
pub use math::{Matrix4, Vector3};
pub use renderer::{render_book, Renderer};
pub use scene::{BookScene, Quad};
