//! Raster backend: the pixel operations behind [`raster::RasterCompositor`].

pub mod blur;
pub mod homography;
pub mod levels;
pub mod morphology;
pub mod pixmap;
pub mod projective_warp;
pub mod raster;

pub use raster::RasterCompositor;
