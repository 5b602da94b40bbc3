//! # Rendering
//!
//! Turns images into the packed 1-bit rasters the printer prints.
//!
//! - [`dither`]: Bayer 8x8 ordered dithering and row packing
//! - [`image`]: Image loading, scaling and rasterization

pub mod dither;
pub mod image;

pub use image::Raster;
