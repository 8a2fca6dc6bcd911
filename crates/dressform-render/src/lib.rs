//! Raster primitives for the dressform pipeline.
//!
//! This crate owns the pixel-level machinery the try-on pipeline builds
//! on: RGBA and alpha buffers, polygon and circle rasterization, bitmap
//! labels, coordinate-field remapping for warps, and deterministic PNG
//! encoding with BLAKE3 hashing of the output bytes.

pub mod buffer;
pub mod color;
pub mod draw;
pub mod font;
pub mod png_io;
pub mod remap;

pub use buffer::{MaskBuffer, PixelBuffer};
pub use color::Color;
pub use draw::Point;
pub use png_io::{DecodedImage, PngConfig, PngError};
pub use remap::CoordField;
