//! Deterministic PNG reader and writer.
//!
//! Writing uses fixed compression settings so the same pixels always
//! produce byte-identical files, which makes output hashes stable across
//! runs and machines.

use std::io::Write;
use std::path::Path;

use png::{BitDepth, ColorType, Compression, Decoder, Encoder, FilterType};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::color::Color;

/// Errors from PNG operations.
#[derive(Debug, Error)]
pub enum PngError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),

    #[error("Unsupported PNG format: {0}")]
    Unsupported(String),
}

/// PNG export configuration for deterministic output.
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Compression level. Fixed for determinism.
    pub compression: Compression,
    /// Filter type. Fixed for determinism.
    pub filter: FilterType,
}

impl Default for PngConfig {
    fn default() -> Self {
        Self {
            compression: Compression::Default,
            // No filtering keeps the byte stream independent of encoder
            // heuristics.
            filter: FilterType::NoFilter,
        }
    }
}

/// A decoded image plus whether the source file carried its own alpha
/// channel. Sources without alpha get it derived downstream (background
/// keying), so the distinction matters.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub pixels: PixelBuffer,
    pub had_alpha: bool,
}

/// Write an RGBA pixel buffer to a PNG file and return the BLAKE3 hash
/// of the written bytes.
pub fn write_rgba(buffer: &PixelBuffer, path: &Path, config: &PngConfig) -> Result<String, PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(buffer, &mut data, config)?;
    std::fs::write(path, &data)?;
    Ok(hash_bytes(&data))
}

/// Write an RGBA pixel buffer to any writer.
pub fn write_rgba_to_writer<W: Write>(
    buffer: &PixelBuffer,
    writer: W,
    config: &PngConfig,
) -> Result<(), PngError> {
    let mut encoder = Encoder::new(writer, buffer.width, buffer.height);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_compression(config.compression);
    encoder.set_filter(config.filter);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&buffer.to_rgba8())?;
    Ok(())
}

/// Encode to an in-memory PNG and return the bytes with their hash.
pub fn write_rgba_to_vec_with_hash(
    buffer: &PixelBuffer,
    config: &PngConfig,
) -> Result<(Vec<u8>, String), PngError> {
    let mut data = Vec::new();
    write_rgba_to_writer(buffer, &mut data, config)?;
    let hash = hash_bytes(&data);
    Ok((data, hash))
}

/// Decode a PNG file into an RGBA buffer. Grayscale and RGB sources are
/// expanded to RGBA with opaque alpha; only 8-bit depth is accepted.
pub fn read_rgba(path: &Path) -> Result<DecodedImage, PngError> {
    let file = std::fs::File::open(path)?;
    let decoder = Decoder::new(std::io::BufReader::new(file));
    let mut reader = decoder.read_info()?;

    let mut raw = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut raw)?;
    raw.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(PngError::Unsupported(format!(
            "bit depth {:?}, only 8-bit is supported",
            info.bit_depth
        )));
    }

    let width = info.width;
    let height = info.height;
    let mut pixels = PixelBuffer::new(width, height, Color::transparent());
    let mut had_alpha = false;

    match info.color_type {
        ColorType::Rgba => {
            had_alpha = true;
            pixels = PixelBuffer::from_rgba8(width, height, &raw);
        }
        ColorType::Rgb => {
            for (i, chunk) in raw.chunks_exact(3).enumerate() {
                let x = (i as u32 % width) as i64;
                let y = (i as u32 / width) as i64;
                pixels.set(x, y, Color::from_rgb8(chunk[0], chunk[1], chunk[2]));
            }
        }
        ColorType::Grayscale => {
            for (i, &v) in raw.iter().enumerate() {
                let x = (i as u32 % width) as i64;
                let y = (i as u32 / width) as i64;
                pixels.set(x, y, Color::from_rgb8(v, v, v));
            }
        }
        ColorType::GrayscaleAlpha => {
            had_alpha = true;
            for (i, chunk) in raw.chunks_exact(2).enumerate() {
                let x = (i as u32 % width) as i64;
                let y = (i as u32 / width) as i64;
                let mut c = Color::from_rgb8(chunk[0], chunk[0], chunk[0]);
                c.a = chunk[1] as f64 / 255.0;
                pixels.set(x, y, c);
            }
        }
        ColorType::Indexed => {
            return Err(PngError::Unsupported("indexed color".into()));
        }
    }

    Ok(DecodedImage { pixels, had_alpha })
}

/// Hex-encoded BLAKE3 hash.
pub fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
