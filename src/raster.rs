//! PNG raster loading and saving.
//!
//! Everything is normalized to straight (non-premultiplied) RGBA with
//! 16 bits per channel; 8-bit sources are scaled by 257 so 0xFF maps to
//! 0xFFFF. Output is always 16-bit RGBA, matching the precision the
//! perturbation works at.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::MixError;

/// An image held as straight RGBA, 16 bits per channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u16; 4]>,
}

impl Raster {
    /// Create a transparent raster of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u16; 4] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: [u16; 4]) {
        self.pixels[y as usize * self.width as usize + x as usize] = pixel;
    }

    /// Load a PNG file.
    ///
    /// Accepts grayscale, grayscale+alpha, RGB, and RGBA at 8 or 16 bits;
    /// palette and sub-byte grayscale images are expanded by the decoder.
    pub fn load(path: &Path) -> Result<Self, MixError> {
        let file = File::open(path).map_err(|source| MixError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::decode(BufReader::new(file))
    }

    /// Write the raster as a 16-bit RGBA PNG.
    pub fn save(&self, path: &Path) -> Result<(), MixError> {
        let file = File::create(path).map_err(|source| MixError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.encode(BufWriter::new(file))
    }

    fn decode<R: Read>(input: R) -> Result<Self, MixError> {
        let mut decoder = png::Decoder::new(input);
        decoder.set_transformations(png::Transformations::EXPAND);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let bytes = &buf[..info.buffer_size()];

        let samples = match info.color_type {
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            other => return Err(MixError::UnsupportedColorType(other)),
        };

        let mut pixels = Vec::with_capacity(info.width as usize * info.height as usize);
        let mut channels = [0u16; 4];
        match info.bit_depth {
            png::BitDepth::Eight => {
                for px in bytes.chunks_exact(samples) {
                    for (slot, &b) in channels.iter_mut().zip(px) {
                        *slot = u16::from(b) * 257;
                    }
                    pixels.push(widen(&channels[..samples]));
                }
            }
            png::BitDepth::Sixteen => {
                for px in bytes.chunks_exact(samples * 2) {
                    for (slot, pair) in channels.iter_mut().zip(px.chunks_exact(2)) {
                        *slot = u16::from_be_bytes([pair[0], pair[1]]);
                    }
                    pixels.push(widen(&channels[..samples]));
                }
            }
            other => return Err(MixError::UnsupportedBitDepth(other)),
        }

        Ok(Self {
            width: info.width,
            height: info.height,
            pixels,
        })
    }

    fn encode<W: Write>(&self, output: W) -> Result<(), MixError> {
        let mut encoder = png::Encoder::new(output, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Sixteen);
        let mut writer = encoder.write_header()?;

        let mut data = Vec::with_capacity(self.pixels.len() * 8);
        for px in &self.pixels {
            for &channel in px {
                data.extend_from_slice(&channel.to_be_bytes());
            }
        }
        writer.write_image_data(&data)?;
        Ok(())
    }
}

/// Spread 1-4 decoded samples into straight RGBA.
fn widen(samples: &[u16]) -> [u16; 4] {
    match *samples {
        [g] => [g, g, g, 65535],
        [g, a] => [g, g, g, a],
        [r, g, b] => [r, g, b, 65535],
        [r, g, b, a] => [r, g, b, a],
        _ => unreachable!("PNG sample count is 1-4"),
    }
}
