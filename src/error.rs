use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MixError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("unsupported PNG color type: {0:?}")]
    UnsupportedColorType(png::ColorType),

    #[error("unsupported PNG bit depth: {0:?}")]
    UnsupportedBitDepth(png::BitDepth),

    #[error("input images must have the same dimensions; got {aw}x{ah} and {bw}x{bh}")]
    DimensionMismatch {
        aw: u32,
        ah: u32,
        bw: u32,
        bh: u32,
    },

    #[error("inverse table build failed: {0}")]
    Invert(#[from] gamma_split::InvertError),
}
