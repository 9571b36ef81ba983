//! downmix - gamma-aware steganographic image mixing.
//!
//! Perturbs pairs of pixel values so an image shows one picture at native
//! resolution while a correctly (gamma-aware) or naively downscaled copy
//! shows another. The algorithmic core lives in the `gamma-split` crate;
//! this library exposes the raster glue for integration testing.

pub mod error;
pub mod perturb;
pub mod raster;
