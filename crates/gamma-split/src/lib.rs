//! gamma-split: inverse color-pair lookup engine.
//!
//! This library computes pairs of channel values whose *naive* (sRGB-space)
//! average and *gamma-aware* (linear-light) average can be steered
//! independently. Because naive and correct image minification disagree on
//! what the average of two pixels is, an image built from such pairs shows
//! one picture at native resolution and a different one after downscaling.
//!
//! # Quick Start
//!
//! Build the inverse table once, then solve per pixel:
//!
//! ```
//! use gamma_split::{Inverter, PairSolver, PickPolicy, SrgbPairAverage, Strategy};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let table = Inverter::new(PickPolicy::closest())
//!     .invert(&SrgbPairAverage, &mut rng)
//!     .unwrap();
//!
//! let solver = PairSolver::new(Strategy::Table(table)).strength(255);
//! // 16-bit channel values: visible target 0xC000, hidden target 0x2000
//! let emitted = solver.solve(0, 0, 0xC000, 0x2000, &mut rng);
//! assert!(u32::from(emitted) <= 0xFFFF);
//! ```
//!
//! # Components
//!
//! - [`gamma`]: the sRGB transfer curve and 8/16-bit encode/decode.
//! - [`Lookup2d`] / [`SrgbPairAverage`]: the forward map from a pair of
//!   8-bit values to its (naive average, gamma-aware average) outputs.
//! - [`Inverter`] / [`DenseTable`]: sparse-to-dense inversion of the forward
//!   map with configurable tie-breaking and exponential-step gap filling.
//! - [`PairSolver`]: per-pixel choice of which pair member to emit, backed
//!   by the dense table or by direct bisection.

pub mod gamma;
pub mod lookup;
pub mod solver;


pub use lookup::{
    AxisPreference, DenseTable, InvertError, Inverter, Lookup2d, PickPolicy, Point,
    SrgbPairAverage,
};
pub use solver::{DitherPattern, FilterMode, PairSolver, Strategy};
