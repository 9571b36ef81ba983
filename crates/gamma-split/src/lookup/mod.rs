//! Forward map, dense table, and the inverse-table builder.
//!
//! The [`Lookup2d`] trait is the single seam of this module: the production
//! forward map ([`SrgbPairAverage`]), and the [`DenseTable`] produced by
//! inverting it, both answer range/lookup queries through it.

mod forward;
mod invert;
mod table;

pub use forward::{Lookup2d, Point, SrgbPairAverage};
pub use invert::{AxisPreference, InvertError, Inverter, PickPolicy};
pub use table::DenseTable;
