//! The per-pixel perturbation loop.

use gamma_split::PairSolver;
use rand::Rng;

use crate::error::MixError;
use crate::raster::Raster;

/// Perturb `visible` so that naive downscaling reveals `hidden`.
///
/// Both inputs must have the same dimensions. Each color channel is solved
/// independently; the output alpha is the product of the input alphas, and
/// fully transparent pixels keep zeroed color channels.
pub fn perturb<R: Rng>(
    visible: &Raster,
    hidden: &Raster,
    solver: &PairSolver,
    rng: &mut R,
) -> Result<Raster, MixError> {
    if visible.width != hidden.width || visible.height != hidden.height {
        return Err(MixError::DimensionMismatch {
            aw: visible.width,
            ah: visible.height,
            bw: hidden.width,
            bh: hidden.height,
        });
    }

    let mut out = Raster::new(visible.width, visible.height);
    for y in 0..visible.height {
        for x in 0..visible.width {
            let [sr, sg, sb, sa] = visible.get(x, y).map(u32::from);
            let [lr, lg, lb, la] = hidden.get(x, y).map(u32::from);

            let oa = (sa * la + 32767) / 65535;
            let mut pixel = [0u16; 4];
            if oa != 0 {
                pixel[0] = solver.solve(x, y, sr, lr, rng);
                pixel[1] = solver.solve(x, y, sg, lg, rng);
                pixel[2] = solver.solve(x, y, sb, lb, rng);
            }
            pixel[3] = oa as u16;
            out.set(x, y, pixel);
        }
    }
    Ok(out)
}
