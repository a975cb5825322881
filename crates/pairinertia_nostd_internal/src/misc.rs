/// Describes how the linear id of a grid cell maps to its 3D index.
///
/// Cells are flattened in row-major order, where the z-axis is the fast
/// axis. In other words, the cell with 3D index `(ix, iy, iz)` has the id
/// `(ix * num_ydivs + iy) * num_zdivs + iz`.
///
/// A grid with 0 divisions along any axis is legal. It simply has no cells
/// (in that case, [`Self::map_idx`] and [`Self::reverse_map_idx`] should
/// never be called).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellIdxSpec {
    divs_xyz: [usize; 3],
}

impl CellIdxSpec {
    /// create a new instance from the number of divisions along each axis
    pub fn new(divs_xyz: [usize; 3]) -> Result<CellIdxSpec, &'static str> {
        let n_cells = divs_xyz[0]
            .checked_mul(divs_xyz[1])
            .and_then(|n| n.checked_mul(divs_xyz[2]));
        // we do a lot of signed arithmetic on cell indices, so every
        // index must also be representable as an isize
        match n_cells {
            Some(n) if n <= (isize::MAX as usize) => Ok(Self { divs_xyz }),
            _ => Err("the total number of cells is too large"),
        }
    }

    /// the number of divisions along each axis
    #[inline]
    pub fn divs(&self) -> &[usize; 3] {
        &self.divs_xyz
    }

    pub fn n_cells(&self) -> usize {
        self.divs_xyz[0] * self.divs_xyz[1] * self.divs_xyz[2]
    }

    /// map a 3D cell index to the linear cell id
    #[inline]
    pub fn map_idx(&self, ix: usize, iy: usize, iz: usize) -> usize {
        (ix * self.divs_xyz[1] + iy) * self.divs_xyz[2] + iz
    }

    /// map a linear cell id to the 3D cell index, `[ix, iy, iz]`
    #[inline]
    pub fn reverse_map_idx(&self, cell_id: usize) -> [usize; 3] {
        let iz = cell_id % self.divs_xyz[2];
        let rest = cell_id / self.divs_xyz[2];
        let iy = rest % self.divs_xyz[1];
        let ix = rest / self.divs_xyz[1];
        [ix, iy, iz]
    }
}

/// computes `ceil(numerator / denominator)` for a non-negative quotient
///
/// Quotients that don't fit in an `isize` saturate at `isize::MAX`.
///
/// # Note
/// `f64::ceil` isn't available in `no_std` crates
pub fn ceil_div(numerator: f64, denominator: f64) -> isize {
    let quotient = numerator / denominator;
    let truncated = quotient as isize;
    if (truncated as f64) < quotient {
        truncated.saturating_add(1)
    } else {
        truncated
    }
}
