//! This module defines the machinery for enumerating the grid 2 cells that
//! may hold points within the smoothing radius of the points in a grid 1
//! cell.
//!
//! For a grid 1 cell with 3D index `idx1`, the candidate window along axis
//! `i` holds the *unwrapped* grid 2 cell coordinates in
//! ```text
//! [idx1[i] * ratio[i] - covering[i], (idx1[i] + 1) * ratio[i] + covering[i])
//! ```
//! where `ratio[i]` is the number of grid 2 cells per grid 1 cell and
//! `covering[i]` is the number of covering steps. Unwrapped coordinates may
//! be negative or exceed the extent of grid 2. Each one is passed through
//! [`AxisWrap::wrap_cell_coord`] which either maps it to a real cell (plus a
//! coordinate shift) or discards it.

use crate::mesh::DoubleMesh;
use crate::misc::ceil_div;

/// The number of grid 2 cells that a window must extend past the edges of a
/// grid 1 cell (along a single axis), so that no point within
/// `search_length` is missed.
///
/// This is `ceil(search_length / cell2_width)`.
pub fn covering_steps(search_length: f64, cell2_width: f64) -> isize {
    ceil_div(search_length, cell2_width)
}

/// Encapsulates the policy for mapping an unwrapped grid 2 cell coordinate
/// (along a single axis) onto a real cell.
#[derive(Clone, Copy, Debug)]
pub struct AxisWrap {
    n_divs: isize,
    period: f64,
    periodic: bool,
}

impl AxisWrap {
    pub fn new(n_divs: usize, period: f64, periodic: bool) -> AxisWrap {
        Self {
            n_divs: n_divs as isize,
            period,
            periodic,
        }
    }

    /// Maps `unwrapped` to `Some((cell_coord, shift))` or `None`.
    ///
    /// `shift` is the amount that must be added to the coordinate of a point
    /// in the cell to get the position of the periodic image that the
    /// window actually refers to. It's `-period` when `unwrapped` lies
    /// just below 0, `+period` when it lies just past the last cell and
    /// `0.0` for coordinates inside the grid.
    ///
    /// On a non-periodic axis, any coordinate outside the grid is discarded
    /// (i.e. `None` is returned). These coordinates must never be wrapped:
    /// the far side of a non-periodic box isn't adjacent to the near side.
    #[inline]
    pub fn wrap_cell_coord(&self, unwrapped: isize) -> Option<(usize, f64)> {
        if (0..self.n_divs).contains(&unwrapped) {
            Some((unwrapped as usize, 0.0))
        } else if !self.periodic || self.n_divs == 0 {
            None
        } else {
            let n_periods = unwrapped.div_euclid(self.n_divs);
            let wrapped = unwrapped.rem_euclid(self.n_divs);
            Some((wrapped as usize, (n_periods as f64) * self.period))
        }
    }

    /// Trims the unwrapped coordinates `start..stop` to the ones that
    /// [`Self::wrap_cell_coord`] may map onto a real cell.
    ///
    /// Nothing is trimmed on a periodic axis.
    #[inline]
    pub fn visitable(&self, start: isize, stop: isize) -> core::ops::Range<isize> {
        if self.periodic {
            start..stop
        } else {
            start.max(0)..stop.min(self.n_divs)
        }
    }
}

/// Precomputed, per-axis description of the candidate window for every
/// grid 1 cell of a [`DoubleMesh`].
#[derive(Clone, Debug)]
pub struct SearchWindowSpec {
    cells2_per_cell1: [isize; 3],
    covering_steps: [isize; 3],
    wraps: [AxisWrap; 3],
}

impl SearchWindowSpec {
    pub fn new(mesh: &DoubleMesh) -> SearchWindowSpec {
        let divs1 = mesh.grid1().idx_spec().divs();
        let divs2 = mesh.grid2().idx_spec().divs();
        let widths2 = mesh.grid2().cell_widths();
        let search_lengths = mesh.search_lengths();
        let periods = mesh.periods();

        let mut cells2_per_cell1 = [0_isize; 3];
        let mut steps = [0_isize; 3];
        let mut wraps = [AxisWrap::new(0, 0.0, false); 3];
        for i in 0..3 {
            // a grid without cells along an axis has no windows to describe
            cells2_per_cell1[i] = divs2[i].checked_div(divs1[i]).unwrap_or(0) as isize;
            steps[i] = covering_steps(search_lengths[i], widths2[i]);
            wraps[i] = AxisWrap::new(divs2[i], periods[i], mesh.is_periodic());
        }
        Self {
            cells2_per_cell1,
            covering_steps: steps,
            wraps,
        }
    }

    pub fn cells2_per_cell1(&self) -> &[isize; 3] {
        &self.cells2_per_cell1
    }

    pub fn covering_steps(&self) -> &[isize; 3] {
        &self.covering_steps
    }

    /// The unwrapped window bounds for the grid 1 cell with the 3D index
    /// `idx1`. Returns `(start, stop)`: along axis `i` the window spans
    /// `start[i]..stop[i]`.
    ///
    /// The bounds saturate rather than overflow for absurdly large search
    /// lengths.
    pub fn unwrapped_bounds(&self, idx1: [usize; 3]) -> ([isize; 3], [isize; 3]) {
        let mut start = [0_isize; 3];
        let mut stop = [0_isize; 3];
        for i in 0..3 {
            let ratio = self.cells2_per_cell1[i];
            start[i] = (idx1[i] as isize)
                .saturating_mul(ratio)
                .saturating_sub(self.covering_steps[i]);
            stop[i] = (idx1[i] as isize + 1)
                .saturating_mul(ratio)
                .saturating_add(self.covering_steps[i]);
        }
        (start, stop)
    }

    /// Calls `f(idx2, shift)` for every candidate grid 2 cell of the grid 1
    /// cell with 3D index `idx1`.
    ///
    /// `idx2` is the (wrapped) 3D index of the grid 2 cell and `shift`
    /// holds the per-axis translation from a point in that cell to the
    /// relevant periodic image. A given `(idx2, shift)` combination is
    /// visited at most once.
    pub fn for_each_candidate(&self, idx1: [usize; 3], mut f: impl FnMut([usize; 3], [f64; 3])) {
        let (start, stop) = self.unwrapped_bounds(idx1);
        for ux in self.wraps[0].visitable(start[0], stop[0]) {
            let Some((ix2, shift_x)) = self.wraps[0].wrap_cell_coord(ux) else {
                continue;
            };
            for uy in self.wraps[1].visitable(start[1], stop[1]) {
                let Some((iy2, shift_y)) = self.wraps[1].wrap_cell_coord(uy) else {
                    continue;
                };
                for uz in self.wraps[2].visitable(start[2], stop[2]) {
                    let Some((iz2, shift_z)) = self.wraps[2].wrap_cell_coord(uz) else {
                        continue;
                    };
                    f([ix2, iy2, iz2], [shift_x, shift_y, shift_z]);
                }
            }
        }
    }
}
