//! This module defines the datatypes used for describing the pre-built
//! spatial grids (a.k.a. cell-lists) that points are sorted into.
//!
//! Building these grids is the responsibility of external code. The types
//! in this module just describe the result and check that it is
//! structurally self-consistent.

use crate::misc::CellIdxSpec;
use core::ops::Range;

/// A uniform grid of rectangular cells that a single point set has been
/// sorted into.
///
/// The points of the set are described in 2 orderings:
/// - the "original" ordering, which is the order that the caller provides
///   coordinates in
/// - the "sorted" ordering, where the points are grouped contiguously by
///   cell id (in increasing order)
///
/// `sort_permutation` maps between the two orderings: the point at position
/// `i` of the sorted ordering is the point at position
/// `sort_permutation[i]` of the original ordering. The points of cell `c`
/// occupy the positions `cell_offsets[c]..cell_offsets[c + 1]` of the sorted
/// ordering.
#[derive(Clone, Copy, Debug)]
pub struct CellGrid<'a> {
    idx_spec: CellIdxSpec,
    cell_widths_xyz: [f64; 3],
    cell_offsets: &'a [usize],
    sort_permutation: &'a [usize],
}

impl<'a> CellGrid<'a> {
    /// create a new instance
    ///
    /// This checks that `cell_offsets` is consistent with the number of
    /// cells and the length of `sort_permutation`. It does **NOT** check
    /// that `sort_permutation` is a genuine permutation (that requires
    /// scratch space).
    pub fn new(
        divs_xyz: [usize; 3],
        cell_widths_xyz: [f64; 3],
        cell_offsets: &'a [usize],
        sort_permutation: &'a [usize],
    ) -> Result<CellGrid<'a>, &'static str> {
        let idx_spec = CellIdxSpec::new(divs_xyz)?;
        // written so that NaN widths are rejected
        if !cell_widths_xyz.iter().all(|w| *w > 0.0 && w.is_finite()) {
            Err("each cell width must be positive and finite")
        } else if cell_offsets.len() != idx_spec.n_cells() + 1 {
            Err("cell_offsets must hold exactly 1 more entry than the number of cells")
        } else if cell_offsets[0] != 0 {
            Err("the first entry of cell_offsets must be 0")
        } else if !cell_offsets.is_sorted() {
            Err("cell_offsets must be monotonically non-decreasing")
        } else if cell_offsets[cell_offsets.len() - 1] != sort_permutation.len() {
            Err("the last entry of cell_offsets must match the length of sort_permutation")
        } else {
            Ok(Self {
                idx_spec,
                cell_widths_xyz,
                cell_offsets,
                sort_permutation,
            })
        }
    }

    #[inline]
    pub fn idx_spec(&self) -> &CellIdxSpec {
        &self.idx_spec
    }

    #[inline]
    pub fn cell_widths(&self) -> &[f64; 3] {
        &self.cell_widths_xyz
    }

    pub fn n_cells(&self) -> usize {
        self.idx_spec.n_cells()
    }

    /// the number of points that were sorted into the grid
    pub fn n_points(&self) -> usize {
        self.sort_permutation.len()
    }

    pub fn sort_permutation(&self) -> &'a [usize] {
        self.sort_permutation
    }

    /// the positions of the points in `cell_id` (in the sorted ordering)
    #[inline]
    pub fn cell_point_range(&self, cell_id: usize) -> Range<usize> {
        self.cell_offsets[cell_id]..self.cell_offsets[cell_id + 1]
    }
}

/// Pairs the grid of the primary point set (grid 1) with the grid of the
/// secondary point set (grid 2).
///
/// Both grids span the same physical volume. Along each axis, grid 2 is
/// expected to hold an integral number of cells per grid 1 cell. This (and
/// the requirement that `search_lengths_xyz` is at least as large as the
/// smoothing radius) is a precondition of the grid-building code; violating
/// it produces incomplete results rather than an error.
#[derive(Clone, Copy, Debug)]
pub struct DoubleMesh<'a> {
    grid1: CellGrid<'a>,
    grid2: CellGrid<'a>,
    periods_xyz: [f64; 3],
    periodic: bool,
    search_lengths_xyz: [f64; 3],
}

impl<'a> DoubleMesh<'a> {
    /// create a new instance
    ///
    /// `periods_xyz` holds the box length along each axis. It's only used
    /// when `periodic` is `true`.
    pub fn new(
        grid1: CellGrid<'a>,
        grid2: CellGrid<'a>,
        periods_xyz: [f64; 3],
        periodic: bool,
        search_lengths_xyz: [f64; 3],
    ) -> Result<DoubleMesh<'a>, &'static str> {
        if periodic && !periods_xyz.iter().all(|p| *p > 0.0 && p.is_finite()) {
            Err("each period must be positive and finite when periodic is true")
        } else if !search_lengths_xyz.iter().all(|l| *l >= 0.0 && l.is_finite()) {
            Err("each search length must be non-negative and finite")
        } else {
            Ok(Self {
                grid1,
                grid2,
                periods_xyz,
                periodic,
                search_lengths_xyz,
            })
        }
    }

    pub fn grid1(&self) -> &CellGrid<'a> {
        &self.grid1
    }

    pub fn grid2(&self) -> &CellGrid<'a> {
        &self.grid2
    }

    pub fn periods(&self) -> &[f64; 3] {
        &self.periods_xyz
    }

    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    pub fn search_lengths(&self) -> &[f64; 3] {
        &self.search_lengths_xyz
    }
}
