//! Defines the kernel that accumulates the weighted second-moment (inertia)
//! tensor of every primary point from the secondary points within the
//! smoothing radius.
//!
//! Everything in this module operates on points in the "sorted" ordering
//! of their respective grids (see [`CellGrid`](crate::mesh::CellGrid)).
//!
//! # Sign Convention
//! The separation vector for a pair is `d = x1 - (x2 + shift)`, where `x1`
//! is the primary point, `x2` is the secondary point and `x2 + shift` is the
//! periodic image of `x2` that lies near `x1`. Because every tensor entry is
//! a product of 2 components of `d`, flipping the convention doesn't change
//! the result.

use crate::mesh::DoubleMesh;
use crate::window::SearchWindowSpec;
use core::ops::Range;
use ndarray::ArrayViewMut3;

/// Cell-sorted coordinates (and optional weights) of a point set.
#[derive(Clone, Copy)]
pub struct SortedPoints<'a> {
    coords_xyz: [&'a [f64]; 3],
    weights: Option<&'a [f64]>,
}

impl<'a> SortedPoints<'a> {
    /// create a new instance
    pub fn new(
        coords_xyz: [&'a [f64]; 3],
        weights: Option<&'a [f64]>,
    ) -> Result<SortedPoints<'a>, &'static str> {
        let n_points = coords_xyz[0].len();
        if coords_xyz.iter().any(|c| c.len() != n_points) {
            Err("each coordinate component must have the same length")
        } else if weights.is_some_and(|w| w.len() != n_points) {
            Err("weights must have the same length as the coordinates")
        } else {
            Ok(Self {
                coords_xyz,
                weights,
            })
        }
    }

    pub fn len(&self) -> usize {
        self.coords_xyz[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// If no weights are provided, returns 1.0, i.e., weights are just counts.
    #[inline]
    pub fn get_weight(&self, idx: usize) -> f64 {
        if let Some(weights) = self.weights {
            weights[idx]
        } else {
            1.0
        }
    }
}

/// Accumulates contributions to `tensors` and `weight_sums` from every pair
/// made of a primary point in a grid 1 cell with an id in `cell_range` and a
/// secondary point within `smoothing_radius` of it.
///
/// `tensors` must have the shape `(n1, 3, 3)` and `weight_sums` must have
/// the length `n1`, where `n1` is the number of points in grid 1. Both are
/// indexed in the sorted ordering of grid 1. Contributions are added to the
/// existing values (entries of points outside of `cell_range` are left
/// untouched).
///
/// A pair contributes if the squared distance is strictly less than the
/// squared smoothing radius. Self-pairs are **not** excluded.
pub fn accumulate_cell_range(
    tensors: &mut ArrayViewMut3<f64>,
    weight_sums: &mut [f64],
    mesh: &DoubleMesh,
    points1: &SortedPoints,
    points2: &SortedPoints,
    smoothing_radius: f64,
    cell_range: Range<usize>,
) -> Result<(), &'static str> {
    let grid1 = mesh.grid1();
    let grid2 = mesh.grid2();
    let n1 = grid1.n_points();
    if points1.len() != n1 || points2.len() != grid2.n_points() {
        return Err("the number of points is inconsistent with the grid");
    } else if tensors.shape() != [n1, 3, 3] || weight_sums.len() != n1 {
        return Err("the output buffers have the wrong shape");
    } else if cell_range.end > grid1.n_cells() {
        return Err("cell_range extends past the last cell of grid 1");
    } else if smoothing_radius.is_nan() || smoothing_radius < 0.0 {
        return Err("smoothing_radius must be non-negative");
    } else if cell_range.is_empty() || grid2.n_cells() == 0 {
        return Ok(());
    }

    let window = SearchWindowSpec::new(mesh);
    let squared_radius = smoothing_radius * smoothing_radius;

    for cell1_id in cell_range {
        let range1 = grid1.cell_point_range(cell1_id);
        if range1.is_empty() {
            continue;
        }
        let idx1 = grid1.idx_spec().reverse_map_idx(cell1_id);
        window.for_each_candidate(idx1, |idx2, shift| {
            let cell2_id = grid2.idx_spec().map_idx(idx2[0], idx2[1], idx2[2]);
            let range2 = grid2.cell_point_range(cell2_id);
            if !range2.is_empty() {
                accumulate_cell_pair(
                    tensors,
                    weight_sums,
                    points1,
                    range1.clone(),
                    points2,
                    range2,
                    shift,
                    squared_radius,
                );
            }
        });
    }
    Ok(())
}

// Indices into the packed representation of the 6 independent entries of
// a symmetric tensor
const XX: usize = 0;
const YY: usize = 1;
const ZZ: usize = 2;
const XY: usize = 3;
const XZ: usize = 4;
const YZ: usize = 5;

/// the inner loop: considers every pair of points drawn from `range1` and
/// `range2`
#[allow(clippy::too_many_arguments)]
#[inline]
fn accumulate_cell_pair(
    tensors: &mut ArrayViewMut3<f64>,
    weight_sums: &mut [f64],
    points1: &SortedPoints,
    range1: Range<usize>,
    points2: &SortedPoints,
    range2: Range<usize>,
    shift: [f64; 3],
    squared_radius: f64,
) {
    let [x2, y2, z2] = points2.coords_xyz;
    for i in range1 {
        // translating the primary point by -shift is equivalent to
        // translating every secondary point by +shift
        let x1 = points1.coords_xyz[0][i] - shift[0];
        let y1 = points1.coords_xyz[1][i] - shift[1];
        let z1 = points1.coords_xyz[2][i] - shift[2];

        let mut packed = [0.0; 6];
        let mut weight_sum = 0.0;
        for j in range2.clone() {
            let dx = x1 - x2[j];
            let dy = y1 - y2[j];
            let dz = z1 - z2[j];
            let dsq = dx * dx + dy * dy + dz * dz;
            if dsq < squared_radius {
                let w = points2.get_weight(j);
                packed[XX] += w * dx * dx;
                packed[YY] += w * dy * dy;
                packed[ZZ] += w * dz * dz;
                packed[XY] += w * dx * dy;
                packed[XZ] += w * dx * dz;
                packed[YZ] += w * dy * dz;
                weight_sum += w;
            }
        }

        tensors[[i, 0, 0]] += packed[XX];
        tensors[[i, 1, 1]] += packed[YY];
        tensors[[i, 2, 2]] += packed[ZZ];
        tensors[[i, 0, 1]] += packed[XY];
        tensors[[i, 1, 0]] += packed[XY];
        tensors[[i, 0, 2]] += packed[XZ];
        tensors[[i, 2, 0]] += packed[XZ];
        tensors[[i, 1, 2]] += packed[YZ];
        tensors[[i, 2, 1]] += packed[YZ];
        weight_sums[i] += weight_sum;
    }
}
