use crate::{Error, permutation::Permutation};
use ndarray::{Array1, Array3, ArrayView1, ArrayView3};
use pairinertia_nostd_internal::{
    CellGrid, DoubleMesh, SearchWindowSpec, SortedPoints, accumulate_cell_range,
};
use std::ops::Range;
use tracing::{debug_span, trace};

/// The per-point results of [`inertia_tensors`].
///
/// Both arrays are indexed by the original ordering of the primary points.
#[derive(Clone, Debug, PartialEq)]
pub struct InertiaTensors {
    /// shape `(n1, 3, 3)`
    tensors: Array3<f64>,
    /// shape `(n1,)`
    weight_sums: Array1<f64>,
}

impl InertiaTensors {
    /// results for `n_points` primary points that haven't received any
    /// contributions
    pub fn zeros(n_points: usize) -> Self {
        Self {
            tensors: Array3::zeros((n_points, 3, 3)),
            weight_sums: Array1::zeros(n_points),
        }
    }

    /// the number of primary points
    pub fn len(&self) -> usize {
        self.weight_sums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weight_sums.is_empty()
    }

    /// the symmetric second-moment tensor of every primary point
    pub fn tensors(&self) -> ArrayView3<'_, f64> {
        self.tensors.view()
    }

    /// the sum of the weights of the secondary points that contributed to
    /// each primary point's tensor
    pub fn weight_sums(&self) -> ArrayView1<'_, f64> {
        self.weight_sums.view()
    }

    pub fn into_arrays(self) -> (Array3<f64>, Array1<f64>) {
        (self.tensors, self.weight_sums)
    }

    /// add the contributions tracked by `other` to `self`
    ///
    /// This is how the results from separate invocations over disjoint cell
    /// ranges are combined.
    pub fn merge(&mut self, other: &InertiaTensors) -> Result<(), Error> {
        if other.len() != self.len() {
            return Err(Error::array_length(
                "the merged weight_sums",
                self.len(),
                other.len(),
            ));
        }
        self.tensors += &other.tensors;
        self.weight_sums += &other.weight_sums;
        Ok(())
    }
}

/// check that each array in `arrays` holds an entry for every point in
/// `grid`
fn check_point_arrays(grid: &CellGrid, arrays: &[(&'static str, &[f64])]) -> Result<(), Error> {
    let n_points = grid.n_points();
    for &(which, array) in arrays {
        if array.len() != n_points {
            return Err(Error::array_length(which, n_points, array.len()));
        }
    }
    Ok(())
}

/// Computes the weighted second-moment (inertia) tensor of each primary
/// point from the secondary points within `smoothing_radius`.
///
/// For a primary point at `x1`, every secondary point at `x2` (or, when
/// `mesh` is periodic, every periodic image of `x2`) that lies strictly
/// closer than `smoothing_radius` contributes `w2 * d ⊗ d` to the tensor and
/// `w2` to the weight sum, where `d = x1 - x2` is the separation vector.
/// When `weights2` is `None`, every secondary point has a weight of 1.0.
///
/// Only the primary points in the grid 1 cells with ids in `cell_range`
/// receive contributions. All other entries of the result are zero. This
/// lets callers split `0..mesh.grid1().n_cells()` into disjoint ranges (see
/// [`partition_cell_range`](crate::partition_cell_range)), process each
/// range independently and [`merge`](InertiaTensors::merge) the results.
///
/// `positions1` and `positions2` hold the x, y, and z coordinates of each
/// point set in the original ordering. The results are also reported in
/// the original ordering.
///
/// # Preconditions
/// Along each axis, grid 2 must hold an integral number of cells per grid 1
/// cell and the mesh's search length must be at least `smoothing_radius`.
/// These properties aren't checked; violating them silently produces
/// incomplete results.
///
/// # Errors
/// An error is returned (before any work is done) when:
/// - `smoothing_radius` is negative or NaN
/// - an array's length doesn't match the number of points in its grid
/// - `cell_range` extends past the last cell of grid 1
/// - a grid's sort permutation isn't a permutation
///
/// An empty `cell_range` isn't an error; it just produces zeros.
pub fn inertia_tensors(
    mesh: &DoubleMesh,
    positions1: [&[f64]; 3],
    positions2: [&[f64]; 3],
    weights2: Option<&[f64]>,
    smoothing_radius: f64,
    cell_range: Range<usize>,
) -> Result<InertiaTensors, Error> {
    let grid1 = mesh.grid1();
    let grid2 = mesh.grid2();
    let span = debug_span!(
        "inertia_tensors",
        n1 = grid1.n_points(),
        n2 = grid2.n_points(),
        first = cell_range.start,
        last = cell_range.end,
    );
    let _guard = span.enter();

    if smoothing_radius.is_nan() || smoothing_radius < 0.0 {
        return Err(Error::smoothing_radius(smoothing_radius));
    }
    check_point_arrays(
        grid1,
        &[("x1", positions1[0]), ("y1", positions1[1]), ("z1", positions1[2])],
    )?;
    check_point_arrays(
        grid2,
        &[("x2", positions2[0]), ("y2", positions2[1]), ("z2", positions2[2])],
    )?;
    if let Some(weights2) = weights2 {
        check_point_arrays(grid2, &[("weights2", weights2)])?;
    }
    let n_cells1 = grid1.n_cells();
    if cell_range.start > n_cells1 || cell_range.end > n_cells1 {
        return Err(Error::cell_range(cell_range.start, cell_range.end, n_cells1));
    }
    let perm1 = Permutation::new(grid1.sort_permutation(), "grid1 sort permutation")?;
    let perm2 = Permutation::new(grid2.sort_permutation(), "grid2 sort permutation")?;

    if cell_range.is_empty() || grid2.n_cells() == 0 {
        trace!("no cells to visit");
        return Ok(InertiaTensors::zeros(grid1.n_points()));
    }

    let window = SearchWindowSpec::new(mesh);
    trace!(
        covering_steps = ?window.covering_steps(),
        cells2_per_cell1 = ?window.cells2_per_cell1(),
        periodic = mesh.is_periodic(),
        "computed search window"
    );

    // sort everything into cell order
    let sorted1 = positions1.map(|comp| perm1.gather(comp));
    let sorted2 = positions2.map(|comp| perm2.gather(comp));
    let sorted_weights2 = weights2.map(|w| perm2.gather(w));
    let points1 = SortedPoints::new([&sorted1[0], &sorted1[1], &sorted1[2]], None)
        .map_err(Error::internal_legacy_adhoc)?;
    let points2 = SortedPoints::new(
        [&sorted2[0], &sorted2[1], &sorted2[2]],
        sorted_weights2.as_deref(),
    )
    .map_err(Error::internal_legacy_adhoc)?;

    let mut sorted_out = InertiaTensors::zeros(grid1.n_points());
    let weight_sums = sorted_out
        .weight_sums
        .as_slice_mut()
        .ok_or(Error::internal_legacy_adhoc("weight_sums isn't contiguous"))?;
    accumulate_cell_range(
        &mut sorted_out.tensors.view_mut(),
        weight_sums,
        mesh,
        &points1,
        &points2,
        smoothing_radius,
        cell_range,
    )
    .map_err(Error::internal_legacy_adhoc)?;

    Ok(InertiaTensors {
        tensors: perm1.unsort_axis0(sorted_out.tensors.view()),
        weight_sums: perm1.unsort_axis0(sorted_out.weight_sums.view()),
    })
}
