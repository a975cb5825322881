// the reason this is named mod.rs has to do with some complexities of how
// testing is handled
//
// we are following the advice of the rust book
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests
#![allow(dead_code)]

use ndarray::{Array1, Array3};
use pairinertia::{CellGrid, DoubleMesh};
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;

// based on numpy!
// https://numpy.org/doc/stable/reference/generated/numpy.isclose.html
pub fn isclose(actual: f64, ref_val: f64, rtol: f64, atol: f64) -> bool {
    let actual_nan = actual.is_nan();
    let ref_nan = ref_val.is_nan();
    if actual_nan || ref_nan {
        actual_nan && ref_nan
    } else {
        (actual - ref_val).abs() <= (atol + rtol * ref_val.abs())
    }
}

/// A point set where each coordinate component is stored in a separate Vec
#[derive(Clone)]
pub struct OwnedPoints {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub weights: Vec<f64>,
}

impl OwnedPoints {
    pub fn from_xyz(points: &[[f64; 3]], weights: &[f64]) -> Self {
        assert_eq!(points.len(), weights.len());
        Self {
            x: points.iter().map(|p| p[0]).collect(),
            y: points.iter().map(|p| p[1]).collect(),
            z: points.iter().map(|p| p[2]).collect(),
            weights: weights.to_vec(),
        }
    }

    /// draw `n_points` points uniformly from the box. Weights are integers
    /// (so that sums are associative) between 1 and 4
    pub fn random(seed: u64, n_points: usize, box_lengths: [f64; 3]) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let coord_dists = box_lengths.map(|length| Uniform::new(0.0, length).unwrap());
        let weight_dist = Uniform::try_from(1..=4).unwrap();

        let mut out = Self {
            x: Vec::with_capacity(n_points),
            y: Vec::with_capacity(n_points),
            z: Vec::with_capacity(n_points),
            weights: Vec::with_capacity(n_points),
        };
        for _ in 0..n_points {
            out.x.push(coord_dists[0].sample(&mut rng));
            out.y.push(coord_dists[1].sample(&mut rng));
            out.z.push(coord_dists[2].sample(&mut rng));
            out.weights.push(weight_dist.sample(&mut rng) as f64);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn positions(&self) -> [&[f64]; 3] {
        [&self.x, &self.y, &self.z]
    }

    /// returns a copy where the point at position `i` of the copy is the
    /// point at position `order[i]` of self
    pub fn reordered(&self, order: &[usize]) -> Self {
        let pick = |v: &Vec<f64>| -> Vec<f64> { order.iter().map(|&i| v[i]).collect() };
        Self {
            x: pick(&self.x),
            y: pick(&self.y),
            z: pick(&self.z),
            weights: pick(&self.weights),
        }
    }
}

/// Stand-in for the external grid-building code.
pub struct OwnedGrid {
    divs: [usize; 3],
    widths: [f64; 3],
    offsets: Vec<usize>,
    perm: Vec<usize>,
}

impl OwnedGrid {
    /// sort `points` into a grid with `divs` cells along each axis, spanning
    /// `[0, box_lengths[i])` along axis `i`
    pub fn build(points: &OwnedPoints, box_lengths: [f64; 3], divs: [usize; 3]) -> Self {
        let widths = [
            box_lengths[0] / divs[0] as f64,
            box_lengths[1] / divs[1] as f64,
            box_lengths[2] / divs[2] as f64,
        ];
        let n_cells = divs[0] * divs[1] * divs[2];
        let cell_coord = |val: f64, axis: usize| -> usize {
            ((val / widths[axis]) as usize).min(divs[axis] - 1)
        };
        let cell_ids: Vec<usize> = (0..points.len())
            .map(|i| {
                let ix = cell_coord(points.x[i], 0);
                let iy = cell_coord(points.y[i], 1);
                let iz = cell_coord(points.z[i], 2);
                (ix * divs[1] + iy) * divs[2] + iz
            })
            .collect();

        let mut perm: Vec<usize> = (0..points.len()).collect();
        perm.sort_by_key(|&i| cell_ids[i]);

        let mut offsets = vec![0; n_cells + 1];
        for &cell_id in &cell_ids {
            offsets[cell_id + 1] += 1;
        }
        for c in 0..n_cells {
            offsets[c + 1] += offsets[c];
        }

        Self {
            divs,
            widths,
            offsets,
            perm,
        }
    }

    pub fn view(&self) -> CellGrid<'_> {
        CellGrid::new(self.divs, self.widths, &self.offsets, &self.perm).unwrap()
    }

    pub fn n_cells(&self) -> usize {
        self.offsets.len() - 1
    }
}

/// Bundles together everything needed to call `inertia_tensors`
pub struct Setup {
    pub points1: OwnedPoints,
    pub points2: OwnedPoints,
    pub grid1: OwnedGrid,
    pub grid2: OwnedGrid,
    pub box_lengths: [f64; 3],
    pub periodic: bool,
    pub search_length: f64,
}

impl Setup {
    pub fn new(
        points1: OwnedPoints,
        points2: OwnedPoints,
        box_lengths: [f64; 3],
        divs1: [usize; 3],
        cells2_per_cell1: [usize; 3],
        periodic: bool,
        search_length: f64,
    ) -> Self {
        let divs2 = [
            divs1[0] * cells2_per_cell1[0],
            divs1[1] * cells2_per_cell1[1],
            divs1[2] * cells2_per_cell1[2],
        ];
        let grid1 = OwnedGrid::build(&points1, box_lengths, divs1);
        let grid2 = OwnedGrid::build(&points2, box_lengths, divs2);
        Self {
            points1,
            points2,
            grid1,
            grid2,
            box_lengths,
            periodic,
            search_length,
        }
    }

    pub fn mesh(&self) -> DoubleMesh<'_> {
        DoubleMesh::new(
            self.grid1.view(),
            self.grid2.view(),
            self.box_lengths,
            self.periodic,
            [self.search_length; 3],
        )
        .unwrap()
    }

    pub fn n_cells1(&self) -> usize {
        self.grid1.n_cells()
    }
}

/// compute the expected result by directly considering every pair (this
/// uses the minimum image convention, so the radius must be less than half
/// of each box length when periodic is true)
pub fn brute_force(
    points1: &OwnedPoints,
    points2: &OwnedPoints,
    box_lengths: [f64; 3],
    periodic: bool,
    smoothing_radius: f64,
) -> (Array3<f64>, Array1<f64>) {
    let n1 = points1.len();
    let mut tensors = Array3::<f64>::zeros((n1, 3, 3));
    let mut weight_sums = Array1::<f64>::zeros(n1);

    let separation = |a: f64, b: f64, length: f64| -> f64 {
        let mut d = a - b;
        if periodic {
            if d > 0.5 * length {
                d -= length;
            } else if d < -0.5 * length {
                d += length;
            }
        }
        d
    };

    for i in 0..n1 {
        for j in 0..points2.len() {
            let d = [
                separation(points1.x[i], points2.x[j], box_lengths[0]),
                separation(points1.y[i], points2.y[j], box_lengths[1]),
                separation(points1.z[i], points2.z[j], box_lengths[2]),
            ];
            let dsq = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
            if dsq < smoothing_radius * smoothing_radius {
                let w = points2.weights[j];
                for a in 0..3 {
                    for b in 0..3 {
                        tensors[[i, a, b]] += w * d[a] * d[b];
                    }
                }
                weight_sums[i] += w;
            }
        }
    }
    (tensors, weight_sums)
}

/// assert that 2 sets of results are consistent
pub fn assert_consistent_results(
    actual: (&Array3<f64>, &Array1<f64>),
    expected: (&Array3<f64>, &Array1<f64>),
    rtol: f64,
    atol: f64,
) {
    assert_eq!(actual.0.shape(), expected.0.shape());
    assert_eq!(actual.1.shape(), expected.1.shape());
    for ((idx, a), e) in actual.0.indexed_iter().zip(expected.0.iter()) {
        assert!(
            isclose(*a, *e, rtol, atol),
            "tensor entry {idx:?} is {a}, but should be {e}"
        );
    }
    for (i, (a, e)) in actual.1.iter().zip(expected.1.iter()).enumerate() {
        assert!(
            isclose(*a, *e, rtol, atol),
            "weight sum {i} is {a}, but should be {e}"
        );
    }
}
