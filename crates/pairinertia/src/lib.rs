/*!
Computes the weighted second-moment (a.k.a. inertia) tensor of every point
in a primary point set from the points of a secondary point set that lie
within a smoothing radius, with optional periodic boundaries.

# High-Level Overview

Each point set must already be sorted into a uniform grid of rectangular
cells (a "cell-list"). The pair of grids is described by a [`DoubleMesh`].
The grids may have different resolutions, as long as the secondary grid
holds an integral number of cells per primary cell along each axis.

For every primary cell, we visit the cube of secondary cells that could
hold points within the smoothing radius (wrapping around the box when the
mesh is periodic) and accumulate `w * d ⊗ d` for each pair closer than the
smoothing radius, where `d` is the separation vector and `w` is the weight
of the secondary point.

# Parallelism

[`inertia_tensors`] is serial. It only processes the primary cells within
a caller-specified range of ids, so that separate invocations over
disjoint ranges (see [`partition_cell_range`]) can be run independently and
combined with [`InertiaTensors::merge`].

# Developer Guide

The pairwise machinery lives in [`pairinertia_nostd_internal`]. This crate
handles validation, sorting points into cell order, and mapping the results
back to the caller's ordering.

*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod error;
mod inertia;
mod partition;
mod permutation;

// pull in symbols that visible outside of the package
pub use error::Error;
pub use inertia::{InertiaTensors, inertia_tensors};
pub use pairinertia_nostd_internal::{
    AxisWrap, CellGrid, CellIdxSpec, DoubleMesh, SearchWindowSpec, covering_steps,
};
pub use partition::partition_cell_range;
pub use permutation::Permutation;
