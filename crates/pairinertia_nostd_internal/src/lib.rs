//! Internal machinery for computing per-point inertia tensors from a pair of
//! pre-built spatial grids.
//!
//! This crate is `no_std` and performs no allocations. Everything here
//! operates on points that have already been sorted into cell order. The
//! public `pairinertia` crate handles validation, sorting, and unsorting.
//!
//! # Overview
//! - [`CellGrid`] and [`DoubleMesh`] describe the grids.
//! - [`CellIdxSpec`] maps between linear cell ids and 3D cell indices.
//! - [`SearchWindowSpec`] and [`AxisWrap`] enumerate the grid 2 cells that
//!   may hold neighbors of the points in a given grid 1 cell (including
//!   periodic images).
//! - [`accumulate_cell_range`] is the pairwise accumulation kernel.

#![no_std]
#![deny(rustdoc::broken_intra_doc_links)]

mod kernel;
mod mesh;
mod misc;
mod window;

pub use kernel::{SortedPoints, accumulate_cell_range};
pub use mesh::{CellGrid, DoubleMesh};
pub use misc::CellIdxSpec;
pub use window::{AxisWrap, SearchWindowSpec, covering_steps};
