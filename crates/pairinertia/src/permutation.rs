//! Machinery for moving data between the original ordering of a point set
//! and the cell-sorted ordering of its grid.

use crate::Error;
use ndarray::{Array, ArrayView, Axis, RemoveAxis};

/// A validated sort permutation.
///
/// The entry at position `i` is the original position of the point at
/// position `i` of the sorted ordering (i.e. `sorted[i] = original[P[i]]`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    sorted_to_original: Vec<usize>,
}

impl Permutation {
    /// create a new instance, after checking that `sorted_to_original` is
    /// a permutation of `0..sorted_to_original.len()`
    ///
    /// `which` is used to describe the permutation in error messages.
    pub fn new(sorted_to_original: &[usize], which: &'static str) -> Result<Self, Error> {
        let n = sorted_to_original.len();
        let mut seen = vec![false; n];
        for (position, &value) in sorted_to_original.iter().enumerate() {
            match seen.get_mut(value) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(Error::permutation(which, position, value)),
            }
        }
        Ok(Self {
            sorted_to_original: sorted_to_original.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.sorted_to_original.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_to_original.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.sorted_to_original
    }

    /// produce the inverse permutation, `Q`, such that
    /// `original[j] = sorted[Q[j]]`
    pub fn inverse(&self) -> Permutation {
        let mut original_to_sorted = vec![0; self.len()];
        for (sorted_pos, &original_pos) in self.sorted_to_original.iter().enumerate() {
            original_to_sorted[original_pos] = sorted_pos;
        }
        Permutation {
            sorted_to_original: original_to_sorted,
        }
    }

    /// copy `original` into the sorted ordering
    ///
    /// # Panics
    /// `original` must have the same length as `self`
    pub fn gather(&self, original: &[f64]) -> Vec<f64> {
        assert_eq!(original.len(), self.len());
        self.sorted_to_original
            .iter()
            .map(|&original_pos| original[original_pos])
            .collect()
    }

    /// copy an array whose leading axis is in the sorted ordering into a
    /// new array whose leading axis is in the original ordering
    ///
    /// # Panics
    /// the length of `sorted` along axis 0 must match the length of `self`
    pub fn unsort_axis0<D: RemoveAxis>(&self, sorted: ArrayView<f64, D>) -> Array<f64, D> {
        assert_eq!(sorted.len_of(Axis(0)), self.len());
        sorted.select(Axis(0), self.inverse().as_slice())
    }
}
