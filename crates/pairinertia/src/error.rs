// We follow the same approach as a number of other crates: the public
// `Error` type is opaque and wraps a private `ErrorKind`. The internal crate
// still reports problems with `&'static str`, which we wrap with
// `ErrorKind::InternalLegacyAdHoc`.

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Clone, Debug)]
enum ErrorKind {
    /// An error that occurs when the length of an input (or output) array is
    /// inconsistent with the number of points described by a grid
    ArrayLength(ArrayLengthError),
    /// An error that occurs when the requested range of primary cell ids
    /// extends past the primary grid
    CellRange(CellRangeError),
    /// An error that occurs within `pairinertia_nostd_internal`
    ///
    /// At the time of writing, this is primarily produced by malformed grid
    /// metadata.
    InternalLegacyAdHoc(InternalLegacyAdHocError),
    /// An error that occurs when a sort permutation isn't a permutation
    Permutation(PermutationError),
    /// An error that occurs when the smoothing radius is negative or NaN
    SmoothingRadius(SmoothingRadiusError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that the array named `which` has the
    /// wrong length
    pub(crate) fn array_length(which: &'static str, expected: usize, actual: usize) -> Self {
        Error {
            kind: ErrorKind::ArrayLength(ArrayLengthError {
                which,
                expected,
                actual,
            }),
        }
    }

    /// produce an error indicating that the cell range extends past the
    /// primary grid
    pub(crate) fn cell_range(first: usize, last: usize, n_cells: usize) -> Self {
        Error {
            kind: ErrorKind::CellRange(CellRangeError {
                first,
                last,
                n_cells,
            }),
        }
    }

    /// wraps an internal error string
    pub(crate) fn internal_legacy_adhoc(message: &'static str) -> Self {
        Error {
            kind: ErrorKind::InternalLegacyAdHoc(InternalLegacyAdHocError(message)),
        }
    }

    /// produce an error indicating that `which` holds an out-of-bounds or
    /// repeated `value` at `position`
    pub(crate) fn permutation(which: &'static str, position: usize, value: usize) -> Self {
        Error {
            kind: ErrorKind::Permutation(PermutationError {
                which,
                position,
                value,
            }),
        }
    }

    /// produce an error indicating that the smoothing radius is invalid
    pub(crate) fn smoothing_radius(value: f64) -> Self {
        Error {
            kind: ErrorKind::SmoothingRadius(SmoothingRadiusError { value }),
        }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl std::error::Error for ErrorKind {}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::ArrayLength(ref err) => err.fmt(f),
            ErrorKind::CellRange(ref err) => err.fmt(f),
            ErrorKind::InternalLegacyAdHoc(ref msg) => msg.fmt(f),
            ErrorKind::Permutation(ref err) => err.fmt(f),
            ErrorKind::SmoothingRadius(ref err) => err.fmt(f),
        }
    }
}

/// An error that occurs when an array has the wrong length
#[derive(Clone, Debug)]
struct ArrayLengthError {
    which: &'static str,
    expected: usize,
    actual: usize,
}

impl std::error::Error for ArrayLengthError {}

impl core::fmt::Display for ArrayLengthError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let ArrayLengthError {
            which,
            expected,
            actual,
        } = self;
        let (diff, relation) = if actual > expected {
            (actual - expected, "too many")
        } else {
            (expected - actual, "too few")
        };
        write!(
            f,
            "{which} holds {actual} entries, which is {diff} {relation}. \
             It should hold {expected} entries"
        )
    }
}

/// An error that occurs when a cell range extends past the primary grid
#[derive(Clone, Debug)]
struct CellRangeError {
    first: usize,
    last: usize,
    n_cells: usize,
}

impl std::error::Error for CellRangeError {}

impl core::fmt::Display for CellRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the cell range [{}, {}) extends past the primary grid, which \
             only has {} cells",
            self.first, self.last, self.n_cells
        )
    }
}

/// A temporary type that wraps the string errors from
/// `pairinertia_nostd_internal`.
#[derive(Clone)]
struct InternalLegacyAdHocError(&'static str);

impl std::error::Error for InternalLegacyAdHocError {}

impl core::fmt::Display for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl core::fmt::Debug for InternalLegacyAdHocError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Debug::fmt(&self.0, f)
    }
}

/// An error that occurs when a sort permutation holds an entry that is out
/// of bounds or that appears more than once
#[derive(Clone, Debug)]
struct PermutationError {
    which: &'static str,
    position: usize,
    value: usize,
}

impl std::error::Error for PermutationError {}

impl core::fmt::Display for PermutationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} isn't a permutation: the entry at position {} ({}) is either \
             out of bounds or repeated",
            self.which, self.position, self.value
        )
    }
}

/// An error that occurs when the smoothing radius is negative or NaN
#[derive(Clone, Debug)]
struct SmoothingRadiusError {
    value: f64,
}

impl std::error::Error for SmoothingRadiusError {}

impl core::fmt::Display for SmoothingRadiusError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "the smoothing radius must be non-negative, not {}",
            self.value
        )
    }
}
