//! Conversions between matrices, vectors and N-dimensional arrays.
//!
//! All conversions interpret buffers in row-major (standard) element order. Conversions return a
//! [`CowArray`](ndarray::CowArray), which borrows from the input when its elements are already
//! contiguous in standard order, and owns a copy otherwise. Use
//! [`is_view`](ndarray::CowArray::is_view) to tell the two apart.
//!
//! Matrices with mostly negligible entries can be compressed with [`tensor2_to_sparse`].

use std::fmt;

use ndarray::{Array, Array1, Array2};

mod convert;
pub use convert::{
    copy_dims, matrix_to_tensor, matrix_to_tensor1, matrix_to_tensor2, tensor1_to_vector,
    tensor2_to_matrix, tensor_to_matrix,
};

mod diagonal;
pub use diagonal::{
    as_diagonal, as_diagonal_inversed, as_diagonal_inversed2, as_diagonal_squared, as_normalized,
    extract_diagonal,
};

mod index;
pub use index::{idx, sort_idx};

mod order;
pub use order::{is_col_major, to_col_major, to_row_major};

mod sparse;
pub use sparse::{tensor2_to_sparse, PRUNE_THRESHOLD};

/// A dense matrix.
pub type MatrixType<A> = Array2<A>;

/// A dense vector.
pub type VectorType<A> = Array1<A>;

/// A sparse matrix in compressed storage.
pub type SparseMatrixType<A> = sprs::CsMat<A>;

/// A dense N-dimensional array.
pub type Tensor<A, D> = Array<A, D>;

/// Fixed-rank dimensions.
pub type Dims<const N: usize> = [usize; N];

/// A pair of axes to be contracted, one from each operand.
pub type IndexPair = (usize, usize);

/// An error associated with a tensor conversion.
#[derive(Clone, Debug)]
pub enum TensorError {
    /// A dimension does not fit in `usize`.
    Overflow {
        /// The dimension.
        dim: u64,
    },
    /// The number of dimensions differs from the expected rank.
    RankMismatch {
        /// Expected rank.
        expected: usize,
        /// Rank found.
        found: usize,
    },
    /// A shape was rejected by `ndarray`.
    Shape(ndarray::ShapeError),
    /// The number of elements differs between source and target shape.
    SizeMismatch {
        /// Number of elements in the source.
        source: usize,
        /// Number of elements in the target shape.
        target: usize,
    },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::Overflow { dim } => write!(f, "dimension {dim} does not fit in memory"),
            TensorError::RankMismatch { expected, found } => {
                write!(f, "expected {expected} dimensions, found {found}")
            }
            TensorError::Shape(e) => write!(f, "{e}"),
            TensorError::SizeMismatch { source, target } => write!(
                f,
                "cannot reshape {source} elements into shape with {target} elements"
            ),
        }
    }
}

impl std::error::Error for TensorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TensorError::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ndarray::ShapeError> for TensorError {
    fn from(e: ndarray::ShapeError) -> Self {
        TensorError::Shape(e)
    }
}
