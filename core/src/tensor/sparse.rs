use ndarray::{ArrayBase, Data, Ix2, NdFloat};
use sprs::TriMat;

use super::SparseMatrixType;

/// Default magnitude at or below which entries are dropped by [`tensor2_to_sparse`].
pub const PRUNE_THRESHOLD: f64 = 1e-15;

/// Converts a two-dimensional array into a sparse matrix in compressed column storage.
///
/// Entries with magnitude at or below `prune_threshold` are dropped, zeros included.
pub fn tensor2_to_sparse<A, S>(
    tensor: &ArrayBase<S, Ix2>,
    prune_threshold: A,
) -> SparseMatrixType<A>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let mut triplets = TriMat::new(tensor.dim());

    for ((row, col), &value) in tensor.indexed_iter() {
        if value.abs() > prune_threshold {
            triplets.add_triplet(row, col, value);
        }
    }

    log::trace!(
        "Kept {} of {} entries in sparse matrix",
        triplets.nnz(),
        tensor.len()
    );

    triplets.to_csc()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{array, Array2};

    #[test]
    fn test_pruning_at_threshold() {
        let tensor = array![[1.0f64, 1e-15], [-2e-15, 0.0], [-1e-15, 3.0]];

        let sparse = tensor2_to_sparse(&tensor, PRUNE_THRESHOLD);

        assert!(sparse.is_csc());
        assert_eq!(sparse.shape(), (3, 2));
        assert_eq!(sparse.nnz(), 3);
        assert_eq!(sparse.get(0, 0), Some(&1.0));
        assert_eq!(sparse.get(0, 1), None);
        assert_eq!(sparse.get(1, 0), Some(&-2e-15));
        assert_eq!(sparse.get(2, 0), None);
        assert_eq!(sparse.get(2, 1), Some(&3.0));
    }

    #[test]
    fn test_dense_round_trip() {
        let tensor = array![[0.0f64, 2.0, 0.0], [4.0, 0.0, -5.0]];

        let sparse = tensor2_to_sparse(&tensor, 0.0);

        assert_eq!(sparse.nnz(), 3);
        assert_eq!(sparse.to_dense(), tensor);
    }

    #[test]
    fn test_larger_threshold() {
        let tensor = array![[0.5f64, -0.1], [0.1, 0.2]];

        let sparse = tensor2_to_sparse(&tensor.t(), 0.1);

        assert_eq!(sparse.nnz(), 2);
        assert_eq!(sparse.get(0, 0), Some(&0.5));
        assert_eq!(sparse.get(1, 1), Some(&0.2));
    }

    #[test]
    fn test_all_pruned() {
        let sparse = tensor2_to_sparse(&Array2::<f32>::zeros((2, 4)), 0.0);

        assert_eq!(sparse.shape(), (2, 4));
        assert_eq!(sparse.nnz(), 0);
    }
}
