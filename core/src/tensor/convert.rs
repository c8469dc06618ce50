use ndarray::{
    Array, ArrayBase, ArrayView, Axis, CowArray, Data, Dimension, IntoDimension, Ix1, Ix2,
};

use super::{Dims, TensorError};

/// Reshapes a view in standard order, borrowing if its elements are contiguous.
fn reshape<'a, A, D, E>(
    view: ArrayView<'a, A, D>,
    shape: E,
) -> Result<CowArray<'a, A, E>, TensorError>
where
    A: Clone,
    D: Dimension,
    E: Dimension,
{
    if view.len() != shape.size() {
        return Err(TensorError::SizeMismatch {
            source: view.len(),
            target: shape.size(),
        });
    }

    match view.to_slice() {
        Some(values) => Ok(CowArray::from(ArrayView::from_shape(shape, values)?)),
        None => {
            log::trace!("Copying {} elements into standard layout", view.len());

            let values = view.iter().cloned().collect::<Vec<_>>();
            Ok(CowArray::from(Array::from_shape_vec(shape, values)?))
        }
    }
}

/// Copies dimensions, e.g. as read from file, into a fixed-rank shape.
pub fn copy_dims<const N: usize>(dims: &[u64]) -> Result<Dims<N>, TensorError> {
    if dims.len() != N {
        return Err(TensorError::RankMismatch {
            expected: N,
            found: dims.len(),
        });
    }

    let mut shape = [0; N];
    for (n, &dim) in shape.iter_mut().zip(dims) {
        *n = usize::try_from(dim).map_err(|_| TensorError::Overflow { dim })?;
    }

    Ok(shape)
}

/// Reshapes a matrix into an array of arbitrary rank.
///
/// # Errors
///
/// If the shape does not have as many elements as the matrix.
pub fn matrix_to_tensor<'a, A, S, Sh>(
    matrix: &'a ArrayBase<S, Ix2>,
    shape: Sh,
) -> Result<CowArray<'a, A, Sh::Dim>, TensorError>
where
    A: Clone,
    S: Data<Elem = A>,
    Sh: IntoDimension,
{
    reshape(matrix.view(), shape.into_dimension())
}

/// Flattens a matrix into a one-dimensional array.
pub fn matrix_to_tensor1<A, S>(matrix: &ArrayBase<S, Ix2>) -> CowArray<'_, A, Ix1>
where
    A: Clone,
    S: Data<Elem = A>,
{
    match matrix.as_slice() {
        Some(values) => CowArray::from(ArrayView::from(values)),
        None => CowArray::from(matrix.iter().cloned().collect::<Array<A, Ix1>>()),
    }
}

/// Converts a matrix into a two-dimensional array.
pub fn matrix_to_tensor2<A, S>(matrix: &ArrayBase<S, Ix2>) -> CowArray<'_, A, Ix2>
where
    A: Clone,
    S: Data<Elem = A>,
{
    matrix.as_standard_layout()
}

/// Reshapes an array of arbitrary rank into a matrix.
///
/// # Errors
///
/// If the matrix does not have as many elements as the array.
pub fn tensor_to_matrix<A, S, D>(
    tensor: &ArrayBase<S, D>,
    rows: usize,
    cols: usize,
) -> Result<CowArray<'_, A, Ix2>, TensorError>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    reshape(tensor.view(), (rows, cols).into_dimension())
}

/// Converts a two-dimensional array into a matrix.
pub fn tensor2_to_matrix<A, S>(tensor: &ArrayBase<S, Ix2>) -> CowArray<'_, A, Ix2>
where
    A: Clone,
    S: Data<Elem = A>,
{
    tensor.as_standard_layout()
}

/// Converts a one-dimensional array into a column vector, i.e. a matrix with a single column.
pub fn tensor1_to_vector<A, S>(tensor: &ArrayBase<S, Ix1>) -> CowArray<'_, A, Ix2>
where
    A: Clone,
    S: Data<Elem = A>,
{
    tensor.as_standard_layout().insert_axis(Axis(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::{array, Array2};

    fn matrix() -> Array2<f64> {
        Array2::from_shape_vec((4, 6), (0..24).map(f64::from).collect()).unwrap()
    }

    #[test]
    fn test_matrix_tensor_round_trip() {
        let matrix = matrix();

        let tensor = matrix_to_tensor(&matrix, [2, 2, 6]).unwrap();
        assert!(tensor.is_view());
        assert_eq!(tensor[[1, 0, 2]], 14.);

        let back = tensor_to_matrix(&tensor, 4, 6).unwrap();
        assert!(back.is_view());
        assert_eq!(back, matrix);
    }

    #[test]
    fn test_matrix_to_tensor_size_mismatch() {
        let matrix = matrix();
        let result = matrix_to_tensor(&matrix, [5, 5]);

        assert!(matches!(
            result,
            Err(TensorError::SizeMismatch {
                source: 24,
                target: 25
            })
        ));
    }

    #[test]
    fn test_transposed_matrix_is_copied() {
        let matrix = matrix();
        let transposed = matrix.t();

        let flat = matrix_to_tensor(&transposed, 24).unwrap();

        assert!(flat.is_owned());
        assert_eq!(flat[1], matrix[[1, 0]]);
        assert_eq!(flat[4], matrix[[0, 1]]);
    }

    #[test]
    fn test_matrix_to_tensor1() {
        let matrix = matrix();

        let flat = matrix_to_tensor1(&matrix);
        assert!(flat.is_view());
        assert_eq!(flat.len(), 24);
        assert_eq!(flat[7], 7.);

        let transposed = matrix.t();
        let flat = matrix_to_tensor1(&transposed);
        assert!(flat.is_owned());
        assert_eq!(flat[1], 6.);
    }

    #[test]
    fn test_matrix_to_tensor2_and_back() {
        let matrix = matrix();

        let tensor = matrix_to_tensor2(&matrix);
        assert!(tensor.is_view());
        assert_eq!(tensor2_to_matrix(&tensor), matrix);
    }

    #[test]
    fn test_tensor1_to_vector() {
        let tensor = array![1., 2., 3.];
        let vector = tensor1_to_vector(&tensor);

        assert_eq!(vector.shape(), &[3, 1]);
        assert_eq!(vector[[2, 0]], 3.);
    }

    #[test]
    fn test_copy_dims() {
        assert_eq!(copy_dims::<3>(&[2, 3, 4]).unwrap(), [2, 3, 4]);

        assert!(matches!(
            copy_dims::<2>(&[2, 3, 4]),
            Err(TensorError::RankMismatch {
                expected: 2,
                found: 3
            })
        ));
    }
}
