use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2, LinalgScalar, NdFloat};

/// Returns the diagonal of a square matrix.
///
/// # Panics
///
/// If the matrix is not square.
pub fn extract_diagonal<A, S>(matrix: &ArrayBase<S, Ix2>) -> Array1<A>
where
    A: Clone,
    S: Data<Elem = A>,
{
    assert!(
        matrix.is_square(),
        "cannot extract diagonal of non-square matrix with shape {:?}",
        matrix.shape()
    );

    matrix.diag().to_owned()
}

/// Returns a square matrix with the given diagonal and zeros elsewhere.
pub fn as_diagonal<A, S>(vector: &ArrayBase<S, Ix1>) -> Array2<A>
where
    A: LinalgScalar,
    S: Data<Elem = A>,
{
    Array2::from_diag(vector)
}

/// Returns a square matrix with the squared values on the diagonal.
pub fn as_diagonal_squared<A, S>(vector: &ArrayBase<S, Ix1>) -> Array2<A>
where
    A: LinalgScalar,
    S: Data<Elem = A>,
{
    Array2::from_diag(&vector.mapv(|x| x * x))
}

/// Returns a square matrix with the reciprocal values on the diagonal.
pub fn as_diagonal_inversed<A, S>(vector: &ArrayBase<S, Ix1>) -> Array2<A>
where
    A: LinalgScalar,
    S: Data<Elem = A>,
{
    Array2::from_diag(&vector.mapv(|x| A::one() / x))
}

/// Returns a square matrix with the reciprocal values of the diagonal of a square matrix on its
/// diagonal.
///
/// # Panics
///
/// If the matrix is not square.
pub fn as_diagonal_inversed2<A, S>(matrix: &ArrayBase<S, Ix2>) -> Array2<A>
where
    A: LinalgScalar,
    S: Data<Elem = A>,
{
    as_diagonal_inversed(&extract_diagonal(matrix))
}

/// Returns the vector divided by its Euclidean norm.
///
/// A zero vector is returned unchanged.
pub fn as_normalized<A, S>(vector: &ArrayBase<S, Ix1>) -> Array1<A>
where
    A: NdFloat,
    S: Data<Elem = A>,
{
    let norm = vector.dot(vector).sqrt();

    if norm == A::zero() {
        vector.to_owned()
    } else {
        vector.mapv(|x| x / norm)
    }
}
