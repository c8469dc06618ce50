use ndarray::{ArrayBase, CowArray, Data, Dimension};

/// Returns true if the elements are contiguous in column-major (Fortran) order.
pub fn is_col_major<S, D>(array: &ArrayBase<S, D>) -> bool
where
    S: Data,
    D: Dimension,
{
    array.t().is_standard_layout()
}

/// Returns the array with elements in row-major (standard) memory order.
///
/// Logical indexing is unchanged. An array that is already in row-major order is borrowed.
pub fn to_row_major<A, S, D>(array: &ArrayBase<S, D>) -> CowArray<'_, A, D>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    if !array.is_standard_layout() {
        log::trace!("Copying array with shape {:?} into row-major order", array.shape());
    }

    array.as_standard_layout()
}

/// Returns the array with elements in column-major (Fortran) memory order.
///
/// Logical indexing is unchanged. An array that is already in column-major order is borrowed.
pub fn to_col_major<A, S, D>(array: &ArrayBase<S, D>) -> CowArray<'_, A, D>
where
    A: Clone,
    S: Data<Elem = A>,
    D: Dimension,
{
    if is_col_major(array) {
        CowArray::from(array.view())
    } else {
        log::trace!("Copying array with shape {:?} into column-major order", array.shape());

        let reversed = array.t().as_standard_layout().into_owned();
        CowArray::from(reversed.reversed_axes())
    }
}
