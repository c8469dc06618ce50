use super::IndexPair;

/// Zips the axes to be contracted in each operand into pairs.
///
/// The pairs are in the given order; see [`sort_idx`] to order them by size.
pub fn idx<const N: usize>(a: [usize; N], b: [usize; N]) -> [IndexPair; N] {
    let mut pairs = [(0, 0); N];
    for (pair, (a, b)) in pairs.iter_mut().zip(a.into_iter().zip(b)) {
        *pair = (a, b);
    }
    pairs
}

/// Zips the axes to be contracted in each operand into pairs, ordered so that the largest axes
/// of the second operand are contracted first.
///
/// Pairs with equal dimensions keep their relative order.
///
/// # Panics
///
/// If an axis of the second operand is out of bounds for its dimensions.
pub fn sort_idx<const M: usize, const N: usize>(
    dims: &[usize; M],
    a: [usize; N],
    b: [usize; N],
) -> [IndexPair; N] {
    let mut pairs = idx(a, b);
    pairs.sort_by(|(_, x), (_, y)| dims[*y].cmp(&dims[*x]));
    pairs
}
