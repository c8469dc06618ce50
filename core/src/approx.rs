//! Approximate equality for floating point values and arrays in test assertions.

use ndarray::{ArrayBase, Data, Dimension};

macro_rules! assert_approx_eq {
    ($lhs:expr, $rhs:expr, epsilon = $epsilon:expr $(,)?) => {{
        let (lhs, rhs) = (&$lhs, &$rhs);
        let epsilon: f64 = $epsilon;
        assert!(
            $crate::approx::ApproxEq::approx_eq(lhs, rhs, epsilon),
            "assertion failed: `{} ≈ {}` (epsilon {:e})\n  left: `{:?}`\n right: `{:?}`",
            stringify!($lhs),
            stringify!($rhs),
            epsilon,
            lhs,
            rhs,
        )
    }};
}

/// Equality up to an absolute tolerance.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        (self - other).abs() <= epsilon
    }
}

impl ApproxEq for f32 {
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        f64::from(*self).approx_eq(&f64::from(*other), epsilon)
    }
}

impl<T> ApproxEq for [T]
where
    T: ApproxEq,
{
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(x, y)| x.approx_eq(y, epsilon))
    }
}

impl<T> ApproxEq for Vec<T>
where
    T: ApproxEq,
{
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.as_slice().approx_eq(other, epsilon)
    }
}

/// Arrays are compared in logical order, regardless of memory layout.
impl<A, S, D> ApproxEq for ArrayBase<S, D>
where
    A: ApproxEq,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(x, y)| x.approx_eq(y, epsilon))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array2, ShapeBuilder};

    #[test]
    fn test_scalars() {
        assert_approx_eq!(0.1f64 + 0.2, 0.3, epsilon = 1e-15);
        assert_approx_eq!(1.0f32 / 3.0, 0.333_333_3, epsilon = 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_scalars_outside_epsilon() {
        assert_approx_eq!(1f64, 1.1, epsilon = 1e-3);
    }

    #[test]
    fn test_arrays_in_different_layouts() {
        let row = array![[1., 2.], [3., 4.]];
        let col = Array2::from_shape_vec((2, 2).f(), vec![1., 3., 2., 4. + 1e-10]).unwrap();

        assert_approx_eq!(row, col, epsilon = 1e-8);
    }

    #[test]
    #[should_panic]
    fn test_arrays_with_different_shapes() {
        assert_approx_eq!(array![[1f64, 2.]], array![[1.], [2.]], epsilon = 1.);
    }
}
