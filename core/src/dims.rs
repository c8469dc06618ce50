//! Dimension lists.

use std::fmt;

/// A list of dimensions, as stored on file.
pub type Dims = Vec<u64>;

/// Sentinel marking an unlimited maximum dimension.
pub const UNLIMITED: u64 = u64::MAX;

/// Returns the number of elements spanned by dimensions, or `None` if it does not fit in `u64`.
///
/// The empty list describes a scalar, which has a single element.
pub fn elements(dims: &[u64]) -> Option<u64> {
    dims.iter().try_fold(1u64, |acc, &dim| acc.checked_mul(dim))
}

/// Returns a displayable version of maximum dimensions, where unlimited dimensions are shown as
/// `-1`.
pub fn display_max(dims: &[u64]) -> MaxDims<'_> {
    MaxDims(dims)
}

/// Maximum dimensions for display, see [`display_max`].
#[derive(Clone, Copy, Debug)]
pub struct MaxDims<'a>(&'a [u64]);

impl<'a> fmt::Display for MaxDims<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, &dim) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if dim == UNLIMITED {
                f.write_str("-1")?;
            } else {
                write!(f, "{dim}")?;
            }
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements() {
        assert_eq!(elements(&[3, 4]), Some(12));
        assert_eq!(elements(&[2, 0, 5]), Some(0));
        assert_eq!(elements(&[]), Some(1));
    }

    #[test]
    fn test_elements_overflow() {
        assert_eq!(elements(&[1 << 32, 1 << 32]), None);
        assert_eq!(elements(&[1 << 32, (1 << 32) - 1]), Some(u64::MAX - (1 << 32) + 1));
        assert_eq!(elements(&[0, UNLIMITED, UNLIMITED]), Some(0));
    }

    #[test]
    fn test_display_max() {
        assert_eq!(display_max(&[10, UNLIMITED]).to_string(), "[10, -1]");
        assert_eq!(display_max(&[]).to_string(), "[]");
    }
}
