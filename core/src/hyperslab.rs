//! Hyperslab selections.
//!
//! A hyperslab is a regular, possibly strided, rectangular sub-region of a dataspace. For each
//! axis, `offset` is the first selected index, `extent` is the number of blocks, `stride` is the
//! step between blocks, and `blocks` is the number of consecutive elements in each block. Stride
//! and block size default to one.

use std::fmt;

use crate::{dims::elements, Dims};

/// A hyperslab selection.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Hyperslab {
    /// Start index along each axis.
    pub offset: Option<Dims>,
    /// Number of blocks along each axis.
    pub extent: Option<Dims>,
    /// Step between blocks along each axis.
    pub stride: Option<Dims>,
    /// Block size along each axis.
    pub blocks: Option<Dims>,
}

impl Hyperslab {
    /// Checks that the selection is consistent and lies within a dataspace with the given
    /// dimensions.
    pub fn assert_within(&self, dims: &[u64]) -> Result<(), HyperslabError> {
        match self.rank()? {
            Some(rank) if rank != dims.len() => Err(HyperslabError::RankMismatch {
                expected: dims.len(),
                found: rank,
            }),
            Some(_) => {
                for (axis, &dim) in dims.iter().enumerate() {
                    match self.end(axis, dim) {
                        Some(end) if end > dim => {
                            return Err(HyperslabError::OutOfBounds { axis, end, dim })
                        }
                        Some(_) => (),
                        None => return Err(HyperslabError::Overflow { axis }),
                    }
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn axis(field: &Option<Dims>, axis: usize) -> Option<u64> {
        field.as_ref().and_then(|v| v.get(axis).copied())
    }

    /// Returns one past the last selected index along an axis, or `None` on overflow.
    fn end(&self, axis: usize, dim: u64) -> Option<u64> {
        let offset = Self::axis(&self.offset, axis).unwrap_or(0);
        let extent = Self::axis(&self.extent, axis).unwrap_or(dim.saturating_sub(offset));
        let stride = Self::axis(&self.stride, axis).unwrap_or(1);
        let block = Self::axis(&self.blocks, axis).unwrap_or(1);

        if extent == 0 {
            Some(offset)
        } else {
            (extent - 1)
                .checked_mul(stride)?
                .checked_add(block)?
                .checked_add(offset)
        }
    }

    /// Returns true if no part of the selection has been set.
    pub fn is_empty(&self) -> bool {
        self.offset.is_none()
            && self.extent.is_none()
            && self.stride.is_none()
            && self.blocks.is_none()
    }

    /// Creates a contiguous selection of `extent` elements starting at `offset`.
    pub fn new(offset: Dims, extent: Dims) -> Self {
        Self {
            offset: Some(offset),
            extent: Some(extent),
            stride: None,
            blocks: None,
        }
    }

    /// Returns the number of selected elements.
    ///
    /// The count is `None` if the extent is unknown or the count does not fit in `u64`.
    pub fn num_elements(&self) -> Option<u64> {
        let extent = elements(self.extent.as_ref()?)?;
        let blocks = match &self.blocks {
            Some(blocks) => elements(blocks)?,
            None => 1,
        };

        extent.checked_mul(blocks)
    }

    /// Returns the rank of the selection.
    ///
    /// The rank is `None` if nothing is set, and an error if the fields that are set disagree.
    pub fn rank(&self) -> Result<Option<usize>, HyperslabError> {
        let mut rank = None;

        for field in [&self.offset, &self.extent, &self.stride, &self.blocks]
            .into_iter()
            .flatten()
        {
            match rank {
                None => rank = Some(field.len()),
                Some(expected) if expected != field.len() => {
                    return Err(HyperslabError::RankMismatch {
                        expected,
                        found: field.len(),
                    })
                }
                Some(_) => (),
            }
        }

        Ok(rank)
    }
}

impl fmt::Display for Hyperslab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("offset", &self.offset),
            ("extent", &self.extent),
            ("stride", &self.stride),
            ("blocks", &self.blocks),
        ];

        let mut first = true;
        for (name, field) in fields {
            if let Some(values) = field {
                if !first {
                    f.write_str(" ")?;
                }
                write!(f, "{name} {values:?}")?;
                first = false;
            }
        }

        Ok(())
    }
}

/// An error associated with an inconsistent hyperslab.
#[derive(Debug, Eq, PartialEq)]
pub enum HyperslabError {
    /// The selection extends past the end of an axis.
    OutOfBounds {
        /// Axis index.
        axis: usize,
        /// One past the last selected index.
        end: u64,
        /// Size of the axis.
        dim: u64,
    },
    /// The end of the selection along an axis does not fit in `u64`.
    Overflow {
        /// Axis index.
        axis: usize,
    },
    /// Ranks of the selection fields, or of the selection and the dataspace, differ.
    RankMismatch {
        /// Expected rank.
        expected: usize,
        /// Rank found.
        found: usize,
    },
}

impl fmt::Display for HyperslabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HyperslabError::OutOfBounds { axis, end, dim } => write!(
                f,
                "hyperslab ends at {end} along axis {axis}, which only has size {dim}"
            ),
            HyperslabError::Overflow { axis } => {
                write!(f, "hyperslab end overflows along axis {axis}")
            }
            HyperslabError::RankMismatch { expected, found } => {
                write!(f, "hyperslab has rank {found}, expected rank {expected}")
            }
        }
    }
}

impl std::error::Error for HyperslabError {}
