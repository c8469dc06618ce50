//! Compatibility between declared dimensions and storage layouts.
//!
//! The functions in this module never fail: they return a diagnostic string that is empty if and
//! only if the inputs are consistent. Absent inputs are never a problem by themselves, since it is
//! up to the caller to decide whether a missing field is required.

use crate::{dims::display_max, Layout};

/// How strictly two dimension lists are compared.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DimSizeComparison {
    /// Every dimension on the smaller side must be less than or equal to the larger side.
    #[default]
    Enforce,
    /// Element-wise sizes are not compared, only ranks.
    Permissive,
}

/// Compares dimensions that should fit inside other dimensions.
///
/// A rank mismatch is always reported. With [`DimSizeComparison::Enforce`], it is further required
/// that `small` is element-wise less than or equal to `large`.
pub fn report_compatibility(
    small: Option<&[u64]>,
    large: Option<&[u64]>,
    comparison: DimSizeComparison,
) -> String {
    let mut msg = String::new();

    let (Some(small), Some(large)) = (small, large) else {
        return msg;
    };

    if small.len() != large.len() {
        msg.push_str("rank mismatch | ");
    }

    let ok = match comparison {
        DimSizeComparison::Enforce => {
            small.len() == large.len() && small.iter().zip(large).all(|(s, l)| s <= l)
        }
        DimSizeComparison::Permissive => true,
    };

    if !ok {
        msg.push_str("dimensions incompatible | ");
    }

    msg
}

/// Checks that dimensions, chunk dimensions and maximum dimensions fit the layout and each other.
///
/// Compact and contiguous layouts forbid chunk dimensions and require maximum dimensions to equal
/// the dimensions. Dimensions must fit inside the maximum dimensions, and so must chunk dimensions.
/// Dimensions are compared with chunk dimensions permissively, since a chunk may well be larger
/// than the data it initially holds.
pub fn report_layout_compatibility(
    layout: Option<Layout>,
    dims: Option<&[u64]>,
    dims_chunk: Option<&[u64]>,
    dims_max: Option<&[u64]>,
) -> String {
    let mut msg = String::new();

    if let Some(layout @ (Layout::Compact | Layout::Contiguous)) = layout {
        if let Some(chunk) = dims_chunk {
            msg.push_str(&format!(
                "chunk dims {chunk:?} | layout is {layout} | \
                 chunk dimensions are only meant for H5D_CHUNKED layouts\n"
            ));
        }
        if let (Some(dims), Some(max)) = (dims, dims_max) {
            if dims != max {
                msg.push_str(&format!(
                    "dims {dims:?} | max dims {} | layout is {layout} | \
                     dims and max dims must be equal unless the layout is H5D_CHUNKED\n",
                    display_max(max)
                ));
            }
        }
    }

    let dims_vs_max = report_compatibility(dims, dims_max, DimSizeComparison::Enforce);
    let dims_vs_chunk = report_compatibility(dims, dims_chunk, DimSizeComparison::Permissive);
    let chunk_vs_max = report_compatibility(dims_chunk, dims_max, DimSizeComparison::Enforce);

    // Non-empty reports imply both sides are present
    if let (false, Some(dims), Some(max)) = (dims_vs_max.is_empty(), dims, dims_max) {
        msg.push_str(&format!(
            "\t{dims_vs_max}: dims {dims:?} | max dims {}\n",
            display_max(max)
        ));
    }
    if let (false, Some(dims), Some(chunk)) = (dims_vs_chunk.is_empty(), dims, dims_chunk) {
        msg.push_str(&format!(
            "\t{dims_vs_chunk}: dims {dims:?} | chunk dims {chunk:?}\n"
        ));
    }
    if let (false, Some(chunk), Some(max)) = (chunk_vs_max.is_empty(), dims_chunk, dims_max) {
        msg.push_str(&format!(
            "\t{chunk_vs_max}: chunk dims {chunk:?} | max dims {}\n",
            display_max(max)
        ));
    }

    msg
}
