#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Descriptors, validation and tensor adapters for working with HDF5 data.
//!
//! This serves as the core library implementation for the `h5kit` CLI, but can also be used as a
//! free-standing library by code that binds an HDF5 implementation.
//!
//! # Overview
//!
//! Reading or writing a dataset, attribute or table is a sequence of native calls, each of which
//! needs a particular set of handles and metadata. The [`info`] module provides optional-field
//! descriptors that collect this metadata as it becomes known, and readiness checks that report
//! every missing or invalid field at once before the native call is made. The [`compat`] module
//! checks that declared dimensions fit the requested storage [`Layout`].
//!
//! The [`tensor`] module provides shorthand conversions between matrices and N-dimensional
//! arrays from [`ndarray`], making it explicit whether a conversion borrowed or copied.
//!
//! # Example
//!
//! ```
//! use h5kit_core::{info::Options, Layout};
//!
//! let options = Options {
//!     link_path: Some(String::from("group/dset")),
//!     data_dims: Some(vec![3, 4]),
//!     dset_dims_max: Some(vec![2, 4]),
//!     h5_layout: Some(Layout::Chunked),
//!     ..Default::default()
//! };
//!
//! // The dataset cannot hold more rows than its maximum dimensions allow
//! let error = options.assert_well_defined().unwrap_err();
//! assert!(error.to_string().contains("dimensions incompatible"));
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod compat;
pub use compat::{report_compatibility, report_layout_compatibility, DimSizeComparison};

pub mod dims;
pub use dims::{Dims, UNLIMITED};

pub mod enums;
pub use enums::{Layout, ObjectType, ResizePolicy, TypeClass};

pub mod format;

pub mod hid;
pub use hid::Hid;

pub mod hyperslab;
pub use hyperslab::Hyperslab;

pub mod info;
pub use info::{InfoError, Operation, Ready, Validate};

pub mod tensor;
