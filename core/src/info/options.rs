use std::fmt;

use crate::{
    compat::report_layout_compatibility, hid::H5t, Dims, Hyperslab, Layout, ResizePolicy,
};

use super::{push_dims, push_max_dims, InfoError};

/// The highest supported compression level.
pub(crate) const MAX_COMPRESSION: u32 = 9;

/// User-supplied hints for an operation on a dataset or attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Options {
    /// Path to the dataset relative to the file root.
    pub link_path: Option<String>,
    /// Name of an attribute on a group or dataset.
    pub attr_name: Option<String>,
    /// Data dimensions hint.
    pub data_dims: Option<Dims>,
    /// Chunk dimensions on create. Only valid for chunked datasets.
    pub dset_dims_chunk: Option<Dims>,
    /// Maximum dimensions on create. Only valid for chunked datasets.
    pub dset_dims_max: Option<Dims>,
    /// Selection of the dataset participating in a transfer.
    pub dset_slab: Option<Hyperslab>,
    /// Selection of the attribute participating in a transfer.
    pub attr_slab: Option<Hyperslab>,
    /// Selection of memory participating in a transfer.
    pub data_slab: Option<Hyperslab>,
    /// Datatype on create, overriding automatic type detection.
    pub h5_type: Option<H5t>,
    /// Layout on create.
    pub h5_layout: Option<Layout>,
    /// Compression level on create, from 0 (off) to 9 (best and slowest).
    pub compression: Option<u32>,
    /// Resizing policy when writing data that does not fit.
    pub resize_policy: Option<ResizePolicy>,
}

impl Options {
    /// Checks that the options are complete and consistent.
    ///
    /// A link path is required, dimensions must fit the layout and each other, and the
    /// compression level must be in range. Every problem is reported in the same error.
    pub fn assert_well_defined(&self) -> Result<(), InfoError> {
        let mut missing = Vec::new();
        if self.link_path.is_none() {
            missing.push("link_path");
        }

        let mut report = report_layout_compatibility(
            self.h5_layout,
            self.data_dims.as_deref(),
            self.dset_dims_chunk.as_deref(),
            self.dset_dims_max.as_deref(),
        );

        if let Some(level) = self.compression.filter(|&level| level > MAX_COMPRESSION) {
            report.push_str(&format!(
                "compression level {level} is out of range [0, {MAX_COMPRESSION}]\n"
            ));
        }

        if missing.is_empty() && report.is_empty() {
            Ok(())
        } else {
            Err(InfoError::Options { missing, report })
        }
    }

    /// Creates new options for the given link path.
    pub fn new<S>(link_path: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            link_path: Some(link_path.into()),
            ..Default::default()
        }
    }

    /// Sets the chunk dimensions.
    pub fn set_chunk_dims(mut self, dims: Dims) -> Self {
        self.dset_dims_chunk = Some(dims);
        self
    }

    /// Sets the compression level.
    pub fn set_compression(mut self, level: u32) -> Self {
        self.compression = Some(level);
        self
    }

    /// Sets the data dimensions.
    pub fn set_data_dims(mut self, dims: Dims) -> Self {
        self.data_dims = Some(dims);
        self
    }

    /// Sets the layout.
    pub fn set_layout(mut self, layout: Layout) -> Self {
        self.h5_layout = Some(layout);
        self
    }

    /// Sets the maximum dimensions.
    pub fn set_max_dims(mut self, dims: Dims) -> Self {
        self.dset_dims_max = Some(dims);
        self
    }

    /// Sets the resizing policy.
    pub fn set_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = Some(policy);
        self
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        push_dims(&mut msg, "data dims", &self.data_dims);
        push_max_dims(&mut msg, &self.dset_dims_max);
        if let Some(layout) = self.h5_layout {
            msg.push_str(&format!(" | {layout}"));
        }
        push_dims(&mut msg, "chunk dims", &self.dset_dims_chunk);
        if let Some(level) = self.compression {
            msg.push_str(&format!(" | compression {level}"));
        }
        if let Some(slab) = &self.data_slab {
            msg.push_str(&format!(" | memory hyperslab {slab}"));
        }
        if let Some(slab) = &self.dset_slab {
            msg.push_str(&format!(" | file hyperslab {slab}"));
        }

        f.write_str(&msg)
    }
}
