use std::fmt;

use crate::{
    hid::{H5d, H5f, H5p, H5t, RawHid},
    Dims,
};

use super::{
    check::field_counts, options::MAX_COMPRESSION, Check, FilterId, InfoError, Operation,
    Validate,
};

/// Describes a table: a one-dimensional dataset of compound records.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableInfo {
    /// File the table belongs to.
    pub h5_file: Option<H5f>,
    /// Dataset holding the records.
    pub h5_dset: Option<H5d>,
    /// Compound datatype of a record.
    pub h5_type: Option<H5t>,
    /// Dataset creation property list.
    pub h5_dset_create: Option<H5p>,
    /// Dataset access property list.
    pub h5_dset_access: Option<H5p>,
    /// Filters in the dataset filter pipeline.
    pub h5_filters: Option<Vec<FilterId>>,
    /// Table title.
    pub table_title: Option<String>,
    /// Path to the table relative to the file root.
    pub table_path: Option<String>,
    /// Name of the group holding the table.
    pub table_group_name: Option<String>,
    /// Number of fields in a record.
    pub num_fields: Option<usize>,
    /// Number of records.
    pub num_records: Option<u64>,
    /// Size in bytes of a record.
    pub record_bytes: Option<usize>,
    /// Chunk dimensions.
    pub chunk_dims: Option<Dims>,
    /// Field names.
    pub field_names: Option<Vec<String>>,
    /// Field sizes in bytes.
    pub field_sizes: Option<Vec<usize>>,
    /// Field byte offsets within a record.
    pub field_offsets: Option<Vec<usize>>,
    /// Field datatypes.
    pub field_types: Option<Vec<H5t>>,
    /// Whether the table exists on file.
    pub table_exists: Option<bool>,
    /// Compression level from 0 to 9.
    pub compression: Option<u32>,
    /// Names of the field types in memory.
    pub type_names: Option<Vec<String>>,
    /// Sizes in bytes of the field types in memory.
    pub type_sizes: Option<Vec<usize>>,
}

impl TableInfo {
    fn assert_field_counts(&self, operation: Operation) -> Result<(), InfoError> {
        field_counts(
            operation,
            Self::TARGET,
            self.num_fields.map(|n| ("num_fields", n)),
            &[
                ("field_names", self.field_names.as_ref().map(Vec::len)),
                ("field_sizes", self.field_sizes.as_ref().map(Vec::len)),
                ("field_offsets", self.field_offsets.as_ref().map(Vec::len)),
                ("field_types", self.field_types.as_ref().map(Vec::len)),
                ("type_names", self.type_names.as_ref().map(Vec::len)),
                ("type_sizes", self.type_sizes.as_ref().map(Vec::len)),
            ],
        )
    }

    /// Returns true if a handle locating the table is known.
    pub fn has_loc_id(&self) -> bool {
        self.h5_file.is_some() || self.h5_dset.is_some()
    }

    /// Returns the raw identifier locating the table: the file if known, else the dataset.
    pub fn loc_id(&self) -> Option<RawHid> {
        let loc = self
            .h5_file
            .as_ref()
            .map(|hid| hid.raw())
            .or_else(|| self.h5_dset.as_ref().map(|hid| hid.raw()));

        if loc.is_none() {
            log::debug!("Table location is not defined");
        }

        loc
    }

    fn assert_create_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Create, Self::TARGET);
        check
            .require("table_title", &self.table_title)
            .require("table_path", &self.table_path)
            .require("table_group_name", &self.table_group_name)
            .require("num_fields", &self.num_fields)
            .require("num_records", &self.num_records)
            .require("record_bytes", &self.record_bytes)
            .require("field_names", &self.field_names)
            .require("field_sizes", &self.field_sizes)
            .require("field_offsets", &self.field_offsets)
            .require("field_types", &self.field_types)
            .require("compression", &self.compression)
            .require("chunk_dims", &self.chunk_dims)
            .missing()?;

        if let Some(level) = self.compression {
            check.assert(
                level <= MAX_COMPRESSION,
                format!("compression {level} > {MAX_COMPRESSION}"),
            );
        }
        check.invalid(self.table_path.as_deref())?;

        if !self.has_loc_id() {
            return Err(InfoError::NoLocation {
                operation: Operation::Create,
                target: Self::TARGET,
                path: self.table_path.clone().unwrap_or_default(),
            });
        }

        self.assert_field_counts(Operation::Create)
    }

    fn assert_read_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Read, Self::TARGET);
        check
            .require("h5_dset", &self.h5_dset)
            .require("h5_type", &self.h5_type)
            .require("table_path", &self.table_path)
            .require("table_exists", &self.table_exists)
            .require("num_fields", &self.num_fields)
            .require("num_records", &self.num_records)
            .require("record_bytes", &self.record_bytes)
            .require("field_names", &self.field_names)
            .require("field_sizes", &self.field_sizes)
            .require("field_types", &self.field_types)
            .require("field_offsets", &self.field_offsets)
            .missing()?;

        check
            .valid("h5_dset", &self.h5_dset)
            .valid("h5_type", &self.h5_type)
            .invalid(self.table_path.as_deref())?;

        self.assert_field_counts(Operation::Read)
    }

    fn assert_write_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Write, Self::TARGET);
        check
            .require("table_path", &self.table_path)
            .require("h5_dset", &self.h5_dset)
            .require("h5_type", &self.h5_type)
            .require("h5_dset_create", &self.h5_dset_create)
            .require("h5_dset_access", &self.h5_dset_access)
            .require("table_exists", &self.table_exists)
            .require("num_fields", &self.num_fields)
            .require("num_records", &self.num_records)
            .require("record_bytes", &self.record_bytes)
            .require("field_sizes", &self.field_sizes)
            .require("field_offsets", &self.field_offsets)
            .missing()?;

        check
            .valid("h5_dset", &self.h5_dset)
            .valid("h5_type", &self.h5_type)
            .valid("h5_dset_create", &self.h5_dset_create)
            .valid("h5_dset_access", &self.h5_dset_access)
            .invalid(self.table_path.as_deref())?;

        self.assert_field_counts(Operation::Write)
    }
}

impl Validate for TableInfo {
    const TARGET: &'static str = "table";

    fn assert_ready(&self, operation: Operation) -> Result<(), InfoError> {
        match operation {
            Operation::Create => self.assert_create_ready(),
            Operation::Write => self.assert_write_ready(),
            Operation::Read => self.assert_read_ready(),
            Operation::Resize => Err(InfoError::Unsupported {
                operation,
                target: Self::TARGET,
            }),
        }
    }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        if let Some(title) = &self.table_title {
            msg.push_str(&format!("Table title [{title}]"));
        }
        if let Some(n) = self.num_fields {
            msg.push_str(&format!(" | num fields [{n}]"));
        }
        if let Some(n) = self.num_records {
            msg.push_str(&format!(" | num records [{n}]"));
        }
        if let Some(dims) = &self.chunk_dims {
            msg.push_str(&format!(" | chunk dims {dims:?}"));
        }
        if let Some(path) = &self.table_path {
            msg.push_str(&format!(" | path [{path}]"));
        }

        f.write_str(&msg)
    }
}
