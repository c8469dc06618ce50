use std::{any::TypeId, fmt};

use ndarray::{ArrayBase, Data, Dimension};

use crate::{dims::elements, hid::H5s, Dims, Hyperslab};

use super::{push_dims, push_field, Check, InfoError, Operation, TypeInfo, Validate};

/// Describes a value in memory that is written to or read from file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataInfo {
    /// Number of elements.
    pub data_size: Option<u64>,
    /// Size in bytes.
    pub data_byte: Option<usize>,
    /// Dimensions.
    pub data_dims: Option<Dims>,
    /// Number of dimensions.
    pub data_rank: Option<usize>,
    /// Selection of memory participating in a transfer.
    pub data_slab: Option<Hyperslab>,
    /// Memory dataspace.
    pub h5_space: Option<H5s>,
    /// Name of the element type.
    pub type_name: Option<String>,
    /// Size in bytes of the element type.
    pub type_size: Option<usize>,
    /// Identity of the element type.
    pub type_id: Option<TypeId>,
}

impl DataInfo {
    /// Describes an array in memory.
    ///
    /// The memory dataspace is left unset, since it is owned by the native library.
    pub fn from_array<S, D>(array: &ArrayBase<S, D>) -> Self
    where
        S: Data,
        S::Elem: 'static,
        D: Dimension,
    {
        let data_dims = array.shape().iter().map(|&n| n as u64).collect::<Dims>();

        Self::from_parts::<S::Elem>(data_dims, array.len())
    }

    /// Describes a flat slice in memory.
    pub fn from_slice<T: 'static>(slice: &[T]) -> Self {
        Self::from_parts::<T>(vec![slice.len() as u64], slice.len())
    }

    fn from_parts<T: 'static>(data_dims: Dims, len: usize) -> Self {
        let type_info = TypeInfo::of::<T>();

        Self {
            data_size: Some(len as u64),
            data_byte: Some(len * std::mem::size_of::<T>()),
            data_rank: Some(data_dims.len()),
            data_dims: Some(data_dims),
            type_name: type_info.type_name,
            type_size: type_info.type_bytes,
            type_id: type_info.type_id,
            ..Default::default()
        }
    }

    /// Sets the memory dataspace.
    pub fn with_space(mut self, h5_space: H5s) -> Self {
        self.h5_space = Some(h5_space);
        self
    }

    fn assert_transfer_ready(&self, operation: Operation) -> Result<(), InfoError> {
        let mut check = Check::new(operation, Self::TARGET);
        check
            .require("data_size", &self.data_size)
            .require("data_byte", &self.data_byte)
            .require("data_dims", &self.data_dims)
            .require("data_rank", &self.data_rank)
            .require("h5_space", &self.h5_space);

        let (Some(size), Some(dims), Some(rank), Some(_)) = (
            self.data_size,
            &self.data_dims,
            self.data_rank,
            self.data_byte,
        ) else {
            return check.missing();
        };
        check.missing()?;

        check.valid("h5_space", &self.h5_space).assert(
            rank == dims.len(),
            format!("data_rank {rank} differs from rank of data_dims {dims:?}"),
        );
        if let Some(Err(e)) = self.data_slab.as_ref().map(|slab| slab.assert_within(dims)) {
            check.assert(false, format!("data_slab: {e}"));
        }
        check.invalid(None)?;

        if elements(dims) != Some(size) {
            return Err(InfoError::SizeMismatch {
                size,
                dims: dims.clone(),
            });
        }

        Ok(())
    }
}

impl Validate for DataInfo {
    const TARGET: &'static str = "memory";

    fn assert_ready(&self, operation: Operation) -> Result<(), InfoError> {
        match operation {
            Operation::Write | Operation::Read => self.assert_transfer_ready(operation),
            Operation::Create | Operation::Resize => Err(InfoError::Unsupported {
                operation,
                target: Self::TARGET,
            }),
        }
    }
}

impl fmt::Display for DataInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        push_field(&mut msg, "size", self.data_size);
        push_field(&mut msg, "bytes", self.data_byte);
        push_field(&mut msg, "rank", self.data_rank);
        push_dims(&mut msg, "dims", &self.data_dims);
        if let Some(slab) = &self.data_slab {
            msg.push_str(&format!(" | [ Hyperslab {slab} ]"));
        }
        if let Some(name) = &self.type_name {
            msg.push_str(&format!(" | type [{name}]"));
        }

        f.write_str(&msg)
    }
}
