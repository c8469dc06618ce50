use std::{any::TypeId, fmt, mem};

use crate::{
    hid::{H5o, H5t},
    Dims, TypeClass,
};

use super::{check::field_counts, Check, InfoError, Operation, Validate};

/// Type information about an existing dataset or attribute, and the value it is read into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeInfo {
    /// Name of the type in memory.
    pub type_name: Option<String>,
    /// Size in bytes of the type in memory.
    pub type_bytes: Option<usize>,
    /// Identity of the type in memory.
    pub type_id: Option<TypeId>,
    /// Path of the object on file.
    pub h5_path: Option<String>,
    /// Name of the object on file.
    pub h5_name: Option<String>,
    /// Number of elements on file.
    pub h5_size: Option<u64>,
    /// Rank on file.
    pub h5_rank: Option<usize>,
    /// Dimensions on file.
    pub h5_dims: Option<Dims>,
    /// Datatype on file.
    pub h5_type: Option<H5t>,
    /// Object holding the type on file.
    pub h5_link: Option<H5o>,
}

impl TypeInfo {
    /// Returns type information about the in-memory type `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            type_name: Some(String::from(std::any::type_name::<T>())),
            type_bytes: Some(mem::size_of::<T>()),
            type_id: Some(TypeId::of::<T>()),
            ..Default::default()
        }
    }

    /// Returns true if the in-memory type is `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == Some(TypeId::of::<T>())
    }
}

impl Validate for TypeInfo {
    const TARGET: &'static str = "type info";

    fn assert_ready(&self, operation: Operation) -> Result<(), InfoError> {
        match operation {
            Operation::Read => {
                let mut check = Check::new(operation, Self::TARGET);
                check
                    .require("h5_path", &self.h5_path)
                    .require("h5_type", &self.h5_type)
                    .missing()?;

                check
                    .valid("h5_type", &self.h5_type)
                    .valid("h5_link", &self.h5_link)
                    .invalid(self.h5_path.as_deref())
            }
            _ => Err(InfoError::Unsupported {
                operation,
                target: Self::TARGET,
            }),
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        if let Some(name) = &self.type_name {
            msg.push_str(&format!("type [{name}]"));
        }
        if let Some(bytes) = self.type_bytes {
            msg.push_str(&format!(" bytes [{bytes}]"));
        }
        if !msg.is_empty() {
            msg.push_str(" | HDF5:");
        }
        if let Some(path) = &self.h5_path {
            msg.push_str(&format!(" path [{path}]"));
        }
        if let Some(name) = &self.h5_name {
            msg.push_str(&format!(" name [{name}]"));
        }
        if let Some(size) = self.h5_size {
            msg.push_str(&format!(" size [{size}]"));
        }
        if let Some(rank) = self.h5_rank {
            msg.push_str(&format!(" rank [{rank}]"));
        }
        if let Some(dims) = &self.h5_dims {
            msg.push_str(&format!(" dims {dims:?}"));
        }

        f.write_str(&msg)
    }
}

/// Layout of a datatype on file, including the members of compound and enum types.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct H5TInfo {
    /// Datatype handle.
    pub h5_type: Option<H5t>,
    /// Class of the datatype.
    pub h5_class: Option<TypeClass>,
    /// Size in bytes of a value of the datatype.
    pub type_size: Option<usize>,
    /// Number of members.
    pub num_members: Option<usize>,
    /// Member names.
    pub member_names: Option<Vec<String>>,
    /// Member datatypes.
    pub member_types: Option<Vec<H5t>>,
    /// Member sizes in bytes.
    pub member_sizes: Option<Vec<usize>>,
    /// Member byte offsets within a value.
    pub member_offset: Option<Vec<usize>>,
    /// Member indices.
    pub member_index: Option<Vec<usize>>,
}

impl H5TInfo {
    /// Checks that member sequences agree in length with each other and with the number of
    /// members.
    pub fn assert_well_defined(&self) -> Result<(), InfoError> {
        field_counts(
            Operation::Read,
            Self::TARGET,
            self.num_members.map(|n| ("num_members", n)),
            &[
                ("member_names", self.member_names.as_ref().map(Vec::len)),
                ("member_types", self.member_types.as_ref().map(Vec::len)),
                ("member_sizes", self.member_sizes.as_ref().map(Vec::len)),
                ("member_offset", self.member_offset.as_ref().map(Vec::len)),
                ("member_index", self.member_index.as_ref().map(Vec::len)),
            ],
        )
    }

    /// Returns an iterator over member names and sizes, if both are known.
    pub fn members(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.member_names
            .iter()
            .flatten()
            .zip(self.member_sizes.iter().flatten())
            .map(|(name, &size)| (name.as_str(), size))
    }
}

impl Validate for H5TInfo {
    const TARGET: &'static str = "datatype";

    fn assert_ready(&self, operation: Operation) -> Result<(), InfoError> {
        match operation {
            Operation::Read => {
                let mut check = Check::new(operation, Self::TARGET);
                check
                    .require("h5_type", &self.h5_type)
                    .require("h5_class", &self.h5_class)
                    .require("type_size", &self.type_size)
                    .missing()?;

                check.valid("h5_type", &self.h5_type);
                if let Some(types) = &self.member_types {
                    for (i, member) in types.iter().enumerate() {
                        check.assert(member.is_valid(), format!("member_types[{i}]"));
                    }
                }
                check.invalid(None)?;

                self.assert_well_defined()
            }
            _ => Err(InfoError::Unsupported {
                operation,
                target: Self::TARGET,
            }),
        }
    }
}

impl fmt::Display for H5TInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        if let Some(class) = self.h5_class {
            msg.push_str(&format!(" | class {class}"));
        }
        if let Some(size) = self.type_size {
            msg.push_str(&format!(" | size {size}"));
        }
        if let Some(names) = &self.member_names {
            msg.push_str(&format!(" | members {names:?}"));
        }

        f.write_str(&msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_info_of() {
        let info = TypeInfo::of::<f64>();

        assert_eq!(info.type_name.as_deref(), Some("f64"));
        assert_eq!(info.type_bytes, Some(8));
        assert!(info.is::<f64>());
        assert!(!info.is::<f32>());
    }

    #[test]
    fn test_type_info_display() {
        let info = TypeInfo {
            h5_path: Some(String::from("group/dset")),
            h5_rank: Some(2),
            h5_dims: Some(vec![3, 4]),
            ..TypeInfo::of::<i32>()
        };

        assert_eq!(
            info.to_string(),
            "type [i32] bytes [4] | HDF5: path [group/dset] rank [2] dims [3, 4]"
        );
    }

    #[test]
    fn test_type_info_unsupported() {
        assert_eq!(
            TypeInfo::default().assert_ready(Operation::Write),
            Err(InfoError::Unsupported {
                operation: Operation::Write,
                target: "type info",
            })
        );
    }

    fn compound() -> H5TInfo {
        H5TInfo {
            h5_type: Some(H5t::new(10)),
            h5_class: Some(TypeClass::Compound),
            type_size: Some(12),
            num_members: Some(2),
            member_names: Some(vec![String::from("x"), String::from("n")]),
            member_types: Some(vec![H5t::new(11), H5t::new(12)]),
            member_sizes: Some(vec![8, 4]),
            member_offset: Some(vec![0, 8]),
            member_index: Some(vec![0, 1]),
        }
    }

    #[test]
    fn test_h5t_info_well_defined() {
        let info = compound();

        assert!(info.assert_well_defined().is_ok());
        assert!(info.ready(Operation::Read).is_ok());
        assert_eq!(info.members().collect::<Vec<_>>(), vec![("x", 8), ("n", 4)]);
    }

    #[test]
    fn test_h5t_info_display() {
        assert_eq!(
            compound().to_string(),
            " | class H5T_COMPOUND | size 12 | members [\"x\", \"n\"]"
        );
    }

    #[test]
    fn test_h5t_info_member_count_mismatch() {
        let info = H5TInfo {
            member_offset: Some(vec![0]),
            ..compound()
        };

        let error = info.assert_well_defined().unwrap_err();

        assert!(error.to_string().contains("member_offset 1"));
    }

    #[test]
    fn test_h5t_info_invalid_member_type() {
        let info = H5TInfo {
            member_types: Some(vec![H5t::new(11), H5t::invalid()]),
            ..compound()
        };

        assert!(matches!(
            info.assert_ready(Operation::Read),
            Err(InfoError::Invalid { fields, .. }) if fields == ["member_types[1]"]
        ));
    }
}
