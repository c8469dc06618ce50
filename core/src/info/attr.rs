use std::{any::TypeId, fmt};

use crate::{
    hid::{H5a, H5f, H5o, H5p, H5s, H5t, RawHid},
    Dims, Hyperslab,
};

use super::{push_field, Check, InfoError, Operation, Options, Validate};

/// Describes an attribute on a group or dataset.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttrInfo {
    /// File the attribute belongs to.
    pub h5_file: Option<H5f>,
    /// Object the attribute is attached to.
    pub h5_link: Option<H5o>,
    /// Attribute handle.
    pub h5_attr: Option<H5a>,
    /// Datatype of the attribute elements.
    pub h5_type: Option<H5t>,
    /// Attribute dataspace.
    pub h5_space: Option<H5s>,
    /// Attribute creation property list.
    pub h5_plist_attr_create: Option<H5p>,
    /// Attribute access property list.
    pub h5_plist_attr_access: Option<H5p>,
    /// Attribute name.
    pub attr_name: Option<String>,
    /// Path of the object the attribute is attached to.
    pub link_path: Option<String>,
    /// Whether the attribute exists.
    pub attr_exists: Option<bool>,
    /// Whether the object the attribute is attached to exists.
    pub link_exists: Option<bool>,
    /// Number of elements.
    pub attr_size: Option<u64>,
    /// Size in bytes.
    pub attr_byte: Option<usize>,
    /// Number of dimensions.
    pub attr_rank: Option<usize>,
    /// Dimensions.
    pub attr_dims: Option<Dims>,
    /// Selection of the attribute participating in a transfer.
    pub attr_slab: Option<Hyperslab>,
    /// Name of the element type in memory.
    pub type_name: Option<String>,
    /// Size in bytes of the element type in memory.
    pub type_size: Option<usize>,
    /// Identity of the element type in memory.
    pub type_id: Option<TypeId>,
}

impl AttrInfo {
    /// Seeds an attribute descriptor from user hints.
    pub fn from_options(options: &Options) -> Self {
        Self {
            h5_type: options.h5_type.clone(),
            attr_name: options.attr_name.clone(),
            link_path: options.link_path.clone(),
            attr_rank: options.data_dims.as_ref().map(Vec::len),
            attr_dims: options.data_dims.clone(),
            attr_slab: options.attr_slab.clone(),
            ..Default::default()
        }
    }

    /// Returns true if a handle locating the attribute is known.
    pub fn has_loc_id(&self) -> bool {
        self.h5_file.is_some() || self.h5_link.is_some() || self.h5_attr.is_some()
    }

    /// Returns the raw identifier locating the attribute: the file, the object it is attached
    /// to, or the attribute itself, in that order.
    pub fn loc_id(&self) -> Option<RawHid> {
        let loc = self
            .h5_file
            .as_ref()
            .map(|hid| hid.raw())
            .or_else(|| self.h5_link.as_ref().map(|hid| hid.raw()))
            .or_else(|| self.h5_attr.as_ref().map(|hid| hid.raw()));

        if loc.is_none() {
            log::debug!("Attribute location id is not defined");
        }

        loc
    }

    fn path(&self) -> Option<String> {
        match (&self.link_path, &self.attr_name) {
            (Some(link), Some(attr)) => Some(format!("{link}/{attr}")),
            (None, Some(attr)) => Some(attr.clone()),
            _ => None,
        }
    }

    fn assert_create_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Create, Self::TARGET);
        check
            .require("attr_name", &self.attr_name)
            .require("link_path", &self.link_path)
            .require("attr_exists", &self.attr_exists)
            .require("link_exists", &self.link_exists)
            .require("h5_link", &self.h5_link)
            .require("h5_type", &self.h5_type)
            .require("h5_space", &self.h5_space)
            .require("h5_plist_attr_create", &self.h5_plist_attr_create)
            .require("h5_plist_attr_access", &self.h5_plist_attr_access)
            .missing()?;

        if self.link_exists == Some(false) {
            return Err(InfoError::LinkDoesNotExist {
                attr_name: self.attr_name.clone().unwrap_or_default(),
                link_path: self.link_path.clone().unwrap_or_default(),
            });
        }

        check
            .valid("h5_link", &self.h5_link)
            .valid("h5_type", &self.h5_type)
            .valid("h5_space", &self.h5_space)
            .valid("h5_plist_attr_create", &self.h5_plist_attr_create)
            .valid("h5_plist_attr_access", &self.h5_plist_attr_access)
            .invalid(self.path().as_deref())
    }

    fn assert_write_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Write, Self::TARGET);
        check
            .require("h5_attr", &self.h5_attr)
            .require("h5_type", &self.h5_type)
            .missing()?;

        check
            .valid("h5_attr", &self.h5_attr)
            .valid("h5_type", &self.h5_type)
            .invalid(self.path().as_deref())
    }

    fn assert_read_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Read, Self::TARGET);
        check
            .require("h5_attr", &self.h5_attr)
            .require("h5_type", &self.h5_type)
            .require("h5_space", &self.h5_space)
            .missing()?;

        check
            .valid("h5_attr", &self.h5_attr)
            .valid("h5_type", &self.h5_type)
            .valid("h5_space", &self.h5_space)
            .invalid(self.path().as_deref())
    }
}

impl Validate for AttrInfo {
    const TARGET: &'static str = "attribute";

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

impl fmt::Display for AttrInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        push_field(&mut msg, "size", self.attr_size);
        push_field(&mut msg, "bytes", self.attr_byte);
        push_field(&mut msg, "rank", self.attr_rank);
        if let Some(dims) = self.attr_dims.as_ref().filter(|dims| !dims.is_empty()) {
            msg.push_str(&format!(" | dims {dims:?}"));
        }
        if let Some(name) = &self.attr_name {
            msg.push_str(&format!(" | name [{name}]"));
        }
        if let Some(path) = &self.link_path {
            msg.push_str(&format!(" | link [{path}]"));
        }

        f.write_str(&msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_ready() -> AttrInfo {
        AttrInfo {
            h5_link: Some(H5o::new(2)),
            h5_type: Some(H5t::new(3)),
            h5_space: Some(H5s::new(4)),
            h5_plist_attr_create: Some(H5p::new(5)),
            h5_plist_attr_access: Some(H5p::new(6)),
            attr_name: Some(String::from("units")),
            link_path: Some(String::from("group/dset")),
            attr_exists: Some(false),
            link_exists: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_ready() {
        assert!(create_ready().assert_ready(Operation::Create).is_ok());
    }

    #[test]
    fn test_create_missing_link() {
        let info = AttrInfo {
            link_exists: Some(false),
            h5_link: Some(H5o::invalid()),
            ..create_ready()
        };

        let error = info.assert_ready(Operation::Create).unwrap_err();

        assert_eq!(
            error.to_string(),
            "cannot create attribute [units] for link [group/dset]: the link does not exist"
        );
    }

    #[test]
    fn test_create_invalid_handles() {
        let info = AttrInfo {
            h5_space: Some(H5s::invalid()),
            h5_plist_attr_create: Some(H5p::invalid()),
            ..create_ready()
        };

        let msg = info
            .assert_ready(Operation::Create)
            .unwrap_err()
            .to_string();

        assert_eq!(
            msg,
            "cannot create attribute [group/dset/units]: the following fields are not valid:\
             \n\th5_space\n\th5_plist_attr_create"
        );
    }

    #[test]
    fn test_write_and_read() {
        let info = AttrInfo {
            h5_attr: Some(H5a::new(7)),
            ..create_ready()
        };
        assert!(info.assert_ready(Operation::Write).is_ok());
        assert!(info.assert_ready(Operation::Read).is_ok());

        let info = AttrInfo {
            h5_space: None,
            ..info
        };
        assert!(info.assert_ready(Operation::Write).is_ok());
        assert!(matches!(
            info.assert_ready(Operation::Read),
            Err(InfoError::Missing { fields, .. }) if fields == ["h5_space"]
        ));
    }

    #[test]
    fn test_resize_unsupported() {
        assert_eq!(
            create_ready()
                .assert_ready(Operation::Resize)
                .unwrap_err()
                .to_string(),
            "attribute does not support resize"
        );
    }

    #[test]
    fn test_from_options_and_location() {
        let options = Options {
            attr_name: Some(String::from("units")),
            ..Options::new("dset")
        };

        let info = AttrInfo::from_options(&options);

        assert_eq!(info.attr_name.as_deref(), Some("units"));
        assert_eq!(info.link_path.as_deref(), Some("dset"));
        assert!(!info.has_loc_id());
        assert_eq!(info.loc_id(), None);

        let info = AttrInfo {
            h5_attr: Some(H5a::new(9)),
            ..info
        };
        assert_eq!(info.loc_id(), Some(9));
    }

    #[test]
    fn test_display_skips_scalar_dims() {
        let info = AttrInfo {
            attr_size: Some(1),
            attr_rank: Some(0),
            attr_dims: Some(vec![]),
            ..create_ready()
        };

        assert_eq!(
            info.to_string(),
            " | size 1 | rank 0 | name [units] | link [group/dset]"
        );
    }
}
