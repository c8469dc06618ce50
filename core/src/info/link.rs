use std::fmt;

use crate::{
    hid::{H5f, H5o, RawHid},
    ObjectType,
};

use super::{push_field, Check, InfoError, Operation, Validate};

/// Object header metadata.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct HeaderInfo {
    /// Version of the header format.
    pub version: u32,
    /// Number of header messages.
    pub num_messages: u32,
    /// Number of header chunks.
    pub num_chunks: u32,
    /// Total space for the header in bytes.
    pub total_bytes: u64,
    /// Space used by messages in bytes.
    pub meta_bytes: u64,
    /// Free space in bytes.
    pub free_bytes: u64,
}

/// Describes a link and the object it points to.
///
/// Timestamps are seconds since the Unix epoch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkInfo {
    /// File the link belongs to.
    pub h5_file: Option<H5f>,
    /// Object the link points to.
    pub h5_link: Option<H5o>,
    /// Path of the link relative to the file root.
    pub link_path: Option<String>,
    /// Whether the link exists.
    pub link_exists: Option<bool>,
    /// Object header metadata.
    pub h5_hdr_info: Option<HeaderInfo>,
    /// Total space for the object header in bytes.
    pub h5_hdr_byte: Option<u64>,
    /// Type of the object.
    pub h5_obj_type: Option<ObjectType>,
    /// Reference count of the object.
    pub ref_count: Option<u32>,
    /// Access time.
    pub atime: Option<i64>,
    /// Modification time.
    pub mtime: Option<i64>,
    /// Change time.
    pub ctime: Option<i64>,
    /// Birth time.
    pub btime: Option<i64>,
    /// Number of attributes attached to the object.
    pub num_attrs: Option<u64>,
}

impl LinkInfo {
    /// Returns true if a handle locating the link is known.
    pub fn has_loc_id(&self) -> bool {
        self.h5_file.is_some() || self.h5_link.is_some()
    }

    /// Returns the raw identifier locating the link: the file if known, else the object.
    pub fn loc_id(&self) -> Option<RawHid> {
        let loc = self
            .h5_file
            .as_ref()
            .map(|hid| hid.raw())
            .or_else(|| self.h5_link.as_ref().map(|hid| hid.raw()));

        if loc.is_none() {
            log::debug!("Header location id is not defined");
        }

        loc
    }
}

impl Validate for LinkInfo {
    const TARGET: &'static str = "link";

    fn assert_ready(&self, operation: Operation) -> Result<(), InfoError> {
        if operation != Operation::Read {
            return Err(InfoError::Unsupported {
                operation,
                target: Self::TARGET,
            });
        }

        Check::new(operation, Self::TARGET)
            .require("h5_file", &self.h5_file)
            .require("h5_link", &self.h5_link)
            .require("link_path", &self.link_path)
            .require("link_exists", &self.link_exists)
            .require("h5_hdr_info", &self.h5_hdr_info)
            .require("h5_hdr_byte", &self.h5_hdr_byte)
            .require("h5_obj_type", &self.h5_obj_type)
            .require("ref_count", &self.ref_count)
            .require("atime", &self.atime)
            .require("mtime", &self.mtime)
            .require("ctime", &self.ctime)
            .require("btime", &self.btime)
            .require("num_attrs", &self.num_attrs)
            .missing()
    }
}

impl fmt::Display for LinkInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        push_field(&mut msg, "ref count", self.ref_count);
        push_field(&mut msg, "header bytes", self.h5_hdr_byte);
        if let Some(path) = &self.link_path {
            msg.push_str(&format!(" | link [{path}]"));
        }

        f.write_str(&msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> LinkInfo {
        LinkInfo {
            h5_file: Some(H5f::new(1)),
            h5_link: Some(H5o::new(2)),
            link_path: Some(String::from("group/dset")),
            link_exists: Some(true),
            h5_hdr_info: Some(HeaderInfo {
                version: 2,
                num_messages: 8,
                num_chunks: 1,
                total_bytes: 272,
                meta_bytes: 240,
                free_bytes: 32,
            }),
            h5_hdr_byte: Some(272),
            h5_obj_type: Some(ObjectType::Dataset),
            ref_count: Some(1),
            atime: Some(0),
            mtime: Some(1_600_000_000),
            ctime: Some(1_600_000_000),
            btime: Some(1_500_000_000),
            num_attrs: Some(3),
        }
    }

    #[test]
    fn test_read_ready() {
        assert!(link().assert_ready(Operation::Read).is_ok());
    }

    #[test]
    fn test_every_field_required() {
        let msg = LinkInfo::default()
            .assert_ready(Operation::Read)
            .unwrap_err()
            .to_string();

        assert_eq!(msg.lines().count(), 14);
        assert!(msg.ends_with("\tnum_attrs"));
    }

    #[test]
    fn test_only_read_supported() {
        assert!(matches!(
            link().assert_ready(Operation::Create),
            Err(InfoError::Unsupported { .. })
        ));
    }

    #[test]
    fn test_loc_id() {
        let info = LinkInfo {
            h5_file: None,
            ..link()
        };
        assert_eq!(info.loc_id(), Some(2));
        assert!(!LinkInfo::default().has_loc_id());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            link().to_string(),
            " | ref count 1 | header bytes 272 | link [group/dset]"
        );
    }
}
