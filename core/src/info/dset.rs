use std::{any::TypeId, fmt};

use flate2::Compression;

use crate::{
    compat::report_layout_compatibility,
    hid::{H5d, H5f, H5p, H5s, H5t, RawHid},
    Dims, Hyperslab, Layout, ResizePolicy,
};

use super::{
    options::MAX_COMPRESSION, push_dims, push_field, push_max_dims, Check, InfoError, Operation,
    Options, Validate,
};

/// Identifier of a filter in a dataset filter pipeline.
pub type FilterId = i32;

/// Identifier of the deflate (gzip) filter.
pub const FILTER_DEFLATE: FilterId = 1;

/// Describes a dataset on file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DsetInfo {
    /// File the dataset belongs to.
    pub h5_file: Option<H5f>,
    /// Dataset handle.
    pub h5_dset: Option<H5d>,
    /// Datatype of the dataset elements.
    pub h5_type: Option<H5t>,
    /// Storage layout.
    pub h5_layout: Option<Layout>,
    /// File dataspace.
    pub h5_space: Option<H5s>,
    /// Dataset creation property list.
    pub h5_dset_create: Option<H5p>,
    /// Dataset access property list.
    pub h5_dset_access: Option<H5p>,
    /// Filters in the dataset filter pipeline.
    pub h5_filters: Option<Vec<FilterId>>,
    /// Path to the dataset relative to the file root.
    pub dset_path: Option<String>,
    /// Whether the dataset exists on file.
    pub dset_exists: Option<bool>,
    /// Number of elements.
    pub dset_size: Option<u64>,
    /// Size in bytes.
    pub dset_byte: Option<usize>,
    /// Number of dimensions.
    pub dset_rank: Option<usize>,
    /// Current dimensions.
    pub dset_dims: Option<Dims>,
    /// Maximum dimensions, using [`UNLIMITED`](crate::UNLIMITED) for unlimited axes.
    pub dset_dims_max: Option<Dims>,
    /// Chunk dimensions.
    pub dset_chunk: Option<Dims>,
    /// Selection of the dataset participating in a transfer.
    pub dset_slab: Option<Hyperslab>,
    /// Resizing policy when writing data that does not fit.
    pub resize_policy: Option<ResizePolicy>,
    /// Compression level from 0 to 9.
    pub compression: Option<u32>,
    /// Name of the element type in memory.
    pub type_name: Option<String>,
    /// Size in bytes of the element type in memory.
    pub type_size: Option<usize>,
    /// Identity of the element type in memory.
    pub type_id: Option<TypeId>,
}

impl DsetInfo {
    /// Returns the deflate compression matching the requested compression level.
    ///
    /// Returns `None` if compression is unset or zero.
    pub fn deflate(&self) -> Option<Compression> {
        self.compression
            .filter(|&level| level > 0)
            .map(|level| Compression::new(level.min(MAX_COMPRESSION)))
    }

    /// Seeds a dataset descriptor from user hints.
    ///
    /// The filter pipeline holds the deflate filter if compression is requested.
    pub fn from_options(options: &Options) -> Self {
        let mut info = Self {
            h5_type: options.h5_type.clone(),
            h5_layout: options.h5_layout,
            dset_path: options.link_path.clone(),
            dset_rank: options.data_dims.as_ref().map(Vec::len),
            dset_dims: options.data_dims.clone(),
            dset_dims_max: options.dset_dims_max.clone(),
            dset_chunk: options.dset_dims_chunk.clone(),
            dset_slab: options.dset_slab.clone(),
            resize_policy: options.resize_policy,
            compression: options.compression,
            ..Default::default()
        };
        info.h5_filters = info.deflate().map(|_| vec![FILTER_DEFLATE]);
        info
    }

    /// Returns true if the filter pipeline contains a filter.
    pub fn has_filter(&self, filter: FilterId) -> bool {
        self.h5_filters
            .as_ref()
            .map_or(false, |filters| filters.contains(&filter))
    }

    /// Returns true if a handle locating the dataset is known.
    pub fn has_loc_id(&self) -> bool {
        self.h5_file.is_some() || self.h5_dset.is_some()
    }

    /// Returns the raw identifier locating the dataset: the file if known, else the dataset.
    pub fn loc_id(&self) -> Option<RawHid> {
        let loc = self
            .h5_file
            .as_ref()
            .map(|hid| hid.raw())
            .or_else(|| self.h5_dset.as_ref().map(|hid| hid.raw()));

        if loc.is_none() {
            log::debug!("Dataset location id is not defined");
        }

        loc
    }

    fn assert_create_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Create, Self::TARGET);
        check
            .require("dset_path", &self.dset_path)
            .require("dset_exists", &self.dset_exists)
            .require("h5_type", &self.h5_type)
            .require("h5_space", &self.h5_space)
            .require("h5_dset_create", &self.h5_dset_create)
            .require("h5_dset_access", &self.h5_dset_access)
            .missing()?;

        check
            .valid("h5_type", &self.h5_type)
            .valid("h5_space", &self.h5_space)
            .valid("h5_dset_create", &self.h5_dset_create)
            .valid("h5_dset_access", &self.h5_dset_access);
        if let Some(level) = self.compression {
            check.assert(
                level <= MAX_COMPRESSION,
                format!("compression {level} > {MAX_COMPRESSION}"),
            );
        }
        if let Some(layout) = self.h5_layout.filter(|&layout| layout != Layout::Chunked) {
            check.assert(
                !self.has_filter(FILTER_DEFLATE),
                format!("deflate filter requires layout [{}], got [{layout}]", Layout::Chunked),
            );
        }
        check.invalid(self.dset_path.as_deref())?;

        if !self.has_loc_id() {
            return Err(InfoError::NoLocation {
                operation: Operation::Create,
                target: Self::TARGET,
                path: self.dset_path.clone().unwrap_or_default(),
            });
        }

        let report = report_layout_compatibility(
            self.h5_layout,
            self.dset_dims.as_deref(),
            self.dset_chunk.as_deref(),
            self.dset_dims_max.as_deref(),
        );
        if !report.is_empty() {
            return Err(InfoError::Dimensions {
                target: Self::TARGET,
                report,
            });
        }

        Ok(())
    }

    fn assert_resize_ready(&self) -> Result<(), InfoError> {
        let mut reasons = Vec::new();
        if self.dset_exists == Some(false) {
            reasons.push(String::from("dataset does not exist"));
        }
        if self.resize_policy == Some(ResizePolicy::Off) {
            reasons.push(format!("resize policy is [{}]", ResizePolicy::Off));
        }
        if !reasons.is_empty() {
            return Err(InfoError::ResizeRefused {
                path: self.dset_path.clone(),
                reasons,
            });
        }

        let mut check = Check::new(Operation::Resize, Self::TARGET);
        check
            .require("dset_path", &self.dset_path)
            .require("dset_exists", &self.dset_exists)
            .require("dset_dims_max", &self.dset_dims_max)
            .require("h5_dset", &self.h5_dset)
            .require("h5_type", &self.h5_type)
            .require("h5_space", &self.h5_space)
            .require("h5_layout", &self.h5_layout)
            .missing()?;

        check
            .valid("h5_dset", &self.h5_dset)
            .valid("h5_type", &self.h5_type)
            .valid("h5_space", &self.h5_space)
            .invalid(self.dset_path.as_deref())
    }

    fn assert_write_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Write, Self::TARGET);
        check
            .require("dset_path", &self.dset_path)
            .require("dset_exists", &self.dset_exists)
            .require("h5_dset", &self.h5_dset)
            .require("h5_type", &self.h5_type)
            .require("h5_space", &self.h5_space)
            .require("h5_dset_create", &self.h5_dset_create)
            .require("h5_dset_access", &self.h5_dset_access)
            .missing()?;

        check
            .assert(self.dset_exists == Some(true), "dset_exists == false")
            .valid("h5_dset", &self.h5_dset)
            .valid("h5_type", &self.h5_type)
            .valid("h5_space", &self.h5_space)
            .invalid(self.dset_path.as_deref())
    }

    fn assert_read_ready(&self) -> Result<(), InfoError> {
        let mut check = Check::new(Operation::Read, Self::TARGET);
        check
            .require("dset_path", &self.dset_path)
            .require("dset_exists", &self.dset_exists)
            .require("h5_dset", &self.h5_dset)
            .require("h5_type", &self.h5_type)
            .require("h5_space", &self.h5_space)
            .missing()?;

        check
            .valid("h5_type", &self.h5_type)
            .valid("h5_space", &self.h5_space)
            .invalid(self.dset_path.as_deref())?;

        if self.dset_exists == Some(false) {
            return Err(InfoError::DoesNotExist {
                operation: Operation::Read,
                target: Self::TARGET,
                path: self.dset_path.clone().unwrap_or_default(),
            });
        }

        Ok(())
    }
}

impl Validate for DsetInfo {
    const TARGET: &'static str = "dataset";

    fn assert_ready(&self, operation: Operation) -> Result<(), InfoError> {
        match operation {
            Operation::Create => self.assert_create_ready(),
            Operation::Resize => self.assert_resize_ready(),
            Operation::Write => self.assert_write_ready(),
            Operation::Read => self.assert_read_ready(),
        }
    }
}

impl fmt::Display for DsetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut msg = String::new();

        push_field(&mut msg, "size", self.dset_size);
        push_field(&mut msg, "bytes", self.dset_byte);
        push_field(&mut msg, "rank", self.dset_rank);
        push_dims(&mut msg, "dims", &self.dset_dims);
        push_field(&mut msg, "layout", self.h5_layout);
        push_dims(&mut msg, "chunk dims", &self.dset_chunk);
        push_max_dims(&mut msg, &self.dset_dims_max);
        if let Some(slab) = &self.dset_slab {
            msg.push_str(&format!(" | [ Hyperslab {slab} ]"));
        }
        push_field(&mut msg, "resize mode", self.resize_policy);
        push_field(&mut msg, "compression", self.compression);
        if let Some(path) = &self.dset_path {
            msg.push_str(&format!(" | dset path [{path}]"));
        }
        if let Some(name) = &self.type_name {
            msg.push_str(&format!(" | type [{name}]"));
        }

        f.write_str(&msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::Ordering;

    use crate::{hid::tests::counted, UNLIMITED};

    fn create_ready() -> DsetInfo {
        DsetInfo {
            h5_file: Some(H5f::new(1)),
            h5_type: Some(H5t::new(2)),
            h5_space: Some(H5s::new(3)),
            h5_dset_create: Some(H5p::new(4)),
            h5_dset_access: Some(H5p::new(5)),
            h5_layout: Some(Layout::Chunked),
            dset_path: Some(String::from("group/dset")),
            dset_exists: Some(false),
            dset_dims: Some(vec![3, 4]),
            dset_dims_max: Some(vec![UNLIMITED, 4]),
            dset_chunk: Some(vec![1, 4]),
            ..Default::default()
        }
    }

    fn existing() -> DsetInfo {
        DsetInfo {
            h5_dset: Some(H5d::new(6)),
            dset_exists: Some(true),
            resize_policy: Some(ResizePolicy::Grow),
            ..create_ready()
        }
    }

    #[test]
    fn test_create_ready() {
        let info = create_ready();

        let ready = info.ready(Operation::Create).unwrap();

        assert_eq!(ready.operation(), Operation::Create);
        assert_eq!(ready.dset_path.as_deref(), Some("group/dset"));
    }

    #[test]
    fn test_create_missing_fields_listed() {
        let info = DsetInfo {
            dset_path: Some(String::from("dset")),
            ..Default::default()
        };

        let msg = info
            .assert_ready(Operation::Create)
            .unwrap_err()
            .to_string();

        for field in [
            "dset_exists",
            "h5_type",
            "h5_space",
            "h5_dset_create",
            "h5_dset_access",
        ] {
            assert!(msg.contains(field), "{field} not in {msg}");
        }
        assert!(!msg.contains("dset_path"));
    }

    #[test]
    fn test_create_invalid_handles() {
        let info = DsetInfo {
            h5_type: Some(H5t::invalid()),
            h5_dset_access: Some(H5p::new(0)),
            compression: Some(12),
            ..create_ready()
        };

        assert_eq!(
            info.assert_ready(Operation::Create),
            Err(InfoError::Invalid {
                operation: Operation::Create,
                target: "dataset",
                path: Some(String::from("group/dset")),
                fields: vec![
                    String::from("h5_type"),
                    String::from("h5_dset_access"),
                    String::from("compression 12 > 9"),
                ],
            })
        );
    }

    #[test]
    fn test_create_without_location() {
        let info = DsetInfo {
            h5_file: None,
            ..create_ready()
        };

        assert!(matches!(
            info.assert_ready(Operation::Create),
            Err(InfoError::NoLocation { .. })
        ));
        assert_eq!(info.loc_id(), None);
    }

    #[test]
    fn test_create_bad_dimensions() {
        let info = DsetInfo {
            h5_layout: Some(Layout::Compact),
            ..create_ready()
        };

        let Err(InfoError::Dimensions { report, .. }) = info.assert_ready(Operation::Create) else {
            panic!("expected dimension error");
        };

        assert!(report.contains("chunk dimensions are only meant for H5D_CHUNKED layouts"));
        assert!(report.contains("dims and max dims must be equal"));
    }

    #[test]
    fn test_resize_refused() {
        let info = DsetInfo {
            resize_policy: Some(ResizePolicy::Off),
            ..existing()
        };

        assert_eq!(
            info.assert_ready(Operation::Resize),
            Err(InfoError::ResizeRefused {
                path: Some(String::from("group/dset")),
                reasons: vec![String::from("resize policy is [OFF]")],
            })
        );

        let info = DsetInfo {
            dset_exists: Some(false),
            ..info
        };
        let Err(InfoError::ResizeRefused { reasons, .. }) = info.assert_ready(Operation::Resize)
        else {
            panic!("expected resize to be refused");
        };
        assert_eq!(reasons.len(), 2);
    }

    #[test]
    fn test_resize_ready() {
        assert!(existing().assert_ready(Operation::Resize).is_ok());

        let info = DsetInfo {
            h5_layout: None,
            ..existing()
        };
        assert!(matches!(
            info.assert_ready(Operation::Resize),
            Err(InfoError::Missing { fields, .. }) if fields == ["h5_layout"]
        ));
    }

    #[test]
    fn test_write_requires_existing_dataset() {
        assert!(existing().assert_ready(Operation::Write).is_ok());

        let info = DsetInfo {
            dset_exists: Some(false),
            ..existing()
        };
        let msg = info.assert_ready(Operation::Write).unwrap_err().to_string();

        assert!(msg.contains("cannot write dataset [group/dset]"));
        assert!(msg.contains("dset_exists == false"));
    }

    #[test]
    fn test_read_does_not_exist() {
        let info = DsetInfo {
            dset_exists: Some(false),
            ..existing()
        };

        assert_eq!(
            info.assert_ready(Operation::Read),
            Err(InfoError::DoesNotExist {
                operation: Operation::Read,
                target: "dataset",
                path: String::from("group/dset"),
            })
        );
    }

    #[test]
    fn test_from_options() {
        let options = Options::new("a/b")
            .set_data_dims(vec![10])
            .set_max_dims(vec![UNLIMITED])
            .set_layout(Layout::Chunked)
            .set_compression(3);

        let info = DsetInfo::from_options(&options);

        assert_eq!(info.dset_path.as_deref(), Some("a/b"));
        assert_eq!(info.dset_rank, Some(1));
        assert_eq!(info.deflate(), Some(Compression::new(3)));
        assert_eq!(info.h5_filters, Some(vec![FILTER_DEFLATE]));
        assert!(info.has_filter(FILTER_DEFLATE));
    }

    #[test]
    fn test_from_options_uncompressed_has_no_filters() {
        let info = DsetInfo::from_options(&Options::new("a/b").set_compression(0));

        assert_eq!(info.h5_filters, None);
        assert!(!info.has_filter(FILTER_DEFLATE));
    }

    #[test]
    fn test_create_deflate_requires_chunked() {
        let info = DsetInfo {
            h5_layout: Some(Layout::Contiguous),
            dset_dims_max: Some(vec![3, 4]),
            dset_chunk: None,
            h5_filters: Some(vec![FILTER_DEFLATE]),
            ..create_ready()
        };

        assert_eq!(
            info.assert_ready(Operation::Create),
            Err(InfoError::Invalid {
                operation: Operation::Create,
                target: "dataset",
                path: Some(String::from("group/dset")),
                fields: vec![String::from(
                    "deflate filter requires layout [H5D_CHUNKED], got [H5D_CONTIGUOUS]"
                )],
            })
        );

        let chunked = DsetInfo {
            h5_filters: Some(vec![FILTER_DEFLATE]),
            ..create_ready()
        };
        assert!(chunked.assert_ready(Operation::Create).is_ok());
    }

    #[test]
    fn test_deflate_off() {
        let info = DsetInfo {
            compression: Some(0),
            ..Default::default()
        };

        assert_eq!(info.deflate(), None);
    }

    #[test]
    fn test_loc_id_prefers_file() {
        let info = existing();
        assert_eq!(info.loc_id(), Some(1));

        let info = DsetInfo {
            h5_file: None,
            ..existing()
        };
        assert_eq!(info.loc_id(), Some(6));
    }

    #[test]
    fn test_handles_released_with_descriptor() {
        let (space, released) = counted(3);
        let info = DsetInfo {
            h5_space: Some(space),
            ..create_ready()
        };
        let copy = info.clone();

        drop(info);
        assert_eq!(released.load(Ordering::SeqCst), 0);

        drop(copy);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_display() {
        let info = DsetInfo {
            compression: Some(6),
            ..create_ready()
        };

        assert_eq!(
            info.to_string(),
            " | dims [3, 4] | layout H5D_CHUNKED | chunk dims [1, 4] | max dims [-1, 4] \
             | compression 6 | dset path [group/dset]"
        );
    }
}
