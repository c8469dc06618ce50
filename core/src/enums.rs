//! Enumerations mirroring HDF5 tags.

use std::fmt;

/// Storage layout of a dataset on file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Layout {
    /// Tiled storage. Resizable and compressible.
    Chunked,
    /// Embedded in the object header. Small and fixed-size.
    Compact,
    /// Dense, fixed-size storage.
    Contiguous,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::Chunked => "H5D_CHUNKED",
            Layout::Compact => "H5D_COMPACT",
            Layout::Contiguous => "H5D_CONTIGUOUS",
        })
    }
}

/// How a dataset is resized before a write that does not fit its current dimensions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResizePolicy {
    /// Resize to fit the data exactly, possibly shrinking.
    Fit,
    /// Only grow dimensions, never shrink.
    Grow,
    /// Never resize.
    Off,
}

impl fmt::Display for ResizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResizePolicy::Fit => "FIT",
            ResizePolicy::Grow => "GROW",
            ResizePolicy::Off => "OFF",
        })
    }
}

/// Kind of object a link points to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ObjectType {
    /// A group.
    Group,
    /// A dataset.
    Dataset,
    /// A committed datatype.
    NamedDatatype,
    /// A map object.
    Map,
    /// Anything else.
    Unknown,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObjectType::Group => "group",
            ObjectType::Dataset => "dataset",
            ObjectType::NamedDatatype => "named datatype",
            ObjectType::Map => "map",
            ObjectType::Unknown => "unknown",
        })
    }
}

/// Class of an HDF5 datatype.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeClass {
    /// Signed or unsigned integers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Dates and times.
    Time,
    /// Fixed or variable length strings.
    String,
    /// Bit fields.
    Bitfield,
    /// Uninterpreted bytes.
    Opaque,
    /// Records of named members.
    Compound,
    /// References to objects or regions.
    Reference,
    /// Named integer values.
    Enum,
    /// Variable length sequences.
    VarLen,
    /// Fixed-size arrays of a base type.
    Array,
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeClass::Integer => "H5T_INTEGER",
            TypeClass::Float => "H5T_FLOAT",
            TypeClass::Time => "H5T_TIME",
            TypeClass::String => "H5T_STRING",
            TypeClass::Bitfield => "H5T_BITFIELD",
            TypeClass::Opaque => "H5T_OPAQUE",
            TypeClass::Compound => "H5T_COMPOUND",
            TypeClass::Reference => "H5T_REFERENCE",
            TypeClass::Enum => "H5T_ENUM",
            TypeClass::VarLen => "H5T_VLEN",
            TypeClass::Array => "H5T_ARRAY",
        })
    }
}

impl TypeClass {
    /// Returns true if values of this class are made of named members.
    pub fn has_members(&self) -> bool {
        matches!(self, TypeClass::Compound | TypeClass::Enum)
    }
}
