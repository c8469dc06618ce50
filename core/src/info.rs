//! Descriptors of data in memory and on file.
//!
//! Each descriptor is an aggregate of optional fields, populated progressively from user hints
//! ([`Options`]), from the value in memory, and from introspection of the file. Before a native
//! call that creates, resizes, writes or reads, the matching readiness check is run. A failed
//! check reports every missing or invalid field at once, rather than only the first, so that a
//! descriptor can be fixed up in a single pass.
//!
//! The set of fields each operation requires is part of the [`Validate`] implementation of a
//! descriptor. Code performing the operation should take a [`Ready`] token, which can only be
//! obtained through a successful check.

use std::{fmt, ops::Deref};

use crate::{dims::{display_max, elements}, Dims};

mod attr;
pub use attr::AttrInfo;

mod check;
use check::Check;

mod data;
pub use data::DataInfo;

mod dset;
pub use dset::{DsetInfo, FilterId, FILTER_DEFLATE};

mod link;
pub use link::{HeaderInfo, LinkInfo};

mod options;
pub use options::Options;

mod table;
pub use table::TableInfo;

mod types;
pub use types::{H5TInfo, TypeInfo};

/// An operation gated by a readiness check.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Operation {
    /// Create a new entity on file.
    Create,
    /// Change the dimensions of an existing entity.
    Resize,
    /// Write into an existing entity.
    Write,
    /// Read from an existing entity.
    Read,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "create",
            Operation::Resize => "resize",
            Operation::Write => "write",
            Operation::Read => "read",
        })
    }
}

/// A descriptor with readiness checks.
pub trait Validate {
    /// Name of the described entity, used in error messages.
    const TARGET: &'static str;

    /// Checks that the descriptor is ready for an operation.
    ///
    /// # Errors
    ///
    /// If required fields are missing or invalid, or if the descriptor does not support the
    /// operation; see [`InfoError`] for details.
    fn assert_ready(&self, operation: Operation) -> Result<(), InfoError>;

    /// Checks that the descriptor is ready for an operation and returns a token proving it.
    fn ready(&self, operation: Operation) -> Result<Ready<'_, Self>, InfoError>
    where
        Self: Sized,
    {
        self.assert_ready(operation)?;
        log::trace!("{} ready for {operation}", Self::TARGET);

        Ok(Ready {
            info: self,
            operation,
        })
    }
}

/// A descriptor that has passed the readiness check for an operation.
#[derive(Debug)]
pub struct Ready<'a, T> {
    info: &'a T,
    operation: Operation,
}

impl<'a, T> Ready<'a, T> {
    /// Returns the checked descriptor.
    pub fn into_inner(self) -> &'a T {
        self.info
    }

    /// Returns the operation the descriptor was checked for.
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl<'a, T> Clone for Ready<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Ready<'a, T> {}

impl<'a, T> Deref for Ready<'a, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.info
    }
}

/// An error associated with a descriptor that is not ready for an operation.
#[derive(Debug, Eq, PartialEq)]
pub enum InfoError {
    /// Dimensions do not fit the layout, or each other.
    Dimensions {
        /// Described entity.
        target: &'static str,
        /// Diagnostic text from the compatibility report.
        report: String,
    },
    /// The entity does not exist on file.
    DoesNotExist {
        /// Operation that was attempted.
        operation: Operation,
        /// Described entity.
        target: &'static str,
        /// Path of the entity.
        path: String,
    },
    /// Parallel field sequences have different lengths.
    FieldCountMismatch {
        /// Operation that was attempted.
        operation: Operation,
        /// Described entity.
        target: &'static str,
        /// Name and length of each sequence.
        counts: Vec<(&'static str, usize)>,
    },
    /// Fields are set, but hold invalid values or handles.
    Invalid {
        /// Operation that was attempted.
        operation: Operation,
        /// Described entity.
        target: &'static str,
        /// Path of the entity, if known.
        path: Option<String>,
        /// Descriptions of the invalid fields.
        fields: Vec<String>,
    },
    /// An attribute cannot be created since the link it belongs to does not exist.
    LinkDoesNotExist {
        /// Attribute name.
        attr_name: String,
        /// Path of the link.
        link_path: String,
    },
    /// Required fields are not set.
    Missing {
        /// Operation that was attempted.
        operation: Operation,
        /// Described entity.
        target: &'static str,
        /// Names of the missing fields.
        fields: Vec<&'static str>,
    },
    /// Neither a file nor an object handle is known to locate the entity.
    NoLocation {
        /// Operation that was attempted.
        operation: Operation,
        /// Described entity.
        target: &'static str,
        /// Path of the entity.
        path: String,
    },
    /// Options are missing fields or have incompatible dimensions.
    Options {
        /// Names of the missing fields.
        missing: Vec<&'static str>,
        /// Diagnostic text from the compatibility report.
        report: String,
    },
    /// The entity may not be resized.
    ResizeRefused {
        /// Path of the entity, if known.
        path: Option<String>,
        /// Reasons the resize was refused.
        reasons: Vec<String>,
    },
    /// The declared number of elements does not match the declared dimensions.
    SizeMismatch {
        /// Declared number of elements.
        size: u64,
        /// Declared dimensions.
        dims: Dims,
    },
    /// The descriptor has no notion of the operation.
    Unsupported {
        /// Operation that was attempted.
        operation: Operation,
        /// Described entity.
        target: &'static str,
    },
}

fn write_lines<I, T>(f: &mut fmt::Formatter<'_>, lines: I) -> fmt::Result
where
    I: IntoIterator<Item = T>,
    T: fmt::Display,
{
    for line in lines {
        write!(f, "\n\t{line}")?;
    }
    Ok(())
}

fn path_suffix(path: &Option<String>) -> String {
    path.as_ref()
        .map(|path| format!(" [{path}]"))
        .unwrap_or_default()
}

impl fmt::Display for InfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfoError::Dimensions { target, report } => {
                write!(f, "{target} dimensions are not well defined:\n{report}")
            }
            InfoError::DoesNotExist {
                operation,
                target,
                path,
            } => write!(f, "cannot {operation} {target} [{path}]: it does not exist"),
            InfoError::FieldCountMismatch {
                operation,
                target,
                counts,
            } => {
                write!(
                    f,
                    "cannot {operation} {target}: field sequences differ in length:"
                )?;
                write_lines(f, counts.iter().map(|(name, n)| format!("{name} {n}")))
            }
            InfoError::Invalid {
                operation,
                target,
                path,
                fields,
            } => {
                let path = path_suffix(path);
                write!(
                    f,
                    "cannot {operation} {target}{path}: the following fields are not valid:"
                )?;
                write_lines(f, fields)
            }
            InfoError::LinkDoesNotExist {
                attr_name,
                link_path,
            } => write!(
                f,
                "cannot create attribute [{attr_name}] for link [{link_path}]: \
                 the link does not exist"
            ),
            InfoError::Missing {
                operation,
                target,
                fields,
            } => {
                write!(
                    f,
                    "cannot {operation} {target}: the following fields are undefined:"
                )?;
                write_lines(f, fields)
            }
            InfoError::NoLocation {
                operation,
                target,
                path,
            } => write!(
                f,
                "cannot {operation} {target} [{path}]: the location id is not set"
            ),
            InfoError::Options { missing, report } => {
                f.write_str("options are not well defined:")?;
                write_lines(f, missing.iter().map(|name| format!("missing field: {name}")))?;
                if !report.is_empty() {
                    write!(f, "\n{}", report.trim_end())?;
                }
                Ok(())
            }
            InfoError::ResizeRefused { path, reasons } => {
                let path = path_suffix(path);
                write!(f, "cannot resize dataset{path}:")?;
                write_lines(f, reasons)
            }
            InfoError::SizeMismatch { size, dims } => {
                write!(f, "data size mismatch: data_size [{size}] | data_dims {dims:?} = size ")?;
                match elements(dims) {
                    Some(product) => write!(f, "[{product}]"),
                    None => f.write_str("[overflow]"),
                }
            }
            InfoError::Unsupported { operation, target } => {
                write!(f, "{target} does not support {operation}")
            }
        }
    }
}

impl std::error::Error for InfoError {}

/// Appends `" | {label} {value}"` to a summary if the value is set.
fn push_field<T: fmt::Display>(msg: &mut String, label: &str, value: Option<T>) {
    if let Some(value) = value {
        msg.push_str(&format!(" | {label} {value}"));
    }
}

fn push_dims(msg: &mut String, label: &str, dims: &Option<Dims>) {
    if let Some(dims) = dims {
        msg.push_str(&format!(" | {label} {dims:?}"));
    }
}

fn push_max_dims(msg: &mut String, dims: &Option<Dims>) {
    if let Some(dims) = dims {
        msg.push_str(&format!(" | max dims {}", display_max(dims)));
    }
}
