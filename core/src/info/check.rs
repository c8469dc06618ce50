use crate::hid::{self, Hid, Kind};

use super::{InfoError, Operation};

/// Collects missing and invalid fields for a readiness check.
///
/// Fields are first registered with [`Check::require`] and checked with [`Check::missing`], then
/// validated with [`Check::valid`] or [`Check::assert`] and checked with [`Check::invalid`].
#[derive(Debug)]
pub(super) struct Check {
    operation: Operation,
    target: &'static str,
    missing: Vec<&'static str>,
    invalid: Vec<String>,
}

impl Check {
    /// Records an invalid field unless `ok` holds.
    pub fn assert<S>(&mut self, ok: bool, description: S) -> &mut Self
    where
        S: Into<String>,
    {
        if !ok {
            self.invalid.push(description.into());
        }
        self
    }

    /// Returns an error listing every invalid field, if any.
    pub fn invalid(&mut self, path: Option<&str>) -> Result<(), InfoError> {
        if self.invalid.is_empty() {
            Ok(())
        } else {
            Err(InfoError::Invalid {
                operation: self.operation,
                target: self.target,
                path: path.map(String::from),
                fields: std::mem::take(&mut self.invalid),
            })
        }
    }

    /// Returns an error listing every missing field, if any.
    pub fn missing(&mut self) -> Result<(), InfoError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(InfoError::Missing {
                operation: self.operation,
                target: self.target,
                fields: std::mem::take(&mut self.missing),
            })
        }
    }

    pub fn new(operation: Operation, target: &'static str) -> Self {
        Self {
            operation,
            target,
            missing: Vec::new(),
            invalid: Vec::new(),
        }
    }

    /// Records a missing field if it is not set.
    pub fn require<T>(&mut self, name: &'static str, field: &Option<T>) -> &mut Self {
        if field.is_none() {
            self.missing.push(name);
        }
        self
    }

    /// Records an invalid field if the handle is set but not valid.
    ///
    /// Absent handles are left to [`Check::require`].
    pub fn valid<K: Kind>(&mut self, name: &'static str, field: &Option<Hid<K>>) -> &mut Self {
        if field.is_some() && !hid::is_valid(field) {
            self.invalid.push(name.to_string());
        }
        self
    }
}

/// Checks that parallel sequences have equal length.
///
/// Absent sequences are skipped. A declared count, if set, must match as well.
pub(super) fn field_counts(
    operation: Operation,
    target: &'static str,
    declared: Option<(&'static str, usize)>,
    sequences: &[(&'static str, Option<usize>)],
) -> Result<(), InfoError> {
    let counts = declared
        .into_iter()
        .chain(
            sequences
                .iter()
                .filter_map(|&(name, len)| len.map(|len| (name, len))),
        )
        .collect::<Vec<_>>();

    match counts.first() {
        Some(&(_, first)) if counts.iter().any(|&(_, n)| n != first) => {
            Err(InfoError::FieldCountMismatch {
                operation,
                target,
                counts,
            })
        }
        _ => Ok(()),
    }
}
