//! Typed handles to objects owned by an HDF5 implementation.
//!
//! A [`Hid`] wraps the raw identifier handed out by the native library, tagged with the kind of
//! object it refers to so that, say, a dataspace cannot be stored where a datatype is expected.
//! Handles are reference counted: cloning shares the identifier, and an optional release hook is
//! run exactly once when the last clone is dropped.

use std::{fmt, hash, marker::PhantomData, sync::Arc};

/// A raw identifier, as used by the native library.
pub type RawHid = i64;

/// The raw identifier the native library uses to signal failure.
pub const INVALID_HID: RawHid = -1;

/// The kind of object a handle refers to.
pub trait Kind {
    /// Short name used when printing handles.
    const NAME: &'static str;
}

/// Marker types for each kind of handle.
pub mod kind {
    use super::Kind;

    macro_rules! kinds {
        ($($(#[$meta:meta])* $name:ident => $display:literal),+ $(,)?) => {
            $(
                $(#[$meta])*
                #[derive(Debug)]
                pub enum $name {}

                impl Kind for $name {
                    const NAME: &'static str = $display;
                }
            )+
        };
    }

    kinds! {
        /// A file.
        File => "h5f",
        /// A dataset.
        Dataset => "h5d",
        /// A datatype.
        Datatype => "h5t",
        /// A dataspace.
        Dataspace => "h5s",
        /// A property list.
        PropertyList => "h5p",
        /// An attribute.
        Attribute => "h5a",
        /// Any object reachable by a link.
        Object => "h5o",
    }
}

/// File handle.
pub type H5f = Hid<kind::File>;
/// Dataset handle.
pub type H5d = Hid<kind::Dataset>;
/// Datatype handle.
pub type H5t = Hid<kind::Datatype>;
/// Dataspace handle.
pub type H5s = Hid<kind::Dataspace>;
/// Property list handle.
pub type H5p = Hid<kind::PropertyList>;
/// Attribute handle.
pub type H5a = Hid<kind::Attribute>;
/// Object handle.
pub type H5o = Hid<kind::Object>;

type Release = Box<dyn Fn(RawHid) + Send + Sync>;

struct Inner {
    raw: RawHid,
    release: Option<Release>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.raw);
        }
    }
}

/// A reference-counted handle of a particular kind.
pub struct Hid<K> {
    inner: Arc<Inner>,
    kind: PhantomData<fn() -> K>,
}

impl<K: Kind> Hid<K> {
    /// Returns a handle that is never valid.
    pub fn invalid() -> Self {
        Self::new(INVALID_HID)
    }

    /// Returns true if the handle refers to a live object.
    ///
    /// The native library hands out strictly positive identifiers for live objects.
    pub fn is_valid(&self) -> bool {
        self.inner.raw > 0
    }

    /// Returns the short name of the handle kind.
    pub fn kind_name(&self) -> &'static str {
        K::NAME
    }

    /// Creates a new handle without a release hook.
    pub fn new(raw: RawHid) -> Self {
        Self {
            inner: Arc::new(Inner { raw, release: None }),
            kind: PhantomData,
        }
    }

    /// Returns the raw identifier.
    pub fn raw(&self) -> RawHid {
        self.inner.raw
    }

    /// Returns the number of live clones of this handle.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Creates a new handle that runs `release` once the last clone is dropped.
    pub fn with_release<F>(raw: RawHid, release: F) -> Self
    where
        F: Fn(RawHid) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                raw,
                release: Some(Box::new(release)),
            }),
            kind: PhantomData,
        }
    }
}

impl<K> Clone for Hid<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            kind: PhantomData,
        }
    }
}

impl<K: Kind> fmt::Debug for Hid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::NAME, self.inner.raw)
    }
}

impl<K: Kind> fmt::Display for Hid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl<K> PartialEq for Hid<K> {
    fn eq(&self, other: &Self) -> bool {
        self.inner.raw == other.inner.raw
    }
}

impl<K> Eq for Hid<K> {}

impl<K> hash::Hash for Hid<K> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.inner.raw.hash(state)
    }
}

/// Returns true if the handle is present and valid.
pub(crate) fn is_valid<K: Kind>(hid: &Option<Hid<K>>) -> bool {
    hid.as_ref().map_or(false, Hid::is_valid)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns a handle and a counter of how many times it has been released.
    pub(crate) fn counted<K: Kind>(raw: RawHid) -> (Hid<K>, Arc<AtomicUsize>) {
        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let hid = Hid::with_release(raw, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (hid, released)
    }

    #[test]
    fn test_validity() {
        assert!(H5t::new(7).is_valid());
        assert!(!H5t::new(0).is_valid());
        assert!(!H5t::invalid().is_valid());
    }

    #[test]
    fn test_release_once_after_last_clone() {
        let (hid, released) = counted::<kind::Dataset>(3);
        let clone = hid.clone();
        assert_eq!(hid.ref_count(), 2);

        drop(hid);
        assert_eq!(released.load(Ordering::SeqCst), 0);

        drop(clone);
        assert_eq!(released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_release_receives_raw_id() {
        let seen = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&seen);
        drop(H5s::with_release(42, move |raw| {
            inner.store(raw as usize, Ordering::SeqCst);
        }));

        assert_eq!(seen.load(Ordering::SeqCst), 42);
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", H5p::new(12)), "h5p(12)");
        assert_eq!(H5f::new(1).kind_name(), "h5f");
    }
}
