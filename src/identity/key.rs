//! # Object ids and subscriber identities.
//!
//! An [`Identity`] is the pair `(category, object id)`. The category namespaces
//! ids, so two unrelated subscriber kinds may reuse the same numeric id.
//!
//! ## Rules
//! - The registry never generates ids and never checks them for uniqueness;
//!   callers keep an id unique within its category while it is connected.
//! - Id `0` ([`ObjectId::RESERVED`]) must not be used. Only the checked
//!   `try_connect` rejects it.

use std::fmt;

use super::TypeTag;

/// Caller-assigned subscriber id, unique within one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Reserved id; never valid for a registration.
    pub const RESERVED: ObjectId = ObjectId(0);

    /// Wraps a raw id.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// True for [`ObjectId::RESERVED`].
    #[inline]
    pub const fn is_reserved(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for ObjectId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u32> for ObjectId {
    #[inline]
    fn from(raw: u32) -> Self {
        Self(u64::from(raw))
    }
}

impl From<usize> for ObjectId {
    #[inline]
    fn from(raw: usize) -> Self {
        Self(raw as u64)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Removal key of a registration: `(category, object id)`.
///
/// # Example
/// ```
/// use sigvisor::{Identity, ObjectId};
///
/// struct Ui;
/// struct Audio;
///
/// let a = Identity::of::<Ui>(ObjectId::new(5));
/// let b = Identity::of::<Audio>(ObjectId::new(5));
/// assert_ne!(a, b);
/// assert_eq!(a, Identity::of::<Ui>(5u64.into()));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity {
    category: TypeTag,
    object: ObjectId,
}

impl Identity {
    /// Builds an identity from an explicit category tag.
    #[inline]
    pub fn new(category: TypeTag, object: ObjectId) -> Self {
        Self { category, object }
    }

    /// Builds an identity for the category type `C`.
    #[inline]
    pub fn of<C: ?Sized + 'static>(object: ObjectId) -> Self {
        Self::new(TypeTag::of::<C>(), object)
    }

    /// Category tag.
    #[inline]
    pub fn category(&self) -> TypeTag {
        self.category
    }

    /// Object id within the category.
    #[inline]
    pub fn object(&self) -> ObjectId {
        self.object
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.category, self.object)
    }
}
