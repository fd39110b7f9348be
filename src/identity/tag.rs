//! # Type-identity tokens.
//!
//! [`TypeTag`] maps a `'static` type to a distinct, stable, comparable token.
//! Equality and hashing use [`TypeId`] only; the type name is carried for logs
//! and error messages and never takes part in comparisons.

use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identity token of a `'static` type.
///
/// Two tags are equal iff they were created from the same type.
///
/// # Example
/// ```
/// use sigvisor::TypeTag;
///
/// struct Ui;
/// struct Audio;
///
/// assert_eq!(TypeTag::of::<Ui>(), TypeTag::of::<Ui>());
/// assert_ne!(TypeTag::of::<Ui>(), TypeTag::of::<Audio>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Returns the tag of `T`.
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Underlying [`TypeId`].
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name (diagnostics only, not guaranteed unique).
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with every path stripped to its last segment.
    ///
    /// `my_app::ui::Panel` → `Panel`, `(a::B, &c::D<e::F>)` → `(B, &D<F>)`.
    pub fn short_name(&self) -> Cow<'static, str> {
        if !self.name.contains("::") {
            return Cow::Borrowed(self.name);
        }

        let mut out = String::with_capacity(self.name.len());
        let mut path = String::new();
        for ch in self.name.chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == ':' {
                path.push(ch);
                continue;
            }
            flush_segment(&mut out, &mut path);
            out.push(ch);
        }
        flush_segment(&mut out, &mut path);
        Cow::Owned(out)
    }
}

fn flush_segment(out: &mut String, path: &mut String) {
    out.push_str(path.rsplit("::").next().unwrap_or_default());
    path.clear();
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.name).finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Panel;
    struct Wrapper<T>(T);

    #[test]
    fn test_distinct_types_have_distinct_tags() {
        let mut set = HashSet::new();
        set.insert(TypeTag::of::<Panel>());
        set.insert(TypeTag::of::<()>());
        set.insert(TypeTag::of::<u64>());
        set.insert(TypeTag::of::<Panel>());
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_generic_instantiations_differ() {
        assert_ne!(
            TypeTag::of::<Wrapper<u8>>(),
            TypeTag::of::<Wrapper<u16>>()
        );
    }

    #[test]
    fn test_short_name_strips_module_path() {
        assert_eq!(TypeTag::of::<Panel>().short_name(), "Panel");
        assert_eq!(TypeTag::of::<u64>().short_name(), "u64");
        assert_eq!(TypeTag::of::<Wrapper<Panel>>().short_name(), "Wrapper<Panel>");
    }

    #[test]
    fn test_short_name_of_compound_types() {
        assert_eq!(
            TypeTag::of::<(Panel, Wrapper<u8>)>().short_name(),
            "(Panel, Wrapper<u8>)"
        );
        assert_eq!(TypeTag::of::<&'static Panel>().short_name(), "&Panel");
        assert_eq!(TypeTag::of::<[Panel; 2]>().short_name(), "[Panel; 2]");
        assert_eq!(TypeTag::of::<Vec<&'static str>>().short_name(), "Vec<&str>");
        assert_eq!(format!("{}", TypeTag::of::<Option<Panel>>()), "Option<Panel>");
    }
}
