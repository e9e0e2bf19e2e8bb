//! The configuration target: a struct whose fields are set by name.
//!
//! Rust has no runtime reflection, so a target describes its fields through
//! the [`Target`] trait. For each canonical field name it hands out a
//! [`Slot`]: a mutable borrow of the field together with its type
//! descriptor, able to store a dynamically typed value produced by a type
//! handler.
//!
//! Most targets don't implement the trait by hand but use the
//! [`target!`](crate::target!) macro:
//!
//! ```ignore
//! #[derive(Default)]
//! struct Config {
//!     port: i64,
//!     base_url: String,
//!     hosts: Vec<String>,
//! }
//!
//! lineconf::target!(Config { port, base_url, hosts: list });
//! ```
//!
//! Slot kinds:
//!
//! - (none) or `value`: a `Vec<T>` field gets a list slot, anything else a
//!   value slot.
//! - `list`: the field is a `Vec<T>`; each line's results are appended.
//! - `parsed` / `parsed_list`: like `value` / `list`, but if no type
//!   handler is registered the tokens are converted with [`FromStr`].

use std::any::{Any, type_name};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{BoxError, FieldError, ValueError};
use crate::resolve;

/// A record whose fields can be looked up and set by canonical name.
pub trait Target {
    /// Canonical names of all settable fields.
    fn field_names(&self) -> Vec<String>;

    /// Borrow the field named `field`, if it exists.
    fn slot(&mut self, field: &str) -> Option<Slot<'_>>;

    fn has_field(&self, field: &str) -> bool {
        self.field_names().iter().any(|f| f == field)
    }

    /// Map an option key to a field name; see [`resolve`](crate::resolve).
    fn resolve(&self, key: &str) -> Result<String, FieldError> {
        resolve::resolve_field(key, |f| self.has_field(f))
    }
}

/// A mutable view of one target field.
pub struct Slot<'a> {
    descriptor: String,
    inner: Box<dyn Settable + 'a>,
}

impl<'a> Slot<'a> {
    /// A field replaced by each line that sets it.
    ///
    /// This replaces `Vec` fields too; use [`list`](Self::list) to append.
    pub fn value<T: Any>(field: &'a mut T) -> Self {
        Self {
            descriptor: type_descriptor::<T>(),
            inner: Box::new(ValueSlot(field)),
        }
    }

    /// A list field; every line appends to it.
    pub fn list<T: Any>(field: &'a mut Vec<T>) -> Self {
        Self {
            descriptor: type_descriptor::<Vec<T>>(),
            inner: Box::new(ListSlot(field)),
        }
    }

    /// Like [`value`](Self::value), falling back to [`FromStr`] on the tokens
    /// joined by a space.
    pub fn parsed<T>(field: &'a mut T) -> Self
    where
        T: Any + FromStr,
        T::Err: Into<BoxError>,
    {
        Self {
            descriptor: type_descriptor::<T>(),
            inner: Box::new(ParsedSlot(field)),
        }
    }

    /// Like [`list`](Self::list), falling back to [`FromStr`] on each token.
    pub fn parsed_list<T>(field: &'a mut Vec<T>) -> Self
    where
        T: Any + FromStr,
        T::Err: Into<BoxError>,
    {
        Self {
            descriptor: type_descriptor::<Vec<T>>(),
            inner: Box::new(ParsedListSlot(field)),
        }
    }

    /// Registry key of the field's type.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Store a value produced by a type handler.
    pub(crate) fn assign(mut self, value: Box<dyn Any>) -> Result<(), FieldError> {
        if self.inner.assign(value) {
            Ok(())
        } else {
            Err(FieldError::TypeMismatch {
                descriptor: self.descriptor,
            })
        }
    }

    /// Convert `values` without a type handler, if this slot knows how.
    pub(crate) fn fallback(mut self, values: &[String]) -> Result<(), FieldError> {
        match self.inner.fallback(values) {
            Some(result) => result.map_err(FieldError::from),
            None => Err(FieldError::UnknownType(self.descriptor)),
        }
    }
}

trait Settable {
    /// Returns false if `value` has the wrong type.
    fn assign(&mut self, value: Box<dyn Any>) -> bool;

    fn fallback(&mut self, _values: &[String]) -> Option<Result<(), ValueError>> {
        None
    }
}

struct ValueSlot<'a, T>(&'a mut T);
struct ListSlot<'a, T>(&'a mut Vec<T>);
struct ParsedSlot<'a, T>(&'a mut T);
struct ParsedListSlot<'a, T>(&'a mut Vec<T>);

fn store<T: Any>(field: &mut T, value: Box<dyn Any>) -> bool {
    match value.downcast::<T>() {
        Ok(v) => {
            *field = *v;
            true
        }
        Err(_) => false,
    }
}

fn append<T: Any>(field: &mut Vec<T>, value: Box<dyn Any>) -> bool {
    match value.downcast::<Vec<T>>() {
        Ok(v) => {
            field.extend(*v);
            true
        }
        Err(_) => false,
    }
}

fn from_str<T>(s: &str) -> Result<T, ValueError>
where
    T: FromStr,
    T::Err: Into<BoxError>,
{
    s.parse::<T>().map_err(ValueError::custom)
}

impl<T: Any> Settable for ValueSlot<'_, T> {
    fn assign(&mut self, value: Box<dyn Any>) -> bool {
        store(self.0, value)
    }
}

impl<T: Any> Settable for ListSlot<'_, T> {
    fn assign(&mut self, value: Box<dyn Any>) -> bool {
        append(self.0, value)
    }
}

impl<T> Settable for ParsedSlot<'_, T>
where
    T: Any + FromStr,
    T::Err: Into<BoxError>,
{
    fn assign(&mut self, value: Box<dyn Any>) -> bool {
        store(self.0, value)
    }

    fn fallback(&mut self, values: &[String]) -> Option<Result<(), ValueError>> {
        Some(from_str(&values.join(" ")).map(|v| *self.0 = v))
    }
}

impl<T> Settable for ParsedListSlot<'_, T>
where
    T: Any + FromStr,
    T::Err: Into<BoxError>,
{
    fn assign(&mut self, value: Box<dyn Any>) -> bool {
        append(self.0, value)
    }

    fn fallback(&mut self, values: &[String]) -> Option<Result<(), ValueError>> {
        let parsed = values
            .iter()
            .map(|v| from_str(v))
            .collect::<Result<Vec<T>, _>>();
        Some(parsed.map(|v| self.0.extend(v)))
    }
}

/// The registry key for `T`: its type name with module paths stripped.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`. Two types
/// with the same name in different modules share a descriptor.
pub fn type_descriptor<T: ?Sized>() -> String {
    let full = type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            out.truncate(segment_start);
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}

/// A free-form target: every key is its own field and collects its values.
///
/// Keys are used verbatim, with no case transform or plural fallback.
impl Target for HashMap<String, Vec<String>> {
    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
        Some(Slot::list(self.entry(field.to_string()).or_default()))
    }

    fn has_field(&self, _field: &str) -> bool {
        true
    }

    fn resolve(&self, key: &str) -> Result<String, FieldError> {
        Ok(key.to_string())
    }
}

/// Implement [`Target`] for a struct from a list of its fields.
///
/// Each field is named by its Rust identifier, optionally followed by a slot
/// kind (`list`, `parsed`, `parsed_list`; the default is a plain value).
/// Canonical names come from [`field_name`](crate::field_name), so
/// `base_url` is set by a `base-url` line.
///
/// ```ignore
/// lineconf::target!(Config {
///     port,
///     base_url,
///     hosts: list,
///     timeout: parsed,
/// });
/// ```
#[macro_export]
macro_rules! target {
    ($ty:ty { $($field:ident $(: $kind:ident)?),* $(,)? }) => {
        impl $crate::Target for $ty {
            fn field_names(&self) -> ::std::vec::Vec<::std::string::String> {
                ::std::vec![$($crate::field_name(::std::stringify!($field))),*]
            }

            fn slot(&mut self, field: &str) -> ::std::option::Option<$crate::Slot<'_>> {
                $(
                    if $crate::field_name(::std::stringify!($field)) == field {
                        return ::std::option::Option::Some(
                            $crate::__target_slot!(self.$field $(, $kind)?)
                        );
                    }
                )*
                ::std::option::Option::None
            }
        }
    };
}

/// Picks [`Slot::list`] for `Vec` fields and [`Slot::value`] for the rest.
///
/// Method lookup on `&Kind<T>` finds [`ListKind`] first when `T` is a `Vec`,
/// and falls back to [`ValueKind`] through one more autoref otherwise.
#[doc(hidden)]
pub mod __private {
    use std::any::Any;
    use std::marker::PhantomData;

    use super::Slot;

    pub struct Kind<T>(PhantomData<T>);

    pub fn kind_of<T>(_: &T) -> Kind<T> {
        Kind(PhantomData)
    }

    pub struct ListTag;
    pub struct ValueTag;

    pub trait ListKind {
        fn slot_tag(&self) -> ListTag {
            ListTag
        }
    }

    impl<T> ListKind for Kind<Vec<T>> {}

    pub trait ValueKind {
        fn slot_tag(&self) -> ValueTag {
            ValueTag
        }
    }

    impl<T> ValueKind for &Kind<T> {}

    impl ListTag {
        pub fn slot<T: Any>(self, field: &mut Vec<T>) -> Slot<'_> {
            Slot::list(field)
        }
    }

    impl ValueTag {
        pub fn slot<T: Any>(self, field: &mut T) -> Slot<'_> {
            Slot::value(field)
        }
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! __target_slot {
    ($place:expr) => {{
        #[allow(unused_imports)]
        use $crate::__private::{ListKind as _, ValueKind as _};
        let kind = $crate::__private::kind_of(&$place);
        (&kind).slot_tag().slot(&mut $place)
    }};
    ($place:expr, value) => {
        $crate::__target_slot!($place)
    };
    ($place:expr, list) => {
        $crate::Slot::list(&mut $place)
    };
    ($place:expr, parsed) => {
        $crate::Slot::parsed(&mut $place)
    };
    ($place:expr, parsed_list) => {
        $crate::Slot::parsed_list(&mut $place)
    };
}
