//! Field dispatch: apply one option line to the target.
//!
//! After the key is resolved to a field, its values go to the first of:
//!
//! 1. a per-field callback from [`Handlers`], keyed by the resolved field
//!    name; errors are marked `(from handler)`;
//! 2. the type handler registered for the field's type descriptor;
//! 3. the slot's own `FromStr` fallback, for `parsed` slots.
//!
//! If none applies the line fails with "don't know how to set fields of the
//! type ...". An unhandled type is always an error, never skipped.
//!
//! List fields append whatever each line produces, so several lines naming
//! the same list accumulate. Other fields are replaced, so the last line
//! wins.

use std::collections::HashMap;
use std::fmt;

use crate::error::{BoxError, FieldError};
use crate::registry::TypeHandler;
use crate::target::Target;

/// A per-field callback. Gets the target and the line's value tokens.
pub type FieldHandler<'a, T> = Box<dyn FnMut(&mut T, &[String]) -> Result<(), BoxError> + 'a>;

/// Per-field callbacks, keyed by resolved field name (e.g. `"BaseURL"`).
///
/// A callback replaces type-based conversion for its field entirely.
pub struct Handlers<'a, T> {
    map: HashMap<String, FieldHandler<'a, T>>,
}

impl<'a, T> Handlers<'a, T> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Add a callback for `field`, replacing any earlier one.
    pub fn on<F>(mut self, field: &str, handler: F) -> Self
    where
        F: FnMut(&mut T, &[String]) -> Result<(), BoxError> + 'a,
    {
        self.map.insert(field.to_string(), Box::new(handler));
        self
    }

    pub fn contains(&self, field: &str) -> bool {
        self.map.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn get_mut(&mut self, field: &str) -> Option<&mut FieldHandler<'a, T>> {
        self.map.get_mut(field)
    }
}

impl<T> Default for Handlers<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Handlers<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&String> = self.map.keys().collect();
        fields.sort();
        f.debug_struct("Handlers").field("fields", &fields).finish()
    }
}

/// Resolve `key` and apply `values` to the matching field of `target`.
pub(crate) fn dispatch<T, L>(
    target: &mut T,
    key: &str,
    values: &[String],
    handlers: &mut Handlers<'_, T>,
    lookup: L,
) -> Result<(), FieldError>
where
    T: Target,
    L: Fn(&str) -> Option<TypeHandler>,
{
    let field = target.resolve(key)?;

    if let Some(callback) = handlers.get_mut(&field) {
        tracing::trace!(%key, %field, "dispatching to field callback");
        return callback(target, values).map_err(FieldError::Handler);
    }

    let Some(slot) = target.slot(&field) else {
        return Err(FieldError::UnknownOption {
            key: key.to_string(),
            candidates: vec![field],
        });
    };

    match lookup(slot.descriptor()) {
        Some(handler) => {
            tracing::trace!(%key, %field, descriptor = slot.descriptor(), "dispatching to type handler");
            let value = handler(values)?;
            slot.assign(value)
        }
        None => {
            tracing::trace!(%key, %field, descriptor = slot.descriptor(), "no type handler, trying fallback");
            slot.fallback(values)
        }
    }
}
