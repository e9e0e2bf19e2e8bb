//! Type handlers: convert value tokens into typed field values.
//!
//! A [`Registry`] maps a type descriptor (see
//! [`type_descriptor`](crate::type_descriptor)) to a handler. The default
//! registry knows every primitive scalar type and a `Vec` of each:
//!
//! | Type | Tokens | Arity |
//! |------|--------|-------|
//! | integers | one token | exactly one |
//! | `f32`, `f64` | joined without separator | any |
//! | `bool` | joined without separator; no tokens means `true` | any |
//! | `char` | one single-character token | exactly one |
//! | `String` | joined with a single space | any |
//! | `Vec<String>` | tokens as-is | any |
//! | other `Vec<T>` | each token converted on its own | at least one |
//!
//! Booleans accept `1 true yes on enable enabled` and
//! `0 false no off disable disabled`, case-insensitively.
//!
//! # Process-wide registry
//!
//! [`parse`](crate::parse) consults a process-wide registry, seeded with the
//! defaults on first use and changed through [`register`],
//! [`register_type`], [`unregister`] and [`reset`]. Changes are global and
//! affect every later parse in the process. The table sits behind a lock so
//! it is memory-safe, but register/reset calls racing with parses on other
//! threads still see each other's changes at arbitrary points; callers that
//! mix them must serialize. Callers wanting isolation build their own
//! [`Registry`] and use [`parse_with`](crate::parse_with).

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::ValueError;
use crate::target::type_descriptor;
use crate::validate::{self, Validator, validate_single_value, validate_value_limit};

/// Converts value tokens into a boxed value of the registered type.
pub type TypeHandler = Arc<dyn Fn(&[String]) -> Result<Box<dyn Any>, ValueError> + Send + Sync>;

/// A table of type handlers keyed by type descriptor.
#[derive(Clone)]
pub struct Registry {
    handlers: HashMap<String, TypeHandler>,
}

impl Registry {
    /// A registry without any handlers.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry with handlers for all primitive types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register_defaults();
        registry
    }

    /// Register `handler` for `descriptor`, replacing any previous entry.
    ///
    /// `validators` run in order before the handler; the first failure is
    /// returned without calling it.
    pub fn register_type<F>(&mut self, descriptor: impl Into<String>, validators: &[Validator], handler: F)
    where
        F: Fn(&[String]) -> Result<Box<dyn Any>, ValueError> + Send + Sync + 'static,
    {
        let handler: TypeHandler = if validators.is_empty() {
            Arc::new(handler)
        } else {
            let validators = validators.to_vec();
            Arc::new(move |values: &[String]| {
                validate::run_all(&validators, values)?;
                handler(values)
            })
        };
        self.handlers.insert(descriptor.into(), handler);
    }

    /// Register a typed handler under the descriptor of `T`.
    pub fn register<T, F>(&mut self, validators: &[Validator], handler: F)
    where
        T: Any,
        F: Fn(&[String]) -> Result<T, ValueError> + Send + Sync + 'static,
    {
        self.register_type(type_descriptor::<T>(), validators, move |values: &[String]| {
            handler(values).map(|v| Box::new(v) as Box<dyn Any>)
        });
    }

    /// Remove the handler for `descriptor`, returning it if there was one.
    pub fn remove(&mut self, descriptor: &str) -> Option<TypeHandler> {
        self.handlers.remove(descriptor)
    }

    pub fn get(&self, descriptor: &str) -> Option<TypeHandler> {
        self.handlers.get(descriptor).cloned()
    }

    pub fn contains(&self, descriptor: &str) -> bool {
        self.handlers.contains_key(descriptor)
    }

    /// All registered descriptors, sorted.
    pub fn descriptors(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    fn register_defaults(&mut self) {
        macro_rules! numbers {
            ($registry:expr, $validators:expr; $($t:ty),*) => {$(
                $registry.register::<$t, _>($validators, |v| Ok(v.concat().parse::<$t>()?));
                $registry.register::<Vec<$t>, _>(&[validate_value_limit(1, 0)], parse_each::<$t>);
            )*};
        }
        let single = [validate_single_value()];
        numbers!(self, &single; i8, i16, i32, i64, i128, isize);
        numbers!(self, &single; u8, u16, u32, u64, u128, usize);
        numbers!(self, &[]; f32, f64);

        self.register::<bool, _>(&[], |v| {
            if v.is_empty() {
                return Ok(true);
            }
            parse_bool(&v.concat())
        });
        self.register::<Vec<bool>, _>(&[validate_value_limit(1, 0)], |v| {
            v.iter().map(|s| parse_bool(s)).collect()
        });

        self.register::<char, _>(&[validate_single_value()], |v| parse_char(&v[0]));
        self.register::<Vec<char>, _>(&[validate_value_limit(1, 0)], |v| {
            v.iter().map(|s| parse_char(s)).collect()
        });

        self.register::<String, _>(&[], |v| Ok(v.join(" ")));
        self.register::<Vec<String>, _>(&[], |v| Ok(v.to_vec()));
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("descriptors", &self.descriptors())
            .finish()
    }
}

/// Parse a boolean from the fixed on/off vocabulary.
pub fn parse_bool(value: &str) -> Result<bool, ValueError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "enable" | "enabled" => Ok(true),
        "0" | "false" | "no" | "off" | "disable" | "disabled" => Ok(false),
        _ => Err(ValueError::Bool(value.to_string())),
    }
}

fn parse_char(value: &str) -> Result<char, ValueError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ValueError::Char {
            value: value.to_string(),
        }),
    }
}

fn parse_each<T>(values: &[String]) -> Result<Vec<T>, ValueError>
where
    T: FromStr,
    ValueError: From<T::Err>,
{
    values
        .iter()
        .map(|v| v.parse::<T>().map_err(ValueError::from))
        .collect()
}

// -- Process-wide registry ----------------------------------------------------

static GLOBAL: OnceLock<RwLock<Registry>> = OnceLock::new();

fn global() -> &'static RwLock<Registry> {
    GLOBAL.get_or_init(|| RwLock::new(Registry::with_defaults()))
}

fn read() -> RwLockReadGuard<'static, Registry> {
    global().read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Registry> {
    global().write().unwrap_or_else(PoisonError::into_inner)
}

/// Register a handler in the process-wide registry; last write wins.
pub fn register_type<F>(descriptor: impl Into<String>, validators: &[Validator], handler: F)
where
    F: Fn(&[String]) -> Result<Box<dyn Any>, ValueError> + Send + Sync + 'static,
{
    let descriptor = descriptor.into();
    tracing::debug!(%descriptor, "registering type handler");
    write().register_type(descriptor, validators, handler);
}

/// Register a typed handler in the process-wide registry under the
/// descriptor of `T`.
pub fn register<T, F>(validators: &[Validator], handler: F)
where
    T: Any,
    F: Fn(&[String]) -> Result<T, ValueError> + Send + Sync + 'static,
{
    tracing::debug!(descriptor = %type_descriptor::<T>(), "registering type handler");
    write().register::<T, F>(validators, handler);
}

/// Remove a handler from the process-wide registry. Returns whether one
/// was registered.
pub fn unregister(descriptor: &str) -> bool {
    write().remove(descriptor).is_some()
}

/// Restore the process-wide registry to the defaults, dropping every custom
/// registration.
pub fn reset() {
    tracing::debug!("resetting type handlers to defaults");
    *write() = Registry::with_defaults();
}

/// Apply a batch of changes to the process-wide registry under one lock.
pub(crate) fn update(f: impl FnOnce(&mut Registry)) {
    f(&mut write());
}

/// Descriptors currently in the process-wide registry, sorted.
pub fn registered() -> Vec<String> {
    read().descriptors()
}

/// Look up a handler in the process-wide registry.
///
/// The lock is released before the handler runs, so handlers may register
/// types themselves.
pub(crate) fn lookup(descriptor: &str) -> Option<TypeHandler> {
    read().get(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{registry_lock, strings};

    fn run<T: Any + Clone>(registry: &Registry, values: &[&str]) -> Result<T, ValueError> {
        let handler = registry
            .get(&type_descriptor::<T>())
            .expect("handler registered");
        handler(&strings(values)).map(|v| v.downcast_ref::<T>().unwrap().clone())
    }

    #[test]
    fn strings_join_with_space() {
        let r = Registry::with_defaults();
        assert_eq!(run::<String>(&r, &[]).unwrap(), "");
        assert_eq!(run::<String>(&r, &["H€llo"]).unwrap(), "H€llo");
        assert_eq!(run::<String>(&r, &["Hello", "world!"]).unwrap(), "Hello world!");
        assert_eq!(run::<String>(&r, &["3.14"]).unwrap(), "3.14");
    }

    #[test]
    fn bool_vocabulary() {
        let r = Registry::with_defaults();
        for word in ["1", "true", "TRUE", "yes", "on", "enable", "Enabled"] {
            assert!(run::<bool>(&r, &[word]).unwrap(), "{word}");
        }
        for word in ["0", "false", "no", "OFF", "disable", "disabled"] {
            assert!(!run::<bool>(&r, &[word]).unwrap(), "{word}");
        }
        assert!(run::<bool>(&r, &["enabl", "ed"]).unwrap());
        assert!(run::<bool>(&r, &[]).unwrap());
    }

    #[test]
    fn bool_rejects_other_words() {
        let r = Registry::with_defaults();
        let err = run::<bool>(&r, &["what?"]).unwrap_err();
        assert_eq!(err.to_string(), r#"unable to parse "what?" as a boolean"#);
        let err = run::<bool>(&r, &["it is true"]).unwrap_err();
        assert_eq!(err.to_string(), r#"unable to parse "it is true" as a boolean"#);
    }

    #[test]
    fn floats_join_without_separator() {
        let r = Registry::with_defaults();
        assert_eq!(run::<f32>(&r, &["0.0"]).unwrap(), 0.0);
        assert_eq!(run::<f32>(&r, &[".000001"]).unwrap(), 0.000001);
        assert_eq!(run::<f64>(&r, &["1.1", "12"]).unwrap(), 1.112);
        assert!(matches!(run::<f64>(&r, &[]), Err(ValueError::Float(_))));
        assert!(matches!(run::<f32>(&r, &["42,42"]), Err(ValueError::Float(_))));
    }

    #[test]
    fn integers_take_one_value() {
        let r = Registry::with_defaults();
        assert_eq!(run::<i64>(&r, &["46"]).unwrap(), 46);
        assert_eq!(run::<u8>(&r, &["255"]).unwrap(), 255);
        assert!(matches!(run::<u8>(&r, &["256"]), Err(ValueError::Int(_))));
        assert!(matches!(run::<i64>(&r, &["nope"]), Err(ValueError::Int(_))));
        assert!(matches!(
            run::<i64>(&r, &["1", "2"]),
            Err(ValueError::SingleValue { has: 2 })
        ));
        assert!(matches!(
            run::<u64>(&r, &[]),
            Err(ValueError::SingleValue { has: 0 })
        ));
    }

    #[test]
    fn slices_convert_each_token() {
        let r = Registry::with_defaults();
        assert_eq!(run::<Vec<i64>>(&r, &["46", "700"]).unwrap(), vec![46, 700]);
        assert_eq!(
            run::<Vec<bool>>(&r, &["yes", "no", "yes"]).unwrap(),
            vec![true, false, true]
        );
        assert_eq!(run::<Vec<f64>>(&r, &["3.14159", "1.2"]).unwrap(), vec![3.14159, 1.2]);
        assert_eq!(run::<Vec<char>>(&r, &["a", "€"]).unwrap(), vec!['a', '€']);
        assert_eq!(
            run::<Vec<String>>(&r, &["foo", "bar"]).unwrap(),
            vec!["foo", "bar"]
        );
    }

    #[test]
    fn number_slices_need_a_value() {
        let r = Registry::with_defaults();
        let err = run::<Vec<i64>>(&r, &[]).unwrap_err();
        assert_eq!(err.to_string(), "must have more than 1 values (has: 0)");
        assert!(run::<Vec<String>>(&r, &[]).unwrap().is_empty());
    }

    #[test]
    fn char_takes_one_character() {
        let r = Registry::with_defaults();
        assert_eq!(run::<char>(&r, &["x"]).unwrap(), 'x');
        assert!(matches!(run::<char>(&r, &["xy"]), Err(ValueError::Char { .. })));
    }

    #[test]
    fn defaults_cover_every_primitive() {
        let r = Registry::with_defaults();
        for d in [
            "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
            "f32", "f64", "bool", "char", "String",
        ] {
            assert!(r.contains(d), "missing {d}");
            assert!(r.contains(&format!("Vec<{d}>")), "missing Vec<{d}>");
        }
    }

    #[test]
    fn register_overrides_and_remove_drops() {
        let mut r = Registry::with_defaults();
        r.register::<i64, _>(&[], |_| Ok(42));
        assert_eq!(run::<i64>(&r, &["1"]).unwrap(), 42);

        assert!(r.remove("i64").is_some());
        assert!(r.get("i64").is_none());
        assert!(r.remove("i64").is_none());
    }

    #[test]
    fn registering_twice_behaves_like_once() {
        let handler = |v: &[String]| -> Result<i32, ValueError> { Ok(v.len() as i32) };
        let mut once = Registry::empty();
        once.register::<i32, _>(&[validate_single_value()], handler);
        let mut twice = Registry::empty();
        twice.register::<i32, _>(&[validate_single_value()], handler);
        twice.register::<i32, _>(&[validate_single_value()], handler);

        assert_eq!(run::<i32>(&once, &["a"]).unwrap(), run::<i32>(&twice, &["a"]).unwrap());
        assert_eq!(
            run::<i32>(&once, &[]).unwrap_err().to_string(),
            run::<i32>(&twice, &[]).unwrap_err().to_string()
        );
        assert_eq!(once.descriptors(), twice.descriptors());
    }

    #[test]
    fn validators_run_before_handler() {
        let mut r = Registry::empty();
        r.register_type("Flag", &[crate::validate::validate_no_value()], |_| {
            Ok(Box::new(()) as Box<dyn Any>)
        });
        let handler = r.get("Flag").unwrap();
        assert!(handler(&[]).is_ok());
        assert!(matches!(
            handler(&strings(&["x"])),
            Err(ValueError::NoValue { has: 1 })
        ));
    }

    #[test]
    fn global_register_and_reset() {
        let _guard = registry_lock();
        register::<std::time::Duration, _>(&[validate_single_value()], |v| {
            Ok(std::time::Duration::from_secs(v[0].parse::<u64>()?))
        });
        assert!(registered().contains(&"Duration".to_string()));
        assert!(lookup("Duration").is_some());

        assert!(unregister("Duration"));
        assert!(!unregister("Duration"));

        register_type("Duration", &[], |_| Ok(Box::new(std::time::Duration::ZERO) as Box<dyn Any>));
        reset();
        assert!(lookup("Duration").is_none());
        assert!(lookup("i64").is_some());
    }
}
