//! Simple line-oriented config files, parsed straight into a struct.
//!
//! Lineconf reads files made of `key value...` lines and sets the matching
//! field of a Rust struct, converting the values to the field's type. There
//! is no schema beyond the struct itself and no nesting beyond file
//! inclusion.
//!
//! ```ignore
//! use lineconf::Handlers;
//!
//! #[derive(Default)]
//! struct Config {
//!     port: i64,
//!     base_url: String,
//!     hosts: Vec<String>,
//! }
//!
//! lineconf::target!(Config { port, base_url, hosts });
//!
//! let mut config = Config { port: 8080, ..Default::default() };
//! lineconf::parse(&mut config, "/etc/myapp.conf", Handlers::new())?;
//! ```
//!
//! # File format
//!
//! ```text
//! # Comments start with a hash, also after a value.
//! port 8080
//! base-url http://example.com   # keys are matched to fields by name
//!
//! # Indented lines continue the previous line.
//! hosts
//!     arp242.net
//!     stackoverflow.com
//!
//! # A backslash escapes the next character: \#, \\ and "\ " are literal.
//! greeting hello\ \ world \#1
//!
//! # Splice in the lines of another file.
//! source /etc/myapp.d/extra.conf
//! ```
//!
//! Runs of whitespace separate values. Each line's first word is the key;
//! the rest are its values. See [`normalize`](mod@normalize) for the exact
//! rules.
//!
//! # From keys to fields
//!
//! Keys become upper camel case field names with common abbreviations in
//! capitals: `base-url` sets the field named `BaseURL`. Struct fields get the
//! same treatment, so `base_url` in Rust is `BaseURL` too. When no field has
//! that name the plural is tried, then the singular, so `host` fills a
//! `hosts` list and `keys` fills a `key` list. Unknown keys are an error.
//!
//! Rust has no runtime reflection; a struct lists its settable fields through
//! the [`Target`] trait, normally implemented with [`target!`]. A
//! `HashMap<String, Vec<String>>` is also a target and collects every key.
//!
//! # Converting values
//!
//! For each line the first applicable route is taken:
//!
//! 1. **Per-field callbacks** passed in [`Handlers`], keyed by field name.
//!    They get the whole target and the raw values.
//! 2. **Type handlers** in the [`Registry`], looked up by the field's type
//!    descriptor (`i64`, `Vec<String>`, `Regex`). All primitive types and
//!    `Vec`s of them are built in; more can be added with [`register`] or
//!    from the [`handlers`] modules.
//! 3. **`FromStr`**, for fields declared `parsed` or `parsed_list`.
//!
//! A field no route can handle fails the parse. Lines setting a `Vec` field
//! append to it, whether or not it is declared `list` in [`target!`]; lines
//! setting anything else replace the value.
//!
//! # The process-wide registry
//!
//! [`parse`] uses a registry shared by the whole process, set up with the
//! built-in handlers on first use. [`register`], [`unregister`] and
//! [`reset`] change it for every later parse. To keep a parse independent of
//! global state, build a [`Registry`] and call [`parse_with`].
//!
//! # Errors
//!
//! Parsing stops at the first bad line with a [`ParseError`] naming the file
//! and line the option came from:
//!
//! ```text
//! /etc/myapp.conf line 3: error parsing port: must have exactly one value (has: 2)
//! ```
//!
//! Fields set by earlier lines are not rolled back. Fields no line mentions
//! are left alone, so defaults can be set before parsing.
//!
//! # Finding the file
//!
//! [`find_config`] looks for a file name in `$XDG_CONFIG`, as a dotfile in
//! the home directory, in `/etc`, `/usr/local/etc`, `/usr/pkg/etc` and the
//! working directory, and returns the first one that exists.
//!
//! # Cargo features
//!
//! - `regex`, `url`, `decimal`: type handlers in [`handlers`] for `Regex`,
//!   `Url` and `Decimal`.
//! - `rich-errors`: derives `miette::Diagnostic` on [`ParseError`].

pub mod error;
pub mod handlers;
pub mod normalize;
pub mod types;

mod dispatch;
mod file;
mod parse;
mod registry;
mod resolve;
mod target;
mod validate;

#[cfg(test)]
mod fixtures;

pub use dispatch::{FieldHandler, Handlers};
pub use error::{BoxError, FieldError, ParseError, ValueError};
pub use file::{find_config, find_config_in};
pub use normalize::{LogicalLine, normalize, normalize_str};
pub use parse::{parse, parse_or_panic, parse_str, parse_with};
pub use registry::{
    Registry, TypeHandler, parse_bool, register, register_type, registered, reset, unregister,
};
pub use resolve::{field_name, pluralize, singularize};
pub use target::{Slot, Target, type_descriptor};
#[doc(hidden)]
pub use target::__private;
pub use types::{SearchPath, default_search_paths};
pub use validate::{Validator, validate_no_value, validate_single_value, validate_value_limit};
