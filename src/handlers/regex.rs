//! Regular expression handlers (`regex` feature).
//!
//! A single `Regex` joins its tokens without a separator, so a long pattern
//! can be split over continuation lines. Use `\ ` for a literal space.
//! In a `Vec<Regex>` every token is its own pattern.

use ::regex::Regex;

use crate::error::ValueError;
use crate::registry::{self, Registry};
use crate::validate::validate_value_limit;

/// Register the regex handlers in the process-wide registry.
pub fn register() {
    tracing::debug!("registering regex handlers");
    registry::update(register_in);
}

/// Register the regex handlers in `registry`.
pub fn register_in(registry: &mut Registry) {
    let some = [validate_value_limit(1, 0)];
    registry.register::<Regex, _>(&some, |v| compile(&v.concat()));
    registry.register::<Vec<Regex>, _>(&some, |v| v.iter().map(|s| compile(s)).collect());
}

fn compile(pattern: &str) -> Result<Regex, ValueError> {
    Regex::new(pattern).map_err(ValueError::custom)
}
