//! Arity validators for type handlers.
//!
//! A validator inspects the value tokens before a handler converts them and
//! rejects the line when the token count is wrong. Validators are passed to
//! [`register_type`](crate::register_type) and run in order; the first
//! failure is returned instead of calling the handler.

use std::sync::Arc;

use crate::error::ValueError;

/// A check over the value tokens of one option line.
pub type Validator = Arc<dyn Fn(&[String]) -> Result<(), ValueError> + Send + Sync>;

/// Accept only lines without values.
pub fn validate_no_value() -> Validator {
    Arc::new(|values: &[String]| match values.len() {
        0 => Ok(()),
        has => Err(ValueError::NoValue { has }),
    })
}

/// Accept only lines with exactly one value.
pub fn validate_single_value() -> Validator {
    Arc::new(|values: &[String]| match values.len() {
        1 => Ok(()),
        has => Err(ValueError::SingleValue { has }),
    })
}

/// Accept between `min` and `max` values, inclusive.
///
/// A `max` of 0, or one lower than `min`, leaves the upper end unbounded.
pub fn validate_value_limit(min: usize, max: usize) -> Validator {
    Arc::new(move |values: &[String]| {
        let has = values.len();
        if has < min {
            return Err(ValueError::TooFew { min, has });
        }
        if max > 0 && max >= min && has > max {
            return Err(ValueError::TooMany { max, has });
        }
        Ok(())
    })
}

/// Run `validators` in order, stopping at the first failure.
pub(crate) fn run_all(validators: &[Validator], values: &[String]) -> Result<(), ValueError> {
    validators.iter().try_for_each(|v| v(values))
}
