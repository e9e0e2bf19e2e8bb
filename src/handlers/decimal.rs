//! Arbitrary precision decimal handlers (`decimal` feature).
//!
//! Like the float built-ins, a single `Decimal` joins its tokens without a
//! separator, so `1 000 000.50` reads as `1000000.50`.

use rust_decimal::Decimal;

use crate::error::ValueError;
use crate::registry::{self, Registry};
use crate::validate::validate_value_limit;

/// Register the decimal handlers in the process-wide registry.
pub fn register() {
    tracing::debug!("registering decimal handlers");
    registry::update(register_in);
}

/// Register the decimal handlers in `registry`.
pub fn register_in(registry: &mut Registry) {
    let some = [validate_value_limit(1, 0)];
    registry.register::<Decimal, _>(&some, |v| parse_decimal(&v.concat()));
    registry.register::<Vec<Decimal>, _>(&some, |v| v.iter().map(|s| parse_decimal(s)).collect());
}

fn parse_decimal(value: &str) -> Result<Decimal, ValueError> {
    value
        .parse::<Decimal>()
        .map_err(|e| ValueError::custom(format!("unable to convert {value} to a decimal: {e}")))
}
