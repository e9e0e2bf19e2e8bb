//! Network address handlers.
//!
//! `IpAddr` also accepts CIDR notation (`10.0.0.1/8`); the prefix length is
//! checked and dropped.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use crate::error::ValueError;
use crate::registry::{self, Registry};
use crate::validate::{validate_single_value, validate_value_limit};

/// Register the network handlers in the process-wide registry.
pub fn register() {
    tracing::debug!("registering network address handlers");
    registry::update(register_in);
}

/// Register the network handlers in `registry`.
pub fn register_in(registry: &mut Registry) {
    let single = [validate_single_value()];
    let some = [validate_value_limit(1, 0)];

    registry.register::<IpAddr, _>(&single, |v| parse_ip(&v[0]));
    registry.register::<Vec<IpAddr>, _>(&some, |v| v.iter().map(|s| parse_ip(s)).collect());

    registry.register::<Ipv4Addr, _>(&single, |v| parse_addr(&v[0], "IPv4 address"));
    registry.register::<Vec<Ipv4Addr>, _>(&some, |v| {
        v.iter().map(|s| parse_addr(s, "IPv4 address")).collect()
    });

    registry.register::<Ipv6Addr, _>(&single, |v| parse_addr(&v[0], "IPv6 address"));
    registry.register::<Vec<Ipv6Addr>, _>(&some, |v| {
        v.iter().map(|s| parse_addr(s, "IPv6 address")).collect()
    });

    registry.register::<SocketAddr, _>(&single, |v| parse_addr(&v[0], "socket address"));
    registry.register::<Vec<SocketAddr>, _>(&some, |v| {
        v.iter().map(|s| parse_addr(s, "socket address")).collect()
    });
}

/// Parse an IP address, with or without a CIDR prefix length.
fn parse_ip(value: &str) -> Result<IpAddr, ValueError> {
    let invalid = || ValueError::custom(format!("not a valid IP address: {value}"));

    let Some((addr, prefix)) = value.split_once('/') else {
        return value.parse().map_err(|_| invalid());
    };

    let ip: IpAddr = addr.parse().map_err(|_| invalid())?;
    let max = if ip.is_ipv4() { 32 } else { 128 };
    match prefix.parse::<u8>() {
        Ok(len) if len <= max => Ok(ip),
        _ => Err(invalid()),
    }
}

fn parse_addr<T: FromStr>(value: &str, what: &str) -> Result<T, ValueError> {
    value
        .parse()
        .map_err(|_| ValueError::custom(format!("not a valid {what}: {value}")))
}
