//! Optional type handlers for common non-primitive types.
//!
//! Nothing here is registered by default. Each module exposes `register()`,
//! which adds its handlers to the process-wide registry, and
//! `register_in()`, which adds them to a caller-owned [`Registry`](crate::Registry).
//!
//! | Module | Types | Cargo feature |
//! |--------|-------|---------------|
//! | [`net`] | `IpAddr`, `Ipv4Addr`, `Ipv6Addr`, `SocketAddr` and lists of them | always |
//! | `regex` | `Regex`, `Vec<Regex>` | `regex` |
//! | `url` | `Url`, `Vec<Url>` | `url` |
//! | `decimal` | `Decimal`, `Vec<Decimal>` | `decimal` |

pub mod net;

#[cfg(feature = "regex")]
pub mod regex;

#[cfg(feature = "url")]
pub mod url;

#[cfg(feature = "decimal")]
pub mod decimal;
