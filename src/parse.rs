//! The parse driver: normalize a file, then dispatch its lines one by one.
//!
//! Parsing stops at the first failing line. Fields set by earlier lines stay
//! set, and fields no line mentions keep whatever value the caller put there,
//! so a target can be pre-populated with defaults.

use std::path::Path;

use crate::dispatch::{self, Handlers};
use crate::error::ParseError;
use crate::normalize::{self, LogicalLine};
use crate::registry::{self, Registry, TypeHandler};
use crate::target::Target;

/// Parse the file at `path` into `target` using the process-wide registry.
///
/// ```ignore
/// let mut config = Config { port: 8080, ..Default::default() };
/// lineconf::parse(&mut config, "/etc/app.conf", Handlers::new())?;
/// ```
pub fn parse<T: Target>(
    target: &mut T,
    path: impl AsRef<Path>,
    handlers: Handlers<'_, T>,
) -> Result<(), ParseError> {
    let path = path.as_ref();
    let lines = normalize::normalize(path)?;
    run(target, path, &lines, handlers, registry::lookup)
}

/// Like [`parse`], but panics on error.
///
/// # Panics
///
/// Panics with the error message if parsing fails.
pub fn parse_or_panic<T: Target>(target: &mut T, path: impl AsRef<Path>, handlers: Handlers<'_, T>) {
    if let Err(err) = parse(target, path, handlers) {
        panic!("{err}");
    }
}

/// Like [`parse`], but looks types up in `registry` instead of the
/// process-wide one.
pub fn parse_with<T: Target>(
    registry: &Registry,
    target: &mut T,
    path: impl AsRef<Path>,
    handlers: Handlers<'_, T>,
) -> Result<(), ParseError> {
    let path = path.as_ref();
    let lines = normalize::normalize(path)?;
    run(target, path, &lines, handlers, |d: &str| registry.get(d))
}

/// Parse in-memory `content`, reporting errors as if it came from `origin`.
///
/// `source` lines still read from the filesystem.
pub fn parse_str<T: Target>(
    target: &mut T,
    content: &str,
    origin: impl AsRef<Path>,
    handlers: Handlers<'_, T>,
) -> Result<(), ParseError> {
    let origin = origin.as_ref();
    let lines = normalize::normalize_str(content, origin)?;
    run(target, origin, &lines, handlers, registry::lookup)
}

fn run<T, L>(
    target: &mut T,
    path: &Path,
    lines: &[LogicalLine],
    mut handlers: Handlers<'_, T>,
    lookup: L,
) -> Result<(), ParseError>
where
    T: Target,
    L: Fn(&str) -> Option<TypeHandler>,
{
    tracing::debug!(path = %path.display(), lines = lines.len(), "parsing config");

    for line in lines {
        let key = line.key();
        dispatch::dispatch(target, key, line.values(), &mut handlers, &lookup).map_err(|source| {
            ParseError::Field {
                path: line.path.clone(),
                line: line.line,
                key: key.to_string(),
                source,
            }
        })?;
    }

    tracing::debug!(path = %path.display(), "config parsed");
    Ok(())
}
