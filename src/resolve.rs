//! Field resolution: map an option key to a field name of the target.
//!
//! Keys are written in any delimiter-separated spelling (`base-url`,
//! `base_url`, `baseUrl`) and become an upper camel case field name. Words
//! that are well-known abbreviations are upper-cased as a whole, so
//! `base-url` resolves to `BaseURL` and `user-id` to `UserID`.
//!
//! If the target has no field with that name, the plural form is tried, then
//! the singular, so a list field `hosts` can be set by `host` or `hosts` and
//! a field `key` by `key` or `keys`.
//!
//! Rust struct fields go through the same transform (see
//! [`target!`](crate::target!)), which makes `base_url` on the struct and
//! `base-url` in the file meet at `BaseURL`.

use heck::{ToSnakeCase, ToUpperCamelCase};

use crate::error::FieldError;

/// Words that are upper-cased as a whole instead of capitalized.
const ACRONYMS: &[&str] = &[
    "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTPS", "HTTP", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
    "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XSRF", "XSS",
];

/// Plurals that don't follow the suffix rules.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("Child", "Children"),
    ("Man", "Men"),
    ("Person", "People"),
    ("Woman", "Women"),
    ("Index", "Indices"),
    ("Datum", "Data"),
];

/// Canonical field name for an option key or a Rust field identifier.
pub fn field_name(key: &str) -> String {
    let key = key.strip_prefix("r#").unwrap_or(key);
    key.to_snake_case()
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            match ACRONYMS.iter().find(|a| a.eq_ignore_ascii_case(word)) {
                Some(acronym) => acronym.to_string(),
                None => word.to_upper_camel_case(),
            }
        })
        .collect()
}

/// English plural of a canonical field name.
///
/// Only the last word changes: `BaseURL` becomes `BaseURLs`, `Match`
/// becomes `Matches`. Names that already read as plural are returned as-is.
pub fn pluralize(name: &str) -> String {
    if singularize(name).is_some() {
        return name.to_string();
    }
    for (singular, plural) in IRREGULAR_PLURALS {
        if let Some(stem) = name.strip_suffix(singular) {
            return format!("{stem}{plural}");
        }
    }

    // Acronyms take a plain lowercase "s".
    if name.ends_with(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return format!("{name}s");
    }

    let lower = name.to_lowercase();
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{name}es");
    }
    if let Some(stem) = name.strip_suffix('y')
        && !ends_with_vowel(stem)
    {
        return format!("{stem}ies");
    }
    format!("{name}s")
}

/// English singular of a canonical field name, if it reads as a plural.
///
/// `Keys` becomes `Key`, `Matches` `Match`, `Proxies` `Proxy`. Words ending
/// in `ss`, `us` or `is` are taken to be singular already.
pub fn singularize(name: &str) -> Option<String> {
    for (singular, plural) in IRREGULAR_PLURALS {
        if let Some(stem) = name.strip_suffix(plural) {
            return Some(format!("{stem}{singular}"));
        }
    }

    let stem = name.strip_suffix('s')?;
    if stem.is_empty() || ["s", "u", "i"].iter().any(|e| stem.ends_with(e)) {
        return None;
    }
    if let Some(base) = stem.strip_suffix("ie")
        && !base.is_empty()
        && !ends_with_vowel(base)
    {
        return Some(format!("{base}y"));
    }
    if let Some(base) = stem.strip_suffix('e')
        && ["ss", "x", "z", "ch", "sh"].iter().any(|e| base.ends_with(e))
    {
        return Some(base.to_string());
    }
    Some(stem.to_string())
}

fn ends_with_vowel(s: &str) -> bool {
    s.ends_with(|c: char| "aeiouAEIOU".contains(c))
}

/// Resolve `key` to a field for which `has_field` returns true.
///
/// Tries the canonical name, then its plural, then its singular. The error
/// names every candidate tried.
pub fn resolve_field(key: &str, has_field: impl Fn(&str) -> bool) -> Result<String, FieldError> {
    let field = field_name(key);
    let mut candidates = vec![field.clone(), pluralize(&field)];
    candidates.extend(singularize(&field));
    candidates.dedup();

    match candidates.iter().find(|c| has_field(c)) {
        Some(found) => Ok(found.clone()),
        None => Err(FieldError::UnknownOption {
            key: key.to_string(),
            candidates,
        }),
    }
}
