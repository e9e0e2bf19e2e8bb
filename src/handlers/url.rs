//! URL handlers (`url` feature).

use ::url::Url;

use crate::error::ValueError;
use crate::registry::{self, Registry};
use crate::validate::{validate_single_value, validate_value_limit};

/// Register the URL handlers in the process-wide registry.
pub fn register() {
    tracing::debug!("registering url handlers");
    registry::update(register_in);
}

/// Register the URL handlers in `registry`.
pub fn register_in(registry: &mut Registry) {
    registry.register::<Url, _>(&[validate_single_value()], |v| parse_url(&v[0]));
    registry.register::<Vec<Url>, _>(&[validate_value_limit(1, 0)], |v| {
        v.iter().map(|s| parse_url(s)).collect()
    });
}

fn parse_url(value: &str) -> Result<Url, ValueError> {
    Url::parse(value).map_err(ValueError::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Handlers;
    use crate::parse::parse_str;
    use crate::fixtures::test::registry_lock;

    #[derive(Debug)]
    struct Remote {
        base_url: Url,
        mirrors: Vec<Url>,
    }

    crate::target!(Remote { base_url, mirrors: list });

    fn remote() -> Remote {
        Remote {
            base_url: Url::parse("http://localhost/").unwrap(),
            mirrors: Vec::new(),
        }
    }

    #[test]
    fn parses_urls() {
        let mut r = Registry::empty();
        register_in(&mut r);
        let handler = r.get("Url").unwrap();
        let url = handler(&["https://example.com/a?b=c".to_string()]).unwrap();
        let url = url.downcast_ref::<Url>().unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.query(), Some("b=c"));

        assert!(handler(&["not a url".to_string()]).is_err());
    }

    #[test]
    fn global_registration_feeds_parse() {
        let _guard = registry_lock();
        register();
        let mut remote = remote();
        let result = parse_str(
            &mut remote,
            "base-url https://example.com/\nmirror https://a.example.com/ https://b.example.com/\n",
            "remote.conf",
            Handlers::new(),
        );
        crate::registry::reset();

        result.unwrap();
        assert_eq!(remote.base_url.as_str(), "https://example.com/");
        assert_eq!(remote.mirrors.len(), 2);
    }

    #[test]
    fn relative_url_is_rejected() {
        let mut r = Registry::empty();
        register_in(&mut r);
        let handler = r.get("Url").unwrap();
        let err = handler(&["/just/a/path".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "relative URL without a base");
    }
}
