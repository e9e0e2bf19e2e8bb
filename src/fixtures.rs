#[cfg(test)]
pub mod test {
    use std::path::PathBuf;
    use std::str::FromStr;
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use std::time::Duration;

    use tempfile::TempDir;

    use crate::error::ValueError;
    use crate::registry::Registry;

    /// Write `content` to `name` inside `dir` and return the full path.
    pub fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

    /// Serializes tests that change or depend on custom entries in the
    /// process-wide registry.
    pub fn registry_lock() -> MutexGuard<'static, ()> {
        REGISTRY_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -- Every built-in scalar type ---------------------------------------------

    #[derive(Debug, Default, PartialEq)]
    pub struct Primitives {
        pub str: String,
        pub int64: i64,
        pub uint64: u64,
        pub bool: bool,
        pub bool2: bool,
        pub bool3: bool,
        pub bool4: bool,
        pub float32: f32,
        pub float64: f64,
        pub time_type: Duration,
    }

    crate::target!(Primitives {
        str,
        int64,
        uint64,
        bool,
        bool2,
        bool3,
        bool4,
        float32,
        float64,
        time_type,
    });

    // -- The same as lists -------------------------------------------------------

    #[derive(Debug, Default, PartialEq)]
    pub struct Arrays {
        pub str: Vec<String>,
        pub int64: Vec<i64>,
        pub uint64: Vec<u64>,
        pub bool: Vec<bool>,
        pub float32: Vec<f32>,
        pub float64: Vec<f64>,
        pub time_type: Vec<Duration>,
    }

    crate::target!(Arrays {
        str: list,
        int64: list,
        uint64: list,
        bool: list,
        float32: list,
        float64: list,
        time_type: list,
    });

    // -- A type only convertible through FromStr ---------------------------------

    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Unmarshal(pub String);

    impl FromStr for Unmarshal {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            if s == "error" {
                return Err("error".to_string());
            }
            Ok(Unmarshal(s.to_string()))
        }
    }

    #[derive(Debug, Default)]
    pub struct Unmarshals {
        pub one: Unmarshal,
        pub many: Vec<Unmarshal>,
    }

    crate::target!(Unmarshals {
        one: parsed,
        many: parsed_list,
    });

    // -- A caller-registered type ------------------------------------------------

    /// A pattern that only supports a leading `^` anchor and a `.+` tail,
    /// enough to tell registered handlers apart from built-ins.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Pattern(pub String);

    impl Pattern {
        pub fn is_match(&self, s: &str) -> bool {
            let body = self.0.strip_prefix('^').unwrap_or(&self.0);
            match body.strip_suffix(".+") {
                Some(prefix) => s.starts_with(prefix) && s.len() > prefix.len(),
                None => s.starts_with(body),
            }
        }
    }

    /// The default registry plus a `Vec<Pattern>` handler that rejects
    /// unanchored patterns.
    pub fn pattern_registry() -> Registry {
        let mut registry = Registry::with_defaults();
        registry.register::<Vec<Pattern>, _>(&[], |values| {
            values
                .iter()
                .map(|v| {
                    if v.starts_with('^') {
                        Ok(Pattern(v.clone()))
                    } else {
                        Err(ValueError::custom(format!("pattern {v:?} is not anchored")))
                    }
                })
                .collect()
        });
        registry
    }

    #[derive(Debug, Default)]
    pub struct ServerConfig {
        pub port: i64,
        pub base_url: String,
        pub r#match: Vec<Pattern>,
        pub order: Vec<String>,
        pub hosts: Vec<String>,
    }

    crate::target!(ServerConfig {
        port,
        base_url,
        r#match: list,
        order: list,
        hosts: list,
    });

    #[test]
    fn fixture_field_names() {
        use crate::target::Target;

        assert_eq!(
            ServerConfig::default().field_names(),
            strings(&["Port", "BaseURL", "Match", "Order", "Hosts"])
        );
    }

    #[test]
    fn pattern_matching() {
        let p = Pattern("^foo.+".into());
        assert!(p.is_match("foobar"));
        assert!(!p.is_match("foo"));
        assert!(!p.is_match("barfoo"));
    }
}
