//! Config file discovery.
//!
//! [`find_config`] checks [`default_search_paths`] in order and returns the
//! first candidate that exists:
//!
//! 1. `$XDG_CONFIG/{name}`
//! 2. `~/.{name}`
//! 3. `/etc/{name}`, `/usr/local/etc/{name}`, `/usr/pkg/etc/{name}`
//! 4. `./{name}`
//!
//! Leading slashes on `name` are ignored, so `"/app.conf"` and `"app.conf"`
//! find the same files. Locations that can't be resolved (an unset
//! variable, no home directory) are skipped.

use std::path::PathBuf;

use crate::types::{SearchPath, default_search_paths};

/// Find `name` in the conventional config locations.
pub fn find_config(name: &str) -> Option<PathBuf> {
    find_config_in(name, &default_search_paths())
}

/// Find `name` in `search_paths`, returning the first existing candidate.
pub fn find_config_in(name: &str, search_paths: &[SearchPath]) -> Option<PathBuf> {
    let name = name.trim_start_matches('/');
    search_paths
        .iter()
        .filter_map(|sp| candidate(sp, name))
        .find(|path| {
            tracing::trace!(path = %path.display(), "probing for config file");
            path.exists()
        })
}

/// The full path `name` would have under `sp`, if `sp` resolves.
pub(crate) fn candidate(sp: &SearchPath, name: &str) -> Option<PathBuf> {
    match sp {
        SearchPath::Env(var) => {
            let dir = std::env::var_os(*var).filter(|d| !d.is_empty())?;
            Some(PathBuf::from(dir).join(name))
        }
        SearchPath::HomeDotfile => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(format!(".{name}")))
        }
        SearchPath::Path(dir) => Some(dir.join(name)),
        SearchPath::Cwd => Some(PathBuf::from(".").join(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::write_config;
    use tempfile::TempDir;

    #[test]
    fn first_existing_wins() {
        let low = TempDir::new().unwrap();
        let high = TempDir::new().unwrap();
        write_config(&low, "app.conf", "a 1\n");
        let expected = write_config(&high, "app.conf", "a 2\n");

        let paths = [
            SearchPath::Path(high.path().to_path_buf()),
            SearchPath::Path(low.path().to_path_buf()),
        ];
        assert_eq!(find_config_in("app.conf", &paths), Some(expected));
    }

    #[test]
    fn missing_locations_are_skipped() {
        let empty = TempDir::new().unwrap();
        let full = TempDir::new().unwrap();
        let expected = write_config(&full, "app.conf", "");

        let paths = [
            SearchPath::Env("LINECONF_TEST_VARIABLE_THAT_IS_NOT_SET"),
            SearchPath::Path(empty.path().to_path_buf()),
            SearchPath::Path(full.path().to_path_buf()),
        ];
        assert_eq!(find_config_in("app.conf", &paths), Some(expected));
    }

    #[test]
    fn leading_slash_is_ignored() {
        let dir = TempDir::new().unwrap();
        let expected = write_config(&dir, "app.conf", "");
        let paths = [SearchPath::Path(dir.path().to_path_buf())];
        assert_eq!(find_config_in("//app.conf", &paths), Some(expected));
    }

    #[test]
    fn nothing_found() {
        let dir = TempDir::new().unwrap();
        let paths = [SearchPath::Path(dir.path().to_path_buf())];
        assert_eq!(find_config_in("app.conf", &paths), None);
        assert_eq!(find_config("lineconf-test-no-such-file.conf"), None);
    }

    #[test]
    fn candidates() {
        assert_eq!(
            candidate(&SearchPath::Path("/etc".into()), "app.conf"),
            Some(PathBuf::from("/etc/app.conf"))
        );
        assert_eq!(
            candidate(&SearchPath::Cwd, "app.conf"),
            Some(PathBuf::from("./app.conf"))
        );
        if let Some(home) = directories::UserDirs::new() {
            assert_eq!(
                candidate(&SearchPath::HomeDotfile, "app.conf"),
                Some(home.home_dir().join(".app.conf"))
            );
        }
    }

    #[test]
    fn default_order() {
        let paths = default_search_paths();
        assert_eq!(paths.first(), Some(&SearchPath::Env("XDG_CONFIG")));
        assert_eq!(paths[1], SearchPath::HomeDotfile);
        assert_eq!(paths.last(), Some(&SearchPath::Cwd));
    }
}
