use std::path::PathBuf;

/// A place [`find_config`](crate::find_config) looks for a config file.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// The directory named by an environment variable, skipped when unset
    /// or empty, e.g. `Env("XDG_CONFIG")`.
    Env(&'static str),
    /// A dotfile in the user's home directory: `~/.{name}`.
    HomeDotfile,
    /// An explicit directory.
    Path(PathBuf),
    /// The current working directory, as a relative `./{name}`.
    Cwd,
}

/// The conventional locations, in the order they are checked.
pub fn default_search_paths() -> Vec<SearchPath> {
    vec![
        SearchPath::Env("XDG_CONFIG"),
        SearchPath::HomeDotfile,
        SearchPath::Path("/etc".into()),
        SearchPath::Path("/usr/local/etc".into()),
        SearchPath::Path("/usr/pkg/etc".into()),
        SearchPath::Cwd,
    ]
}
