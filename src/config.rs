use std::path::PathBuf;

/// Default location of the reference document, relative to the data root.
pub const DEFAULT_ENTRY: &str = "reference.json";
/// Default location of the terminal document, relative to the data root.
pub const DEFAULT_TERMINAL: &str = "data3.json";

/// Options controlling chain resolution.
#[derive(Debug, Clone)]
pub struct ChainOptions {
    /// Location of the reference document.
    pub entry: String,
    /// Location of the terminal document.
    pub terminal: String,
    /// Fetch the terminal document while the pointer chain is still resolving.
    /// Only the async resolver honors this.
    pub prefetch_terminal: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            entry: DEFAULT_ENTRY.to_string(),
            terminal: DEFAULT_TERMINAL.to_string(),
            prefetch_terminal: false,
        }
    }
}

/// Where document locations are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Base URL; locations are appended after a `/`.
    Http(String),
    /// Local directory; locations are joined as relative paths.
    Dir(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` prefixes select HTTP, anything else is a directory.
    pub fn parse(s: &str) -> Self {
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Http(s.trim_end_matches('/').to_string())
        } else {
            DataSource::Dir(PathBuf::from(s))
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Http(base) => f.write_str(base),
            DataSource::Dir(dir) => write!(f, "{}", dir.display()),
        }
    }
}
