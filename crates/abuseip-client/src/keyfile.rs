//! API key resolution from `.apikey` files.
//!
//! The key is the `APIKEY` entry of a simple `KEY=value` file, by default
//! `<directory>/.apikey`. The `APIKEY` environment variable overrides the
//! file path. Lookups are memoized per directory, so the filesystem is
//! touched at most once per location for the life of the store.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

/// File consulted in each lookup directory
const KEY_FILE: &str = ".apikey";

/// Name of the file entry holding the key, and of the path override variable
const APIKEY: &str = "APIKEY";

/// Memoized `.apikey` lookups, keyed by directory.
///
/// The default lookup (no directory) is cached under its own key, so the
/// current-directory/executable-directory fallback chain runs once per
/// store. Negative outcomes are cached too: a directory without a readable
/// key file stays absent even if a file appears later.
#[derive(Debug, Default)]
pub struct KeyStore {
    path_override: Option<PathBuf>,
    entries: RwLock<HashMap<Option<PathBuf>, Option<String>>>,
}

impl KeyStore {
    /// Create an empty store with no path override
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store honouring the `APIKEY` path override from the
    /// environment, captured once at construction
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_override(env::var_os(APIKEY).map(PathBuf::from))
    }

    /// Create a store reading from a fixed file path instead of
    /// `<directory>/.apikey`
    #[must_use]
    pub fn with_override(path_override: Option<PathBuf>) -> Self {
        Self {
            path_override,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the API key for `directory`.
    ///
    /// With no directory, the current directory is tried first, then the
    /// directory holding the running executable. A missing, unreadable, or
    /// malformed key file resolves to `None`; the request layer then sends
    /// no `Key` header and the service rejects the call.
    pub fn resolve(&self, directory: Option<&Path>) -> Option<String> {
        let cache_key = directory.map(Path::to_path_buf);
        if let Some(cached) = self.cached(&cache_key) {
            return cached;
        }

        let resolved = match directory {
            Some(dir) => self.read_key(dir),
            None => self.resolve(Some(Path::new("."))).or_else(|| {
                env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf))
                    .and_then(|dir| self.read_key(&dir))
            }),
        };

        if let Ok(mut entries) = self.entries.write() {
            entries.insert(cache_key, resolved.clone());
        }
        resolved
    }

    fn cached(&self, cache_key: &Option<PathBuf>) -> Option<Option<String>> {
        let entries = self.entries.read().ok()?;
        entries.get(cache_key).cloned()
    }

    fn read_key(&self, directory: &Path) -> Option<String> {
        let path = self
            .path_override
            .clone()
            .unwrap_or_else(|| directory.join(KEY_FILE));

        match fs::read_to_string(&path) {
            Ok(content) => parse_env(&content).remove(APIKEY),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "no readable key file");
                None
            }
        }
    }
}

/// Parse a `KEY=value` file.
///
/// Blank lines and `#` comments are skipped, as are lines without an `=`.
/// Values may carry matching single or double quotes.
fn parse_env(content: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let value = value.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);

        entries.insert(name.to_string(), value.to_string());
    }

    entries
}
