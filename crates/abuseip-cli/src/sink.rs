//! Output sink selection, with backup of existing files.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context as _, Result};

/// Open the output sink.
///
/// With no path, output goes to stdout. With a path, any pre-existing file
/// there is first copied to `<path>.prev`, then the destination is
/// truncated for writing. The backup and the truncation are two separate
/// filesystem operations with no atomicity guarantee between them.
pub fn open(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdout()));
    };

    if path.exists() {
        let mut backup = path.as_os_str().to_os_string();
        backup.push(".prev");
        fs::copy(path, &backup)
            .with_context(|| format!("backing up {}", path.display()))?;
    }

    let file = fs::File::create(path)
        .with_context(|| format!("opening {} for writing", path.display()))?;
    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_path_creates_no_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let mut sink = open(Some(&path)).unwrap();
        sink.write_all(b"current\n").unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(&path).unwrap(), "current\n");
        assert!(!dir.path().join("out.json.prev").exists());
    }

    #[test]
    fn test_existing_file_is_preserved_as_prev() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "previous\n").unwrap();

        let mut sink = open(Some(&path)).unwrap();
        sink.write_all(b"current\n").unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(&path).unwrap(), "current\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.json.prev")).unwrap(),
            "previous\n"
        );
    }

    #[test]
    fn test_backup_is_overwritten_on_each_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let prev = dir.path().join("out.json.prev");
        fs::write(&path, "first\n").unwrap();
        fs::write(&prev, "stale\n").unwrap();

        let sink = open(Some(&path)).unwrap();
        drop(sink);

        assert_eq!(fs::read_to_string(&prev).unwrap(), "first\n");
    }
}
