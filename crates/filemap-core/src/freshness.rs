//! Modification-time based staleness detection.

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Outcome of comparing the backing file against the recorded mtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The file has not been modified since the last successful load.
    Current,
    /// The file is newer than the last successful load.
    Modified(SystemTime),
}

/// Get file modification time.
pub fn modified_time(path: &Path) -> io::Result<SystemTime> {
    std::fs::metadata(path)?.modified()
}

/// Decide whether the file at `path` needs to be reloaded.
///
/// A reload is due only when the file's mtime is strictly newer than
/// `recorded`. Edits landing within the filesystem's timestamp resolution of
/// the last load are not detected.
pub fn check(path: &Path, recorded: Option<SystemTime>) -> io::Result<Freshness> {
    let mtime = modified_time(path)?;
    Ok(match recorded {
        Some(recorded) if mtime <= recorded => Freshness::Current,
        _ => Freshness::Modified(mtime),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    #[test]
    fn test_unrecorded_is_always_modified() {
        let file = NamedTempFile::new().unwrap();
        let mtime = modified_time(file.path()).unwrap();
        assert_eq!(check(file.path(), None).unwrap(), Freshness::Modified(mtime));
    }

    #[test]
    fn test_equal_mtime_is_current() {
        let file = NamedTempFile::new().unwrap();
        let mtime = modified_time(file.path()).unwrap();
        assert_eq!(check(file.path(), Some(mtime)).unwrap(), Freshness::Current);
    }

    #[test]
    fn test_older_file_is_current() {
        let file = NamedTempFile::new().unwrap();
        let mtime = modified_time(file.path()).unwrap();
        let recorded = mtime + Duration::from_secs(60);
        assert_eq!(check(file.path(), Some(recorded)).unwrap(), Freshness::Current);
    }

    #[test]
    fn test_newer_file_is_modified() {
        let file = NamedTempFile::new().unwrap();
        let recorded = modified_time(file.path()).unwrap();
        let newer = recorded + Duration::from_secs(5);
        file.as_file().set_modified(newer).unwrap();

        assert_eq!(check(file.path(), Some(recorded)).unwrap(), Freshness::Modified(newer));
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check(&dir.path().join("absent"), None).is_err());
    }
}
