//! Advisory file locking.
//!
//! The loader holds a shared lock for the duration of a read so that a
//! cooperating writer taking an exclusive lock never has its file read half
//! written. Writers that ignore the convention are not held off.

use std::fmt::Debug;
use std::fs::File;
use std::io;

/// Capability to take a shared, non-blocking advisory lock on an open file.
pub trait AdvisoryLock: Debug + Send + Sync {
    /// Try to acquire a shared lock on the whole of `file` without blocking.
    ///
    /// # Errors
    /// Returns an error if the lock is held exclusively elsewhere or locking
    /// is unsupported.
    fn try_lock_shared(&self, file: &File) -> io::Result<()>;

    /// Release a lock taken with [`try_lock_shared`](Self::try_lock_shared).
    ///
    /// Closing the file also releases it.
    fn unlock(&self, file: &File) -> io::Result<()>;
}

/// OS-level advisory lock (`flock` on Unix, `LockFileEx` on Windows).
///
/// Writers must take their lock with `flock` as well. On Linux, POSIX record
/// locks (`fcntl` with `F_SETLK`) and `flock` locks are independent, so a
/// writer holding only an `fcntl` write lock does not keep this reader out.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedFileLock;

impl AdvisoryLock for SharedFileLock {
    fn try_lock_shared(&self, file: &File) -> io::Result<()> {
        fs2::FileExt::try_lock_shared(file)
    }

    fn unlock(&self, file: &File) -> io::Result<()> {
        fs2::FileExt::unlock(file)
    }
}

/// Skips advisory locking entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLock;

impl AdvisoryLock for NoLock {
    fn try_lock_shared(&self, _file: &File) -> io::Result<()> {
        Ok(())
    }

    fn unlock(&self, _file: &File) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_shared_locks_coexist() {
        let file = NamedTempFile::new().unwrap();
        let first = File::open(file.path()).unwrap();
        let second = File::open(file.path()).unwrap();

        SharedFileLock.try_lock_shared(&first).unwrap();
        SharedFileLock.try_lock_shared(&second).unwrap();

        SharedFileLock.unlock(&first).unwrap();
        SharedFileLock.unlock(&second).unwrap();
    }

    #[test]
    fn test_shared_lock_fails_against_exclusive_holder() {
        let file = NamedTempFile::new().unwrap();
        let writer = File::options().write(true).open(file.path()).unwrap();
        fs2::FileExt::lock_exclusive(&writer).unwrap();

        let reader = File::open(file.path()).unwrap();
        assert!(SharedFileLock.try_lock_shared(&reader).is_err());
        assert!(NoLock.try_lock_shared(&reader).is_ok());

        fs2::FileExt::unlock(&writer).unwrap();
        assert!(SharedFileLock.try_lock_shared(&reader).is_ok());
    }
}
