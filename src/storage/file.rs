//! JSON-file-based storage backend.
//!
//! Stores the whole transaction collection in a single JSON file under a
//! configurable directory (default: `$XDG_DATA_HOME/moneytracker-rs/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{Result, TrackerError};
use crate::models::Transaction;
use crate::storage::STORAGE_KEY;

/// Application name used for the XDG data directory.
const APP_NAME: &str = "moneytracker-rs";
/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "storage.lock";

/// File-backed storage persisting the collection as one JSON file.
///
/// The slot file is named after [`STORAGE_KEY`]. Writes replace the whole
/// file atomically (write-to-tmp then rename); there is no incremental
/// patching and no versioning.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file lock
/// on `storage.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]): reads take a shared lock, writes an
/// exclusive one, covering the whole read-modify-write persistence cycle.
///
/// # File layout
///
/// ```text
/// <dir>/
///   storage.lock                      (cross-process lock sentinel)
///   money_tracker_transactions.json   (the slot)
/// ```
#[derive(Debug)]
pub struct FileStorage {
    /// Directory containing the slot and lock files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStorage {
    /// Creates a new file storage rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist. Also
    /// opens (or creates) the `storage.lock` sentinel file used for
    /// cross-process advisory locking.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this
    /// application.
    ///
    /// On Linux: `$XDG_DATA_HOME/moneytracker-rs/` (typically
    /// `~/.local/share/moneytracker-rs/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be
    /// determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                TrackerError::Storage("could not determine platform data directory".into())
            })
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the full path of the slot file.
    fn slot_path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json"))
    }

    /// Returns the full path of the temporary file used for atomic
    /// writes.
    fn tmp_path(&self) -> PathBuf {
        self.dir.join(format!("{STORAGE_KEY}.json.tmp"))
    }

    /// Acquires an in-process mutex guard and a shared (read) file lock,
    /// executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(storage_io_error)?;
        let result = op();
        // Only surface the unlock error when the operation succeeded;
        // otherwise the original error is more useful.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write) file
    /// lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Reads and deserializes the slot file. Returns `None` if the file
    /// does not exist.
    fn read_slot(&self) -> Result<Option<Vec<Transaction>>> {
        match fs::read_to_string(self.slot_path()) {
            Ok(contents) => serde_json::from_str(&contents)
                .map(Some)
                .map_err(TrackerError::from),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        }
    }

    /// Atomically writes the serialized collection (write-to-tmp then
    /// rename).
    fn write_slot(&self, transactions: &[Transaction]) -> Result<()> {
        let json = serde_json::to_string_pretty(transactions)?;
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(storage_io_error)?;
        fs::rename(&tmp_path, self.slot_path()).map_err(storage_io_error)?;
        Ok(())
    }

    /// Deletes the slot file.
    ///
    /// The `storage.lock` sentinel is intentionally preserved — it is
    /// infrastructure, not data.
    fn remove_slot(&self) -> Result<()> {
        match fs::remove_file(self.slot_path()) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_io_error(err)),
        }
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`TrackerError::Storage`].
fn storage_io_error(err: std::io::Error) -> TrackerError {
    TrackerError::Storage(Box::new(err))
}

/// Wraps a mutex poison error into a [`TrackerError::Storage`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> TrackerError {
    TrackerError::Storage(err.to_string().into())
}

impl super::TransactionStorage for FileStorage {
    #[inline]
    fn load(&self) -> Result<Option<Vec<Transaction>>> {
        self.with_shared_lock(|| self.read_slot())
    }

    #[inline]
    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        self.with_exclusive_lock(|| self.write_slot(transactions))
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_exclusive_lock(|| self.remove_slot())
    }
}
