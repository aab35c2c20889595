//! Append-only file with size-capped rotation.
//!
//! Once the file grows past [`MAX_BYTES`] it is renamed to `<name>.<n>` and a
//! fresh file is started. Backups are numbered: `.1` is the most recent, and
//! anything beyond [`KEEP_BACKUPS`] is deleted during the shift.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotation threshold (5 MB).
const MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Number of rotated files retained next to the live file.
const KEEP_BACKUPS: usize = 3;

/// Thread-safe rotating writer.
///
/// The exporter may be driven from whichever thread closes a span, so the open
/// handle sits behind a mutex and is (re)opened lazily on the next append.
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    handle: Mutex<Option<File>>,
}

impl RotatingFile {
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_BYTES)
    }

    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            handle: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotating, opening or writing, and an
    /// `Other` error if the handle mutex was poisoned.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "trace file lock poisoned"))?;

        if self.is_full() {
            *guard = None;
            self.rotate()?;
        }

        let file = match guard.as_mut() {
            Some(file) => file,
            None => guard.insert(OpenOptions::new().create(true).append(true).open(&self.path)?),
        };

        writeln!(file, "{line}")?;
        file.flush()
    }

    fn is_full(&self) -> bool {
        fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes)
    }

    /// Shifts `.n` to `.n+1` (dropping the oldest) and moves the live file to `.1`.
    fn rotate(&self) -> io::Result<()> {
        let oldest = backup_path(&self.path, KEEP_BACKUPS);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for n in (1..KEEP_BACKUPS).rev() {
            let from = backup_path(&self.path, n);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, n + 1))?;
            }
        }

        if self.path.exists() {
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        }
        Ok(())
    }
}

fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{n}"));
    PathBuf::from(name)
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}
