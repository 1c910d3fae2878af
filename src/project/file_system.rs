//! File access used by import resolution.
//!
//! Import resolution only needs existence checks, modification times and
//! whole-file reads. [`RealFileSystem`] goes to disk; [`MemoryFileSystem`]
//! keeps files in memory and counts reads so callers can observe cache hits.

use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

/// The file operations import resolution performs.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// `std::fs` backed file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        std::fs::metadata(path)?.modified()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

#[derive(Debug, Clone)]
struct MemoryFile {
    text: String,
    modified: SystemTime,
    unreadable: bool,
}

/// In-memory file system with controllable modification times.
///
/// Every write advances a logical clock by one second, so a rewritten file
/// is always newer than what was read before.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<FxHashMap<PathBuf, MemoryFile>>,
    reads: Mutex<FxHashMap<PathBuf, usize>>,
    clock: Mutex<u64>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn tick(&self) -> SystemTime {
        let mut clock = self.clock.lock();
        *clock += 1;
        SystemTime::UNIX_EPOCH + Duration::from_secs(*clock)
    }

    /// Create or replace a file, giving it a fresh modification time.
    pub fn write(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        let modified = self.tick();
        self.files.write().insert(
            path.into(),
            MemoryFile {
                text: text.into(),
                modified,
                unreadable: false,
            },
        );
    }

    /// Replace a file's content without touching its modification time.
    pub fn write_preserving_mtime(&self, path: &Path, text: impl Into<String>) {
        if let Some(file) = self.files.write().get_mut(path) {
            file.text = text.into();
        }
    }

    pub fn set_modified(&self, path: &Path, modified: SystemTime) {
        if let Some(file) = self.files.write().get_mut(path) {
            file.modified = modified;
        }
    }

    /// Make reads of an existing file fail with `PermissionDenied`.
    pub fn set_unreadable(&self, path: &Path, unreadable: bool) {
        if let Some(file) = self.files.write().get_mut(path) {
            file.unreadable = unreadable;
        }
    }

    pub fn remove(&self, path: &Path) -> bool {
        self.files.write().remove(path).is_some()
    }

    /// Number of successful or failed reads of `path` so far.
    pub fn read_count(&self, path: &Path) -> usize {
        self.reads.lock().get(path).copied().unwrap_or(0)
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.read().contains_key(path)
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        self.files
            .read()
            .get(path)
            .map(|file| file.modified)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        *self.reads.lock().entry(path.to_path_buf()).or_default() += 1;
        let files = self.files.read();
        let file = files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))?;
        if file.unreadable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                path.display().to_string(),
            ));
        }
        Ok(file.text.clone())
    }
}
