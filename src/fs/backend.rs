use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// One entry of a directory listing: a name and whether it is a directory.
///
/// Symlinks are reported as files; the browser never follows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub is_dir: bool,
}

impl ListedEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Filesystem operations the browser consumes.
///
/// All calls are synchronous; errors abort the in-flight navigation command
/// and surface to the caller.
pub trait FsBackend {
    /// List the immediate children of `path` (names + kind, unsorted).
    fn list_dir(&mut self, path: &Path) -> Result<Vec<ListedEntry>>;

    /// Change the process working directory to `path`.
    fn change_dir(&mut self, path: &Path) -> Result<()>;

    /// Resolve the parent of `path`, or `None` at the filesystem root.
    fn parent_of(&self, path: &Path) -> Option<PathBuf>;
}

/// The real filesystem, via `std::fs` and `std::env`.
#[derive(Debug, Default)]
pub struct RealFs;

impl FsBackend for RealFs {
    /// Entries that fail to stat (broken symlinks, races with deletion) are
    /// silently skipped; failure to open the directory itself propagates.
    fn list_dir(&mut self, path: &Path) -> Result<Vec<ListedEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(_) => continue,
            };
            let name = entry.file_name().to_string_lossy().to_string();
            entries.push(if file_type.is_dir() {
                ListedEntry::dir(name)
            } else {
                ListedEntry::file(name)
            });
        }
        Ok(entries)
    }

    fn change_dir(&mut self, path: &Path) -> Result<()> {
        std::env::set_current_dir(path)?;
        Ok(())
    }

    fn parent_of(&self, path: &Path) -> Option<PathBuf> {
        path.parent().map(Path::to_path_buf)
    }
}
