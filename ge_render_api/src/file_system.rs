//! File access used by shader compilation
//!
//! Only three operations are needed: read a whole file, test whether a path
//! names a file, and query the working directory that relative search paths
//! are resolved against.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// File system provider
pub trait FileSystem: Send + Sync {
    /// Read the whole file
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// True if `path` names an existing file
    fn exists(&self, path: &Path) -> bool;

    /// Directory that relative paths are resolved against
    fn working_directory(&self) -> PathBuf;
}

/// [`FileSystem`] backed by `std::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|e| {
            Error::InvalidResource(format!("Cannot read '{}': {}", path.display(), e))
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn working_directory(&self) -> PathBuf {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

/// In-memory [`FileSystem`], for shaders shipped inside the executable
///
/// Relative paths are stored under the working directory.
#[derive(Debug)]
pub struct MemoryFileSystem {
    working_directory: PathBuf,
    files: RwLock<FxHashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileSystem {
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self { working_directory: working_directory.into(), files: RwLock::new(FxHashMap::default()) }
    }

    /// Add or replace a file
    pub fn insert(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let path = self.absolute(path.as_ref());
        self.files.write().unwrap_or_else(|e| e.into_inner()).insert(path, contents.into());
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_directory.join(path)
        }
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files
            .get(&self.absolute(path))
            .cloned()
            .ok_or_else(|| Error::InvalidResource(format!("Cannot read '{}': no such file", path.display())))
    }

    fn exists(&self, path: &Path) -> bool {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.contains_key(&self.absolute(path))
    }

    fn working_directory(&self) -> PathBuf {
        self.working_directory.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_file_system_relative_paths() {
        let fs = MemoryFileSystem::new("/game").with_file("Data/Shaders/common.hlsl", "float4 x;");

        assert!(fs.exists(Path::new("/game/Data/Shaders/common.hlsl")));
        assert!(fs.exists(Path::new("Data/Shaders/common.hlsl")));
        assert_eq!(fs.read(Path::new("Data/Shaders/common.hlsl")).unwrap(), b"float4 x;");
        assert_eq!(fs.working_directory(), PathBuf::from("/game"));
    }

    #[test]
    fn test_memory_file_system_missing_file() {
        let fs = MemoryFileSystem::new("/game");
        assert!(!fs.exists(Path::new("missing.hlsl")));
        assert!(matches!(fs.read(Path::new("missing.hlsl")), Err(Error::InvalidResource(_))));
    }

    #[test]
    fn test_std_file_system_reports_missing_file() {
        let fs = StdFileSystem;
        assert!(!fs.exists(Path::new("definitely/not/here.hlsl")));
        assert!(fs.read(Path::new("definitely/not/here.hlsl")).is_err());
    }
}
