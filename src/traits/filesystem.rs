use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Trait for filesystem operations to enable testing with mocks
pub trait FileSystem: Send + Sync {
    /// Read file contents as a UTF-8 string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string contents to file, replacing anything already there
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Walk directory recursively, returning every reachable entry below (and including) `path`
    fn walk_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Real filesystem implementation using std::fs
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory: {:?}", parent))?;
        }

        std::fs::write(path, contents).with_context(|| format!("Failed to write file: {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn walk_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        use walkdir::WalkDir;

        // Unreadable subdirectories are left out; their siblings are still listed
        let paths = WalkDir::new(path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path().to_path_buf())
            .collect();

        Ok(paths)
    }
}

/// Mock filesystem implementation for testing (in-memory)
#[allow(dead_code)]
pub struct MockFileSystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    directories: Arc<RwLock<HashMap<PathBuf, ()>>>,
    /// Files that are listed by walks but fail to read, with the error to report
    unreadable: Arc<RwLock<HashMap<PathBuf, String>>>,
}

#[allow(dead_code)]
impl MockFileSystem {
    /// Create new empty mock filesystem
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
            directories: Arc::new(RwLock::new(HashMap::new())),
            unreadable: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get captured file contents for testing assertions
    pub fn get_file_contents(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// Check if file was written
    pub fn has_file(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }

    /// Register a file that exists but cannot be read (e.g. permission denied)
    pub fn add_unreadable(&self, path: &Path, reason: &str) {
        if let Some(parent) = path.parent() {
            self.add_dir_all(parent);
        }

        self.unreadable
            .write()
            .unwrap()
            .insert(path.to_path_buf(), reason.to_string());
    }

    /// Register a directory and all of its parents
    pub fn add_dir_all(&self, path: &Path) {
        let mut directories = self.directories.write().unwrap();
        let mut current = Some(path);
        while let Some(dir) = current {
            if dir.as_os_str().is_empty() {
                break;
            }
            directories.insert(dir.to_path_buf(), ());
            current = dir.parent();
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        if let Some(reason) = self.unreadable.read().unwrap().get(path) {
            anyhow::bail!("Failed to read file: {:?}: {}", path, reason);
        }

        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .with_context(|| format!("File not found in mock filesystem: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            self.add_dir_all(parent);
        }

        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_file(path) || self.directories.read().unwrap().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
            || self.unreadable.read().unwrap().contains_key(path)
    }

    fn walk_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let files = self.files.read().unwrap();
        let unreadable = self.unreadable.read().unwrap();
        let directories = self.directories.read().unwrap();

        let mut entries: Vec<PathBuf> = directories
            .keys()
            .chain(files.keys())
            .chain(unreadable.keys())
            .filter(|entry| entry.starts_with(path))
            .cloned()
            .collect();

        // HashMap order is random; keep walks stable for assertions
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_walk_dir_is_recursive() {
        let fs = MockFileSystem::new();
        fs.write(Path::new("/docs/r/a.markdown"), "a").unwrap();
        fs.write(Path::new("/docs/r/nested/deep/b.markdown"), "b").unwrap();
        fs.write(Path::new("/other/c.markdown"), "c").unwrap();

        let entries = fs.walk_dir(Path::new("/docs/r")).unwrap();

        assert!(entries.contains(&PathBuf::from("/docs/r")));
        assert!(entries.contains(&PathBuf::from("/docs/r/a.markdown")));
        assert!(entries.contains(&PathBuf::from("/docs/r/nested/deep/b.markdown")));
        assert!(!entries.contains(&PathBuf::from("/other/c.markdown")));
    }

    #[test]
    fn test_mock_unreadable_file() {
        let fs = MockFileSystem::new();
        let path = Path::new("/docs/r/locked.markdown");
        fs.add_unreadable(path, "Permission denied");

        assert!(fs.exists(path));
        assert!(fs.is_file(path));
        let err = fs.read_to_string(path).unwrap_err();
        assert!(err.to_string().contains("Permission denied"));
    }

    #[test]
    fn test_real_write_replaces_existing_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.csv");

        RealFileSystem
            .write(&path, "a much longer first version\n")
            .unwrap();
        RealFileSystem.write(&path, "short\n").unwrap();

        assert_eq!(RealFileSystem.read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn test_real_read_rejects_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.markdown");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        assert!(RealFileSystem.read_to_string(&path).is_err());
    }
}
