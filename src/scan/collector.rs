use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::ScanError;
use crate::traits::FileSystem;

/// Finds the documentation files to scan
pub struct DocumentCollector<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    extension: &'a str,
}

impl<'a> DocumentCollector<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: &'a Path, extension: &'a str) -> Self {
        Self {
            fs,
            root,
            extension,
        }
    }

    /// Fail early when the docs root is missing, before any network work happens
    pub fn verify_root(&self) -> Result<(), ScanError> {
        if self.fs.exists(self.root) {
            return Ok(());
        }

        Err(ScanError::DocsDirectoryNotFound {
            expected: std::path::absolute(self.root).unwrap_or_else(|_| self.root.to_path_buf()),
        })
    }

    /// Every file below the root whose name ends with the configured extension
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let documents: Vec<PathBuf> = self
            .fs
            .walk_dir(self.root)?
            .into_iter()
            .filter(|path| self.is_document(path))
            .collect();

        if documents.is_empty() {
            return Err(ScanError::NoDocuments {
                root: self.root.to_path_buf(),
                extension: self.extension.to_string(),
            }
            .into());
        }

        Ok(documents)
    }

    fn is_document(&self, path: &Path) -> bool {
        let name_matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(self.extension));

        name_matches && self.fs.is_file(path)
    }
}
