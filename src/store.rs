//! Backup file store abstraction.
//!
//! The backup target is addressed by folder and file *name*, not by a path
//! language; the sync engine only ever needs find-or-create, read,
//! write-if-different, and trash. [`LocalStore`] implements the contract on
//! the local filesystem rooted at the configured backup directory. Tests
//! provide an in-memory implementation of the same trait.

use std::{future::Future, path::PathBuf};

use crate::error::BackupError;

pub trait FileStore {
    /// Ensures a folder with the given name exists under the store root.
    fn find_or_create_folder(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<(), BackupError>> + Send;

    /// Reads a file's content, or `None` when the file does not exist.
    /// An empty `folder` addresses the store root.
    fn read_file(
        &self,
        folder: &str,
        name: &str,
    ) -> impl Future<Output = Result<Option<String>, BackupError>> + Send;

    /// Writes `content` to the named file, creating it if necessary. The
    /// write is skipped when the existing content already matches; the
    /// returned flag reports whether anything was written.
    fn update_or_create_file(
        &self,
        folder: &str,
        name: &str,
        content: &str,
    ) -> impl Future<Output = Result<bool, BackupError>> + Send;

    /// Removes the named file. A missing file is a no-op, not an error.
    fn trash_file(
        &self,
        folder: &str,
        name: &str,
    ) -> impl Future<Output = Result<(), BackupError>> + Send;
}

/// [`FileStore`] over the local filesystem.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn folder_path(&self, folder: &str) -> PathBuf {
        if folder.is_empty() {
            self.root.clone()
        } else {
            self.root.join(folder)
        }
    }
}

impl FileStore for LocalStore {
    async fn find_or_create_folder(&self, name: &str) -> Result<(), BackupError> {
        async_fs::create_dir_all(self.folder_path(name)).await?;
        Ok(())
    }

    async fn read_file(&self, folder: &str, name: &str) -> Result<Option<String>, BackupError> {
        let path = self.folder_path(folder).join(name);
        match async_fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BackupError::Store(e)),
        }
    }

    async fn update_or_create_file(
        &self,
        folder: &str,
        name: &str,
        content: &str,
    ) -> Result<bool, BackupError> {
        let dir = self.folder_path(folder);
        async_fs::create_dir_all(&dir).await?;

        // Check if the contents already match
        if let Some(existing) = self.read_file(folder, name).await? {
            if existing == content {
                return Ok(false);
            }
        }

        async_fs::write(dir.join(name), content).await?;
        Ok(true)
    }

    async fn trash_file(&self, folder: &str, name: &str) -> Result<(), BackupError> {
        let path = self.folder_path(folder).join(name);
        match async_fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BackupError::Store(e)),
        }
    }
}
