//! ファイルシステムへのアクセス
//!
//! The compiler only reaches the disk through [`CatalogFs`], so the whole pipeline can
//! run against an in-memory tree in tests.

use std::future::Future;
use std::io;
use std::path::Path;

/// Filesystem operations needed to read translation trees and write generated modules.
pub trait CatalogFs {
    /// Returns true if `path` exists and is a directory.
    fn directory_exists(&self, path: &Path) -> impl Future<Output = bool> + Send;

    /// Names of the child directories of `path`, sorted.
    fn list_child_directories(
        &self,
        path: &Path,
    ) -> impl Future<Output = io::Result<Vec<String>>> + Send;

    /// Names of the child files of `path`, sorted.
    fn list_child_files(&self, path: &Path) -> impl Future<Output = io::Result<Vec<String>>> + Send;

    fn read_text_file(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;

    fn write_text_file(
        &self,
        path: &Path,
        contents: &str,
    ) -> impl Future<Output = io::Result<()>> + Send;

    /// Removes `path` and everything below it. A missing directory is not an error.
    fn remove_directory_all(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;

    fn create_directory_all(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

/// [`CatalogFs`] backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl DiskFs {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Lists the children of `path` whose file type satisfies `keep`.
    async fn list_children(
        path: &Path,
        keep: impl Fn(&std::fs::FileType) -> bool + Send,
    ) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let file_type = entry.file_type().await?;
            if !keep(&file_type) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => {
                    tracing::warn!(?name, "Skipping entry with a non UTF-8 name");
                }
            }
        }

        // read_dir order is platform dependent
        names.sort();
        Ok(names)
    }
}

impl CatalogFs for DiskFs {
    async fn directory_exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok_and(|metadata| metadata.is_dir())
    }

    async fn list_child_directories(&self, path: &Path) -> io::Result<Vec<String>> {
        Self::list_children(path, std::fs::FileType::is_dir).await
    }

    async fn list_child_files(&self, path: &Path) -> io::Result<Vec<String>> {
        Self::list_children(path, std::fs::FileType::is_file).await
    }

    async fn read_text_file(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write_text_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        tracing::debug!(path = %path.display(), "Writing file");
        tokio::fs::write(path, contents).await
    }

    async fn remove_directory_all(&self, path: &Path) -> io::Result<()> {
        tracing::debug!(path = %path.display(), "Deleting folder");
        match tokio::fs::remove_dir_all(path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    async fn create_directory_all(&self, path: &Path) -> io::Result<()> {
        tracing::debug!(path = %path.display(), "Creating folder");
        tokio::fs::create_dir_all(path).await
    }
}
