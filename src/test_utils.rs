//! テスト用ユーティリティ
//!
//! 複数のテストモジュールで使用されるインメモリのファイルシステムを提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::io;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Mutex;

use crate::input::fs::CatalogFs;

/// [`CatalogFs`] over an in-memory tree.
#[derive(Debug, Default)]
pub(crate) struct MemoryFs {
    directories: Mutex<BTreeSet<PathBuf>>,
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryFs {
    /// 指定されたファイルを持つツリーを作成する
    ///
    /// 親ディレクトリは自動的に作成されます。
    pub(crate) fn with_files(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        for (path, contents) in files {
            fs.insert_file(Path::new(path), contents);
        }
        fs
    }

    pub(crate) fn insert_file(&self, path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            self.insert_directory(parent);
        }
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
    }

    pub(crate) fn insert_directory(&self, path: &Path) {
        let mut directories = self.directories.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            directories.insert(ancestor.to_path_buf());
        }
    }

    pub(crate) fn file(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    /// Paths of every file below `directory`, sorted.
    pub(crate) fn files_under(&self, directory: &str) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .keys()
            .filter(|path| path.starts_with(directory))
            .cloned()
            .collect()
    }

    fn not_found(path: &Path) -> io::Error {
        io::Error::new(io::ErrorKind::NotFound, format!("{} does not exist", path.display()))
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.directories.lock().unwrap().contains(path)
    }
}

impl CatalogFs for MemoryFs {
    async fn directory_exists(&self, path: &Path) -> bool {
        self.is_directory(path)
    }

    async fn list_child_directories(&self, path: &Path) -> io::Result<Vec<String>> {
        if !self.is_directory(path) {
            return Err(Self::not_found(path));
        }
        let directories = self.directories.lock().unwrap();
        Ok(directories
            .iter()
            .filter(|candidate| candidate.parent() == Some(path))
            .filter_map(|candidate| candidate.file_name()?.to_str().map(ToString::to_string))
            .collect())
    }

    async fn list_child_files(&self, path: &Path) -> io::Result<Vec<String>> {
        if !self.is_directory(path) {
            return Err(Self::not_found(path));
        }
        let files = self.files.lock().unwrap();
        Ok(files
            .keys()
            .filter(|candidate| candidate.parent() == Some(path))
            .filter_map(|candidate| candidate.file_name()?.to_str().map(ToString::to_string))
            .collect())
    }

    async fn read_text_file(&self, path: &Path) -> io::Result<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| Self::not_found(path))
    }

    async fn write_text_file(&self, path: &Path, contents: &str) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !self.is_directory(parent) => Err(Self::not_found(parent)),
            _ => {
                self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
                Ok(())
            }
        }
    }

    async fn remove_directory_all(&self, path: &Path) -> io::Result<()> {
        self.directories.lock().unwrap().retain(|candidate| !candidate.starts_with(path));
        self.files.lock().unwrap().retain(|candidate, _| !candidate.starts_with(path));
        Ok(())
    }

    async fn create_directory_all(&self, path: &Path) -> io::Result<()> {
        self.insert_directory(path);
        Ok(())
    }
}
