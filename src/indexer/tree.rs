//! 翻訳ツリーの読み込み
//!
//! A language's translation directory is walked depth first. Every subdirectory adds
//! a segment to the section identity, and every matching file becomes one section
//! named after its path.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use crate::catalog::CatalogError;
use crate::indexer::matcher::TranslationFileMatcher;
use crate::input::fs::CatalogFs;
use crate::input::translation::parse_translation_file;
use crate::ir::section::SectionIdentity;
use crate::ir::translation::Translations;

/// One translation file, parsed and named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSection {
    pub identity: SectionIdentity,
    pub path: PathBuf,
    pub translations: Translations,
}

/// Loads the sections of one language.
#[derive(Debug)]
pub struct TreeLoader<'a, F> {
    fs: &'a F,
    matcher: &'a TranslationFileMatcher,
    shortcode: &'a str,
}

impl<'a, F: CatalogFs + Sync> TreeLoader<'a, F> {
    #[must_use]
    pub const fn new(fs: &'a F, matcher: &'a TranslationFileMatcher, shortcode: &'a str) -> Self {
        Self { fs, matcher, shortcode }
    }

    /// `root` 以下のすべての翻訳ファイルを読み込む
    ///
    /// Subdirectories are visited before the files of a directory, both in sorted
    /// order. Files not matching the translation file pattern are skipped.
    ///
    /// # Errors
    /// - ディレクトリやファイルの読み込みに失敗した場合
    /// - 翻訳ファイルが不正な場合
    /// - パスの区切りから識別子を作れない場合
    /// - 二つのファイルが同じセクションキーになる場合
    pub async fn load(
        &self,
        root: &Path,
        start: &SectionIdentity,
    ) -> Result<Vec<LoadedSection>, CatalogError> {
        tracing::debug!(shortcode = self.shortcode, root = %root.display(), "Loading translation tree");

        let mut sections = Vec::new();
        self.load_folder(root, start, &mut sections).await?;
        self.check_duplicates(&sections)?;

        tracing::debug!(shortcode = self.shortcode, count = sections.len(), "Loaded sections");
        Ok(sections)
    }

    async fn load_folder(
        &self,
        path: &Path,
        identity: &SectionIdentity,
        sections: &mut Vec<LoadedSection>,
    ) -> Result<(), CatalogError> {
        let folders =
            self.fs.list_child_directories(path).await.map_err(CatalogError::io(path))?;
        for folder in folders {
            let folder_path = path.join(&folder);
            let child = self.extend(identity, &folder, &folder_path)?;
            Box::pin(self.load_folder(&folder_path, &child, sections)).await?;
        }

        let files = self.fs.list_child_files(path).await.map_err(CatalogError::io(path))?;
        for file in files {
            let file_path = path.join(&file);
            if !self.matcher.is_translation_file(&file) {
                tracing::debug!(path = %file_path.display(), "Skipping non-translation file");
                continue;
            }

            let stem = Path::new(&file).file_stem().and_then(|stem| stem.to_str()).unwrap_or(&file);
            let child = self.extend(identity, stem, &file_path)?;
            sections.push(self.load_file(file_path, child).await?);
        }

        Ok(())
    }

    async fn load_file(
        &self,
        path: PathBuf,
        identity: SectionIdentity,
    ) -> Result<LoadedSection, CatalogError> {
        let content = self.fs.read_text_file(&path).await.map_err(CatalogError::io(&path))?;
        let translations = parse_translation_file(&content)
            .map_err(|source| CatalogError::from_translation(self.shortcode, &path, source))?;

        Ok(LoadedSection { identity, path, translations })
    }

    fn extend(
        &self,
        identity: &SectionIdentity,
        segment: &str,
        path: &Path,
    ) -> Result<SectionIdentity, CatalogError> {
        identity.extend(segment).map_err(|e| CatalogError::InvalidSegment {
            shortcode: self.shortcode.to_string(),
            path: path.to_path_buf(),
            segment: e.segment,
        })
    }

    /// `common/title.json` and `commonTitle.json` normalize to the same key, and
    /// `a/1b.json` and `a1b.json` to the same generated names.
    fn check_duplicates(&self, sections: &[LoadedSection]) -> Result<(), CatalogError> {
        let mut keys: HashMap<&str, &Path> = HashMap::new();
        let mut names: HashMap<&str, &Path> = HashMap::new();
        for section in sections {
            let identity = &section.identity;
            if let Some(first) = keys.insert(identity.key(), &section.path) {
                return Err(CatalogError::DuplicateSection {
                    shortcode: self.shortcode.to_string(),
                    key: identity.key().to_string(),
                    first: first.to_path_buf(),
                    second: section.path.clone(),
                });
            }
            for name in [identity.variable_name(), identity.interface_name()] {
                if let Some(first) = names.insert(name, &section.path) {
                    return Err(CatalogError::DuplicateIdentifier {
                        shortcode: self.shortcode.to_string(),
                        name: name.to_string(),
                        first: first.to_path_buf(),
                        second: section.path.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
