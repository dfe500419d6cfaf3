//! カタログ生成の実行
//!
//! A run validates the language set, loads and assembles every language in memory,
//! and only then replaces the output directory. A failing run leaves the previous
//! output untouched.

use std::path::{
    Path,
    PathBuf,
};

use futures::future::try_join_all;

use super::CatalogError;
use super::assembler::{
    BaseCatalog,
    LanguageAssembler,
};
use super::language::{
    Language,
    LanguageSet,
};
use crate::codegen::{
    Artifact,
    RuntimeImports,
    Target,
    TypeScript,
};
use crate::config::{
    CatalogSettings,
    ConfigManager,
};
use crate::indexer::{
    LoadedSection,
    TranslationFileMatcher,
    TreeLoader,
};
use crate::input::fs::CatalogFs;
use crate::ir::section::SectionIdentity;

/// A file to be written, with its full path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageReport {
    pub shortcode: String,
    pub own_sections: usize,
    pub inherited_sections: usize,
}

/// Summary of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Languages in processing order.
    pub languages: Vec<LanguageReport>,
    pub files: Vec<PathBuf>,
    /// False for a dry run.
    pub written: bool,
}

/// Every output file of a run, assembled but not yet written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCatalog {
    pub files: Vec<GeneratedFile>,
    pub languages: Vec<LanguageReport>,
}

impl GeneratedCatalog {
    #[must_use]
    pub fn file(&self, path: &Path) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.path == path)
    }
}

/// Compiles translation trees into generated modules.
#[derive(Debug)]
pub struct CatalogGenerator<'a, F, T = TypeScript> {
    fs: &'a F,
    target: T,
    settings: CatalogSettings,
    matcher: TranslationFileMatcher,
    translations_dir: PathBuf,
    output_dir: PathBuf,
}

impl<'a, F: CatalogFs + Sync> CatalogGenerator<'a, F> {
    /// Generator emitting TypeScript, configured from a loaded [`ConfigManager`].
    ///
    /// # Errors
    /// 翻訳ファイルのパターンが不正な場合
    pub fn from_config(fs: &'a F, config: &ConfigManager) -> Result<Self, CatalogError> {
        let settings = config.get_settings().clone();
        let target = TypeScript::new(RuntimeImports::from(&settings.runtime));
        Self::with_target(fs, target, settings, config.translations_dir(), config.output_dir())
    }
}

impl<'a, F: CatalogFs + Sync, T: Target> CatalogGenerator<'a, F, T> {
    /// # Errors
    /// 翻訳ファイルのパターンが不正な場合
    pub fn with_target(
        fs: &'a F,
        target: T,
        settings: CatalogSettings,
        translations_dir: PathBuf,
        output_dir: PathBuf,
    ) -> Result<Self, CatalogError> {
        let matcher = TranslationFileMatcher::new(&settings.translation_file_pattern)?;
        Ok(Self { fs, target, settings, matcher, translations_dir, output_dir })
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 全言語をメモリ上でコンパイルする
    ///
    /// Nothing is written. The base language is processed first, so every derived
    /// language sees the complete canonical section list.
    ///
    /// # Errors
    /// Any language set, loading or assembly error aborts the run.
    pub async fn compile(&self) -> Result<GeneratedCatalog, CatalogError> {
        let languages = LanguageSet::new(&self.settings.languages, &self.settings.base_language)?;

        let mut catalog = GeneratedCatalog::default();
        let mut base: Option<BaseCatalog> = None;

        for language in languages.iter() {
            tracing::info!(
                shortcode = language.shortcode(),
                name = language.name(),
                parent = language.parent(),
                "Compiling language"
            );

            let sections = self.load_language(language).await?;
            let mut assembler = match (language.parent(), &base) {
                (None, _) => LanguageAssembler::for_base(&self.target, language),
                (Some(_), Some(base)) => LanguageAssembler::for_derived(&self.target, language, base),
                (Some(_), None) => {
                    return Err(CatalogError::MissingBaseLanguage {
                        shortcode: self.settings.base_language.clone(),
                    });
                }
            };
            for section in &sections {
                assembler.add_section(section)?;
            }
            let assembled = assembler.finish();

            catalog.files.push(GeneratedFile {
                path: self.output_path(Artifact::Language(language.shortcode())),
                contents: assembled.module_source,
            });
            catalog.languages.push(LanguageReport {
                shortcode: assembled.shortcode,
                own_sections: assembled.own_sections,
                inherited_sections: assembled.inherited_sections,
            });

            if let Some(published) = assembled.published {
                catalog.files.push(GeneratedFile {
                    path: self.output_path(Artifact::SectionsInterface),
                    contents: published.sections_interface,
                });
                catalog.files.push(GeneratedFile {
                    path: self.output_path(Artifact::LanguageInterface),
                    contents: published.language_interface,
                });
                base = Some(published.catalog);
            }
        }

        Ok(catalog)
    }

    async fn load_language(&self, language: &Language) -> Result<Vec<LoadedSection>, CatalogError> {
        let root = self.translations_dir.join(language.shortcode());

        if !self.fs.directory_exists(&root).await {
            if language.is_base() {
                return Err(CatalogError::MissingBaseTranslations {
                    shortcode: language.shortcode().to_string(),
                    path: root,
                });
            }
            tracing::warn!(
                shortcode = language.shortcode(),
                path = %root.display(),
                "No translation directory, inheriting every section"
            );
            return Ok(Vec::new());
        }

        TreeLoader::new(self.fs, &self.matcher, language.shortcode())
            .load(&root, &SectionIdentity::root())
            .await
    }

    fn output_path(&self, artifact: Artifact<'_>) -> PathBuf {
        self.output_dir.join(self.target.file_name(artifact))
    }

    /// 出力ディレクトリを作り直してファイルを書き込む
    ///
    /// # Errors
    /// ディレクトリの削除・作成またはファイル書き込みに失敗した場合
    pub async fn write(&self, catalog: &GeneratedCatalog) -> Result<(), CatalogError> {
        tracing::debug!(output_dir = %self.output_dir.display(), "Resetting output directory");
        self.fs
            .remove_directory_all(&self.output_dir)
            .await
            .map_err(CatalogError::io(&self.output_dir))?;
        self.fs
            .create_directory_all(&self.output_dir)
            .await
            .map_err(CatalogError::io(&self.output_dir))?;

        try_join_all(catalog.files.iter().map(|file| async move {
            self.fs.write_text_file(&file.path, &file.contents).await.map_err(CatalogError::io(&file.path))
        }))
        .await?;

        Ok(())
    }

    /// Compiles every language and, unless `dry_run` is set, writes the result.
    ///
    /// # Errors
    /// [`Self::compile`] と [`Self::write`] のエラー
    pub async fn run(&self, dry_run: bool) -> Result<GenerationReport, CatalogError> {
        let catalog = self.compile().await?;

        if dry_run {
            tracing::info!(files = catalog.files.len(), "Dry run, nothing written");
        } else {
            self.write(&catalog).await?;
            tracing::info!(
                files = catalog.files.len(),
                output_dir = %self.output_dir.display(),
                "Catalog generated"
            );
        }

        Ok(GenerationReport {
            languages: catalog.languages,
            files: catalog.files.into_iter().map(|file| file.path).collect(),
            written: !dry_run,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::config::LanguageConfig;
    use crate::test_utils::MemoryFs;

    const BRANCHES_EN: &str = r#"{"translations": {"title": "Branches", "count": {"value": "{{n}} branches", "args": ["n"]}}}"#;
    const BRANCHES_FR: &str = r#"{"translations": {"title": "Branches FR", "count": {"value": "{{n}} branches FR", "args": ["n"]}}}"#;
    const TITLE_EN: &str = r#"{"translations": {"text": "Title"}}"#;

    fn settings(languages: Vec<LanguageConfig>) -> CatalogSettings {
        CatalogSettings { languages, ..CatalogSettings::default() }
    }

    fn three_languages() -> Vec<LanguageConfig> {
        vec![
            LanguageConfig::new("en-gb", Some("English (GB)"), None),
            LanguageConfig::new("fr-fr", Some("Français"), Some("en-gb")),
            LanguageConfig::new("fr-ca", Some("Français (CA)"), Some("fr-fr")),
        ]
    }

    fn generator<'a>(fs: &'a MemoryFs, settings: CatalogSettings) -> CatalogGenerator<'a, MemoryFs> {
        CatalogGenerator::with_target(
            fs,
            TypeScript::default(),
            settings,
            PathBuf::from("/p/src/translations"),
            PathBuf::from("/p/src/values"),
        )
        .unwrap()
    }

    fn project() -> MemoryFs {
        MemoryFs::with_files(&[
            ("/p/src/translations/en-gb/components/tabs/repositoryBranches.json", BRANCHES_EN),
            ("/p/src/translations/en-gb/common/title.json", TITLE_EN),
            ("/p/src/translations/fr-fr/components/tabs/repositoryBranches.json", BRANCHES_FR),
            ("/p/src/translations/fr-ca/.gitkeep", ""),
        ])
    }

    #[tokio::test]
    async fn generates_every_language_and_shared_files() {
        let fs = project();
        let generator = generator(&fs, settings(three_languages()));

        let report = generator.run(false).await.unwrap();

        assert_eq!(
            fs.files_under("/p/src/values"),
            vec![
                PathBuf::from("/p/src/values/en-gb.ts"),
                PathBuf::from("/p/src/values/fr-ca.ts"),
                PathBuf::from("/p/src/values/fr-fr.ts"),
                PathBuf::from("/p/src/values/language.interface.ts"),
                PathBuf::from("/p/src/values/sections.interface.ts"),
            ]
        );
        assert_that!(report.written, eq(true));
        assert_eq!(
            report.languages,
            vec![
                LanguageReport { shortcode: "en-gb".to_string(), own_sections: 2, inherited_sections: 0 },
                LanguageReport { shortcode: "fr-fr".to_string(), own_sections: 1, inherited_sections: 1 },
                LanguageReport { shortcode: "fr-ca".to_string(), own_sections: 0, inherited_sections: 2 },
            ]
        );

        let en = fs.file("/p/src/values/en-gb.ts").unwrap();
        assert_that!(
            en,
            contains_substring(
                "  \"components-tabs-repository-branches\": _componentsTabsRepositoryBranches,"
            )
        );
        let fr = fs.file("/p/src/values/fr-fr.ts").unwrap();
        assert_that!(fr, contains_substring("title: \"Branches FR\","));
        assert_that!(fr, contains_substring("  \"common-title\": engb._commonTitle,"));
        let ca = fs.file("/p/src/values/fr-ca.ts").unwrap();
        assert_that!(ca, contains_substring("import * as frfr from \"./fr-fr\";"));
        assert_that!(
            ca,
            contains_substring(
                "  \"components-tabs-repository-branches\": frfr._componentsTabsRepositoryBranches,"
            )
        );
        assert_that!(ca, contains_substring("  \"common-title\": frfr._commonTitle,"));
    }

    #[tokio::test]
    async fn runs_are_idempotent() {
        let fs = project();
        let generator = generator(&fs, settings(three_languages()));

        generator.run(false).await.unwrap();
        let first: Vec<Option<String>> = fs
            .files_under("/p/src/values")
            .iter()
            .map(|path| fs.file(path.to_str().unwrap()))
            .collect();
        generator.run(false).await.unwrap();
        let second: Vec<Option<String>> = fs
            .files_under("/p/src/values")
            .iter()
            .map(|path| fs.file(path.to_str().unwrap()))
            .collect();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn stale_output_is_removed() {
        let fs = project();
        fs.insert_file(Path::new("/p/src/values/old.ts"), "stale");
        let generator = generator(&fs, settings(three_languages()));

        generator.run(false).await.unwrap();

        assert_that!(fs.file("/p/src/values/old.ts"), none());
    }

    #[tokio::test]
    async fn dry_run_writes_nothing() {
        let fs = project();
        fs.insert_file(Path::new("/p/src/values/old.ts"), "stale");
        let generator = generator(&fs, settings(three_languages()));

        let report = generator.run(true).await.unwrap();

        assert_that!(report.written, eq(false));
        assert_that!(report.files, len(eq(5)));
        assert_eq!(fs.files_under("/p/src/values"), vec![PathBuf::from("/p/src/values/old.ts")]);
    }

    #[tokio::test]
    async fn invalid_language_set_leaves_output_untouched() {
        let fs = project();
        fs.insert_file(Path::new("/p/src/values/old.ts"), "previous");
        let mut languages = three_languages();
        languages.push(LanguageConfig::new("en-us", Some("English (GB)"), Some("en-gb")));
        let generator = generator(&fs, settings(languages));

        let result = generator.run(false).await;

        assert!(matches!(result, Err(CatalogError::DuplicateName { .. })));
        assert_that!(fs.file("/p/src/values/old.ts"), some(eq("previous")));
    }

    #[tokio::test]
    async fn failing_language_aborts_before_writing() {
        let fs = project();
        fs.insert_file(
            Path::new("/p/src/translations/fr-ca/common/title.json"),
            r#"{"translations": {"text": {"value": "{{who}}", "args": []}}}"#,
        );
        let generator = generator(&fs, settings(three_languages()));

        let result = generator.run(false).await;

        assert!(matches!(
            result,
            Err(CatalogError::UndeclaredPlaceholder { ref shortcode, .. }) if shortcode == "fr-ca"
        ));
        assert_that!(fs.files_under("/p/src/values"), is_empty());
    }

    #[tokio::test]
    async fn missing_base_directory() {
        let fs = MemoryFs::default();
        let generator = generator(&fs, CatalogSettings::default());

        let result = generator.compile().await;

        assert!(matches!(result, Err(CatalogError::MissingBaseTranslations { .. })));
    }

    #[tokio::test]
    async fn derived_without_directory_inherits_everything() {
        let fs = MemoryFs::with_files(&[("/p/src/translations/en-gb/common/title.json", TITLE_EN)]);
        let generator = generator(
            &fs,
            settings(vec![
                LanguageConfig::new("en-gb", Some("English (GB)"), None),
                LanguageConfig::new("de", Some("Deutsch"), Some("en-gb")),
            ]),
        );

        let catalog = generator.compile().await.unwrap();

        let de = catalog.file(Path::new("/p/src/values/de.ts")).unwrap();
        assert_that!(de.contents, contains_substring("  \"common-title\": engb._commonTitle,"));
        assert_that!(catalog.languages[1].inherited_sections, eq(1));
    }

    #[tokio::test]
    async fn custom_file_pattern() {
        let fs = MemoryFs::with_files(&[
            ("/p/src/translations/en-gb/title.i18n.json", TITLE_EN),
            ("/p/src/translations/en-gb/ignored.json", TITLE_EN),
        ]);
        let generator = generator(
            &fs,
            CatalogSettings {
                translation_file_pattern: "*.i18n.json".to_string(),
                ..CatalogSettings::default()
            },
        );

        let catalog = generator.compile().await.unwrap();

        let en = catalog.file(Path::new("/p/src/values/en-gb.ts")).unwrap();
        assert_that!(en.contents, contains_substring("export const _titlei18n: Sections.ITitlei18n"));
        assert_that!(en.contents, not(contains_substring("_ignored")));
    }
}
