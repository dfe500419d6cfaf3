//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    CatalogSettings,
    ConfigError,
    loader,
};

/// 設定管理を行う
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: CatalogSettings,

    /// プロジェクトのルートパス
    project_root: PathBuf,
}

impl ConfigManager {
    /// Creates a manager with default settings rooted at `project_root`.
    #[must_use]
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self { current_settings: CatalogSettings::default(), project_root: project_root.into() }
    }

    /// 設定を読み込む
    ///
    /// `config_path` が指定された場合はそのファイルを、そうでなければ
    /// プロジェクトルートの `.i18n-catalog.json` を読み込む。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_path: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", self.project_root);

        let settings = match config_path {
            Some(path) => loader::load_from_file(&self.project_root.join(path))?,
            None => loader::load_from_project(&self.project_root)?.unwrap_or_else(|| {
                tracing::debug!("Using default settings");
                CatalogSettings::default()
            }),
        };

        self.update_settings(settings)
    }

    /// 設定を更新する
    pub fn update_settings(&mut self, new_settings: CatalogSettings) -> Result<(), ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &CatalogSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Translation root, resolved against the project root.
    #[must_use]
    pub fn translations_dir(&self) -> PathBuf {
        self.project_root.join(&self.current_settings.translations_dir)
    }

    /// Output directory, resolved against the project root.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.project_root.join(&self.current_settings.output_dir)
    }
}
