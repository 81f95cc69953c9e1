//! アプリケーション設定管理モジュール
//!
//! 設定は デフォルト値 → `config.toml` → 環境変数 → CLI引数 の順に重ねる。
//! バックエンドのURLは環境変数 `PREPMATE_API_URL` で上書きできます。

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::interview::flow::DEFAULT_FOLLOW_UP_WARN_THRESHOLD;
use crate::voice::VoiceConfig;

/// バックエンドURLを指定する環境変数
pub const API_URL_ENV: &str = "PREPMATE_API_URL";

const CONFIG_FILE_NAME: &str = "config.toml";

/// バックエンドAPI設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// ベースURL（例: http://localhost:8000）
    pub base_url: String,
    /// リクエストタイムアウト（秒）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// 面接フロー設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// 同じメイン質問での深掘り質問がこの回数を超えたら警告ログを出す
    pub follow_up_warn_threshold: u32,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            follow_up_warn_threshold: DEFAULT_FOLLOW_UP_WARN_THRESHOLD,
        }
    }
}

/// ウィンドウ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub maximized: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            height: 800,
            maximized: false,
        }
    }
}

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// カスタムログディレクトリ（Noneの場合はXDGデフォルト使用）
    pub log_dir: Option<PathBuf>,
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// ファイル出力有効化
    pub enable_file_logging: bool,
    /// 保存するログファイル数上限
    pub max_log_files: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: "info".to_string(),
            enable_file_logging: true,
            max_log_files: 14,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub interview: InterviewConfig,

    /// 音声入出力設定
    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 環境変数による上書きを適用
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            debug!("🌐 API base URL overridden by {}: {}", API_URL_ENV, url);
            self.api.base_url = url.trim().to_string();
        }
    }
}

/// 設定ファイルの読み込み結果
///
/// ロギング初期化前に読み込むため、エラーは呼び出し側で後から記録する。
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub load_error: Option<anyhow::Error>,
}

/// `config.toml` の読み書きを担当
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// プラットフォーム標準の設定ディレクトリを使用
    pub fn locate() -> Result<Self> {
        let path = project_dirs()?.config_dir().join(CONFIG_FILE_NAME);
        debug!("⚙️ [CONFIG] Using {}", path.display());
        Ok(Self { path })
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイルがなければデフォルト値
    pub fn load(&self) -> Result<AppConfig> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("⚙️ [CONFIG] No config at {}, defaults apply", self.path.display());
                return Ok(AppConfig::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("cannot read {}", self.path.display()))
            }
        };

        let config = toml::from_str(&raw)
            .with_context(|| format!("invalid TOML in {}", self.path.display()))?;
        info!("⚙️ [CONFIG] Loaded {}", self.path.display());
        Ok(config)
    }

    /// ファイル・環境変数を順に重ねた最終設定
    ///
    /// ファイルが壊れていてもデフォルト値で続行し、エラーは `load_error` に残す。
    pub fn load_layered(&self, env: impl Fn(&str) -> Option<String>) -> LoadedConfig {
        let (mut config, load_error) = match self.load() {
            Ok(config) => (config, None),
            Err(e) => (AppConfig::default(), Some(e)),
        };
        config.apply_env_with(env);
        LoadedConfig { config, load_error }
    }

    /// 親ディレクトリも必要に応じて作成
    pub fn store(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
        let body = toml::to_string_pretty(config).context("cannot encode config as TOML")?;
        fs::write(&self.path, body)
            .with_context(|| format!("cannot write {}", self.path.display()))?;
        info!("⚙️ [CONFIG] Wrote {}", self.path.display());
        Ok(())
    }
}

/// アプリのXDGディレクトリ（設定・ログ）
pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "prepmate", "prepmate")
        .context("no home directory to place prepmate files in")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = ConfigManager::at(dir.path().join("absent.toml"))
            .load()
            .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.interview.follow_up_warn_threshold,
            DEFAULT_FOLLOW_UP_WARN_THRESHOLD
        );
    }

    #[test]
    fn test_store_creates_directory_and_reloads() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::at(dir.path().join("nested/prepmate/config.toml"));

        let mut config = AppConfig::default();
        config.api.base_url = "https://interviews.example.com".to_string();
        config.interview.follow_up_warn_threshold = 6;
        config.window.maximized = true;
        manager.store(&config).unwrap();

        let reloaded = manager.load().unwrap();
        assert_eq!(reloaded.api.base_url, "https://interviews.example.com");
        assert_eq!(reloaded.interview.follow_up_warn_threshold, 6);
        assert!(reloaded.window.maximized);
    }

    #[test]
    fn test_sections_may_be_omitted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"http://10.0.0.5:9000\"\n").unwrap();

        let config = ConfigManager::at(&path).load().unwrap();

        assert_eq!(config.api.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.log.log_level, "info");
        assert_eq!(config.window.width, 1100);
    }

    #[test]
    fn test_broken_toml_is_reported_and_defaults_used() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbase_url = ").unwrap();

        let loaded = ConfigManager::at(&path).load_layered(|_| None);

        let error = loaded.load_error.expect("broken file must be reported");
        assert!(format!("{:#}", error).contains("invalid TOML"));
        assert_eq!(loaded.config.api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_env_wins_over_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"http://file.example\"\n").unwrap();

        let loaded = ConfigManager::at(&path).load_layered(|key| {
            (key == API_URL_ENV).then(|| " https://env.example ".to_string())
        });

        assert!(loaded.load_error.is_none());
        assert_eq!(loaded.config.api.base_url, "https://env.example");
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_with(|_| Some("   ".to_string()));
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }
}
