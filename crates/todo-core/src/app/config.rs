//! Config - 設定の読み込み
//!
//! figment で以下を重ねる（後勝ち）:
//! 1. `AppConfig::default()`（`Serialized::defaults`）
//! 2. JSON 設定ファイル（指定された場合）
//! 3. 環境変数 `TODO_STORAGE` / `TODO_DATA_PATH` / `TODO_LOG` / `TODO_LOG_EVENTS`
//! 4. CLI フラグ（todo-cli 側で上書き）

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 環境変数のプレフィックス（`TODO_DATA_PATH` → `data_path`）
pub const ENV_PREFIX: &str = "TODO_";

const ENV_KEYS: &[&str] = &["storage", "data_path", "log", "log_events"];

/// ConfigError は設定読み込み時のエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {} does not exist", .0.display())]
    NotFound(PathBuf),

    /// ファイル・環境変数の値が不正（figment がキーと出どころを含めて報告する）
    #[error("invalid configuration: {0}")]
    Extract(#[from] figment::Error),

    #[error("json storage selected but no data path configured (set data_path or TODO_DATA_PATH)")]
    MissingDataPath,
}

/// StorageKind は設定ファイル上のバックエンド種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Memory,
    Json,
}

/// StorageBackend は構築時に注入するストレージ戦略
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    JsonFile(PathBuf),
}

/// AppConfig はアプリケーション設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageKind,
    pub data_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` の書式
    pub log: String,
    /// ドメインイベントをログに出すか
    pub log_events: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::Memory,
            data_path: None,
            log: "warn".to_string(),
            log_events: true,
        }
    }
}

impl AppConfig {
    /// デフォルト → ファイル（あれば）→ 環境変数 の順で読み込む
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path
            && !path.is_file()
        {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let config: AppConfig = Self::figment(path).extract()?;
        tracing::trace!(?config, "configuration extracted");
        Ok(config)
    }

    /// 各ソースを重ねた Figment。呼び出し側でさらに merge できる。
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Json::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
    }

    pub fn storage_backend(&self) -> Result<StorageBackend, ConfigError> {
        match self.storage {
            StorageKind::Memory => Ok(StorageBackend::Memory),
            StorageKind::Json => self
                .data_path
                .clone()
                .map(StorageBackend::JsonFile)
                .ok_or(ConfigError::MissingDataPath),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_use_memory_storage() {
        let config = AppConfig::default();
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.storage_backend().unwrap(), StorageBackend::Memory);
        assert!(config.log_events);
    }

    #[test]
    fn load_without_sources_is_default() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_fields_are_optional() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "todo.json",
                r#"{"storage": "json", "data_path": "/tmp/todos.json"}"#,
            )?;
            let config = AppConfig::load(Some(Path::new("todo.json"))).map_err(|e| e.to_string())?;
            assert_eq!(config.storage, StorageKind::Json);
            assert_eq!(config.log, "warn");
            assert_eq!(
                config.storage_backend().unwrap(),
                StorageBackend::JsonFile(PathBuf::from("/tmp/todos.json"))
            );
            Ok(())
        });
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(path) if path.ends_with("here.json")));
    }

    #[test]
    fn malformed_file_is_extract_error() {
        Jail::expect_with(|jail| {
            jail.create_file("todo.json", r#"{"storage": "sqlite"}"#)?;
            let result = AppConfig::load(Some(Path::new("todo.json")));
            assert!(matches!(result, Err(ConfigError::Extract(_))));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file_values() {
        Jail::expect_with(|jail| {
            jail.create_file("todo.json", r#"{"storage": "memory", "log": "info"}"#)?;
            jail.set_env("TODO_STORAGE", "json");
            jail.set_env("TODO_DATA_PATH", "/data/todos.json");
            jail.set_env("TODO_LOG", "todo_core=debug");
            jail.set_env("TODO_LOG_EVENTS", "false");

            let config = AppConfig::load(Some(Path::new("todo.json"))).map_err(|e| e.to_string())?;
            assert_eq!(config.storage, StorageKind::Json);
            assert_eq!(config.data_path, Some(PathBuf::from("/data/todos.json")));
            assert_eq!(config.log, "todo_core=debug");
            assert!(!config.log_events);
            Ok(())
        });
    }

    #[test]
    fn unrelated_todo_env_vars_are_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("TODO_EDITOR", "vim");
            let config = AppConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn invalid_env_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("TODO_STORAGE", "sqlite");
            assert!(matches!(AppConfig::load(None), Err(ConfigError::Extract(_))));
            Ok(())
        });
    }

    #[test]
    fn figment_accepts_further_layers() {
        let config: AppConfig = AppConfig::figment(None)
            .merge(("log_events", false))
            .extract()
            .unwrap();
        assert!(!config.log_events);
    }

    #[test]
    fn json_storage_without_path_fails() {
        let config = AppConfig {
            storage: StorageKind::Json,
            ..AppConfig::default()
        };
        assert!(matches!(
            config.storage_backend(),
            Err(ConfigError::MissingDataPath)
        ));
    }
}
