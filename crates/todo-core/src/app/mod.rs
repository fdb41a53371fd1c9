//! App - アプリケーション層
//!
//! ports を組み合わせてユースケースを実装します。
//!
//! # 主要コンポーネント
//! - **TodoService**: read → rule → write（create / update / toggle / delete）
//! - **TodoServiceBuilder**: ストレージ・時計・イベント出力のワイヤリング
//! - **AppConfig**: 設定ファイル + 環境変数

pub mod builder;
pub mod config;
pub mod service;

pub use self::builder::{BuildError, TodoServiceBuilder};
pub use self::config::{AppConfig, ConfigError, StorageBackend, StorageKind};
pub use self::service::TodoService;
