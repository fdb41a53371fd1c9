//! TodoStore port - todo の永続化（storage adapter）
//!
//! バックエンド（メモリ / JSON ファイル）は構築時に明示的に注入します。
//! 実行環境を見て暗黙に切り替えることはしません。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Todo, TodoDraft, TodoId};

/// StoreError はストレージ層のエラー
///
/// service 層は変換せずに `TodoError::Store` として呼び出し側へ返します。
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage is corrupted: {0}")]
    Corrupted(String),
}

/// TodoStore は todo レコードの正本（source of truth）
///
/// # 契約
/// - `insert` が ID を採番する。ID は 1 から単調増加し、削除後も再利用しない
/// - 存在しない ID への `get` / `update` は `None`、`delete` は `false`（エラーではない）
/// - 1 回の呼び出しが 1 つのアトミックな書き込み単位
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos ordered by id.
    async fn all(&self) -> Result<Vec<Todo>, StoreError>;

    async fn get(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;

    /// Store a draft and return it with its assigned id.
    async fn insert(&self, draft: TodoDraft) -> Result<Todo, StoreError>;

    /// Replace the stored record with the same id. `None` if it does not exist.
    async fn update(&self, todo: Todo) -> Result<Option<Todo>, StoreError>;

    /// Remove a record. `false` if it did not exist.
    async fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
}
