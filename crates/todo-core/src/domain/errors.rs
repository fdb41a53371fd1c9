//! Errors - ドメインエラー
//!
//! not-found はエラーにしません（`Option` / `bool` で返す）。
//! 適用できない toggle も no-op であってエラーではありません。

use thiserror::Error;

use super::ids::TodoId;
use crate::ports::StoreError;

/// TodoError は service / domain 層のエラー
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo title cannot be empty")]
    EmptyTitle,

    #[error("invalid priority {0}: must be a positive integer")]
    InvalidPriority(i64),

    #[error("{0} would become active without a priority")]
    MissingPriority(TodoId),

    #[error("invalid status {0:?}: expected active, completed or archived")]
    InvalidStatus(String),

    /// ストレージのエラーはそのまま伝播する
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, TodoError>;
