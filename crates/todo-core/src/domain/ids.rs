//! Domain identifiers (strongly-typed IDs).
//!
//! Todo の ID はストアが insert 時に採番する整数です。
//! 生の `u64` をそのまま引き回さず、newtype で包んで他の整数と混同できないようにします。
//!
//! ## 表示形式
//! - Display: `todo-42`
//! - FromStr: `42` と `todo-42` のどちらも受け付ける（CLI 入力用）
//! - serde: 素の整数（`#[serde(transparent)]`）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "todo-";

/// Identifier of a Todo.
///
/// 採番後は不変。ストア内で再利用されることはありません。
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得
    pub const fn get(self) -> u64 {
        self.0
    }

    /// 次に採番される ID（`u64::MAX` の次は無い）
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for TodoId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PREFIX, self.0)
    }
}

/// ParseTodoIdError は ID 文字列のパース失敗
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid todo id: {0:?}")]
pub struct ParseTodoIdError(String);

impl FromStr for TodoId {
    type Err = ParseTodoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix(PREFIX).unwrap_or(digits);
        digits
            .parse::<u64>()
            .map(TodoId)
            .map_err(|_| ParseTodoIdError(s.to_string()))
    }
}
