//! Priority - active な todo 同士の並び順キー

use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::TodoError;

/// Priority は active な todo の並び順を決める正の整数
///
/// - 小さいほど上位（`1` が先頭）
/// - 0 以下は不正値
/// - completed / archived の間は保留され、復帰時に戻す or リセットする
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Priority(u32);

impl Priority {
    /// 先頭の priority（新規作成時のデフォルト、archived からの復帰値）
    pub const TOP: Priority = Priority(1);

    pub fn new(value: i64) -> Result<Self, TodoError> {
        u32::try_from(value)
            .ok()
            .filter(|v| *v >= 1)
            .map(Priority)
            .ok_or(TodoError::InvalidPriority(value))
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::TOP
    }
}

impl TryFrom<i64> for Priority {
    type Error = TodoError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
