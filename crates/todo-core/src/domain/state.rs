//! State - todo の状態（status + priority）
//!
//! status と priority は独立したフィールドではなく、1 つの tagged union として表現します。
//! active な todo は必ず priority を持ち、completed / archived は保留中の priority を
//! 持つかもしれない、という制約を型で表すためです。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::TodoError;
use super::priority::Priority;

/// TodoStatus は状態の種類だけを表す（フィルタ・表示・patch 用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Active,
    Completed,
    Archived,
}

impl TodoStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::Active => "active",
            TodoStatus::Completed => "completed",
            TodoStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(TodoStatus::Active),
            "completed" => Ok(TodoStatus::Completed),
            "archived" => Ok(TodoStatus::Archived),
            _ => Err(TodoError::InvalidStatus(s.to_string())),
        }
    }
}

/// TodoState は todo の状態
///
/// # 状態
/// - active: 作業リストに載っている（priority 必須）
/// - completed: 完了（priority は保留、復帰時に戻す）
/// - archived: アーカイブ（priority は保留、復帰時は TOP にリセット）
///
/// JSON では `{"status": "active", "priority": 1}` の形にフラットに出ます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TodoState {
    Active { priority: Priority },
    Completed { priority: Option<Priority> },
    Archived { priority: Option<Priority> },
}

impl TodoState {
    pub fn active(priority: Priority) -> Self {
        TodoState::Active { priority }
    }

    pub fn status(&self) -> TodoStatus {
        match self {
            TodoState::Active { .. } => TodoStatus::Active,
            TodoState::Completed { .. } => TodoStatus::Completed,
            TodoState::Archived { .. } => TodoStatus::Archived,
        }
    }

    /// 現在の priority（保留中のものも含む）
    pub fn priority(&self) -> Option<Priority> {
        match *self {
            TodoState::Active { priority } => Some(priority),
            TodoState::Completed { priority } | TodoState::Archived { priority } => priority,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, TodoState::Active { .. })
    }
}

impl Default for TodoState {
    fn default() -> Self {
        TodoState::active(Priority::TOP)
    }
}
