//! Todo record and the request types that create / modify it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::errors::{Result, TodoError};
use super::ids::TodoId;
use super::priority::Priority;
use super::state::{TodoState, TodoStatus};

/// Todo record.
///
/// Design:
/// - `id` はストアが採番し、以後変わらない。
/// - status と priority は `state` にまとめて持つ（`TodoState` 参照）。
/// - タイムスタンプは service 層が設定する。rule engine は触らない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Attach a store-assigned id to a draft.
    pub fn from_draft(id: TodoId, draft: TodoDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            state: draft.state,
            created_at: draft.created_at,
            updated_at: draft.created_at,
        }
    }

    pub fn status(&self) -> TodoStatus {
        self.state.status()
    }

    pub fn priority(&self) -> Option<Priority> {
        self.state.priority()
    }

    /// Mark the record as modified at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// A todo that has been validated and stamped but not yet stored (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
}

/// Create request.
///
/// 新しい todo は常に active で作成される。priority 省略時は `Priority::TOP`。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Validate and turn into a draft stamped with `now`.
    pub fn into_draft(self, now: DateTime<Utc>) -> Result<TodoDraft> {
        let title = validate_title(self.title)?;
        Ok(TodoDraft {
            title,
            description: self.description,
            due_date: self.due_date,
            state: TodoState::active(self.priority.unwrap_or(Priority::TOP)),
            created_at: now,
        })
    }
}

/// Generic field update.
///
/// `Option<Option<T>>` のフィールドは `Some(None)` でクリア、`None` で変更なし。
///
/// `status` を直接指定した場合、priority の自動調整は行わない。
/// 現在の priority をそのまま新しい状態へ持ち越し、同じ patch の `priority` があればそれで上書きする。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub status: Option<TodoStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply to `todo` in place. Timestamps are left to the caller.
    ///
    /// Validation happens before any field is written, so on error `todo` is untouched.
    pub fn apply(self, todo: &mut Todo) -> Result<()> {
        let title = self.title.map(validate_title).transpose()?;
        let state = patched_state(todo, self.status, self.priority)?;

        if let Some(title) = title {
            todo.title = title;
        }
        if let Some(description) = self.description {
            todo.description = description;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
        todo.state = state;
        Ok(())
    }
}

fn patched_state(
    todo: &Todo,
    status: Option<TodoStatus>,
    priority: Option<Priority>,
) -> Result<TodoState> {
    let status = status.unwrap_or_else(|| todo.status());
    let priority = priority.or_else(|| todo.priority());
    Ok(match status {
        TodoStatus::Active => TodoState::Active {
            priority: priority.ok_or(TodoError::MissingPriority(todo.id))?,
        },
        TodoStatus::Completed => TodoState::Completed { priority },
        TodoStatus::Archived => TodoState::Archived { priority },
    })
}

fn validate_title(title: String) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    if trimmed.len() == title.len() {
        Ok(title)
    } else {
        Ok(trimmed.to_string())
    }
}
