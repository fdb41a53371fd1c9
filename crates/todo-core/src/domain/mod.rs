//! Domain model (ids, priority, state, todo record, rules, events, errors).
//!
//! このモジュールは永続化や時刻に依存しません。
//! `rules` が status / priority 遷移の唯一の判断ロジックです。

pub mod errors;
pub mod events;
pub mod ids;
pub mod priority;
pub mod rules;
pub mod state;
pub mod todo;

pub use self::errors::{Result, TodoError};
pub use self::events::TodoEvent;
pub use self::ids::{ParseTodoIdError, TodoId};
pub use self::priority::Priority;
pub use self::rules::{Toggle, Transition, toggle_archived, toggle_completed};
pub use self::state::{TodoState, TodoStatus};
pub use self::todo::{NewTodo, Todo, TodoDraft, TodoPatch};
