//! Events - ドメインイベント
//!
//! service 層が書き込みに成功した後に発行し、`EventSink` に渡します。
//! no-op の toggle ではイベントは発行されません。

use serde::{Deserialize, Serialize};

use super::ids::TodoId;
use super::state::TodoState;

/// TodoEvent はドメインで発生したイベント
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TodoEvent {
    Created { id: TodoId, state: TodoState },
    Updated { id: TodoId, state: TodoState },
    Toggled { id: TodoId, from: TodoState, to: TodoState },
    Deleted { id: TodoId },
}

impl TodoEvent {
    pub fn todo_id(&self) -> TodoId {
        match self {
            TodoEvent::Created { id, .. }
            | TodoEvent::Updated { id, .. }
            | TodoEvent::Toggled { id, .. }
            | TodoEvent::Deleted { id } => *id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TodoEvent::Created { .. } => "created",
            TodoEvent::Updated { .. } => "updated",
            TodoEvent::Toggled { .. } => "toggled",
            TodoEvent::Deleted { .. } => "deleted",
        }
    }
}
